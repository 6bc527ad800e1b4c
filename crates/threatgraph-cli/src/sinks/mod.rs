//! Renderer sink interface (spec §4.10, §6). Each sink consumes the
//! finished [`crate::pipeline::PipelineOutput`] and emits nodes, edges,
//! routed paths, and legend as abstract draw calls — full SVG
//! serialization is a downstream concern (spec §1 "out of scope").

pub mod colors;
pub mod dot;
pub mod json_out;
pub mod simple_svg;

use std::io::Write;
use std::path::Path;
use threatgraph_core::{Result, ThreatGraphError};

/// Writes `contents` to `path` via a temp file in the same directory
/// followed by a rename, so a sink never partially writes its output
/// (spec §7: "The engine never partially writes a sink").
pub fn write_atomic(path: &Path, contents: &str) -> Result<()> {
    let dir = path.parent().filter(|p| !p.as_os_str().is_empty()).unwrap_or_else(|| Path::new("."));
    let mut tmp = tempfile::NamedTempFile::new_in(dir).map_err(ThreatGraphError::Io)?;
    tmp.write_all(contents.as_bytes()).map_err(ThreatGraphError::Io)?;
    tmp.persist(path).map_err(|err| ThreatGraphError::Io(err.error))?;
    Ok(())
}
