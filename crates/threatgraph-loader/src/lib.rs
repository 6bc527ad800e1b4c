//! JSONL adjacency/finding parsing, structural filters, and process
//! metadata enrichment (spec §4.1).

pub mod adjacency;
pub mod detect;
pub mod filter;
pub mod finding;
pub mod proc_meta;

pub use adjacency::*;
pub use detect::*;
pub use filter::*;
pub use finding::*;

use std::path::Path;
use threatgraph_core::{Graph, Result, ThreatGraphError};

/// Outcome of loading a single input file: the constructed graph plus
/// any finding roots (seed candidates), empty for adjacency input.
#[derive(Debug)]
pub struct LoadOutcome {
    pub graph: Graph,
    pub finding_roots: Vec<String>,
}

/// Reads `path`, detects its kind per `kind_hint`, and loads it into a
/// fresh [`Graph`]. A missing file is reported as [`ThreatGraphError::InputMissing`]
/// (spec §4.1 "Failure modes": "Missing input file is a fatal
/// precondition").
pub fn load_from_path(path: &Path, kind_hint: InputKindHint, filters: &LoadFilterConfig) -> Result<LoadOutcome> {
    let content = std::fs::read_to_string(path).map_err(|err| match err.kind() {
        std::io::ErrorKind::NotFound => ThreatGraphError::InputMissing(path.display().to_string()),
        _ => ThreatGraphError::Io(err),
    })?;

    let kind = match kind_hint {
        InputKindHint::Adjacency => InputKind::Adjacency,
        InputKindHint::Finding => InputKind::Finding,
        InputKindHint::Auto => detect_input_kind(content.lines()),
    };

    match kind {
        InputKind::Adjacency => {
            let graph = load_adjacency(&content, filters);
            Ok(LoadOutcome { graph, finding_roots: Vec::new() })
        }
        InputKind::Finding => {
            let mut graph = Graph::new();
            let finding_roots = load_finding(&content, &mut graph, filters);
            Ok(LoadOutcome { graph, finding_roots })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn missing_input_is_reported_as_input_missing() {
        let result = load_from_path(Path::new("/nonexistent/path.jsonl"), InputKindHint::Auto, &LoadFilterConfig::default());
        assert!(matches!(result, Err(ThreatGraphError::InputMissing(_))));
    }

    #[test]
    fn auto_hint_detects_adjacency_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "{{\"record_type\":\"vertex\",\"vertex_id\":\"proc:A\"}}").unwrap();
        let outcome = load_from_path(file.path(), InputKindHint::Auto, &LoadFilterConfig::default()).unwrap();
        assert_eq!(outcome.graph.vertex_count(), 1);
        assert!(outcome.finding_roots.is_empty());
    }
}
