//! Vertex label composition and box sizing (spec §4.5).

use threatgraph_core::{Graph, Vertex, VertexIdx, VertexKind};

const MAX_LABEL_LEN: usize = 60;

/// Box width/height for a label, per spec §4.5: width `clamp(100, 240,
/// 7·max_line_len + 20)`, height `max(30, 18·line_count + 16)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LabelSize {
    pub width: f64,
    pub height: f64,
}

/// Builds the two-line `kind\npayload` label for a vertex (spec §4.5).
pub fn build_label(graph: &Graph, idx: VertexIdx) -> String {
    let vertex = graph.vertex(idx);
    let payload = payload_of(graph.identifier(idx));
    let second_line = match vertex.kind {
        VertexKind::Proc => proc_payload(vertex, &payload),
        VertexKind::Path => basename(vertex.data.str_field("path").unwrap_or(&payload)).to_string(),
        VertexKind::File => vertex.data.str_field("sha256").unwrap_or(&payload).to_string(),
        VertexKind::Net => net_payload(vertex, &payload),
        VertexKind::Domain => vertex.data.str_field("domain").unwrap_or(&payload).to_string(),
        VertexKind::Event | VertexKind::Unknown => payload.clone(),
    };
    format!("{}\n{}", vertex.kind.as_str(), truncate_ellipsis(&second_line))
}

fn proc_payload(vertex: &Vertex, payload: &str) -> String {
    let image = vertex.data.str_field("image").unwrap_or(payload);
    let base = basename(image);
    if base.eq_ignore_ascii_case("svchost.exe") {
        if let Some(cmd) = vertex.data.str_field("command_line") {
            return cmd.to_string();
        }
    }
    base.to_string()
}

fn net_payload(vertex: &Vertex, payload: &str) -> String {
    match (vertex.data.str_field("ip"), vertex.data.str_field("port")) {
        (Some(ip), Some(port)) => format!("{ip}:{port}"),
        (Some(ip), None) => ip.to_string(),
        _ => payload.to_string(),
    }
}

fn payload_of(identifier: &str) -> String {
    identifier.split_once(':').map(|(_, payload)| payload).unwrap_or(identifier).to_string()
}

fn basename(path: &str) -> &str {
    path.rsplit(['/', '\\']).next().unwrap_or(path)
}

/// Truncates `s` with an ellipsis at [`MAX_LABEL_LEN`] characters.
pub fn truncate_ellipsis(s: &str) -> String {
    if s.chars().count() <= MAX_LABEL_LEN {
        return s.to_string();
    }
    let mut truncated: String = s.chars().take(MAX_LABEL_LEN - 3).collect();
    truncated.push_str("...");
    truncated
}

/// Computes a label's box size (spec §4.5).
pub fn label_size(label: &str) -> LabelSize {
    let lines: Vec<&str> = label.split('\n').collect();
    let max_line_len = lines.iter().map(|l| l.chars().count()).max().unwrap_or(0) as f64;
    let line_count = lines.len() as f64;
    let width = (7.0 * max_line_len + 20.0).clamp(100.0, 240.0);
    let height = (18.0 * line_count + 16.0).max(30.0);
    LabelSize { width, height }
}
