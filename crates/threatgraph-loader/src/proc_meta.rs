//! Process-metadata enrichment and system-process suppression (spec §3
//! invariants, §4.1 step 4-5).

use threatgraph_core::{DataBag, EdgeRecord, Graph, VertexKind};

const PROC_FIELDS: [&str; 3] = ["image", "command_line", "parent_process_path"];

/// Copies recognized `proc` fields embedded on an edge's `data` bag onto
/// whichever endpoint is a `proc` vertex, without overwriting fields the
/// vertex already has.
pub fn maybe_fill_proc_meta(graph: &mut Graph, edge: &EdgeRecord) {
    let mut enrichment = DataBag::new();
    for field in PROC_FIELDS {
        if let Some(value) = edge.data.get_any(field) {
            enrichment.0.insert(field.to_string(), value.clone());
        }
    }
    if enrichment.0.is_empty() {
        return;
    }
    for endpoint in [edge.from, edge.to] {
        if graph.vertex(endpoint).kind == VertexKind::Proc {
            graph.merge_vertex_data(endpoint, enrichment.clone());
        }
    }
}

/// Populates a `proc` vertex's `image` field from an `ImageOfEdge` whose
/// source is a `path`/`file` vertex, if the process lacks one already
/// (spec §3 invariant on `ImageOfEdge`).
pub fn maybe_fill_proc_meta_from_image_edge(graph: &mut Graph, edge: &EdgeRecord) {
    if &*edge.edge_type != "ImageOfEdge" {
        return;
    }
    let from_kind = graph.vertex(edge.from).kind.clone();
    let to_kind = graph.vertex(edge.to).kind.clone();
    if !matches!(from_kind, VertexKind::Path | VertexKind::File) || to_kind != VertexKind::Proc {
        return;
    }
    if graph.vertex(edge.to).data.has("image") {
        return;
    }
    let payload = payload_of(graph.identifier(edge.from));
    let mut enrichment = DataBag::new();
    enrichment.set_str("image", payload);
    graph.merge_vertex_data(edge.to, enrichment);
}

fn payload_of(identifier: &str) -> String {
    identifier.split_once(':').map(|(_, payload)| payload).unwrap_or(identifier).to_string()
}

/// Whether a `proc` vertex's `image` path falls under one of the
/// configured system-process prefixes (case-insensitive).
pub fn is_system_process(graph: &Graph, idx: threatgraph_core::VertexIdx, prefixes: &[String]) -> bool {
    let vertex = graph.vertex(idx);
    if vertex.kind != VertexKind::Proc {
        return false;
    }
    let Some(image) = vertex.data.str_field("image") else {
        return false;
    };
    let lowered = image.to_lowercase();
    prefixes.iter().any(|prefix| lowered.starts_with(&prefix.to_lowercase()))
}

/// Whether `edge` is an incident path/file edge of a system process and
/// should be suppressed during load (spec §3 invariant).
pub fn should_skip_file_edge(graph: &Graph, edge: &EdgeRecord, prefixes: &[String]) -> bool {
    let from_kind = graph.vertex(edge.from).kind.clone();
    let to_kind = graph.vertex(edge.to).kind.clone();

    let from_is_file_like = matches!(from_kind, VertexKind::Path | VertexKind::File);
    let to_is_file_like = matches!(to_kind, VertexKind::Path | VertexKind::File);

    if to_kind == VertexKind::Proc && from_is_file_like && is_system_process(graph, edge.to, prefixes) {
        return true;
    }
    if from_kind == VertexKind::Proc && to_is_file_like && is_system_process(graph, edge.from, prefixes) {
        return true;
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::rc::Rc;
    use threatgraph_core::OrderingKey;

    fn make_edge(graph: &mut Graph, from: &str, to: &str, ty: &str) -> EdgeRecord {
        EdgeRecord {
            from: graph.intern_vertex(from),
            to: graph.intern_vertex(to),
            edge_type: Rc::from(ty),
            ordering_key: None as OrderingKey,
            event_id: None,
            ioa_tags: Vec::new(),
            data: DataBag::new(),
        }
    }

    #[test]
    fn image_of_edge_fills_missing_process_image() {
        let mut graph = Graph::new();
        let edge = make_edge(&mut graph, "path:C:\\tools\\evil.exe", "proc:1234", "ImageOfEdge");
        maybe_fill_proc_meta_from_image_edge(&mut graph, &edge);
        assert_eq!(graph.vertex(edge.to).data.str_field("image"), Some("C:\\tools\\evil.exe"));
    }

    #[test]
    fn image_of_edge_does_not_overwrite_existing_image() {
        let mut graph = Graph::new();
        let edge = make_edge(&mut graph, "path:C:\\tools\\evil.exe", "proc:1234", "ImageOfEdge");
        let mut existing = DataBag::new();
        existing.set_str("image", "C:\\real.exe");
        graph.set_vertex_data(edge.to, existing);
        maybe_fill_proc_meta_from_image_edge(&mut graph, &edge);
        assert_eq!(graph.vertex(edge.to).data.str_field("image"), Some("C:\\real.exe"));
    }

    #[test]
    fn system_process_file_edges_are_suppressed() {
        let mut graph = Graph::new();
        let edge = make_edge(&mut graph, "path:C:\\Windows\\System32\\svchost.exe", "proc:1", "ImageOfEdge");
        maybe_fill_proc_meta_from_image_edge(&mut graph, &edge);
        let prefixes = vec!["c:\\windows\\system32\\".to_string()];
        assert!(should_skip_file_edge(&graph, &edge, &prefixes));
    }

    #[test]
    fn non_system_process_file_edges_are_kept() {
        let mut graph = Graph::new();
        let edge = make_edge(&mut graph, "path:C:\\tools\\evil.exe", "proc:1", "ImageOfEdge");
        maybe_fill_proc_meta_from_image_edge(&mut graph, &edge);
        let prefixes = vec!["c:\\windows\\system32\\".to_string()];
        assert!(!should_skip_file_edge(&graph, &edge, &prefixes));
    }
}
