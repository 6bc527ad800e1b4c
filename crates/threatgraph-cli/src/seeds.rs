//! Seed resolution (spec Glossary "Seed"): a vertex supplied by
//! `--focus`, by finding roots, or by `--proc-name` substring match
//! against `proc` vertices' `image` field.

use threatgraph_core::{Graph, VertexIdx, VertexKind};

/// Resolves every configured seed source into a deduplicated set of
/// known vertices. Seed identifiers that are not present in `graph` are
/// silently dropped (a focus vertex absent from the filtered graph is
/// simply not a usable seed, not a fatal condition).
pub fn resolve_seeds(graph: &Graph, focus: Option<&str>, finding_roots: &[String], proc_name: Option<&str>) -> Vec<VertexIdx> {
    let mut seen = rustc_hash::FxHashSet::default();
    let mut seeds = Vec::new();

    let mut push = |id: VertexIdx| {
        if seen.insert(id) {
            seeds.push(id);
        }
    };

    if let Some(focus) = focus {
        if let Some(idx) = graph.lookup_identifier(focus) {
            push(idx);
        } else {
            tracing::warn!(focus, "focus vertex not found in loaded graph");
        }
    }

    for root in finding_roots {
        if let Some(idx) = graph.lookup_identifier(root) {
            push(idx);
        } else {
            tracing::warn!(root, "finding root not found in loaded graph");
        }
    }

    if let Some(needle) = proc_name {
        for vertex in graph.vertices() {
            if vertex.kind != VertexKind::Proc {
                continue;
            }
            let image = vertex.data.str_field("image").unwrap_or_default();
            if image.to_lowercase().contains(&needle.to_lowercase()) {
                push(vertex.id);
            }
        }
    }

    seeds
}

#[cfg(test)]
mod tests {
    use super::*;
    use threatgraph_core::DataBag;

    #[test]
    fn resolves_focus_vertex() {
        let mut graph = Graph::new();
        let a = graph.intern_vertex("proc:A");
        let seeds = resolve_seeds(&graph, Some("proc:A"), &[], None);
        assert_eq!(seeds, vec![a]);
    }

    #[test]
    fn unknown_focus_is_dropped_not_fatal() {
        let graph = Graph::new();
        let seeds = resolve_seeds(&graph, Some("proc:missing"), &[], None);
        assert!(seeds.is_empty());
    }

    #[test]
    fn proc_name_matches_case_insensitively_on_image() {
        let mut graph = Graph::new();
        let idx = graph.intern_vertex("proc:1234");
        let mut data = DataBag::new();
        data.set_str("image", "C:\\Windows\\System32\\SvcHost.exe");
        graph.set_vertex_data(idx, data);
        let seeds = resolve_seeds(&graph, None, &[], Some("svchost"));
        assert_eq!(seeds, vec![idx]);
    }

    #[test]
    fn deduplicates_across_sources() {
        let mut graph = Graph::new();
        let a = graph.intern_vertex("proc:A");
        let seeds = resolve_seeds(&graph, Some("proc:A"), &["proc:A".to_string()], None);
        assert_eq!(seeds, vec![a]);
    }
}
