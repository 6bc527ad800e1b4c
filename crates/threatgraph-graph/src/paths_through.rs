//! Bidirectional time-respecting traversal anchored on "special" edge
//! types (spec §4.3).

use crate::index::Index;
use crate::traversal::{timed_walk, Direction};
use rustc_hash::FxHashSet;
use threatgraph_core::{should_update_forward, should_update_reverse, time_ge, time_le, EdgeIdx, Graph};

/// Retains the union of anchor edges, edges on time-respecting paths
/// reaching their sources, and edges on time-respecting paths leaving
/// their destinations (spec §4.3). A no-op returning `candidate_edges`
/// unchanged when `anchor_types` is empty.
pub fn filter_paths_through(graph: &Graph, candidate_edges: &[EdgeIdx], anchor_types: &FxHashSet<String>) -> Vec<EdgeIdx> {
    if anchor_types.is_empty() {
        return candidate_edges.to_vec();
    }

    let anchors: Vec<EdgeIdx> =
        candidate_edges.iter().copied().filter(|&e| anchor_types.contains(&*graph.edge(e).edge_type)).collect();

    let index = Index::build(graph, candidate_edges);

    let reverse_seeds = anchors.iter().map(|&e| {
        let edge = graph.edge(e);
        (edge.from, edge.ordering_key)
    });
    let reverse_walk = timed_walk(graph, &index, Direction::Reverse, reverse_seeds, time_le, should_update_reverse);

    let forward_seeds = anchors.iter().map(|&e| {
        let edge = graph.edge(e);
        (edge.to, edge.ordering_key)
    });
    let forward_walk = timed_walk(graph, &index, Direction::Forward, forward_seeds, time_ge, should_update_forward);

    let mut retained: FxHashSet<EdgeIdx> = FxHashSet::default();
    retained.extend(anchors.iter().copied());
    retained.extend(reverse_walk.edges.iter().copied());
    retained.extend(forward_walk.edges.iter().copied());

    candidate_edges.iter().copied().filter(|e| retained.contains(e)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::rc::Rc;
    use threatgraph_core::{DataBag, EdgeRecord, TimeKey};

    fn push(graph: &mut Graph, from: &str, to: &str, ty: &str, ts: f64) -> EdgeIdx {
        let from = graph.intern_vertex(from);
        let to = graph.intern_vertex(to);
        graph
            .push_edge(EdgeRecord {
                from,
                to,
                edge_type: Rc::from(ty),
                ordering_key: Some(TimeKey::new(Some(ts), None)),
                event_id: None,
                ioa_tags: vec![],
                data: DataBag::new(),
            })
            .unwrap()
    }

    fn types(names: &[&str]) -> FxHashSet<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn paths_through_created_file_edge_retains_whole_chain() {
        // spec §8 (c): A->B Connect ts=1, B->C CreatedFile ts=2, C->D CreatedFile ts=3.
        let mut graph = Graph::new();
        let ab = push(&mut graph, "proc:A", "net:B", "ConnectEdge", 1.0);
        let bc = push(&mut graph, "net:B", "file:C", "CreatedFileEdge", 2.0);
        let cd = push(&mut graph, "file:C", "file:D", "CreatedFileEdge", 3.0);
        let all = vec![ab, bc, cd];
        let result = filter_paths_through(&graph, &all, &types(&["CreatedFileEdge"]));
        assert_eq!(result, vec![ab, bc, cd]);
    }

    #[test]
    fn paths_through_connect_edge_retains_anchor_plus_forward_walk() {
        let mut graph = Graph::new();
        let ab = push(&mut graph, "proc:A", "net:B", "ConnectEdge", 1.0);
        let bc = push(&mut graph, "net:B", "file:C", "CreatedFileEdge", 2.0);
        let cd = push(&mut graph, "file:C", "file:D", "CreatedFileEdge", 3.0);
        let all = vec![ab, bc, cd];
        let result = filter_paths_through(&graph, &all, &types(&["ConnectEdge"]));
        assert_eq!(result, vec![ab, bc, cd]);
    }

    #[test]
    fn empty_anchor_types_is_a_no_op() {
        let mut graph = Graph::new();
        let ab = push(&mut graph, "proc:A", "net:B", "ConnectEdge", 1.0);
        let all = vec![ab];
        let result = filter_paths_through(&graph, &all, &FxHashSet::default());
        assert_eq!(result, all);
    }
}
