//! IOA-anchored structural pruning (spec §4.4).

use crate::index::Index;
use crate::traversal::{structural_closure, Direction, WalkResult};
use rustc_hash::FxHashSet;
use threatgraph_core::{EdgeIdx, Graph};

/// Retains IOA edges plus their reverse/forward structural closure (no
/// time constraint), preserving `candidate_edges`' original order (spec
/// §4.4). Returns an empty result when no edge in `candidate_edges`
/// carries an IOA tag.
pub fn prune_to_ioa(graph: &Graph, candidate_edges: &[EdgeIdx], tree_edges: &FxHashSet<EdgeIdx>) -> WalkResult {
    let ioa_edges: Vec<EdgeIdx> = candidate_edges.iter().copied().filter(|&e| graph.edge(e).is_ioa()).collect();
    if ioa_edges.is_empty() {
        return WalkResult::default();
    }

    let index = Index::build(graph, candidate_edges);

    let reverse_seeds = ioa_edges.iter().map(|&e| graph.edge(e).from);
    let reverse_edges = structural_closure(graph, &index, Direction::Reverse, reverse_seeds);

    let forward_seeds = ioa_edges.iter().map(|&e| graph.edge(e).to);
    let forward_edges = structural_closure(graph, &index, Direction::Forward, forward_seeds);

    let mut retained: FxHashSet<EdgeIdx> = FxHashSet::default();
    retained.extend(ioa_edges.iter().copied());
    retained.extend(reverse_edges.iter().copied());
    retained.extend(forward_edges.iter().copied());

    let edges = candidate_edges.iter().copied().filter(|e| retained.contains(e)).collect();
    let tree_edges = tree_edges.iter().copied().filter(|e| retained.contains(e)).collect();

    WalkResult { edges, tree_edges }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::rc::Rc;
    use threatgraph_core::{DataBag, EdgeRecord, IoaTag};

    fn push(graph: &mut Graph, from: &str, to: &str, ioa: bool) -> EdgeIdx {
        let from = graph.intern_vertex(from);
        let to = graph.intern_vertex(to);
        let ioa_tags = if ioa { vec![IoaTag { name: Some("Susp".into()), ..Default::default() }] } else { vec![] };
        graph
            .push_edge(EdgeRecord { from, to, edge_type: Rc::from("X"), ordering_key: None, event_id: None, ioa_tags, data: DataBag::new() })
            .unwrap()
    }

    #[test]
    fn ioa_pruning_excises_unrelated_branches() {
        // spec §8 (d): A->B (ioa), A->X, X->Y retained; Q->R disconnected excluded.
        let mut graph = Graph::new();
        let ab = push(&mut graph, "proc:A", "proc:B", true);
        let ax = push(&mut graph, "proc:A", "proc:X", false);
        let xy = push(&mut graph, "proc:X", "proc:Y", false);
        let qr = push(&mut graph, "proc:Q", "proc:R", false);
        let all = vec![ab, ax, xy, qr];
        let result = prune_to_ioa(&graph, &all, &FxHashSet::default());
        assert_eq!(result.edges, vec![ab, ax, xy]);
        assert!(!result.edges.contains(&qr));
    }

    #[test]
    fn empty_ioa_set_yields_empty_graph() {
        let mut graph = Graph::new();
        let ab = push(&mut graph, "proc:A", "proc:B", false);
        let all = vec![ab];
        let result = prune_to_ioa(&graph, &all, &FxHashSet::default());
        assert!(result.edges.is_empty());
    }

    #[test]
    fn surviving_tree_edges_are_preserved() {
        let mut graph = Graph::new();
        let ab = push(&mut graph, "proc:A", "proc:B", true);
        let mut tree_edges = FxHashSet::default();
        tree_edges.insert(ab);
        let all = vec![ab];
        let result = prune_to_ioa(&graph, &all, &tree_edges);
        assert!(result.tree_edges.contains(&ab));
    }
}
