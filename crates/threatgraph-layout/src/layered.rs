//! Longest-path layering (spec §4.6 "Layered").

use crate::common::{LayoutConfig, LayoutResult};
use crate::placement::place_layers;
use rustc_hash::{FxHashMap, FxHashSet};
use std::collections::VecDeque;
use threatgraph_core::{EdgeIdx, Graph, VertexIdx};

/// Longest-path layering over `layer_edges` (falling back to all edges
/// when `layer_edges` is empty). Uses a Kahn's-algorithm-style
/// indegree relaxation: zero-indegree nodes start at level 0; a child's
/// level is relaxed to `max(child, parent + 1)` while its indegree is
/// decremented and it is enqueued on reaching zero. Nodes never reached
/// (e.g. inside a cycle) default to level 0 (spec §4.6).
pub fn compute_longest_path_layers(
    graph: &Graph,
    vertices: &[VertexIdx],
    edges: &[EdgeIdx],
    layer_edges: &FxHashSet<String>,
) -> FxHashMap<VertexIdx, usize> {
    let restricted: Vec<EdgeIdx> = if layer_edges.is_empty() {
        edges.to_vec()
    } else {
        edges.iter().copied().filter(|&e| layer_edges.contains(&*graph.edge(e).edge_type)).collect()
    };
    let effective = if restricted.is_empty() { edges.to_vec() } else { restricted };

    let mut out: FxHashMap<VertexIdx, Vec<VertexIdx>> = FxHashMap::default();
    let mut indegree: FxHashMap<VertexIdx, usize> = vertices.iter().map(|&v| (v, 0)).collect();
    for &eidx in &effective {
        let edge = graph.edge(eidx);
        out.entry(edge.from).or_default().push(edge.to);
        *indegree.entry(edge.to).or_insert(0) += 1;
    }

    let mut level: FxHashMap<VertexIdx, usize> = vertices.iter().map(|&v| (v, 0)).collect();
    let mut queue: VecDeque<VertexIdx> = vertices.iter().copied().filter(|v| indegree.get(v).copied().unwrap_or(0) == 0).collect();

    while let Some(u) = queue.pop_front() {
        let Some(children) = out.get(&u).cloned() else { continue };
        for v in children {
            let candidate = level[&u] + 1;
            if candidate > *level.get(&v).unwrap_or(&0) {
                level.insert(v, candidate);
            }
            if let Some(count) = indegree.get_mut(&v) {
                *count -= 1;
                if *count == 0 {
                    queue.push_back(v);
                }
            }
        }
    }

    level
}

/// Builds the full layered layout (spec §4.6).
pub fn layout_layered(graph: &Graph, vertices: &[VertexIdx], edges: &[EdgeIdx], config: &LayoutConfig) -> LayoutResult {
    let levels = compute_longest_path_layers(graph, vertices, edges, &config.layer_edges);
    let max_level = levels.values().copied().max().unwrap_or(0);
    let mut layers: Vec<Vec<VertexIdx>> = vec![Vec::new(); max_level + 1];
    for &v in vertices {
        layers[levels[&v]].push(v);
    }
    place_layers(graph, &layers, config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::rc::Rc;
    use threatgraph_core::{DataBag, EdgeRecord};

    fn edge(graph: &mut Graph, from: &str, to: &str, ty: &str) -> EdgeIdx {
        let from = graph.intern_vertex(from);
        let to = graph.intern_vertex(to);
        graph
            .push_edge(EdgeRecord { from, to, edge_type: Rc::from(ty), ordering_key: None, event_id: None, ioa_tags: vec![], data: DataBag::new() })
            .unwrap()
    }

    #[test]
    fn chain_gets_increasing_levels() {
        let mut graph = Graph::new();
        let ab = edge(&mut graph, "proc:A", "proc:B", "ParentOfEdge");
        let bc = edge(&mut graph, "proc:B", "proc:C", "ParentOfEdge");
        let a = graph.lookup_identifier("proc:A").unwrap();
        let b = graph.lookup_identifier("proc:B").unwrap();
        let c = graph.lookup_identifier("proc:C").unwrap();
        let vertices = vec![a, b, c];
        let edges = vec![ab, bc];
        let levels = compute_longest_path_layers(&graph, &vertices, &edges, &FxHashSet::default());
        assert_eq!(levels[&a], 0);
        assert_eq!(levels[&b], 1);
        assert_eq!(levels[&c], 2);
    }

    #[test]
    fn unreached_nodes_default_to_level_zero() {
        let mut graph = Graph::new();
        let isolated = graph.intern_vertex("proc:Lonely");
        let ab = edge(&mut graph, "proc:A", "proc:B", "ParentOfEdge");
        let a = graph.lookup_identifier("proc:A").unwrap();
        let b = graph.lookup_identifier("proc:B").unwrap();
        let vertices = vec![a, b, isolated];
        let edges = vec![ab];
        let levels = compute_longest_path_layers(&graph, &vertices, &edges, &FxHashSet::default());
        assert_eq!(levels[&isolated], 0);
    }
}
