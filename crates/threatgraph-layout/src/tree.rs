//! Tree layout with barycentric crossing reduction (spec §4.6 "Tree").

use crate::common::{LayoutConfig, LayoutResult};
use crate::placement::place_layers;
use rustc_hash::{FxHashMap, FxHashSet};
use std::cmp::Ordering;
use std::collections::VecDeque;
use threatgraph_core::{EdgeIdx, Graph, OrderingKey, VertexIdx, VertexKind};

const SWEEP_COUNT: usize = 6;

/// Builds the tree layout: BFS depth over the tree-edge subset
/// (fallback: all edges), earliest-timestamp-then-identifier ordering
/// within each level, six alternating barycentric sweeps, and a final
/// pass attaching non-`proc` vertices one level under their adjacent
/// `proc` when that is shallower than their BFS depth (spec §4.6).
pub fn layout_tree(
    graph: &Graph,
    vertices: &[VertexIdx],
    edges: &[EdgeIdx],
    tree_edges: &FxHashSet<EdgeIdx>,
    seeds: &[VertexIdx],
    config: &LayoutConfig,
) -> LayoutResult {
    let effective: Vec<EdgeIdx> = if tree_edges.is_empty() { edges.to_vec() } else { edges.iter().copied().filter(|e| tree_edges.contains(e)).collect() };

    let mut depth = compute_bfs_depth(graph, vertices, &effective, seeds);
    attach_non_proc_near_proc(graph, vertices, edges, &mut depth);

    let max_depth = depth.values().copied().max().unwrap_or(0);
    let mut layers: Vec<Vec<VertexIdx>> = vec![Vec::new(); max_depth + 1];
    for &v in vertices {
        layers[depth[&v]].push(v);
    }
    for layer in &mut layers {
        layer.sort_by(|&a, &b| order_key(graph, edges, a).partial_cmp(&order_key(graph, edges, b)).unwrap());
    }

    let (parents, children) = parent_child_maps(graph, &effective);
    reduce_crossings(&mut layers, &parents, &children);

    place_layers(graph, &layers, config)
}

fn compute_bfs_depth(graph: &Graph, vertices: &[VertexIdx], effective: &[EdgeIdx], seeds: &[VertexIdx]) -> FxHashMap<VertexIdx, usize> {
    let mut out: FxHashMap<VertexIdx, Vec<VertexIdx>> = FxHashMap::default();
    for &eidx in effective {
        let edge = graph.edge(eidx);
        out.entry(edge.from).or_default().push(edge.to);
    }

    let mut depth: FxHashMap<VertexIdx, usize> = vertices.iter().map(|&v| (v, 0)).collect();
    let mut visited: FxHashSet<VertexIdx> = FxHashSet::default();
    let mut queue: VecDeque<VertexIdx> = VecDeque::new();
    for &seed in seeds {
        if visited.insert(seed) {
            depth.insert(seed, 0);
            queue.push_back(seed);
        }
    }
    while let Some(u) = queue.pop_front() {
        let Some(children) = out.get(&u) else { continue };
        for &v in children {
            if visited.insert(v) {
                depth.insert(v, depth[&u] + 1);
                queue.push_back(v);
            }
        }
    }
    depth
}

fn attach_non_proc_near_proc(graph: &Graph, vertices: &[VertexIdx], edges: &[EdgeIdx], depth: &mut FxHashMap<VertexIdx, usize>) {
    let mut adjacent_procs: FxHashMap<VertexIdx, Vec<VertexIdx>> = FxHashMap::default();
    for &eidx in edges {
        let edge = graph.edge(eidx);
        if graph.vertex(edge.from).kind == VertexKind::Proc {
            adjacent_procs.entry(edge.to).or_default().push(edge.from);
        }
        if graph.vertex(edge.to).kind == VertexKind::Proc {
            adjacent_procs.entry(edge.from).or_default().push(edge.to);
        }
    }
    for &v in vertices {
        if graph.vertex(v).kind == VertexKind::Proc {
            continue;
        }
        let Some(procs) = adjacent_procs.get(&v) else { continue };
        let best = procs.iter().filter_map(|p| depth.get(p)).copied().min();
        if let Some(proc_depth) = best {
            let candidate = proc_depth + 1;
            if candidate < depth[&v] {
                depth.insert(v, candidate);
            }
        }
    }
}

/// Earliest incident edge timestamp, then identifier (spec §4.6: "Node
/// ordering within a level is the earliest edge timestamp, ties by
/// identifier").
fn order_key(graph: &Graph, edges: &[EdgeIdx], v: VertexIdx) -> (f64, String) {
    let earliest = edges
        .iter()
        .map(|&e| graph.edge(e))
        .filter(|edge| edge.from == v || edge.to == v)
        .filter_map(|edge| ts_of(&edge.ordering_key))
        .fold(f64::INFINITY, f64::min);
    (earliest, graph.identifier(v).to_string())
}

fn ts_of(key: &OrderingKey) -> Option<f64> {
    key.as_ref().and_then(|k| k.ts)
}

fn parent_child_maps(graph: &Graph, effective: &[EdgeIdx]) -> (FxHashMap<VertexIdx, Vec<VertexIdx>>, FxHashMap<VertexIdx, Vec<VertexIdx>>) {
    let mut parents: FxHashMap<VertexIdx, Vec<VertexIdx>> = FxHashMap::default();
    let mut children: FxHashMap<VertexIdx, Vec<VertexIdx>> = FxHashMap::default();
    for &eidx in effective {
        let edge = graph.edge(eidx);
        parents.entry(edge.to).or_default().push(edge.from);
        children.entry(edge.from).or_default().push(edge.to);
    }
    (parents, children)
}

/// Six iterations, each a full down-sweep over every layer followed by a
/// full up-sweep over every layer (12 total passes) — spec §4.6, Design
/// Notes §9: stable sort, ties broken by current position then
/// identifier — handled here by `order_key`'s initial sort plus a
/// stable `sort_by` on every sweep.
fn reduce_crossings(layers: &mut [Vec<VertexIdx>], parents: &FxHashMap<VertexIdx, Vec<VertexIdx>>, children: &FxHashMap<VertexIdx, Vec<VertexIdx>>) {
    if layers.len() < 2 {
        return;
    }
    for _ in 0..SWEEP_COUNT {
        for layer_idx in 1..layers.len() {
            let reference = position_index(&layers[layer_idx - 1]);
            reorder_layer(&mut layers[layer_idx], &reference, parents);
        }
        for layer_idx in (0..layers.len() - 1).rev() {
            let reference = position_index(&layers[layer_idx + 1]);
            reorder_layer(&mut layers[layer_idx], &reference, children);
        }
    }
}

fn position_index(layer: &[VertexIdx]) -> FxHashMap<VertexIdx, usize> {
    layer.iter().enumerate().map(|(i, &v)| (v, i)).collect()
}

fn reorder_layer(layer: &mut Vec<VertexIdx>, reference: &FxHashMap<VertexIdx, usize>, neighbor_map: &FxHashMap<VertexIdx, Vec<VertexIdx>>) {
    let barycenters: Vec<Option<f64>> = layer
        .iter()
        .map(|v| {
            let neighbors = neighbor_map.get(v);
            let positions: Vec<f64> = neighbors
                .into_iter()
                .flatten()
                .filter_map(|n| reference.get(n).map(|&p| p as f64))
                .collect();
            if positions.is_empty() { None } else { Some(positions.iter().sum::<f64>() / positions.len() as f64) }
        })
        .collect();

    let mut indices: Vec<usize> = (0..layer.len()).collect();
    indices.sort_by(|&a, &b| match (barycenters[a], barycenters[b]) {
        (Some(x), Some(y)) => x.partial_cmp(&y).unwrap(),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });
    *layer = indices.into_iter().map(|i| layer[i]).collect();
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::rc::Rc;
    use threatgraph_core::{DataBag, EdgeRecord, TimeKey};

    fn edge(graph: &mut Graph, from: &str, to: &str, ty: &str, ts: f64) -> EdgeIdx {
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

    #[test]
    fn minimal_tree_places_chain_top_to_bottom() {
        let mut graph = Graph::new();
        let ab = edge(&mut graph, "proc:A", "proc:B", "ParentOfEdge", 1.0);
        let bc = edge(&mut graph, "proc:B", "proc:C", "ParentOfEdge", 2.0);
        let a = graph.lookup_identifier("proc:A").unwrap();
        let b = graph.lookup_identifier("proc:B").unwrap();
        let c = graph.lookup_identifier("proc:C").unwrap();
        let vertices = vec![a, b, c];
        let edges = vec![ab, bc];
        let mut tree_edges = FxHashSet::default();
        tree_edges.insert(ab);
        tree_edges.insert(bc);
        let result = layout_tree(&graph, &vertices, &edges, &tree_edges, &[a], &LayoutConfig::default());
        assert!(result.positions[&a].y < result.positions[&b].y);
        assert!(result.positions[&b].y < result.positions[&c].y);
    }
}
