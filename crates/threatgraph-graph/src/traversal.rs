//! The single time-respecting relaxation walk shared by the subgraph
//! builder (spec §4.2) and the paths-through filter (spec §4.3), plus the
//! untimed structural closure used by the IOA pruner (spec §4.4).

use crate::index::Index;
use rustc_hash::{FxHashMap, FxHashSet};
use std::collections::VecDeque;
use threatgraph_core::{EdgeIdx, Graph, OrderingKey, VertexIdx};

/// The edges retained by a walk, plus the subset that first discovered
/// each vertex (meaningful only for the forward seed walk; empty for
/// paths-through and structural-closure walks).
#[derive(Debug, Default)]
pub struct WalkResult {
    pub edges: Vec<EdgeIdx>,
    pub tree_edges: FxHashSet<EdgeIdx>,
}

/// Direction of traversal: which index to read from, and which endpoint
/// of an edge to continue to.
pub enum Direction {
    Forward,
    Reverse,
}

fn edges_from<'a>(index: &'a Index, direction: &Direction, v: VertexIdx) -> &'a [EdgeIdx] {
    match direction {
        Direction::Forward => index.out_edges(v),
        Direction::Reverse => index.in_edges(v),
    }
}

fn next_vertex(graph: &Graph, direction: &Direction, edge: EdgeIdx) -> VertexIdx {
    let edge = graph.edge(edge);
    match direction {
        Direction::Forward => edge.to,
        Direction::Reverse => edge.from,
    }
}

/// Time-respecting relaxation walk (spec §4.2 "best arrival time",
/// §4.3 "reverse/forward BFS from anchors"). `seeds` supplies each
/// starting vertex's initial bound: `None` for a true seed (no lower
/// bound, never beaten — spec §4.2), `Some(key)` to bound the walk by an
/// anchor edge's own ordering key (spec §4.3).
///
/// `Direction::Forward` uses `time_ge`/`should_update_forward` (earliest
/// wins); `Direction::Reverse` uses `time_le`/`should_update_reverse`
/// (latest wins) — selected by `admit`/`should_update`.
pub fn timed_walk(
    graph: &Graph,
    index: &Index,
    direction: Direction,
    seeds: impl IntoIterator<Item = (VertexIdx, OrderingKey)>,
    admit: impl Fn(&OrderingKey, &OrderingKey) -> bool,
    should_update: impl Fn(&OrderingKey, &OrderingKey) -> bool,
) -> WalkResult {
    let mut bound: FxHashMap<VertexIdx, OrderingKey> = FxHashMap::default();
    let mut queue: VecDeque<VertexIdx> = VecDeque::new();
    let mut included: FxHashSet<EdgeIdx> = FxHashSet::default();
    let mut tree_edges: FxHashSet<EdgeIdx> = FxHashSet::default();
    let mut edges: Vec<EdgeIdx> = Vec::new();

    for (seed, initial) in seeds {
        match bound.get(&seed) {
            None => {
                bound.insert(seed, initial);
                queue.push_back(seed);
            }
            Some(existing) => {
                if should_update(existing, &initial) {
                    bound.insert(seed, initial);
                    queue.push_back(seed);
                }
            }
        }
    }

    while let Some(u) = queue.pop_front() {
        let current = *bound.get(&u).expect("vertex was enqueued with a bound");
        for &eidx in edges_from(index, &direction, u) {
            let edge = graph.edge(eidx);
            if !admit(&edge.ordering_key, &current) {
                continue;
            }
            if included.insert(eidx) {
                edges.push(eidx);
            }
            let v = next_vertex(graph, &direction, eidx);
            match bound.get(&v) {
                None => {
                    bound.insert(v, edge.ordering_key);
                    tree_edges.insert(eidx);
                    queue.push_back(v);
                }
                Some(existing) => {
                    if should_update(existing, &edge.ordering_key) {
                        bound.insert(v, edge.ordering_key);
                        queue.push_back(v);
                    }
                }
            }
        }
    }

    WalkResult { edges, tree_edges }
}

/// Plain reachability with no time constraint (spec §4.4: "no time
/// constraint here — this is structural closure"). Returns the edges
/// traversed in discovery order.
pub fn structural_closure(
    graph: &Graph,
    index: &Index,
    direction: Direction,
    seeds: impl IntoIterator<Item = VertexIdx>,
) -> Vec<EdgeIdx> {
    let mut visited: FxHashSet<VertexIdx> = FxHashSet::default();
    let mut queue: VecDeque<VertexIdx> = VecDeque::new();
    let mut included: FxHashSet<EdgeIdx> = FxHashSet::default();
    let mut edges: Vec<EdgeIdx> = Vec::new();

    for seed in seeds {
        if visited.insert(seed) {
            queue.push_back(seed);
        }
    }

    while let Some(u) = queue.pop_front() {
        for &eidx in edges_from(index, &direction, u) {
            if included.insert(eidx) {
                edges.push(eidx);
            }
            let v = next_vertex(graph, &direction, eidx);
            if visited.insert(v) {
                queue.push_back(v);
            }
        }
    }

    edges
}
