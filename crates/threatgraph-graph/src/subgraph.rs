//! Seed-anchored subgraph construction (spec §4.2).

use crate::index::Index;
use crate::traversal::{timed_walk, Direction, WalkResult};
use threatgraph_core::{should_update_forward, time_ge, Graph, VertexIdx};

/// Builds the time-respecting forward subgraph reachable from `seeds`
/// (spec §4.2). Each seed enters with no lower bound (`⊥`), so every
/// outgoing edge is initially admissible regardless of timing.
pub fn seed_bfs(graph: &Graph, candidate_edges: &[threatgraph_core::EdgeIdx], seeds: &[VertexIdx]) -> WalkResult {
    let index = Index::build(graph, candidate_edges);
    let seeded = seeds.iter().map(|&s| (s, None));
    timed_walk(graph, &index, Direction::Forward, seeded, time_ge, should_update_forward)
}
