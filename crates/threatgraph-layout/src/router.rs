//! Cubic-Bezier edge routing with penalty-minimizing candidate
//! selection (spec §4.9).

use crate::common::{LayoutConfig, Position};
use crate::label::{build_label, label_size};
use rustc_hash::FxHashMap;
use threatgraph_core::{EdgeIdx, Graph, VertexIdx};

const SAMPLE_COUNT: usize = 19;
const CURVATURE_MAGNITUDES: [f64; 4] = [1.0, 1.6, 2.3, 3.0];
const CURVATURE_SCALE: f64 = 30.0;
const NODE_OVERLAP_PENALTY: f64 = 500.0;
const PROXIMITY_RADIUS: f64 = 14.0;
const PROXIMITY_WEIGHT: f64 = 60.0;

/// A routed edge: the candidate cubic Bezier's control points plus its
/// sampled polyline (used to penalize subsequent edges' proximity).
#[derive(Debug, Clone)]
pub struct RoutedEdge {
    pub edge: EdgeIdx,
    pub p0: Position,
    pub c1: Position,
    pub c2: Position,
    pub p3: Position,
    pub samples: Vec<Position>,
}

/// Routes every edge in `edges`, in order, against the node layout in
/// `positions` (spec §4.9). Earlier edges' sampled polylines contribute
/// to later edges' proximity penalty, so routing order matters and is
/// deterministic (the caller's `edges` order).
pub fn route_edges(
    graph: &Graph,
    positions: &FxHashMap<VertexIdx, Position>,
    vertices: &[VertexIdx],
    edges: &[EdgeIdx],
    is_tree_layout: bool,
    config: &LayoutConfig,
) -> Vec<RoutedEdge> {
    let half_sizes: FxHashMap<VertexIdx, (f64, f64)> = vertices
        .iter()
        .map(|&v| {
            let size = label_size(&build_label(graph, v));
            (v, (size.width / 2.0, size.height / 2.0))
        })
        .collect();

    let mut routed: Vec<RoutedEdge> = Vec::with_capacity(edges.len());

    for &eidx in edges {
        let edge = graph.edge(eidx);
        let (Some(&from_pos), Some(&to_pos)) = (positions.get(&edge.from), positions.get(&edge.to)) else { continue };
        let from_half = half_sizes.get(&edge.from).copied().unwrap_or((0.0, 0.0));
        let to_half = half_sizes.get(&edge.to).copied().unwrap_or((0.0, 0.0));

        let p0 = shrink_point(from_pos, to_pos, from_half, config.node_padding);
        let p3 = shrink_point(to_pos, from_pos, to_half, config.node_padding);

        let candidates = candidate_controls(p0, p3, is_tree_layout, config.edge_curve);

        let mut best: Option<(f64, Position, Position, Vec<Position>)> = None;
        for (c1, c2) in candidates {
            let samples = sample_cubic(p0, c1, c2, p3, SAMPLE_COUNT);
            let penalty = path_penalty(positions, &half_sizes, edge.from, edge.to, &samples, &routed);
            if best.as_ref().map(|(p, ..)| penalty < *p).unwrap_or(true) {
                best = Some((penalty, c1, c2, samples));
            }
        }

        let (_, c1, c2, samples) = best.expect("at least one routing candidate is always generated");
        routed.push(RoutedEdge { edge: eidx, p0, c1, c2, p3, samples });
    }

    routed
}

/// Steps from `from` outward along the `from -> to` direction until the
/// visual line stops at `from`'s padded bounding box perimeter (spec
/// §4.9 step 1).
fn shrink_point(from: Position, to: Position, half: (f64, f64), padding: f64) -> Position {
    let dx = to.x - from.x;
    let dy = to.y - from.y;
    if dx.abs() < f64::EPSILON && dy.abs() < f64::EPSILON {
        return from;
    }
    let (hw, hh) = (half.0 + padding, half.1 + padding);
    let tx = if dx.abs() > f64::EPSILON { hw / dx.abs() } else { f64::INFINITY };
    let ty = if dy.abs() > f64::EPSILON { hh / dy.abs() } else { f64::INFINITY };
    let t = tx.min(ty).min(1.0);
    Position::new(from.x + dx * t, from.y + dy * t)
}

/// Builds the path candidate set (spec §4.9 step 2).
fn candidate_controls(p0: Position, p3: Position, is_tree_layout: bool, edge_curve: f64) -> Vec<(Position, Position)> {
    if is_tree_layout {
        let voff = (40.0_f64).max(0.4 * (p3.y - p0.y).abs());
        let signed = if p3.y >= p0.y { voff } else { -voff };
        return vec![(Position::new(p0.x, p0.y + signed), Position::new(p3.x, p3.y - signed))];
    }

    if edge_curve == 0.0 {
        let c1 = lerp(p0, p3, 1.0 / 3.0);
        let c2 = lerp(p0, p3, 2.0 / 3.0);
        return vec![(c1, c2)];
    }

    let dx = p3.x - p0.x;
    let dy = p3.y - p0.y;
    let len = (dx * dx + dy * dy).sqrt().max(f64::EPSILON);
    let perp = Position::new(-dy / len, dx / len);

    let mut candidates = Vec::with_capacity(8);
    for magnitude in CURVATURE_MAGNITUDES {
        for sign in [1.0, -1.0] {
            let offset = magnitude * sign * CURVATURE_SCALE * edge_curve;
            let c1 = Position::new(
                lerp(p0, p3, 1.0 / 3.0).x + perp.x * offset,
                lerp(p0, p3, 1.0 / 3.0).y + perp.y * offset,
            );
            let c2 = Position::new(
                lerp(p0, p3, 2.0 / 3.0).x + perp.x * offset,
                lerp(p0, p3, 2.0 / 3.0).y + perp.y * offset,
            );
            candidates.push((c1, c2));
        }
    }
    candidates
}

fn lerp(a: Position, b: Position, t: f64) -> Position {
    Position::new(a.x + (b.x - a.x) * t, a.y + (b.y - a.y) * t)
}

fn cubic_point(p0: Position, c1: Position, c2: Position, p3: Position, t: f64) -> Position {
    let mt = 1.0 - t;
    let x = mt.powi(3) * p0.x + 3.0 * mt.powi(2) * t * c1.x + 3.0 * mt * t.powi(2) * c2.x + t.powi(3) * p3.x;
    let y = mt.powi(3) * p0.y + 3.0 * mt.powi(2) * t * c1.y + 3.0 * mt * t.powi(2) * c2.y + t.powi(3) * p3.y;
    Position::new(x, y)
}

fn sample_cubic(p0: Position, c1: Position, c2: Position, p3: Position, count: usize) -> Vec<Position> {
    (0..count)
        .map(|i| {
            let t = i as f64 / (count - 1) as f64;
            cubic_point(p0, c1, c2, p3, t)
        })
        .collect()
}

/// Penalty for a candidate polyline (spec §4.9 step 3): `+500` per
/// non-endpoint node whose padded rectangle contains a sample, plus
/// `+60·(14 − d)` for every previously routed edge's sample within 14
/// pixels.
fn path_penalty(
    positions: &FxHashMap<VertexIdx, Position>,
    half_sizes: &FxHashMap<VertexIdx, (f64, f64)>,
    from: VertexIdx,
    to: VertexIdx,
    samples: &[Position],
    previously_routed: &[RoutedEdge],
) -> f64 {
    let mut penalty = 0.0;

    for (&v, &center) in positions {
        if v == from || v == to {
            continue;
        }
        let Some(&(hw, hh)) = half_sizes.get(&v) else { continue };
        for sample in samples {
            if (sample.x - center.x).abs() <= hw && (sample.y - center.y).abs() <= hh {
                penalty += NODE_OVERLAP_PENALTY;
            }
        }
    }

    for other in previously_routed {
        for sample in samples {
            for other_sample in &other.samples {
                let d = ((sample.x - other_sample.x).powi(2) + (sample.y - other_sample.y).powi(2)).sqrt();
                if d < PROXIMITY_RADIUS {
                    penalty += PROXIMITY_WEIGHT * (PROXIMITY_RADIUS - d);
                }
            }
        }
    }

    penalty
}
