//! Pairwise overlap separation for non-tree layouts (force, circle,
//! layered, time): nudges overlapping labels apart along whichever axis
//! has the smaller overlap, iterating until a budgeted pass produces no
//! further shifts.

use crate::common::{overlap_iteration_budget, LayoutConfig};
use crate::label::{build_label, label_size};
use rustc_hash::FxHashMap;
use threatgraph_core::{Graph, VertexIdx};

use crate::common::Position;

/// Separates overlapping node rectangles in place. Node size is the
/// two-line label box; `config.node_padding` is the minimum gap
/// enforced between adjacent rectangles.
pub fn separate_overlaps(graph: &Graph, positions: &mut FxHashMap<VertexIdx, Position>, vertices: &[VertexIdx], config: &LayoutConfig) {
    let n = vertices.len();
    if n < 2 {
        return;
    }

    let sizes: FxHashMap<VertexIdx, (f64, f64)> = vertices
        .iter()
        .map(|&v| {
            let size = label_size(&build_label(graph, v));
            (v, (size.width, size.height))
        })
        .collect();

    let budget = overlap_iteration_budget(n);
    for _ in 0..budget {
        let mut moved = false;

        for i in 0..n {
            for j in (i + 1)..n {
                let u = vertices[i];
                let v = vertices[j];
                let pu = positions[&u];
                let pv = positions[&v];
                let (wu, hu) = sizes[&u];
                let (wv, hv) = sizes[&v];

                let dx = pv.x - pu.x;
                let dy = pv.y - pu.y;
                let overlap_x = (wu / 2.0 + wv / 2.0 + config.node_padding) - dx.abs();
                let overlap_y = (hu / 2.0 + hv / 2.0 + config.node_padding) - dy.abs();

                if overlap_x > 0.0 && overlap_y > 0.0 {
                    moved = true;
                    if overlap_x < overlap_y {
                        let shift = overlap_x / 2.0 + 1.0;
                        let sign = if dx >= 0.0 { 1.0 } else { -1.0 };
                        positions.get_mut(&u).unwrap().x -= sign * shift;
                        positions.get_mut(&v).unwrap().x += sign * shift;
                    } else {
                        let shift = overlap_y / 2.0 + 1.0;
                        let sign = if dy >= 0.0 { 1.0 } else { -1.0 };
                        positions.get_mut(&u).unwrap().y -= sign * shift;
                        positions.get_mut(&v).unwrap().y += sign * shift;
                    }
                }
            }
        }

        if !moved {
            break;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use threatgraph_core::Graph;

    #[test]
    fn coincident_nodes_get_pushed_apart() {
        let mut graph = Graph::new();
        let a = graph.intern_vertex("proc:A");
        let b = graph.intern_vertex("proc:B");
        let mut positions = FxHashMap::default();
        positions.insert(a, Position::new(100.0, 100.0));
        positions.insert(b, Position::new(100.0, 100.0));
        let vertices = vec![a, b];
        separate_overlaps(&graph, &mut positions, &vertices, &LayoutConfig::default());
        let d = ((positions[&a].x - positions[&b].x).powi(2) + (positions[&a].y - positions[&b].y).powi(2)).sqrt();
        assert!(d > 0.0);
    }

    #[test]
    fn already_separated_nodes_are_left_alone() {
        let mut graph = Graph::new();
        let a = graph.intern_vertex("proc:A");
        let b = graph.intern_vertex("proc:B");
        let mut positions = FxHashMap::default();
        positions.insert(a, Position::new(0.0, 0.0));
        positions.insert(b, Position::new(10_000.0, 10_000.0));
        let vertices = vec![a, b];
        let before = positions.clone();
        separate_overlaps(&graph, &mut positions, &vertices, &LayoutConfig::default());
        assert_eq!(positions[&a], before[&a]);
        assert_eq!(positions[&b], before[&b]);
    }

    /// spec §8 (f): 50 nodes stacked at identical coordinates converge to a
    /// pairwise non-overlapping placement within the iteration budget.
    #[test]
    fn fifty_coincident_nodes_converge_to_non_overlapping() {
        let mut graph = Graph::new();
        let mut positions = FxHashMap::default();
        let mut vertices = Vec::new();
        for i in 0..50 {
            let v = graph.intern_vertex(&format!("proc:{i}"));
            positions.insert(v, Position::new(500.0, 500.0));
            vertices.push(v);
        }

        let config = LayoutConfig::default();
        separate_overlaps(&graph, &mut positions, &vertices, &config);

        let sizes: FxHashMap<VertexIdx, (f64, f64)> = vertices
            .iter()
            .map(|&v| {
                let size = label_size(&build_label(&graph, v));
                (v, (size.width, size.height))
            })
            .collect();

        for i in 0..vertices.len() {
            for j in (i + 1)..vertices.len() {
                let u = vertices[i];
                let v = vertices[j];
                let pu = positions[&u];
                let pv = positions[&v];
                let (wu, hu) = sizes[&u];
                let (wv, hv) = sizes[&v];
                let overlap_x = (wu / 2.0 + wv / 2.0 + config.node_padding) - (pv.x - pu.x).abs();
                let overlap_y = (hu / 2.0 + hv / 2.0 + config.node_padding) - (pv.y - pu.y).abs();
                assert!(overlap_x <= 0.0 || overlap_y <= 0.0, "nodes {i} and {j} still overlap after separation");
            }
        }
    }
}
