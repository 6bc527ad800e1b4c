//! Bounding-box normalization: tight-crop the layout, translate it into
//! a fixed margin, optionally reserve space for a legend, and scale
//! down to fit a maximum canvas dimension.

use crate::common::Position;
use crate::label::{build_label, label_size};
use rustc_hash::FxHashMap;
use threatgraph_core::{Graph, VertexIdx};

const MARGIN: f64 = 40.0;
const LEGEND_WIDTH: f64 = 260.0;

/// Translates `positions` so the tight bounding box (every node's
/// padded rectangle included) sits at `(MARGIN, MARGIN)`, then returns
/// the canvas `(width, height)`. When `legend` is set, 260px is
/// reserved on the right before any `max_size` scaling is applied, so
/// the legend itself is never shrunk out of the frame.
pub fn normalize(
    graph: &Graph,
    positions: &mut FxHashMap<VertexIdx, Position>,
    vertices: &[VertexIdx],
    padding: f64,
    legend: bool,
    max_size: Option<f64>,
) -> (f64, f64) {
    if vertices.is_empty() {
        let side = 2.0 * MARGIN;
        return (side, side);
    }

    let half_sizes: FxHashMap<VertexIdx, (f64, f64)> = vertices
        .iter()
        .map(|&v| {
            let size = label_size(&build_label(graph, v));
            (v, (size.width / 2.0 + padding, size.height / 2.0 + padding))
        })
        .collect();

    let mut min_x = f64::INFINITY;
    let mut min_y = f64::INFINITY;
    let mut max_x = f64::NEG_INFINITY;
    let mut max_y = f64::NEG_INFINITY;
    for &v in vertices {
        let Some(&pos) = positions.get(&v) else { continue };
        let (hw, hh) = half_sizes[&v];
        min_x = min_x.min(pos.x - hw);
        min_y = min_y.min(pos.y - hh);
        max_x = max_x.max(pos.x + hw);
        max_y = max_y.max(pos.y + hh);
    }

    let dx = MARGIN - min_x;
    let dy = MARGIN - min_y;
    for pos in positions.values_mut() {
        pos.x += dx;
        pos.y += dy;
    }

    let box_width = max_x - min_x;
    let box_height = max_y - min_y;
    let mut width = box_width + 2.0 * MARGIN;
    let mut height = box_height + 2.0 * MARGIN;
    if legend {
        width += LEGEND_WIDTH;
    }

    if let Some(max_size) = max_size {
        if width > max_size || height > max_size {
            let scale = (max_size / width).min(max_size / height);
            for pos in positions.values_mut() {
                pos.x *= scale;
                pos.y *= scale;
            }
            width *= scale;
            height *= scale;
        }
    }

    (width, height)
}
