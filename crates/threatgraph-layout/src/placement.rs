//! Shared layer-to-coordinate placement for the three layered layout
//! variants (`layered`, `tree`, `time` — spec §4.6's closing paragraph):
//! "inter-layer spacing is `layer_gap` and intra-layer spacing is
//! `node_gap`; both are lifted to accommodate the largest label plus
//! padding. `rankdir` swaps axes after placement."

use crate::common::{LayoutConfig, LayoutResult, Position, RankDir};
use crate::label::{build_label, label_size};
use rustc_hash::FxHashMap;
use threatgraph_core::{Graph, VertexIdx};

/// Places `layers` (outermost index = layer order, top to bottom in
/// `TopToBottom` orientation) into final coordinates.
///
/// Spacing is a single global floor applied uniformly to every slot
/// (`effective_node_gap`/`effective_layer_gap`, each at least the
/// largest label dimension across the whole graph plus `2 *
/// node_padding`), not a per-node running cursor: every node in a layer
/// sits at `idx * effective_node_gap`, and every layer sits at `idx *
/// effective_layer_gap`, matching the original's fixed grid.
pub fn place_layers(graph: &Graph, layers: &[Vec<VertexIdx>], config: &LayoutConfig) -> LayoutResult {
    let sizes: FxHashMap<VertexIdx, (f64, f64)> = layers
        .iter()
        .flatten()
        .map(|&v| {
            let size = label_size(&build_label(graph, v));
            (v, (size.width, size.height))
        })
        .collect();

    let max_width = sizes.values().map(|(w, _)| *w).fold(0.0_f64, f64::max);
    let max_height = sizes.values().map(|(_, h)| *h).fold(0.0_f64, f64::max);

    let effective_layer_gap = config.layer_gap.max(max_height + 2.0 * config.node_padding);
    let effective_node_gap = config.node_gap.max(max_width + 2.0 * config.node_padding);

    let mut positions: FxHashMap<VertexIdx, Position> = FxHashMap::default();

    for (layer_idx, layer) in layers.iter().enumerate() {
        let y = layer_idx as f64 * effective_layer_gap;
        for (node_idx, &v) in layer.iter().enumerate() {
            let x = node_idx as f64 * effective_node_gap;
            positions.insert(v, Position::new(x, y));
        }
    }

    if config.rankdir == RankDir::LeftToRight {
        for pos in positions.values_mut() {
            std::mem::swap(&mut pos.x, &mut pos.y);
        }
    }

    let (width, height) = bounding_dimensions(&positions, &sizes);
    LayoutResult { positions, width, height }
}

fn bounding_dimensions(positions: &FxHashMap<VertexIdx, Position>, sizes: &FxHashMap<VertexIdx, (f64, f64)>) -> (f64, f64) {
    let mut max_x = 0.0_f64;
    let mut max_y = 0.0_f64;
    for (v, pos) in positions {
        let (w, h) = sizes[v];
        max_x = max_x.max(pos.x + w / 2.0);
        max_y = max_y.max(pos.y + h / 2.0);
    }
    (max_x, max_y)
}
