//! Circular layout (spec §4.6).

use crate::common::{LayoutResult, Position};
use std::f64::consts::PI;
use threatgraph_core::VertexIdx;

/// Radius `r = 80 + 20·√n`, centered at `(r + 120, r + 120)`, angle
/// `2πi/n` (spec §4.6). Deterministic.
pub fn layout_circle(vertices: &[VertexIdx]) -> LayoutResult {
    let n = vertices.len();
    if n == 0 {
        return LayoutResult { positions: Default::default(), width: 240.0, height: 240.0 };
    }
    let r = 80.0 + 20.0 * (n as f64).sqrt();
    let center = r + 120.0;
    let mut positions = rustc_hash::FxHashMap::default();
    for (i, &v) in vertices.iter().enumerate() {
        let angle = 2.0 * PI * (i as f64) / (n as f64);
        positions.insert(v, Position::new(center + r * angle.cos(), center + r * angle.sin()));
    }
    let side = 2.0 * center;
    LayoutResult { positions, width: side, height: side }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_vertex_lands_on_the_circle() {
        let v = VertexIdx(0);
        let result = layout_circle(&[v]);
        assert!(result.positions.contains_key(&v));
        assert_eq!(result.width, result.height);
    }

    #[test]
    fn is_deterministic() {
        let vs: Vec<_> = (0..5).map(VertexIdx).collect();
        let a = layout_circle(&vs);
        let b = layout_circle(&vs);
        for v in &vs {
            assert_eq!(a.positions[v], b.positions[v]);
        }
    }
}
