//! Fruchterman-Reingold force-directed layout (spec §4.6, §5).

use crate::common::{force_iteration_budget, LayoutConfig, LayoutResult, Position};
use crate::rng::Lcg;
use rustc_hash::FxHashMap;
use threatgraph_core::{EdgeIdx, Graph, VertexIdx};

const EPSILON: f64 = 0.01;

/// Deterministic Fruchterman-Reingold layout seeded by `config.seed`
/// (spec §4.6, §5). Left intentionally sequential (Design Notes §9).
pub fn layout_force(graph: &Graph, vertices: &[VertexIdx], edges: &[EdgeIdx], config: &LayoutConfig) -> LayoutResult {
    let n = vertices.len();
    if n == 0 {
        return LayoutResult { positions: Default::default(), width: 600.0, height: 600.0 };
    }

    let side = (200.0 + 30.0 * (n as f64).sqrt()).max(600.0);
    let area = side * side;
    let k = (area / n as f64).sqrt();

    let mut index_of: FxHashMap<VertexIdx, usize> = FxHashMap::default();
    for (i, &v) in vertices.iter().enumerate() {
        index_of.insert(v, i);
    }

    let mut rng = Lcg::new(config.seed);
    let mut pos: Vec<Position> = (0..n).map(|_| Position::new(rng.uniform(0.0, side), rng.uniform(0.0, side))).collect();

    let unique_edges: Vec<(usize, usize)> = unique_undirected_pairs(graph, edges, &index_of);

    let iters = force_iteration_budget(n, config.iterations);
    let mut temperature = side / 10.0;

    for _ in 0..iters {
        let mut disp = vec![Position::new(0.0, 0.0); n];

        for u in 0..n {
            for v in (u + 1)..n {
                let dx = pos[u].x - pos[v].x;
                let dy = pos[u].y - pos[v].y;
                let d = (dx * dx + dy * dy).sqrt().max(EPSILON);
                let force = (k * k) / d;
                let (ux, uy) = (dx / d, dy / d);
                disp[u].x += ux * force;
                disp[u].y += uy * force;
                disp[v].x -= ux * force;
                disp[v].y -= uy * force;
            }
        }

        for &(u, v) in &unique_edges {
            let dx = pos[u].x - pos[v].x;
            let dy = pos[u].y - pos[v].y;
            let d = (dx * dx + dy * dy).sqrt().max(EPSILON);
            let force = (d * d) / k;
            let (ux, uy) = (dx / d, dy / d);
            disp[u].x -= ux * force;
            disp[u].y -= uy * force;
            disp[v].x += ux * force;
            disp[v].y += uy * force;
        }

        let center = side / 2.0;
        for i in 0..n {
            disp[i].x += (center - pos[i].x) * 0.01;
            disp[i].y += (center - pos[i].y) * 0.01;
        }

        for i in 0..n {
            let len = (disp[i].x * disp[i].x + disp[i].y * disp[i].y).sqrt();
            if len > temperature && len > 0.0 {
                pos[i].x += disp[i].x / len * temperature;
                pos[i].y += disp[i].y / len * temperature;
            } else {
                pos[i].x += disp[i].x;
                pos[i].y += disp[i].y;
            }
            pos[i].x = pos[i].x.clamp(0.0, side);
            pos[i].y = pos[i].y.clamp(0.0, side);
        }

        temperature *= 0.92;
    }

    let positions = vertices.iter().enumerate().map(|(i, &v)| (v, pos[i])).collect();
    LayoutResult { positions, width: side, height: side }
}

fn unique_undirected_pairs(graph: &Graph, edges: &[EdgeIdx], index_of: &FxHashMap<VertexIdx, usize>) -> Vec<(usize, usize)> {
    let mut seen = rustc_hash::FxHashSet::default();
    let mut pairs = Vec::new();
    for &eidx in edges {
        let edge = graph.edge(eidx);
        let (Some(&u), Some(&v)) = (index_of.get(&edge.from), index_of.get(&edge.to)) else { continue };
        if u == v {
            continue;
        }
        let key = if u < v { (u, v) } else { (v, u) };
        if seen.insert(key) {
            pairs.push(key);
        }
    }
    pairs
}
