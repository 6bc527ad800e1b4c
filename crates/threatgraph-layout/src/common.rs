//! Shared types for the layout engine (spec §4.6).

use rustc_hash::FxHashMap;
use rustc_hash::FxHashSet;
use threatgraph_core::VertexIdx;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// `positions: vertex → (x, y)` with `y` growing downward, plus the
/// total canvas `(width, height)` (spec §4.6).
#[derive(Debug, Default)]
pub struct LayoutResult {
    pub positions: FxHashMap<VertexIdx, Position>,
    pub width: f64,
    pub height: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RankDir {
    TopToBottom,
    LeftToRight,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutKind {
    Force,
    Circle,
    Layered,
    Tree,
    Time,
}

/// Layout/routing configuration (SPEC_FULL §4 "Config" addition): a
/// typed struct carrying the defaults spec.md §4.6-§4.9 otherwise leaves
/// as bare constants, constructed from parsed CLI args.
#[derive(Debug, Clone)]
pub struct LayoutConfig {
    pub iterations: Option<usize>,
    pub seed: u64,
    pub layer_edges: FxHashSet<String>,
    pub rankdir: RankDir,
    pub layer_gap: f64,
    pub node_gap: f64,
    pub node_padding: f64,
    pub max_size: Option<f64>,
    pub legend: bool,
    pub edge_curve: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            iterations: None,
            seed: 1,
            layer_edges: FxHashSet::default(),
            rankdir: RankDir::TopToBottom,
            layer_gap: 80.0,
            node_gap: 30.0,
            node_padding: 10.0,
            max_size: None,
            legend: false,
            edge_curve: 1.0,
        }
    }
}

/// Force-layout iteration throttle (spec §4.6): 200 by default, 120
/// above 300 nodes, 60 above 600.
pub fn force_iteration_budget(n: usize, override_iters: Option<usize>) -> usize {
    if let Some(iters) = override_iters {
        return iters;
    }
    if n > 600 {
        60
    } else if n > 300 {
        120
    } else {
        200
    }
}

/// Overlap-separation iteration throttle (spec §4.7): 40 by default, 20
/// above 200 nodes, 12 above 400.
pub fn overlap_iteration_budget(n: usize) -> usize {
    if n > 400 {
        12
    } else if n > 200 {
        20
    } else {
        40
    }
}
