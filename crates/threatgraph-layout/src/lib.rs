//! Deterministic 2-D layout engine: five node-placement strategies plus
//! the shared overlap-separation, bounding-box normalization, and
//! cubic-Bezier edge-routing passes every strategy funnels through.

pub mod circle;
pub mod common;
pub mod force;
pub mod label;
pub mod layered;
pub mod normalize;
pub mod overlap;
pub mod placement;
pub mod rng;
pub mod router;
pub mod time_layout;
pub mod tree;

pub use circle::layout_circle;
pub use common::{force_iteration_budget, overlap_iteration_budget, LayoutConfig, LayoutKind, LayoutResult, Position, RankDir};
pub use force::layout_force;
pub use label::{build_label, label_size, LabelSize};
pub use layered::{compute_longest_path_layers, layout_layered};
pub use normalize::normalize;
pub use overlap::separate_overlaps;
pub use placement::place_layers;
pub use rng::Lcg;
pub use router::{route_edges, RoutedEdge};
pub use time_layout::layout_time;
pub use tree::layout_tree;
