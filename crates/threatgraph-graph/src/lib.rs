//! Seed-anchored subgraph construction, paths-through filtering, and
//! IOA-anchored pruning (spec §4.2-§4.4).

pub mod index;
pub mod ioa;
pub mod paths_through;
pub mod subgraph;
pub mod traversal;

pub use index::*;
pub use ioa::*;
pub use paths_through::*;
pub use subgraph::*;
pub use traversal::*;
