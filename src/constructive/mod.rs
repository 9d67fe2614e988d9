//! Constructive route heuristics.
//!
//! - [`build_routes`]: Farthest-seed nearest-neighbor construction with
//!   capacity and stop-count ceilings, O(n³) worst case

mod farthest_seed;

pub use farthest_seed::build_routes;
pub(crate) use farthest_seed::{build_routes_over, cluster_distances};
