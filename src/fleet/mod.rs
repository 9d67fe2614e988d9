//! Vehicle mix selection per distribution center.
//!
//! - [`plan_cluster`]: routes one DC's points and prices the vehicles used,
//!   either choosing the vehicle type freely or operating a given fleet.

mod selector;

pub use selector::{plan_cluster, FleetMode};
