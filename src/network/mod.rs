//! Network design entry points.
//!
//! - [`optimize_network`]: positions and sizes DCs, then plans every DC's
//!   routes and fleet for one [`Scenario`].
//! - [`compare_scenarios`]: runs a current and a proposed scenario and
//!   reports the savings.

mod comparator;
mod optimizer;
mod scenario;

pub use comparator::{compare_scenarios, ScenarioComparison};
pub use optimizer::optimize_network;
pub use scenario::Scenario;
