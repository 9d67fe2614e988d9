//! # u-distribution
//!
//! Distribution network design: places and sizes distribution centers for a
//! set of points of sale, builds capacity-feasible delivery routes from each
//! center, chooses the vehicle mix, and prices the monthly operation. A
//! current network (fixed sizes and fleet) can be compared against a
//! proposed one.
//!
//! ## Modules
//!
//! - [`models`]: Domain types (PointOfSale, Factory, DistributionCenter, VehicleType, Solution)
//! - [`distance`]: Great-circle distance and distance matrix
//! - [`positioning`]: k-means DC placement and tier sizing
//! - [`constructive`]: Farthest-seed nearest-neighbor route builder
//! - [`evaluation`]: Route load, distance, and constraint checks
//! - [`fleet`]: Vehicle mix selection per DC
//! - [`network`]: Network optimization and scenario comparison
//! - [`input`]: JSON input documents
//!
//! ## Example
//!
//! ```
//! use u_distribution::models::{DcSizeTable, PointOfSale, SizeTier, TierSpec, TransportTable,
//!     VehicleType};
//! use u_distribution::{optimize_network, OptimizerConfig, Scenario};
//!
//! let points: Vec<PointOfSale> = (0..6)
//!     .map(|i| PointOfSale::new(i, -23.5 + 0.01 * i as f64, -46.6, 800.0))
//!     .collect();
//! let sizes = DcSizeTable::new(SizeTier::ALL.map(|t| {
//!     (t, TierSpec { capacity_kg: 10_000.0, monthly_cost: 3_000.0 })
//! })).unwrap();
//! let truck = VehicleType::new("Truck", 9000.0, 2.0, 176, 5000.0);
//! let transport = TransportTable::new(vec![truck]).unwrap();
//!
//! let solution = optimize_network(
//!     &points, &[], &sizes, &transport, &Scenario::proposed(1), &OptimizerConfig::default(),
//! ).unwrap();
//! let costs = solution.costs();
//! assert_eq!(costs.total, costs.transport + costs.storage);
//! ```

pub mod config;
pub mod constructive;
pub mod distance;
pub mod error;
pub mod evaluation;
pub mod fleet;
pub mod input;
pub mod models;
pub mod network;
pub mod positioning;

#[cfg(feature = "ffi")]
pub mod ffi;
#[cfg(feature = "wasm")]
pub mod wasm;

pub use config::OptimizerConfig;
pub use constructive::build_routes;
pub use error::{ConfigError, NetworkError, Result};
pub use input::NetworkInput;
pub use models::Solution;
pub use network::{compare_scenarios, optimize_network, Scenario, ScenarioComparison};
