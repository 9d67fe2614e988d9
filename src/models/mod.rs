//! Domain model types for distribution network design.
//!
//! Points of sale with monthly demand, factories, size-tiered distribution
//! centers, vehicle types and fleets, routes, and the network solution.

mod distribution_center;
mod factory;
mod point_of_sale;
mod route;
mod solution;
mod vehicle;

pub use distribution_center::{DcSizeRecord, DcSizeTable, DistributionCenter, SizeTier, TierSpec};
pub use factory::{nearest_factory, Factory};
pub use point_of_sale::{total_demand, PointOfSale, PointOfSaleRecord};
pub use route::{Route, RouteSet};
pub(crate) use solution::SolutionParts;
pub use solution::{
    ClusterPlan, ClusterRouting, CostBreakdown, FactoryLink, Solution, VehicleAllocation,
};
pub use vehicle::{FixedFleet, FleetEntry, TransportTable, VehicleType};
