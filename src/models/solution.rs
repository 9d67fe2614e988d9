//! Vehicle allocations, per-DC plans, and the network solution.

use std::collections::BTreeMap;

use serde::Serialize;

use super::{DistributionCenter, Route};

/// Vehicles of one type and the routes they run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VehicleAllocation {
    /// Number of vehicles.
    pub count: u32,
    /// Routes covered by these vehicles.
    pub routes: Vec<Route>,
}

/// Routing and fleet result for one distribution center.
///
/// # Examples
///
/// ```
/// use std::collections::BTreeMap;
/// use u_distribution::models::{ClusterPlan, Route, VehicleAllocation};
///
/// let mut allocations = BTreeMap::new();
/// allocations.insert(
///     "Truck".to_string(),
///     VehicleAllocation { count: 1, routes: vec![Route::new(vec![0, 1], 10.0, 5.0)] },
/// );
/// let plan = ClusterPlan::new(allocations, 100.0, vec![2]);
/// assert_eq!(plan.num_routes(), 1);
/// assert_eq!(plan.num_served(), 2);
/// assert_eq!(plan.unserved(), &[2]);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClusterPlan {
    allocations: BTreeMap<String, VehicleAllocation>,
    transport_cost: f64,
    unserved: Vec<usize>,
}

impl ClusterPlan {
    /// Creates a plan.
    pub fn new(
        allocations: BTreeMap<String, VehicleAllocation>,
        transport_cost: f64,
        unserved: Vec<usize>,
    ) -> Self {
        Self {
            allocations,
            transport_cost,
            unserved,
        }
    }

    /// Allocation per vehicle type name.
    pub fn allocations(&self) -> &BTreeMap<String, VehicleAllocation> {
        &self.allocations
    }

    /// Variable route costs plus fixed vehicle costs.
    pub fn transport_cost(&self) -> f64 {
        self.transport_cost
    }

    /// Point-of-sale IDs not covered by any route.
    pub fn unserved(&self) -> &[usize] {
        &self.unserved
    }

    /// All routes across vehicle types.
    pub fn routes(&self) -> impl Iterator<Item = &Route> {
        self.allocations.values().flat_map(|a| a.routes.iter())
    }

    /// Number of routes across vehicle types.
    pub fn num_routes(&self) -> usize {
        self.allocations.values().map(|a| a.routes.len()).sum()
    }

    /// Number of points served.
    pub fn num_served(&self) -> usize {
        self.routes().map(|r| r.len()).sum()
    }
}

/// The factory nearest to a DC, kept for reporting.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FactoryLink {
    /// Index into the factory list.
    pub factory_index: usize,
    /// Factory name.
    pub name: String,
    /// Great-circle distance factory → DC in kilometers.
    pub distance_km: f64,
}

/// Everything computed for one distribution center.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClusterRouting {
    /// DC index.
    pub dc_index: usize,
    /// Point-of-sale IDs assigned to the DC.
    pub members: Vec<usize>,
    /// Nearest factory, if any factory was supplied.
    pub nearest_factory: Option<FactoryLink>,
    /// Fleet plan, `None` when the cluster could not be planned.
    pub plan: Option<ClusterPlan>,
}

/// Monthly cost split.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CostBreakdown {
    /// Vehicle fixed costs plus distance costs.
    pub transport: f64,
    /// Sum of DC monthly costs.
    pub storage: f64,
    /// `transport + storage`.
    pub total: f64,
}

impl CostBreakdown {
    /// Creates a breakdown; `total` is `transport + storage`.
    pub fn new(transport: f64, storage: f64) -> Self {
        Self {
            transport,
            storage,
            total: transport + storage,
        }
    }
}

/// Result of one network optimization run.
///
/// Immutable once returned; a new run produces a new value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Solution {
    assignment: Vec<usize>,
    centers: Vec<DistributionCenter>,
    clusters: Vec<ClusterRouting>,
    vehicles: BTreeMap<String, u32>,
    routes_per_vehicle: BTreeMap<String, usize>,
    costs: CostBreakdown,
    unserved: Vec<usize>,
    unserved_demand_kg: f64,
}

/// Parts of a [`Solution`], assembled by the optimizer.
pub(crate) struct SolutionParts {
    pub assignment: Vec<usize>,
    pub centers: Vec<DistributionCenter>,
    pub clusters: Vec<ClusterRouting>,
    pub vehicles: BTreeMap<String, u32>,
    pub routes_per_vehicle: BTreeMap<String, usize>,
    pub costs: CostBreakdown,
    pub unserved: Vec<usize>,
    pub unserved_demand_kg: f64,
}

impl Solution {
    pub(crate) fn from_parts(parts: SolutionParts) -> Self {
        Self {
            assignment: parts.assignment,
            centers: parts.centers,
            clusters: parts.clusters,
            vehicles: parts.vehicles,
            routes_per_vehicle: parts.routes_per_vehicle,
            costs: parts.costs,
            unserved: parts.unserved,
            unserved_demand_kg: parts.unserved_demand_kg,
        }
    }

    /// DC index per input point, in input order.
    pub fn assignment(&self) -> &[usize] {
        &self.assignment
    }

    /// Distribution centers.
    pub fn centers(&self) -> &[DistributionCenter] {
        &self.centers
    }

    /// Per-DC routing results.
    pub fn clusters(&self) -> &[ClusterRouting] {
        &self.clusters
    }

    /// Vehicle count per type; every type of the transport table is present.
    pub fn vehicles(&self) -> &BTreeMap<String, u32> {
        &self.vehicles
    }

    /// Route count per type, only for types that run routes.
    pub fn routes_per_vehicle(&self) -> &BTreeMap<String, usize> {
        &self.routes_per_vehicle
    }

    /// Monthly cost split.
    pub fn costs(&self) -> CostBreakdown {
        self.costs
    }

    /// Total monthly cost.
    pub fn total_cost(&self) -> f64 {
        self.costs.total
    }

    /// Point-of-sale IDs left without a route, sorted.
    pub fn unserved(&self) -> &[usize] {
        &self.unserved
    }

    /// Demand of the unserved points.
    pub fn unserved_demand_kg(&self) -> f64 {
        self.unserved_demand_kg
    }

    /// Returns `true` if every point is on a route.
    pub fn is_fully_served(&self) -> bool {
        self.unserved.is_empty()
    }

    /// All routes of all DCs.
    pub fn routes(&self) -> impl Iterator<Item = &Route> {
        self.clusters
            .iter()
            .filter_map(|c| c.plan.as_ref())
            .flat_map(|p| p.routes())
    }

    /// Total number of routes.
    pub fn num_routes(&self) -> usize {
        self.routes_per_vehicle.values().sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cost_breakdown_total() {
        let c = CostBreakdown::new(1234.5, 100.25);
        assert_eq!(c.total, 1234.5 + 100.25);
    }

    #[test]
    fn test_plan_routes_across_types() {
        let mut allocations = BTreeMap::new();
        allocations.insert(
            "a".to_string(),
            VehicleAllocation {
                count: 1,
                routes: vec![Route::new(vec![1, 2], 2.0, 1.0)],
            },
        );
        allocations.insert(
            "b".to_string(),
            VehicleAllocation {
                count: 2,
                routes: vec![Route::new(vec![3], 1.0, 1.0), Route::new(vec![4], 1.0, 1.0)],
            },
        );
        let plan = ClusterPlan::new(allocations, 0.0, vec![]);
        assert_eq!(plan.num_routes(), 3);
        assert_eq!(plan.num_served(), 4);
        let stops: Vec<usize> = plan.routes().flat_map(|r| r.stops().iter().copied()).collect();
        assert_eq!(stops, vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_solution_accessors() {
        let plan = ClusterPlan::new(BTreeMap::new(), 0.0, vec![0]);
        let sol = Solution::from_parts(SolutionParts {
            assignment: vec![0],
            centers: vec![],
            clusters: vec![ClusterRouting {
                dc_index: 0,
                members: vec![0],
                nearest_factory: None,
                plan: Some(plan),
            }],
            vehicles: BTreeMap::new(),
            routes_per_vehicle: BTreeMap::new(),
            costs: CostBreakdown::new(0.0, 10.0),
            unserved: vec![0],
            unserved_demand_kg: 5.0,
        });
        assert_eq!(sol.total_cost(), 10.0);
        assert!(!sol.is_fully_served());
        assert_eq!(sol.num_routes(), 0);
        assert_eq!(sol.routes().count(), 0);
        assert_eq!(sol.unserved_demand_kg(), 5.0);
    }
}
