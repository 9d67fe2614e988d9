//! Vehicle mix selection for one distribution center.
//!
//! # Free mode
//!
//! Vehicle types are tried from the largest payload down. A type is skipped
//! when its capacity projects fewer than `min_projected_stops` average-demand
//! stops per route. The first remaining type is routed; the routing is
//! rejected when some point does not fit the vehicle or when routes average
//! fewer than `min_average_stops` stops, and the next smaller type is tried.
//! When every type is rejected the largest type is used regardless.
//!
//! # Fixed mode
//!
//! The caller's fleet is taken as given. Entries are processed in order; each
//! routes the points not yet covered and keeps at most
//! `count × deliveries_per_month` routes. Whatever is left is unserved.

use std::collections::{BTreeMap, HashSet};

use tracing::debug;

use crate::config::OptimizerConfig;
use crate::constructive::{build_routes_over, cluster_distances};
use crate::error::{ConfigError, Result};
use crate::models::{
    total_demand, ClusterPlan, DistributionCenter, FixedFleet, PointOfSale, RouteSet,
    TransportTable, VehicleAllocation, VehicleType,
};

/// How vehicles are chosen for a cluster.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FleetMode<'a> {
    /// Pick the vehicle type and count that the density filters accept.
    Free,
    /// Operate the given fleet at every DC.
    Fixed(&'a FixedFleet),
}

/// Plans routes and vehicles for the points assigned to `dc`.
///
/// Returns `Ok(None)` when the cluster is empty, or in free mode when even the
/// fallback vehicle produces no route.
///
/// # Examples
///
/// ```
/// use u_distribution::distance::GeoPoint;
/// use u_distribution::fleet::{plan_cluster, FleetMode};
/// use u_distribution::models::{DcSizeTable, DistributionCenter, PointOfSale, SizeTier,
///     TierSpec, TransportTable, VehicleType};
/// use u_distribution::OptimizerConfig;
///
/// let sizes = DcSizeTable::new(SizeTier::ALL.map(|t| {
///     (t, TierSpec { capacity_kg: 1_000_000.0, monthly_cost: 0.0 })
/// })).unwrap();
/// let dc = DistributionCenter::new(0, GeoPoint::new(0.0, 0.0), SizeTier::Large, &sizes, 10_000.0);
/// let points: Vec<PointOfSale> = (0..10)
///     .map(|i| PointOfSale::new(i, 0.0, 0.05 * (i + 1) as f64, 1000.0))
///     .collect();
/// let truck = VehicleType::new("Truck", 9000.0, 2.0, 176, 5000.0);
/// let transport = TransportTable::new(vec![truck]).unwrap();
///
/// let plan = plan_cluster(&dc, &points, &transport, FleetMode::Free, &OptimizerConfig::default())
///     .unwrap()
///     .unwrap();
/// assert_eq!(plan.num_routes(), 2);
/// assert_eq!(plan.allocations()["Truck"].count, 1);
/// ```
pub fn plan_cluster(
    dc: &DistributionCenter,
    points: &[PointOfSale],
    transport: &TransportTable,
    mode: FleetMode<'_>,
    config: &OptimizerConfig,
) -> Result<Option<ClusterPlan>> {
    if points.is_empty() {
        return Ok(None);
    }
    match mode {
        FleetMode::Free => select_vehicle_mix(dc, points, transport, config),
        FleetMode::Fixed(fleet) => {
            evaluate_fixed_fleet(dc, points, transport, fleet, config).map(Some)
        }
    }
}

fn select_vehicle_mix(
    dc: &DistributionCenter,
    points: &[PointOfSale],
    transport: &TransportTable,
    config: &OptimizerConfig,
) -> Result<Option<ClusterPlan>> {
    let average_demand = total_demand(points) / points.len() as f64;
    let distances = cluster_distances(dc.location(), points);
    let all: Vec<usize> = (0..points.len()).collect();

    for vehicle in transport.by_capacity_desc() {
        let projected_stops = if average_demand > 0.0 {
            vehicle.capacity_kg / average_demand
        } else {
            f64::INFINITY
        };
        if projected_stops < config.min_projected_stops {
            debug!(
                dc = dc.index(),
                vehicle = %vehicle.name,
                projected_stops,
                "vehicle too small for cluster"
            );
            continue;
        }

        let set = build_routes_over(
            &distances,
            points,
            &all,
            vehicle.capacity_kg,
            config.max_stops_per_route,
        )?;
        if set.num_routes() == 0 || !set.unrouted().is_empty() {
            debug!(dc = dc.index(), vehicle = %vehicle.name, "vehicle cannot carry every point");
            continue;
        }
        let average_stops = set.average_stops();
        if average_stops < config.min_average_stops {
            debug!(dc = dc.index(), vehicle = %vehicle.name, average_stops, "routes too sparse");
            continue;
        }

        debug!(
            dc = dc.index(),
            vehicle = %vehicle.name,
            routes = set.num_routes(),
            "vehicle selected"
        );
        return Ok(Some(single_type_plan(vehicle, set)));
    }

    let largest = transport.largest();
    debug!(
        dc = dc.index(),
        vehicle = %largest.name,
        "no vehicle passed the density filters, using largest"
    );
    let set = build_routes_over(
        &distances,
        points,
        &all,
        largest.capacity_kg,
        config.max_stops_per_route,
    )?;
    if set.num_routes() == 0 {
        return Ok(None);
    }
    Ok(Some(single_type_plan(largest, set)))
}

fn single_type_plan(vehicle: &VehicleType, set: RouteSet) -> ClusterPlan {
    let (routes, unrouted) = set.into_parts();
    let variable: f64 = routes.iter().map(|r| vehicle.route_cost(r)).sum();
    let count = vehicle.vehicles_for_routes(routes.len());
    let cost = variable + vehicle.fleet_fixed_cost(count);

    let mut allocations = BTreeMap::new();
    allocations.insert(vehicle.name.clone(), VehicleAllocation { count, routes });
    ClusterPlan::new(allocations, cost, unrouted)
}

fn evaluate_fixed_fleet(
    dc: &DistributionCenter,
    points: &[PointOfSale],
    transport: &TransportTable,
    fleet: &FixedFleet,
    config: &OptimizerConfig,
) -> Result<ClusterPlan> {
    let distances = cluster_distances(dc.location(), points);
    let mut pending: Vec<usize> = (0..points.len()).collect();
    let mut allocations: BTreeMap<String, VehicleAllocation> = BTreeMap::new();
    let mut cost = 0.0;

    for entry in fleet.entries() {
        if entry.count == 0 {
            continue;
        }
        let vehicle = transport
            .get(&entry.vehicle)
            .ok_or_else(|| ConfigError::UnknownVehicleType(entry.vehicle.clone()))?;

        let set = build_routes_over(
            &distances,
            points,
            &pending,
            vehicle.capacity_kg,
            config.max_stops_per_route,
        )?;
        let (mut routes, _) = set.into_parts();
        let max_routes = entry.count as usize * vehicle.deliveries_per_month as usize;
        routes.truncate(max_routes);

        let served: HashSet<usize> = routes
            .iter()
            .flat_map(|r| r.stops().iter().copied())
            .collect();
        pending.retain(|&pos| !served.contains(&points[pos].id()));

        let variable: f64 = routes.iter().map(|r| vehicle.route_cost(r)).sum();
        cost += variable + vehicle.fleet_fixed_cost(entry.count);
        debug!(
            dc = dc.index(),
            vehicle = %vehicle.name,
            vehicles = entry.count,
            routes = routes.len(),
            "fixed fleet entry routed"
        );

        let allocation = allocations
            .entry(vehicle.name.clone())
            .or_insert_with(|| VehicleAllocation {
                count: 0,
                routes: Vec::new(),
            });
        allocation.count += entry.count;
        allocation.routes.extend(routes);
    }

    let unserved = pending.iter().map(|&pos| points[pos].id()).collect();
    Ok(ClusterPlan::new(allocations, cost, unserved))
}
