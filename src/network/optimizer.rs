//! End-to-end network optimization for one scenario.

use std::collections::{BTreeMap, HashMap, HashSet};

use tracing::{debug, info, warn};

use crate::config::OptimizerConfig;
use crate::error::{ConfigError, NetworkError, Result};
use crate::fleet::plan_cluster;
use crate::models::{
    nearest_factory, ClusterRouting, CostBreakdown, DcSizeTable, Factory, FactoryLink,
    PointOfSale, Solution, SolutionParts, TransportTable,
};
use crate::positioning::position_facilities;

use super::Scenario;

/// Designs the distribution network for `points` under `scenario`.
///
/// Places and sizes the DCs, then routes and prices the vehicles of every DC
/// in index order. The nearest factory of each DC is reported but its inbound
/// distance is not part of the transport cost.
///
/// # Errors
///
/// - [`NetworkError::Configuration`] for invalid points, factories, tables,
///   fleets, or configuration.
/// - [`NetworkError::Numerical`] for non-finite coordinates.
/// - [`NetworkError::InfeasibleSolution`] when no DC could be planned.
///
/// # Examples
///
/// ```
/// use u_distribution::models::{DcSizeTable, Factory, PointOfSale, SizeTier, TierSpec,
///     TransportTable, VehicleType};
/// use u_distribution::network::{optimize_network, Scenario};
/// use u_distribution::OptimizerConfig;
///
/// let points: Vec<PointOfSale> = (0..10)
///     .map(|i| PointOfSale::new(i, -15.8, -47.9 + 0.01 * i as f64, 1000.0))
///     .collect();
/// let factories = vec![Factory::new("Plant", -16.3, -48.9, 500_000.0)];
/// let sizes = DcSizeTable::new([
///     (SizeTier::Small, TierSpec { capacity_kg: 5_000.0, monthly_cost: 1_000.0 }),
///     (SizeTier::Medium, TierSpec { capacity_kg: 20_000.0, monthly_cost: 2_000.0 }),
///     (SizeTier::Large, TierSpec { capacity_kg: 80_000.0, monthly_cost: 5_000.0 }),
/// ]).unwrap();
/// let truck = VehicleType::new("Truck", 9000.0, 2.0, 176, 5000.0);
/// let transport = TransportTable::new(vec![truck]).unwrap();
///
/// let config = OptimizerConfig::default();
/// let scenario = Scenario::proposed(1);
/// let solution =
///     optimize_network(&points, &factories, &sizes, &transport, &scenario, &config).unwrap();
/// assert_eq!(solution.num_routes(), 2);
/// assert_eq!(solution.vehicles()["Truck"], 1);
/// assert_eq!(solution.costs().storage, 2_000.0);
/// assert!(solution.is_fully_served());
/// ```
pub fn optimize_network(
    points: &[PointOfSale],
    factories: &[Factory],
    sizes: &DcSizeTable,
    transport: &TransportTable,
    scenario: &Scenario,
    config: &OptimizerConfig,
) -> Result<Solution> {
    config.validate()?;
    validate_points(points)?;
    validate_factories(factories)?;
    if let Some(fleet) = &scenario.fleet {
        fleet.validate(transport)?;
    }

    let layout = position_facilities(points, &scenario.siting, &scenario.sizing, sizes, config)?;
    let mode = scenario.fleet_mode();

    let mut vehicles: BTreeMap<String, u32> = transport
        .vehicles()
        .iter()
        .map(|v| (v.name.clone(), 0))
        .collect();
    let mut routes_per_vehicle: BTreeMap<String, usize> = BTreeMap::new();
    let mut transport_cost = 0.0;
    let mut unserved = Vec::new();
    let mut clusters = Vec::with_capacity(layout.centers().len());
    let mut planned = 0;

    for dc in layout.centers() {
        let members = layout.members(points, dc.index());
        let link = nearest_factory(factories, &dc.location()).map(|(i, distance_km)| FactoryLink {
            factory_index: i,
            name: factories[i].name.clone(),
            distance_km,
        });

        let plan = plan_cluster(dc, &members, transport, mode, config)?;
        match &plan {
            Some(plan) => {
                planned += 1;
                transport_cost += plan.transport_cost();
                for (name, allocation) in plan.allocations() {
                    *vehicles.entry(name.clone()).or_insert(0) += allocation.count;
                    if !allocation.routes.is_empty() {
                        *routes_per_vehicle.entry(name.clone()).or_insert(0) +=
                            allocation.routes.len();
                    }
                }
                unserved.extend_from_slice(plan.unserved());
                debug!(
                    dc = dc.index(),
                    tier = %dc.tier(),
                    points = members.len(),
                    routes = plan.num_routes(),
                    transport_cost = plan.transport_cost(),
                    "distribution center planned"
                );
            }
            None if !members.is_empty() => {
                warn!(
                    dc = dc.index(),
                    points = members.len(),
                    "no vehicle can serve distribution center"
                );
                unserved.extend(members.iter().map(|p| p.id()));
            }
            None => {}
        }

        clusters.push(ClusterRouting {
            dc_index: dc.index(),
            members: members.iter().map(|p| p.id()).collect(),
            nearest_factory: link,
            plan,
        });
    }

    if planned == 0 {
        return Err(NetworkError::infeasible(
            "no distribution center could be served by the available vehicle types",
        ));
    }

    unserved.sort_unstable();
    let demand: HashMap<usize, f64> = points.iter().map(|p| (p.id(), p.demand_kg())).collect();
    let unserved_demand_kg: f64 = unserved.iter().filter_map(|id| demand.get(id)).sum();
    if !unserved.is_empty() {
        warn!(
            points = unserved.len(),
            demand_kg = unserved_demand_kg,
            "points of sale left unserved"
        );
    }

    let storage: f64 = layout.centers().iter().map(|dc| dc.monthly_cost()).sum();
    let costs = CostBreakdown::new(transport_cost, storage);
    info!(
        dcs = layout.centers().len(),
        routes = routes_per_vehicle.values().sum::<usize>(),
        transport = costs.transport,
        storage = costs.storage,
        total = costs.total,
        "network optimized"
    );

    let (centers, assignment) = layout.into_parts();
    Ok(Solution::from_parts(SolutionParts {
        assignment,
        centers,
        clusters,
        vehicles,
        routes_per_vehicle,
        costs,
        unserved,
        unserved_demand_kg,
    }))
}

fn validate_points(points: &[PointOfSale]) -> Result<()> {
    if points.is_empty() {
        return Err(ConfigError::NoPointsOfSale.into());
    }
    let mut seen = HashSet::with_capacity(points.len());
    for p in points {
        if !seen.insert(p.id()) {
            return Err(ConfigError::DuplicatePointOfSale(p.id()).into());
        }
        p.validate()?;
        if !p.location().is_finite() {
            return Err(NetworkError::numerical(format!(
                "point of sale {} has non-finite coordinates",
                p.id()
            )));
        }
    }
    Ok(())
}

fn validate_factories(factories: &[Factory]) -> Result<()> {
    for (i, factory) in factories.iter().enumerate() {
        factory.validate()?;
        let location = factory.location();
        if !location.is_finite() {
            return Err(NetworkError::numerical(format!(
                "factory '{}' has non-finite coordinates",
                factory.name
            )));
        }
        if !location.in_range() {
            return Err(ConfigError::CoordinateOutOfRange {
                id: i,
                latitude: location.latitude,
                longitude: location.longitude,
            }
            .into());
        }
    }
    Ok(())
}
