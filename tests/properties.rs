use std::collections::HashMap;

use proptest::prelude::*;
use u_distribution::distance::{haversine_km, GeoPoint};
use u_distribution::models::{
    DcSizeTable, FixedFleet, PointOfSale, SizeTier, TierSpec, TransportTable, VehicleType,
};
use u_distribution::{build_routes, optimize_network, OptimizerConfig, Scenario, Solution};

fn coordinate() -> impl Strategy<Value = (f64, f64)> {
    (-89.0..89.0f64, -179.0..179.0f64)
}

prop_compose! {
    fn regional_points(max: usize)
        (coords in prop::collection::vec(
            (-30.0..-10.0f64, -50.0..-40.0f64, 0.0..3000.0f64),
            3..max,
        ))
        -> Vec<PointOfSale> {
        coords
            .into_iter()
            .enumerate()
            .map(|(i, (lat, lon, demand))| PointOfSale::new(i, lat, lon, demand))
            .collect()
    }
}

prop_compose! {
    fn transport_table()
        (van in 500.0..3000.0f64, truck in 3000.0..8000.0f64, deliveries in 1u32..200)
        -> TransportTable {
        TransportTable::new(vec![
            VehicleType::new("Van", 2000.0, 1.5, deliveries, van),
            VehicleType::new("Truck", 8000.0, 3.0, deliveries, truck),
        ])
        .expect("valid table")
    }
}

fn sizes() -> DcSizeTable {
    DcSizeTable::new([
        (SizeTier::Small, TierSpec { capacity_kg: 20_000.0, monthly_cost: 5_000.0 }),
        (SizeTier::Medium, TierSpec { capacity_kg: 50_000.0, monthly_cost: 9_000.0 }),
        (SizeTier::Large, TierSpec { capacity_kg: 100_000.0, monthly_cost: 15_000.0 }),
    ])
    .expect("valid table")
}

/// Every point appears exactly once, either on a route or as unserved.
fn assert_covers_once(solution: &Solution, points: &[PointOfSale]) {
    let mut seen: HashMap<usize, usize> = HashMap::new();
    for route in solution.routes() {
        for &id in route.stops() {
            *seen.entry(id).or_default() += 1;
        }
    }
    for &id in solution.unserved() {
        *seen.entry(id).or_default() += 1;
    }
    assert_eq!(seen.len(), points.len());
    assert!(seen.values().all(|&n| n == 1));
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn distance_is_a_metric(a in coordinate(), b in coordinate(), c in coordinate()) {
        let ab = haversine_km(a.0, a.1, b.0, b.1);
        let ba = haversine_km(b.0, b.1, a.0, a.1);
        let bc = haversine_km(b.0, b.1, c.0, c.1);
        let ac = haversine_km(a.0, a.1, c.0, c.1);

        prop_assert!(ab.is_finite() && ab >= 0.0);
        prop_assert!((ab - ba).abs() < 1e-3);
        prop_assert_eq!(haversine_km(a.0, a.1, a.0, a.1), 0.0);
        prop_assert!(ac <= ab + bc + 1e-3);
    }

    #[test]
    fn routes_respect_capacity_and_stops(
        points in regional_points(60),
        capacity in 500.0..6000.0f64,
        max_stops in 1usize..10,
    ) {
        let dc = GeoPoint::new(-20.0, -45.0);
        let set = build_routes(dc, &points, capacity, max_stops).expect("valid parameters");

        let mut count = vec![0usize; points.len()];
        for route in set.routes() {
            prop_assert!(!route.is_empty());
            prop_assert!(route.len() <= max_stops);
            prop_assert!(route.load_kg() <= capacity);
            for &id in route.stops() {
                count[id] += 1;
            }
        }
        for &id in set.unrouted() {
            prop_assert!(points[id].demand_kg() > capacity);
            count[id] += 1;
        }
        prop_assert!(count.iter().all(|&n| n == 1));
    }

    #[test]
    fn free_mode_solution_is_consistent(
        points in regional_points(40),
        transport in transport_table(),
        dcs in 1usize..4,
    ) {
        let config = OptimizerConfig::default();
        let scenario = Scenario::proposed(dcs);
        let solution = optimize_network(&points, &[], &sizes(), &transport, &scenario, &config)
            .expect("every point fits the largest vehicle");

        let costs = solution.costs();
        prop_assert_eq!(costs.total, costs.transport + costs.storage);
        prop_assert!(solution.is_fully_served());
        assert_covers_once(&solution, &points);

        for cluster in solution.clusters() {
            let Some(plan) = &cluster.plan else { continue };
            for (name, allocation) in plan.allocations() {
                let vehicle = transport.get(name).expect("known type");
                let needed = vehicle.vehicles_for_routes(allocation.routes.len());
                prop_assert_eq!(allocation.count, needed);
                for route in &allocation.routes {
                    prop_assert!(route.load_kg() <= vehicle.capacity_kg);
                    prop_assert!(route.len() <= config.max_stops_per_route);
                }
            }
        }

        let again = optimize_network(&points, &[], &sizes(), &transport, &scenario, &config)
            .expect("feasible");
        prop_assert_eq!(solution, again);
    }

    #[test]
    fn fixed_fleet_covers_every_point_once(
        points in regional_points(40),
        transport in transport_table(),
        vans in 0u32..3,
        trucks in 0u32..3,
    ) {
        let scenario = Scenario::current(
            vec![SizeTier::Medium],
            FixedFleet::new([("Truck", trucks), ("Van", vans)]),
        );
        let config = OptimizerConfig::default();
        let solution = optimize_network(&points, &[], &sizes(), &transport, &scenario, &config)
            .expect("fixed fleet always yields a plan");

        assert_covers_once(&solution, &points);
        prop_assert_eq!(solution.vehicles()["Truck"], trucks);
        prop_assert_eq!(solution.vehicles()["Van"], vans);
        let unserved: f64 = solution.unserved().iter().map(|&id| points[id].demand_kg()).sum();
        prop_assert!((solution.unserved_demand_kg() - unserved).abs() < 1e-6);
    }
}
