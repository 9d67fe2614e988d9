//! Farthest-seed nearest-neighbor route construction.
//!
//! # Algorithm
//!
//! While points remain, seed a new route with the unassigned point farthest
//! from the DC, then repeatedly append the unassigned point nearest to the
//! route's tail that still fits the remaining capacity, until no point fits or
//! the stop ceiling is reached. Seeding far out first keeps remote points from
//! being stranded in small leftover routes.
//!
//! # Complexity
//!
//! O(n²) distance evaluations per route, O(n³) worst case overall.

use crate::distance::{DistanceMatrix, GeoPoint};
use crate::error::{ConfigError, Result};
use crate::evaluation::RouteEvaluator;
use crate::models::{PointOfSale, RouteSet};

/// Partitions the points of one DC into capacity- and stop-feasible routes.
///
/// Every input point appears in exactly one route, except points whose own
/// demand exceeds `vehicle_capacity`, which are reported in
/// [`RouteSet::unrouted`]. Routes are not distance-optimal.
///
/// # Errors
///
/// Returns a configuration error if `vehicle_capacity` is not a positive
/// number or `max_stops` is zero.
///
/// # Examples
///
/// ```
/// use u_distribution::constructive::build_routes;
/// use u_distribution::distance::GeoPoint;
/// use u_distribution::models::PointOfSale;
///
/// let dc = GeoPoint::new(-15.8, -47.9);
/// let points: Vec<PointOfSale> = (0..10)
///     .map(|i| PointOfSale::new(i, -15.8 + 0.01 * i as f64, -47.8, 1000.0))
///     .collect();
///
/// let set = build_routes(dc, &points, 5000.0, 8).unwrap();
/// assert_eq!(set.num_routes(), 2);
/// assert!(set.routes().iter().all(|r| r.len() == 5));
/// ```
pub fn build_routes(
    dc: GeoPoint,
    points: &[PointOfSale],
    vehicle_capacity: f64,
    max_stops: usize,
) -> Result<RouteSet> {
    let distances = cluster_distances(dc, points);
    let positions: Vec<usize> = (0..points.len()).collect();
    build_routes_over(&distances, points, &positions, vehicle_capacity, max_stops)
}

/// Distance matrix of one DC cluster: the DC at index 0, point `i` at `i + 1`.
pub(crate) fn cluster_distances(dc: GeoPoint, points: &[PointOfSale]) -> DistanceMatrix {
    let mut locations = Vec::with_capacity(points.len() + 1);
    locations.push(dc);
    locations.extend(points.iter().map(|p| p.location()));
    DistanceMatrix::from_points(&locations)
}

/// Routes the points at `positions` using a matrix from [`cluster_distances`].
///
/// Lets callers that try several vehicles on the same cluster compute the
/// distances once.
pub(crate) fn build_routes_over(
    distances: &DistanceMatrix,
    points: &[PointOfSale],
    positions: &[usize],
    vehicle_capacity: f64,
    max_stops: usize,
) -> Result<RouteSet> {
    if !vehicle_capacity.is_finite() || vehicle_capacity <= 0.0 {
        return Err(ConfigError::NonPositiveCapacity {
            what: "route vehicle".to_string(),
            capacity_kg: vehicle_capacity,
        }
        .into());
    }
    if max_stops == 0 {
        return Err(ConfigError::InvalidMaxStops(0).into());
    }
    if positions.is_empty() {
        return Ok(RouteSet::default());
    }
    debug_assert_eq!(distances.size(), points.len() + 1);

    let evaluator = RouteEvaluator::new(points, distances, vehicle_capacity, max_stops);

    let mut unrouted = Vec::new();
    let mut pending: Vec<usize> = Vec::with_capacity(positions.len());
    for &pos in positions {
        if points[pos].demand_kg() > vehicle_capacity {
            unrouted.push(points[pos].id());
        } else {
            pending.push(pos);
        }
    }

    let mut sequences = Vec::new();
    while !pending.is_empty() {
        let nodes: Vec<usize> = pending.iter().map(|&pos| pos + 1).collect();
        let Some(seed_node) = distances.farthest(0, &nodes) else {
            break;
        };
        let seed = seed_node - 1;
        pending.retain(|&pos| pos != seed);

        let mut sequence = vec![seed];
        let mut load = points[seed].demand_kg();
        let mut tail = seed_node;

        while sequence.len() < max_stops {
            let candidates: Vec<usize> = pending
                .iter()
                .filter(|&&pos| load + points[pos].demand_kg() <= vehicle_capacity)
                .map(|&pos| pos + 1)
                .collect();
            match distances.nearest_neighbor(tail, &candidates) {
                Some(node) => {
                    let pos = node - 1;
                    pending.retain(|&p| p != pos);
                    sequence.push(pos);
                    load += points[pos].demand_kg();
                    tail = node;
                }
                None => break,
            }
        }
        sequences.push(sequence);
    }

    let (routes, violations) = evaluator.evaluate_routes(&sequences);
    debug_assert!(
        violations.is_empty(),
        "constructed routes break their limits: {violations:?}"
    );
    Ok(RouteSet::new(routes, unrouted))
}
