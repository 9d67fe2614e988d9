//! Route evaluator that computes distance, load, and feasibility.

use crate::distance::DistanceMatrix;
use crate::models::{PointOfSale, Route};

/// A type of constraint violation in a route.
#[derive(Debug, Clone, PartialEq)]
pub enum ViolationType {
    /// Vehicle capacity exceeded.
    CapacityExceeded {
        /// Route index in the evaluated set.
        route_index: usize,
        /// Load carried.
        load_kg: f64,
        /// Vehicle capacity.
        capacity_kg: f64,
    },
    /// More stops than the per-route ceiling.
    StopLimitExceeded {
        /// Route index in the evaluated set.
        route_index: usize,
        /// Stops on the route.
        stops: usize,
        /// Allowed stops.
        max_stops: usize,
    },
}

/// A constraint violation.
#[derive(Debug, Clone, PartialEq)]
pub struct Violation {
    /// The type of violation.
    pub kind: ViolationType,
}

impl Violation {
    /// Creates a new violation.
    pub fn new(kind: ViolationType) -> Self {
        Self { kind }
    }
}

/// Evaluates routes over one DC's points of sale.
///
/// Route sequences are given as positions into `points`; the distance matrix
/// holds the DC at index 0 and point `i` at index `i + 1`.
///
/// # Examples
///
/// ```
/// use u_distribution::distance::{DistanceMatrix, GeoPoint};
/// use u_distribution::evaluation::RouteEvaluator;
/// use u_distribution::models::PointOfSale;
///
/// let dc = GeoPoint::new(0.0, 0.0);
/// let points = vec![
///     PointOfSale::new(10, 0.0, 0.1, 400.0),
///     PointOfSale::new(11, 0.0, 0.2, 300.0),
/// ];
/// let mut locations = vec![dc];
/// locations.extend(points.iter().map(|p| p.location()));
/// let dm = DistanceMatrix::from_points(&locations);
///
/// let evaluator = RouteEvaluator::new(&points, &dm, 1000.0, 8);
/// let (route, violations) = evaluator.build_route(&[0, 1]);
/// assert_eq!(route.stops(), &[10, 11]);
/// assert_eq!(route.load_kg(), 700.0);
/// assert!(violations.is_empty());
/// ```
pub struct RouteEvaluator<'a> {
    points: &'a [PointOfSale],
    distances: &'a DistanceMatrix,
    capacity_kg: f64,
    max_stops: usize,
}

impl<'a> RouteEvaluator<'a> {
    /// Creates a new evaluator for the given DC data.
    pub fn new(
        points: &'a [PointOfSale],
        distances: &'a DistanceMatrix,
        capacity_kg: f64,
        max_stops: usize,
    ) -> Self {
        Self {
            points,
            distances,
            capacity_kg,
            max_stops,
        }
    }

    /// Builds a route from point positions, computing load and DC-to-DC distance.
    ///
    /// Returns the route (with point IDs) and any violations found.
    pub fn build_route(&self, sequence: &[usize]) -> (Route, Vec<Violation>) {
        let mut violations = Vec::new();
        if sequence.is_empty() {
            return (Route::new(Vec::new(), 0.0, 0.0), violations);
        }

        let mut load = 0.0;
        let mut total_distance = 0.0;
        let mut prev = 0;
        let mut stops = Vec::with_capacity(sequence.len());

        for &pos in sequence {
            let node = pos + 1;
            total_distance += self.distances.get(prev, node);
            load += self.points[pos].demand_kg();
            stops.push(self.points[pos].id());
            prev = node;
        }
        total_distance += self.distances.get(prev, 0);

        if load > self.capacity_kg {
            violations.push(Violation::new(ViolationType::CapacityExceeded {
                route_index: 0,
                load_kg: load,
                capacity_kg: self.capacity_kg,
            }));
        }
        if sequence.len() > self.max_stops {
            violations.push(Violation::new(ViolationType::StopLimitExceeded {
                route_index: 0,
                stops: sequence.len(),
                max_stops: self.max_stops,
            }));
        }

        (Route::new(stops, load, total_distance), violations)
    }

    /// Builds a set of route sequences, returning the routes and every violation
    /// tagged with its route index.
    pub fn evaluate_routes(&self, sequences: &[Vec<usize>]) -> (Vec<Route>, Vec<Violation>) {
        let mut routes = Vec::with_capacity(sequences.len());
        let mut all_violations = Vec::new();

        for (idx, sequence) in sequences.iter().enumerate() {
            let (route, mut violations) = self.build_route(sequence);
            for v in &mut violations {
                match &mut v.kind {
                    ViolationType::CapacityExceeded { route_index, .. }
                    | ViolationType::StopLimitExceeded { route_index, .. } => {
                        *route_index = idx;
                    }
                }
            }
            routes.push(route);
            all_violations.append(&mut violations);
        }

        (routes, all_violations)
    }
}
