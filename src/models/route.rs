//! Route and route set types.

use serde::Serialize;

/// An ordered sequence of point-of-sale visits served from one DC.
///
/// The route implicitly starts and ends at its distribution center; the DC is
/// not stored in `stops`.
///
/// # Examples
///
/// ```
/// use u_distribution::models::Route;
///
/// let route = Route::new(vec![4, 2, 7], 2500.0, 130.0);
/// assert_eq!(route.len(), 3);
/// assert_eq!(route.stops(), &[4, 2, 7]);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Route {
    stops: Vec<usize>,
    load_kg: f64,
    distance_km: f64,
}

impl Route {
    /// Creates a route from point-of-sale IDs, total load, and DC-to-DC distance.
    pub fn new(stops: Vec<usize>, load_kg: f64, distance_km: f64) -> Self {
        Self {
            stops,
            load_kg,
            distance_km,
        }
    }

    /// Point-of-sale IDs in visit order.
    pub fn stops(&self) -> &[usize] {
        &self.stops
    }

    /// Number of stops.
    pub fn len(&self) -> usize {
        self.stops.len()
    }

    /// Returns `true` if this route has no stops.
    pub fn is_empty(&self) -> bool {
        self.stops.is_empty()
    }

    /// Total demand carried.
    pub fn load_kg(&self) -> f64 {
        self.load_kg
    }

    /// Distance DC → stops → DC in kilometers.
    pub fn distance_km(&self) -> f64 {
        self.distance_km
    }
}

/// Output of the route builder for one vehicle capacity.
///
/// `unrouted` lists points whose own demand exceeds the vehicle capacity;
/// every other input point appears in exactly one route.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct RouteSet {
    routes: Vec<Route>,
    unrouted: Vec<usize>,
}

impl RouteSet {
    /// Creates a route set.
    pub fn new(routes: Vec<Route>, unrouted: Vec<usize>) -> Self {
        Self { routes, unrouted }
    }

    /// Routes in construction order.
    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    /// IDs of points that no route could carry.
    pub fn unrouted(&self) -> &[usize] {
        &self.unrouted
    }

    /// Number of routes.
    pub fn num_routes(&self) -> usize {
        self.routes.len()
    }

    /// Number of points served across all routes.
    pub fn num_served(&self) -> usize {
        self.routes.iter().map(|r| r.len()).sum()
    }

    /// Average stops per route, zero when there are no routes.
    pub fn average_stops(&self) -> f64 {
        if self.routes.is_empty() {
            return 0.0;
        }
        self.num_served() as f64 / self.routes.len() as f64
    }

    /// Total distance across all routes.
    pub fn total_distance(&self) -> f64 {
        self.routes.iter().map(|r| r.distance_km()).sum()
    }

    /// Splits into routes and unrouted IDs.
    pub fn into_parts(self) -> (Vec<Route>, Vec<usize>) {
        (self.routes, self.unrouted)
    }
}
