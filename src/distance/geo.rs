//! Haversine great-circle distance.

use serde::{Deserialize, Serialize};

/// Mean Earth radius used by [`haversine_km`].
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Great-circle distance in kilometers between two coordinates in degrees.
///
/// The haversine intermediate is clamped to `[0, 1]` so that rounding near
/// antipodal or coincident points never produces NaN.
///
/// # Examples
///
/// ```
/// use u_distribution::distance::haversine_km;
///
/// assert_eq!(haversine_km(-15.0, -47.0, -15.0, -47.0), 0.0);
/// // One degree of latitude is roughly 111 km.
/// let d = haversine_km(0.0, 0.0, 1.0, 0.0);
/// assert!((d - 111.19).abs() < 0.01);
/// ```
pub fn haversine_km(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let phi1 = lat1.to_radians();
    let phi2 = lat2.to_radians();
    let dphi = (lat2 - lat1).to_radians();
    let dlambda = (lon2 - lon1).to_radians();

    let a = (dphi / 2.0).sin().powi(2) + phi1.cos() * phi2.cos() * (dlambda / 2.0).sin().powi(2);
    let a = a.clamp(0.0, 1.0);
    2.0 * EARTH_RADIUS_KM * a.sqrt().asin()
}

/// A location in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    /// Latitude in degrees.
    pub latitude: f64,
    /// Longitude in degrees.
    pub longitude: f64,
}

impl GeoPoint {
    /// Creates a point from latitude and longitude in degrees.
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Great-circle distance to another point, in kilometers.
    pub fn distance_to(&self, other: &GeoPoint) -> f64 {
        haversine_km(self.latitude, self.longitude, other.latitude, other.longitude)
    }

    /// Returns `true` if both coordinates are finite.
    pub fn is_finite(&self) -> bool {
        self.latitude.is_finite() && self.longitude.is_finite()
    }

    /// Returns `true` if the coordinates are within valid degree ranges.
    pub fn in_range(&self) -> bool {
        (-90.0..=90.0).contains(&self.latitude) && (-180.0..=180.0).contains(&self.longitude)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_distance() {
        assert_eq!(haversine_km(10.0, 20.0, 10.0, 20.0), 0.0);
    }

    #[test]
    fn test_symmetric() {
        let a = haversine_km(-23.55, -46.63, -22.90, -43.17);
        let b = haversine_km(-22.90, -43.17, -23.55, -46.63);
        assert!((a - b).abs() < 1e-9);
    }

    #[test]
    fn test_sao_paulo_rio() {
        // About 360 km between the two city centers.
        let d = haversine_km(-23.55, -46.63, -22.90, -43.17);
        assert!(d > 340.0 && d < 370.0, "got {d}");
    }

    #[test]
    fn test_antipodal_is_finite() {
        let d = haversine_km(0.0, 0.0, 0.0, 180.0);
        assert!(d.is_finite());
        assert!((d - std::f64::consts::PI * EARTH_RADIUS_KM).abs() < 1e-6);
    }

    #[test]
    fn test_geo_point() {
        let a = GeoPoint::new(0.0, 0.0);
        let b = GeoPoint::new(0.0, 1.0);
        assert!((a.distance_to(&b) - b.distance_to(&a)).abs() < 1e-12);
        assert!(a.in_range());
        assert!(!GeoPoint::new(91.0, 0.0).in_range());
        assert!(!GeoPoint::new(f64::NAN, 0.0).is_finite());
    }
}
