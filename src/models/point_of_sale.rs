//! Point of sale (PDV) type.

use serde::{Deserialize, Serialize};

use crate::distance::GeoPoint;
use crate::error::ConfigError;

/// A demand location served by a distribution center.
///
/// # Examples
///
/// ```
/// use u_distribution::models::PointOfSale;
///
/// let pdv = PointOfSale::new(3, -15.8, -47.9, 1200.0);
/// assert_eq!(pdv.id(), 3);
/// assert_eq!(pdv.demand_kg(), 1200.0);
/// assert!(pdv.validate().is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PointOfSale {
    id: usize,
    location: GeoPoint,
    demand_kg: f64,
}

impl PointOfSale {
    /// Creates a point of sale with a monthly demand in kilograms.
    pub fn new(id: usize, latitude: f64, longitude: f64, demand_kg: f64) -> Self {
        Self {
            id,
            location: GeoPoint::new(latitude, longitude),
            demand_kg,
        }
    }

    /// Row identity of this point.
    pub fn id(&self) -> usize {
        self.id
    }

    /// Location in degrees.
    pub fn location(&self) -> GeoPoint {
        self.location
    }

    /// Latitude in degrees.
    pub fn latitude(&self) -> f64 {
        self.location.latitude
    }

    /// Longitude in degrees.
    pub fn longitude(&self) -> f64 {
        self.location.longitude
    }

    /// Monthly demand in kilograms.
    pub fn demand_kg(&self) -> f64 {
        self.demand_kg
    }

    /// Checks demand and coordinate ranges.
    ///
    /// Non-finite coordinates are not reported here; they are a numerical
    /// failure raised by the optimizer.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.demand_kg.is_finite() || self.demand_kg < 0.0 {
            return Err(ConfigError::InvalidDemand {
                id: self.id,
                demand_kg: self.demand_kg,
            });
        }
        if self.location.is_finite() && !self.location.in_range() {
            return Err(ConfigError::CoordinateOutOfRange {
                id: self.id,
                latitude: self.location.latitude,
                longitude: self.location.longitude,
            });
        }
        Ok(())
    }
}

/// A point of sale row as it appears in input tables.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PointOfSaleRecord {
    /// Latitude in degrees.
    pub latitude: f64,
    /// Longitude in degrees.
    pub longitude: f64,
    /// Monthly demand in kilograms.
    #[serde(rename = "demanda_kg", alias = "demand_kg")]
    pub demand_kg: f64,
}

impl PointOfSaleRecord {
    /// Converts table rows into points, using the row index as identity.
    pub fn into_points(records: &[PointOfSaleRecord]) -> Vec<PointOfSale> {
        records
            .iter()
            .enumerate()
            .map(|(i, r)| PointOfSale::new(i, r.latitude, r.longitude, r.demand_kg))
            .collect()
    }
}

/// Sum of demand over a set of points.
pub fn total_demand(points: &[PointOfSale]) -> f64 {
    points.iter().map(|p| p.demand_kg()).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accessors() {
        let p = PointOfSale::new(1, 10.0, 20.0, 500.0);
        assert_eq!(p.id(), 1);
        assert_eq!(p.latitude(), 10.0);
        assert_eq!(p.longitude(), 20.0);
        assert_eq!(p.location(), GeoPoint::new(10.0, 20.0));
    }

    #[test]
    fn test_negative_demand_rejected() {
        let p = PointOfSale::new(4, 0.0, 0.0, -1.0);
        assert_eq!(
            p.validate(),
            Err(ConfigError::InvalidDemand {
                id: 4,
                demand_kg: -1.0
            })
        );
    }

    #[test]
    fn test_out_of_range_rejected() {
        let p = PointOfSale::new(0, 95.0, 0.0, 1.0);
        assert!(matches!(
            p.validate(),
            Err(ConfigError::CoordinateOutOfRange { id: 0, .. })
        ));
    }

    #[test]
    fn test_non_finite_coordinates_pass_validation() {
        let p = PointOfSale::new(0, f64::NAN, 0.0, 1.0);
        assert!(p.validate().is_ok());
    }

    #[test]
    fn test_records_use_row_index() {
        let records: Vec<PointOfSaleRecord> = serde_json::from_str(
            r#"[{"latitude": 1.0, "longitude": 2.0, "demanda_kg": 300.0},
                {"latitude": 3.0, "longitude": 4.0, "demand_kg": 100.0}]"#,
        )
        .expect("valid json");
        let points = PointOfSaleRecord::into_points(&records);
        assert_eq!(points[1].id(), 1);
        assert_eq!(points[1].demand_kg(), 100.0);
        assert_eq!(total_demand(&points), 400.0);
    }
}
