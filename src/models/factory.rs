//! Factory type.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::distance::GeoPoint;
use crate::error::ConfigError;

/// A production site supplying distribution centers.
///
/// Factories only inform which plant would feed each DC; inbound transport
/// is not part of the cost total.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Factory {
    /// Factory name.
    #[serde(alias = "Nome")]
    pub name: String,
    /// Latitude in degrees.
    #[serde(alias = "Latitude")]
    pub latitude: f64,
    /// Longitude in degrees.
    #[serde(alias = "Longitude")]
    pub longitude: f64,
    /// Monthly production capacity in kilograms.
    #[serde(alias = "Capacidade (kg)")]
    pub monthly_capacity_kg: f64,
}

impl Factory {
    /// Creates a factory.
    pub fn new(
        name: impl Into<String>,
        latitude: f64,
        longitude: f64,
        monthly_capacity_kg: f64,
    ) -> Self {
        Self {
            name: name.into(),
            latitude,
            longitude,
            monthly_capacity_kg,
        }
    }

    /// Location in degrees.
    pub fn location(&self) -> GeoPoint {
        GeoPoint::new(self.latitude, self.longitude)
    }

    /// Checks that the capacity is a non-negative number.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.monthly_capacity_kg.is_finite() || self.monthly_capacity_kg < 0.0 {
            return Err(ConfigError::NonPositiveCapacity {
                what: format!("factory '{}'", self.name),
                capacity_kg: self.monthly_capacity_kg,
            });
        }
        Ok(())
    }
}

impl fmt::Display for Factory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Factory {} (capacity: {:.0} kg/month)",
            self.name, self.monthly_capacity_kg
        )
    }
}

/// Returns the index of the factory closest to `point` and its distance in km.
///
/// Factories without a finite distance are skipped. Returns `None` when no
/// factory qualifies.
pub fn nearest_factory(factories: &[Factory], point: &GeoPoint) -> Option<(usize, f64)> {
    let mut best: Option<(usize, f64)> = None;
    for (i, factory) in factories.iter().enumerate() {
        let d = factory.location().distance_to(point);
        if !d.is_finite() {
            continue;
        }
        if best.map_or(true, |(_, bd)| d < bd) {
            best = Some((i, d));
        }
    }
    best
}
