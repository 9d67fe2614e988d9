//! Optimizer configuration.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Tunable parameters of an optimization run.
///
/// By default a route has at most eight stops, a vehicle type is tried only
/// if it projects at least four average-demand stops, and its routing is kept
/// only if routes average at least three stops.
///
/// # Examples
///
/// ```
/// use u_distribution::OptimizerConfig;
///
/// let config = OptimizerConfig::default().with_seed(7).with_max_stops(6);
/// assert_eq!(config.seed, 7);
/// assert_eq!(config.max_stops_per_route, 6);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OptimizerConfig {
    /// Seed for the clustering step.
    pub seed: u64,
    /// Stop ceiling per route.
    pub max_stops_per_route: usize,
    /// Minimum `capacity / average demand` before a vehicle type is tried.
    pub min_projected_stops: f64,
    /// Minimum average stops per route for a routing to be accepted.
    pub min_average_stops: f64,
    /// Lloyd iteration cap for k-means.
    pub max_kmeans_iterations: usize,
}

impl Default for OptimizerConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            max_stops_per_route: 8,
            min_projected_stops: 4.0,
            min_average_stops: 3.0,
            max_kmeans_iterations: 300,
        }
    }
}

impl OptimizerConfig {
    /// Sets the clustering seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Sets the stop ceiling per route.
    pub fn with_max_stops(mut self, max_stops: usize) -> Self {
        self.max_stops_per_route = max_stops;
        self
    }

    /// Sets both route density thresholds.
    pub fn with_density_thresholds(mut self, projected: f64, average: f64) -> Self {
        self.min_projected_stops = projected;
        self.min_average_stops = average;
        self
    }

    /// Sets the k-means iteration cap.
    pub fn with_max_kmeans_iterations(mut self, iterations: usize) -> Self {
        self.max_kmeans_iterations = iterations;
        self
    }

    /// Checks that every parameter is usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_stops_per_route == 0 {
            return Err(ConfigError::InvalidMaxStops(0));
        }
        for (name, value) in [
            ("min_projected_stops", self.min_projected_stops),
            ("min_average_stops", self.min_average_stops),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::InvalidThreshold { name, value });
            }
        }
        if self.max_kmeans_iterations == 0 {
            return Err(ConfigError::InvalidIterationCap);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let c = OptimizerConfig::default();
        assert_eq!(c.seed, 42);
        assert_eq!(c.max_stops_per_route, 8);
        assert_eq!(c.min_projected_stops, 4.0);
        assert_eq!(c.min_average_stops, 3.0);
        assert!(c.validate().is_ok());
    }

    #[test]
    fn test_zero_max_stops_rejected() {
        let c = OptimizerConfig::default().with_max_stops(0);
        assert_eq!(c.validate(), Err(ConfigError::InvalidMaxStops(0)));
    }

    #[test]
    fn test_negative_threshold_rejected() {
        let c = OptimizerConfig::default().with_density_thresholds(-1.0, 3.0);
        assert!(matches!(
            c.validate(),
            Err(ConfigError::InvalidThreshold {
                name: "min_projected_stops",
                ..
            })
        ));
    }

    #[test]
    fn test_zero_iterations_rejected() {
        let c = OptimizerConfig::default().with_max_kmeans_iterations(0);
        assert_eq!(c.validate(), Err(ConfigError::InvalidIterationCap));
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let c: OptimizerConfig = serde_json::from_str(r#"{"seed": 9}"#).expect("valid json");
        assert_eq!(c.seed, 9);
        assert_eq!(c.max_stops_per_route, 8);
    }
}
