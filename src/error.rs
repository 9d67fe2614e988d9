//! Error types surfaced by the optimization engine.
//!
//! Errors are structured so that callers (dashboards, bindings) can render
//! their own messages. The `Display` output is a diagnostic, not a UI string.

use thiserror::Error;

use crate::models::SizeTier;

/// A configuration problem detected before or during a run.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// No points of sale were supplied.
    #[error("no points of sale supplied")]
    NoPointsOfSale,
    /// A point of sale has negative or non-finite demand.
    #[error("point of sale {id} has invalid demand {demand_kg}")]
    InvalidDemand {
        /// Point of sale ID.
        id: usize,
        /// Offending demand in kg.
        demand_kg: f64,
    },
    /// A coordinate lies outside the valid degree range.
    #[error("coordinate ({latitude}, {longitude}) of entry {id} is out of range")]
    CoordinateOutOfRange {
        /// Point of sale ID, or the index of the DC site or factory.
        id: usize,
        /// Latitude in degrees.
        latitude: f64,
        /// Longitude in degrees.
        longitude: f64,
    },
    /// Two points of sale share the same ID.
    #[error("duplicate point of sale id {0}")]
    DuplicatePointOfSale(usize),
    /// The requested DC count cannot be formed from the data.
    #[error(
        "cannot form {requested} distribution centers from {distinct_locations} distinct locations"
    )]
    InvalidDcCount {
        /// Requested number of DCs.
        requested: usize,
        /// Distinct PDV locations available.
        distinct_locations: usize,
    },
    /// Fixed tier list length differs from the DC count.
    #[error("expected {expected} fixed size tiers, got {actual}")]
    TierCountMismatch {
        /// Number of DCs.
        expected: usize,
        /// Number of tiers supplied.
        actual: usize,
    },
    /// A size label could not be parsed.
    #[error("unknown distribution center size '{0}'")]
    UnknownSizeTier(String),
    /// The size table lacks a tier.
    #[error("size table has no entry for tier {0}")]
    MissingSizeTier(SizeTier),
    /// The size table lists a tier twice.
    #[error("size table lists tier {0} more than once")]
    DuplicateSizeTier(SizeTier),
    /// A capacity that must be positive is not.
    #[error("{what} has non-positive capacity {capacity_kg}")]
    NonPositiveCapacity {
        /// Entity the capacity belongs to.
        what: String,
        /// Offending capacity in kg.
        capacity_kg: f64,
    },
    /// A cost that must be non-negative is not.
    #[error("{what} has invalid cost {cost}")]
    InvalidCost {
        /// Entity the cost belongs to.
        what: String,
        /// Offending cost.
        cost: f64,
    },
    /// No vehicle types were supplied.
    #[error("transport table is empty")]
    EmptyTransportTable,
    /// Two vehicle types share a name.
    #[error("vehicle type '{0}' is listed more than once")]
    DuplicateVehicleType(String),
    /// A fleet entry references an unknown vehicle type.
    #[error("unknown vehicle type '{0}'")]
    UnknownVehicleType(String),
    /// A vehicle type runs no deliveries per month.
    #[error("vehicle type '{0}' must run at least one delivery per month")]
    NoDeliveries(String),
    /// Maximum stops per route must be at least one.
    #[error("max stops per route must be at least 1, got {0}")]
    InvalidMaxStops(usize),
    /// A heuristic threshold is negative or non-finite.
    #[error("threshold {name} has invalid value {value}")]
    InvalidThreshold {
        /// Threshold name.
        name: &'static str,
        /// Offending value.
        value: f64,
    },
    /// The clustering iteration cap must be at least one.
    #[error("k-means iteration cap must be at least 1")]
    InvalidIterationCap,
    /// An input document lacks a required scenario section.
    #[error("input document has no '{0}' scenario")]
    MissingScenario(&'static str),
}

/// Errors returned by the optimization engine.
#[derive(Debug, Error)]
pub enum NetworkError {
    /// Invalid input data or configuration.
    #[error("configuration error: {0}")]
    Configuration(#[from] ConfigError),
    /// No DC/vehicle combination could serve the assigned demand.
    #[error("no feasible solution: {reason}")]
    InfeasibleSolution {
        /// What made the run infeasible.
        reason: String,
    },
    /// Degenerate numeric input (non-finite coordinates, clustering breakdown).
    #[error("numerical error: {reason}")]
    Numerical {
        /// What went wrong.
        reason: String,
    },
    /// Malformed input document.
    #[error("invalid input document: {0}")]
    Input(#[from] serde_json::Error),
}

impl NetworkError {
    pub(crate) fn infeasible(reason: impl Into<String>) -> Self {
        Self::InfeasibleSolution {
            reason: reason.into(),
        }
    }

    pub(crate) fn numerical(reason: impl Into<String>) -> Self {
        Self::Numerical {
            reason: reason.into(),
        }
    }
}

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, NetworkError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_converts() {
        let err: NetworkError = ConfigError::EmptyTransportTable.into();
        assert!(matches!(
            err,
            NetworkError::Configuration(ConfigError::EmptyTransportTable)
        ));
    }

    #[test]
    fn test_display_mentions_counts() {
        let err = ConfigError::InvalidDcCount {
            requested: 5,
            distinct_locations: 3,
        };
        let msg = err.to_string();
        assert!(msg.contains('5'));
        assert!(msg.contains('3'));
    }

    #[test]
    fn test_helpers() {
        assert!(matches!(
            NetworkError::infeasible("x"),
            NetworkError::InfeasibleSolution { .. }
        ));
        assert!(matches!(
            NetworkError::numerical("y"),
            NetworkError::Numerical { .. }
        ));
    }
}
