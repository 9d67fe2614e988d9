//! JSON input documents.
//!
//! A [`NetworkInput`] carries the tables a dashboard or script collects
//! (points of sale, factories, DC sizes, vehicle types) together with the
//! scenarios to run. Column names follow the source spreadsheets, so both the
//! English field names and the Portuguese headers are accepted.
//!
//! ```json
//! {
//!   "pdvs": [{"latitude": -15.8, "longitude": -47.9, "demanda_kg": 1200}],
//!   "factories": [{"Nome": "Anápolis", "Latitude": -16.3, "Longitude": -48.9,
//!                  "Capacidade (kg)": 250000}],
//!   "dc_sizes": [{"Tipos de CD": "CD pequeno", "Capacidade (kg)": 50000,
//!                 "Custo mensal": 20000}, ...],
//!   "transport": [{"Modal": "Truck", "Custo fixo por mês": 9000, ...}],
//!   "scenario": {"dc_count": 3}
//! }
//! ```

use serde::{Deserialize, Serialize};

use crate::config::OptimizerConfig;
use crate::distance::GeoPoint;
use crate::error::{ConfigError, Result};
use crate::models::{
    DcSizeRecord, DcSizeTable, Factory, FixedFleet, PointOfSale, PointOfSaleRecord, SizeTier,
    Solution, TransportTable, VehicleType,
};
use crate::network::{compare_scenarios, optimize_network, Scenario, ScenarioComparison};
use crate::positioning::{DcSiting, DcSizing};

/// Scenario section of an input document.
///
/// - `dc_locations` places DCs at fixed sites; otherwise `dc_count` DCs are
///   clustered (defaulting to the length of `dc_sizes`, then to 1).
/// - `dc_sizes` fixes the tier of each DC; otherwise DCs are sized by demand.
/// - `fleet` operates a fixed fleet at every DC; otherwise the mix is chosen.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScenarioSpec {
    /// Number of clustered DCs.
    pub dc_count: Option<usize>,
    /// Fixed DC locations.
    pub dc_locations: Option<Vec<GeoPoint>>,
    /// Size tier per DC.
    pub dc_sizes: Option<Vec<SizeTier>>,
    /// Fleet per DC.
    pub fleet: Option<FixedFleet>,
}

impl ScenarioSpec {
    /// Converts the section into a [`Scenario`].
    pub fn to_scenario(&self) -> Scenario {
        let siting = match &self.dc_locations {
            Some(locations) => DcSiting::Fixed(locations.clone()),
            None => DcSiting::Clustered {
                count: self
                    .dc_count
                    .or_else(|| self.dc_sizes.as_ref().map(Vec::len))
                    .unwrap_or(1),
            },
        };
        let sizing = match &self.dc_sizes {
            Some(tiers) => DcSizing::Fixed(tiers.clone()),
            None => DcSizing::ByDemand,
        };
        Scenario {
            siting,
            sizing,
            fleet: self.fleet.clone(),
        }
    }
}

/// A complete optimization request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetworkInput {
    /// Point of sale rows; the row index is the point ID.
    pub pdvs: Vec<PointOfSaleRecord>,
    /// Factories, used for inbound reporting.
    #[serde(default)]
    pub factories: Vec<Factory>,
    /// DC size table rows.
    pub dc_sizes: Vec<DcSizeRecord>,
    /// Vehicle types.
    pub transport: Vec<VehicleType>,
    /// Engine parameters.
    #[serde(default)]
    pub config: OptimizerConfig,
    /// Scenario for a single run.
    #[serde(default)]
    pub scenario: Option<ScenarioSpec>,
    /// Current scenario of a comparison.
    #[serde(default)]
    pub current: Option<ScenarioSpec>,
    /// Proposed scenario of a comparison.
    #[serde(default)]
    pub proposed: Option<ScenarioSpec>,
}

impl NetworkInput {
    /// Parses a JSON document.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Points of sale with row-index IDs.
    pub fn points(&self) -> Vec<PointOfSale> {
        PointOfSaleRecord::into_points(&self.pdvs)
    }

    /// Validated DC size table.
    pub fn size_table(&self) -> Result<DcSizeTable> {
        Ok(DcSizeTable::from_records(&self.dc_sizes)?)
    }

    /// Validated transport table.
    pub fn transport_table(&self) -> Result<TransportTable> {
        Ok(TransportTable::new(self.transport.clone())?)
    }

    /// Runs the `scenario` section.
    pub fn optimize(&self) -> Result<Solution> {
        let spec = self
            .scenario
            .as_ref()
            .ok_or(ConfigError::MissingScenario("scenario"))?;
        optimize_network(
            &self.points(),
            &self.factories,
            &self.size_table()?,
            &self.transport_table()?,
            &spec.to_scenario(),
            &self.config,
        )
    }

    /// Compares the `current` and `proposed` sections.
    pub fn compare(&self) -> Result<ScenarioComparison> {
        let current = self
            .current
            .as_ref()
            .ok_or(ConfigError::MissingScenario("current"))?;
        let proposed = self
            .proposed
            .as_ref()
            .ok_or(ConfigError::MissingScenario("proposed"))?;
        compare_scenarios(
            &self.points(),
            &self.factories,
            &self.size_table()?,
            &self.transport_table()?,
            &current.to_scenario(),
            &proposed.to_scenario(),
            &self.config,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::NetworkError;

    const DOCUMENT: &str = r#"{
        "pdvs": [
            {"latitude": -15.80, "longitude": -47.90, "demanda_kg": 1000},
            {"latitude": -15.81, "longitude": -47.91, "demanda_kg": 1000},
            {"latitude": -15.82, "longitude": -47.92, "demanda_kg": 1000},
            {"latitude": -15.83, "longitude": -47.93, "demanda_kg": 1000},
            {"latitude": -15.84, "longitude": -47.94, "demand_kg": 1000}
        ],
        "factories": [
            {"Nome": "Anápolis", "Latitude": -16.3, "Longitude": -48.9, "Capacidade (kg)": 250000}
        ],
        "dc_sizes": [
            {"Tipos de CD": "CD pequeno", "Capacidade (kg)": 4000, "Custo mensal": 1000},
            {"Tipos de CD": "CD médio", "Capacidade (kg)": 10000, "Custo mensal": 2500},
            {"Tipos de CD": "CD grande", "Capacidade (kg)": 50000, "Custo mensal": 8000}
        ],
        "transport": [
            {"Modal": "Truck", "Custo fixo por mês": 9000, "Custo variável por km": 2.5,
             "Nº entrega por mês": 176, "Capacidade por entrega (kg)": 5000}
        ],
        "config": {"seed": 7},
        "scenario": {"dc_count": 1},
        "current": {"dc_sizes": ["large"], "fleet": [{"Modal": "Truck", "Quantidade": 2}]},
        "proposed": {"dc_count": 1}
    }"#;

    #[test]
    fn test_parses_portuguese_headers() {
        let input = NetworkInput::from_json(DOCUMENT).expect("valid document");
        assert_eq!(input.pdvs.len(), 5);
        assert_eq!(input.factories[0].name, "Anápolis");
        assert_eq!(input.transport[0].deliveries_per_month, 176);
        assert_eq!(input.config.seed, 7);
        assert_eq!(input.config.max_stops_per_route, 8);
        let table = input.size_table().expect("valid table");
        assert_eq!(table.spec(SizeTier::Medium).capacity_kg, 10000.0);
    }

    #[test]
    fn test_optimize() {
        let input = NetworkInput::from_json(DOCUMENT).expect("valid document");
        let solution = input.optimize().expect("feasible");
        assert_eq!(solution.num_routes(), 1);
        assert_eq!(solution.centers()[0].tier(), SizeTier::Medium);
        assert_eq!(solution.costs().storage, 2500.0);
    }

    #[test]
    fn test_compare() {
        let input = NetworkInput::from_json(DOCUMENT).expect("valid document");
        let comparison = input.compare().expect("feasible");
        assert_eq!(comparison.current().vehicles()["Truck"], 2);
        assert!(comparison.savings() > 0.0);
    }

    #[test]
    fn test_scenario_defaults() {
        let spec = ScenarioSpec {
            dc_sizes: Some(vec![SizeTier::Small, SizeTier::Large]),
            ..ScenarioSpec::default()
        };
        let scenario = spec.to_scenario();
        assert_eq!(scenario.siting, DcSiting::Clustered { count: 2 });
        assert_eq!(ScenarioSpec::default().to_scenario(), Scenario::proposed(1));
    }

    #[test]
    fn test_missing_sections() {
        let mut input = NetworkInput::from_json(DOCUMENT).expect("valid document");
        input.scenario = None;
        assert!(matches!(
            input.optimize(),
            Err(NetworkError::Configuration(ConfigError::MissingScenario("scenario")))
        ));
        input.proposed = None;
        assert!(matches!(
            input.compare(),
            Err(NetworkError::Configuration(ConfigError::MissingScenario("proposed")))
        ));
    }

    #[test]
    fn test_malformed_document() {
        assert!(matches!(
            NetworkInput::from_json("{\"pdvs\": 3}"),
            Err(NetworkError::Input(_))
        ));
    }
}
