//! Current-versus-proposed scenario comparison.

use serde::Serialize;
use tracing::info;

use crate::config::OptimizerConfig;
use crate::error::Result;
use crate::models::{DcSizeTable, Factory, PointOfSale, Solution, TransportTable};

use super::{optimize_network, Scenario};

/// Both solutions and the monthly savings of the proposal.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScenarioComparison {
    current: Solution,
    proposed: Solution,
    savings: f64,
    savings_pct: f64,
}

impl ScenarioComparison {
    /// Compares two solutions.
    ///
    /// `savings_pct` is 0 when the current total cost is 0.
    pub fn new(current: Solution, proposed: Solution) -> Self {
        let current_total = current.total_cost();
        let savings = current_total - proposed.total_cost();
        let savings_pct = if current_total == 0.0 {
            0.0
        } else {
            savings / current_total * 100.0
        };
        Self {
            current,
            proposed,
            savings,
            savings_pct,
        }
    }

    /// Solution of the current scenario.
    pub fn current(&self) -> &Solution {
        &self.current
    }

    /// Solution of the proposed scenario.
    pub fn proposed(&self) -> &Solution {
        &self.proposed
    }

    /// Current total minus proposed total; negative when the proposal costs more.
    pub fn savings(&self) -> f64 {
        self.savings
    }

    /// Savings as a percentage of the current total.
    pub fn savings_pct(&self) -> f64 {
        self.savings_pct
    }
}

/// Optimizes `current` and `proposed` over the same data and compares them.
///
/// # Errors
///
/// Fails with the error of whichever run fails first.
pub fn compare_scenarios(
    points: &[PointOfSale],
    factories: &[Factory],
    sizes: &DcSizeTable,
    transport: &TransportTable,
    current: &Scenario,
    proposed: &Scenario,
    config: &OptimizerConfig,
) -> Result<ScenarioComparison> {
    let current = optimize_network(points, factories, sizes, transport, current, config)?;
    let proposed = optimize_network(points, factories, sizes, transport, proposed, config)?;
    let comparison = ScenarioComparison::new(current, proposed);
    info!(
        current = comparison.current().total_cost(),
        proposed = comparison.proposed().total_cost(),
        savings = comparison.savings(),
        savings_pct = comparison.savings_pct(),
        "scenarios compared"
    );
    Ok(comparison)
}
