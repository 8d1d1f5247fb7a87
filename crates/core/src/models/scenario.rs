use serde::{Deserialize, Serialize};

/// Inputs for a long-horizon savings-goal scenario ("Vision 2040").
///
/// Pure value object — the engine never persists these; saved scenario
/// presets live with the host application.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioInputs {
    /// Starting capital
    pub initial_amount: f64,

    /// Planned contribution at the end of each month
    pub monthly_deposit: f64,

    /// Assumed annualized return, in percent (e.g., 8.0 for 8%)
    pub expected_irr: f64,

    /// The savings goal to reach
    pub target_amount: f64,

    /// Projection horizon in years
    pub duration_years: u32,
}

impl ScenarioInputs {
    /// The monthly compounding rate derived from the annual percentage.
    #[must_use]
    pub fn monthly_rate(&self) -> f64 {
        self.expected_irr / 100.0 / 12.0
    }

    /// Horizon length in months.
    #[must_use]
    pub fn months(&self) -> u32 {
        self.duration_years * 12
    }
}
