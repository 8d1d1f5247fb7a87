use serde::{Deserialize, Serialize};

use crate::models::scenario::ScenarioInputs;

/// One yearly checkpoint of the goal projection, for chart rendering.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProjectionPoint {
    /// Years from the start of the projection (0 = today)
    pub year_offset: u32,

    /// Projected value at the end of that year
    pub value: f64,
}

/// Compound-growth simulation and the reverse-annuity solver behind the
/// long-horizon goal calculator.
///
/// The forward projection is iterative rather than closed-form so that the
/// end-of-period deposit timing matches exactly between the final value and
/// any chart that re-derives intermediate checkpoints. The solver is the
/// closed-form ordinary-annuity inverse of the same convention; the two are
/// cross-checked by the round-trip test.
pub struct ProjectionService;

impl ProjectionService {
    pub fn new() -> Self {
        Self
    }

    /// Simulate monthly compounding with an end-of-period deposit:
    /// each month, `value = value * (1 + monthly_rate) + monthly_deposit`.
    #[must_use]
    pub fn project_future_value(&self, inputs: &ScenarioInputs) -> f64 {
        let rate = inputs.monthly_rate();
        let mut value = inputs.initial_amount;
        for _ in 0..inputs.months() {
            value = value * (1.0 + rate) + inputs.monthly_deposit;
        }
        value
    }

    /// The same simulation, sampled at the end of every year (plus the
    /// starting point at year 0) for the goal chart.
    #[must_use]
    pub fn project_growth_series(&self, inputs: &ScenarioInputs) -> Vec<ProjectionPoint> {
        let rate = inputs.monthly_rate();
        let mut value = inputs.initial_amount;
        let mut series = Vec::with_capacity(inputs.duration_years as usize + 1);
        series.push(ProjectionPoint {
            year_offset: 0,
            value,
        });

        for year in 1..=inputs.duration_years {
            for _ in 0..12 {
                value = value * (1.0 + rate) + inputs.monthly_deposit;
            }
            series.push(ProjectionPoint {
                year_offset: year,
                value,
            });
        }

        series
    }

    /// Closed-form reverse annuity solve: the monthly contribution needed
    /// to reach `target_amount`, ignoring the scenario's planned deposit.
    ///
    /// Returns 0 when the goal is already reachable from principal growth
    /// alone, and 0 for a degenerate horizon (`months == 0`) or a zero
    /// rate, which would otherwise divide by zero.
    #[must_use]
    pub fn solve_required_monthly_deposit(&self, inputs: &ScenarioInputs) -> f64 {
        let rate = inputs.monthly_rate();
        let months = inputs.months();
        if months == 0 || rate == 0.0 {
            return 0.0;
        }

        let growth = (1.0 + rate).powi(months as i32);
        let future_value_of_initial = inputs.initial_amount * growth;
        let remaining = inputs.target_amount - future_value_of_initial;
        if remaining <= 0.0 {
            return 0.0;
        }

        let pmt = remaining / ((growth - 1.0) / rate);
        pmt.max(0.0)
    }

    /// How far along the goal is, in percent of the target. Unclamped —
    /// values over 100 mean the goal is exceeded; display clamping is the
    /// presentation layer's job. 0 when the target is 0.
    #[must_use]
    pub fn goal_progress(&self, current_value: f64, target_amount: f64) -> f64 {
        if target_amount == 0.0 {
            0.0
        } else {
            current_value / target_amount * 100.0
        }
    }
}

impl Default for ProjectionService {
    fn default() -> Self {
        Self::new()
    }
}
