use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One calendar-month bucket of the forward cashflow forecast.
///
/// The core computes these — the frontend only renders.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyForecast {
    /// First day of the bucket's calendar month
    pub month: NaiveDate,

    /// Expected principal repayments due this month
    pub principal: f64,

    /// Expected profit payments due this month
    pub profit: f64,

    /// principal + profit
    pub total: f64,
}

/// Cumulative expected cashflow up to a checkpoint horizon.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ForecastSummary {
    pub principal: f64,
    pub profit: f64,
    pub total: f64,
}

/// Cumulative summaries at the standard checkpoint horizons.
/// Each covers forecast buckets `[0, k)`, clamped to the available horizon.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ForecastSummaries {
    pub month1: ForecastSummary,
    pub months3: ForecastSummary,
    pub months6: ForecastSummary,
    pub months12: ForecastSummary,
    pub months24: ForecastSummary,
    pub months60: ForecastSummary,
}
