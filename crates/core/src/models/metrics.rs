use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Inclusive date range used to filter investments by start date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DateRange {
    pub from: NaiveDate,
    pub to: NaiveDate,
}

impl DateRange {
    pub fn new(from: NaiveDate, to: NaiveDate) -> Self {
        Self { from, to }
    }

    #[must_use]
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.from && date <= self.to
    }
}

/// Counts of investments per status dimension.
///
/// `active`/`completed` come from the stored state; `late`/`defaulted`
/// come from the repayment-health overlay, so an active investment can be
/// counted both as active and as late.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusCounts {
    pub active: usize,
    pub completed: usize,
    pub late: usize,
    pub defaulted: usize,
}

/// One platform's share of the portfolio.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlatformSlice {
    /// Platform being summarized
    pub platform_id: Uuid,

    /// Platform display name ("(unknown)" if the id has no platform record)
    pub name: String,

    /// Summed face value of this platform's investments
    pub value: f64,

    /// Number of investments on this platform
    pub count: usize,

    /// Share of total investment value, in percent
    pub percentage: f64,
}

/// Aggregate dashboard snapshot. Produced fresh on every invocation and
/// never mutated in place.
///
/// All ratios are true (possibly >100) percentages; clamping for display
/// is the presentation layer's job. Every ratio guards its denominator and
/// falls back to 0, so the struct is finite for any well-typed input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardMetrics {
    /// Date this snapshot was computed for
    pub as_of_date: NaiveDate,

    /// Active face value + cash balance
    pub portfolio_value: f64,

    /// Signed sum over the full cash ledger (never date-filtered)
    pub cash_balance: f64,

    /// cash_balance / portfolio_value × 100
    pub cash_ratio: f64,

    /// Sum of received profit cashflows
    pub actual_returns: f64,

    /// Sum of expected profit over the investment set
    pub expected_returns: f64,

    /// actual_returns / expected_returns × 100
    pub returns_ratio: f64,

    /// Face-value-weighted annualized rate over active investments, in percent
    pub weighted_apr: f64,

    /// actual_returns / total_invested_capital × 100 (not annualized)
    pub portfolio_roi: f64,

    /// Sum of face value over the whole filtered set (not just active)
    pub total_invested_capital: f64,

    /// Mean duration in whole months, rounded to 2 decimals
    pub average_duration_months: f64,

    /// Mean face value per investment
    pub average_face_value: f64,

    /// Mean amount of profit-type cashflows
    pub average_profit_cashflow: f64,

    /// Investment counts per status dimension
    pub status_counts: StatusCounts,

    /// Per-platform breakdown, sorted descending by value
    pub platform_distribution: Vec<PlatformSlice>,
}
