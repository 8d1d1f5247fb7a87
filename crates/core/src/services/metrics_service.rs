use chrono::NaiveDate;
use std::collections::HashMap;
use uuid::Uuid;

use crate::models::cashflow::{Cashflow, CashflowKind, CashflowStatus};
use crate::models::investment::{Investment, InvestmentState};
use crate::models::metrics::{DashboardMetrics, DateRange, PlatformSlice, StatusCounts};
use crate::models::platform::Platform;
use crate::models::transaction::CashTransaction;
use crate::services::classification_service::ClassificationService;

/// Computes the aggregate dashboard snapshot from the raw entity
/// collections.
///
/// Pure aggregation — no I/O, no stored state. The function is total for
/// any well-typed input: every ratio guards its denominator and falls back
/// to 0, so empty collections produce an all-zero snapshot rather than
/// NaN/Infinity.
pub struct MetricsService {
    classification_service: ClassificationService,
}

impl MetricsService {
    pub fn new() -> Self {
        Self {
            classification_service: ClassificationService::new(),
        }
    }

    /// Build a full [`DashboardMetrics`] snapshot as of `today`.
    ///
    /// `date_range` (when given) restricts investments to those whose
    /// `start_date` falls inside it. The cash balance is never filtered —
    /// it always reflects the full ledger.
    #[must_use]
    pub fn calculate_dashboard_metrics(
        &self,
        investments: &[Investment],
        cash_transactions: &[CashTransaction],
        platforms: &[Platform],
        cashflows: &[Cashflow],
        date_range: Option<DateRange>,
        today: NaiveDate,
    ) -> DashboardMetrics {
        let filtered: Vec<&Investment> = investments
            .iter()
            .filter(|inv| match date_range {
                Some(range) => range.contains(inv.start_date),
                None => true,
            })
            .collect();

        let cash_balance: f64 = cash_transactions.iter().map(|tx| tx.signed_amount()).sum();

        let active: Vec<&Investment> = filtered
            .iter()
            .filter(|inv| inv.state == InvestmentState::Active)
            .copied()
            .collect();

        let active_face_value: f64 = active.iter().map(|inv| inv.face_value).sum();
        let portfolio_value = active_face_value + cash_balance;

        // Received profit cashflows, restricted to the filtered investments
        let filtered_ids: std::collections::HashSet<Uuid> =
            filtered.iter().map(|inv| inv.id).collect();
        let actual_returns: f64 = cashflows
            .iter()
            .filter(|cf| {
                cf.kind == CashflowKind::Profit
                    && cf.status == CashflowStatus::Received
                    && filtered_ids.contains(&cf.investment_id)
            })
            .map(|cf| cf.amount)
            .sum();

        // Expected returns come straight from the investment records,
        // not from summing cashflows
        let expected_returns: f64 = filtered.iter().map(|inv| inv.total_expected_profit).sum();

        let returns_ratio = pct_of(actual_returns, expected_returns);
        let cash_ratio = pct_of(cash_balance, portfolio_value);

        // Weighted APR: per-investment annualized rate, weighted by each
        // active investment's share of the total active face value
        let weighted_apr = if active_face_value > 0.0 {
            active
                .iter()
                .map(|inv| {
                    let apr = investment_apr(inv);
                    apr * (inv.face_value / active_face_value)
                })
                .sum()
        } else {
            0.0
        };

        let total_invested_capital: f64 = filtered.iter().map(|inv| inv.face_value).sum();
        let portfolio_roi = pct_of(actual_returns, total_invested_capital);

        let average_duration_months = if filtered.is_empty() {
            0.0
        } else {
            let total_months: i32 = filtered.iter().map(|inv| inv.duration_months()).sum();
            let avg = f64::from(total_months) / filtered.len() as f64;
            (avg * 100.0).round() / 100.0
        };

        let average_face_value = if filtered.is_empty() {
            0.0
        } else {
            total_invested_capital / filtered.len() as f64
        };

        let profit_cashflows: Vec<&Cashflow> = cashflows
            .iter()
            .filter(|cf| cf.kind == CashflowKind::Profit)
            .collect();
        let average_profit_cashflow = if profit_cashflows.is_empty() {
            0.0
        } else {
            profit_cashflows.iter().map(|cf| cf.amount).sum::<f64>()
                / profit_cashflows.len() as f64
        };

        let status_counts = StatusCounts {
            active: active.len(),
            completed: filtered
                .iter()
                .filter(|inv| inv.state == InvestmentState::Completed)
                .count(),
            late: filtered
                .iter()
                .filter(|inv| self.classification_service.is_late(inv, cashflows, today))
                .count(),
            defaulted: filtered
                .iter()
                .filter(|inv| {
                    self.classification_service
                        .is_defaulted(inv, cashflows, today)
                })
                .count(),
        };

        let platform_distribution =
            platform_distribution(&filtered, platforms, total_invested_capital);

        DashboardMetrics {
            as_of_date: today,
            portfolio_value,
            cash_balance,
            cash_ratio,
            actual_returns,
            expected_returns,
            returns_ratio,
            weighted_apr,
            portfolio_roi,
            total_invested_capital,
            average_duration_months,
            average_face_value,
            average_profit_cashflow,
            status_counts,
            platform_distribution,
        }
    }
}

impl Default for MetricsService {
    fn default() -> Self {
        Self::new()
    }
}

/// `numerator / denominator * 100`, or 0 when the denominator is 0.
fn pct_of(numerator: f64, denominator: f64) -> f64 {
    if denominator == 0.0 {
        0.0
    } else {
        numerator / denominator * 100.0
    }
}

/// Annualized rate of a single investment, in percent:
/// `(profit / face) * (12 / duration_months) * 100`.
fn investment_apr(inv: &Investment) -> f64 {
    if inv.face_value == 0.0 {
        return 0.0;
    }
    let duration = f64::from(inv.duration_months());
    (inv.total_expected_profit / inv.face_value) * (12.0 / duration) * 100.0
}

/// Group investments by platform, summing value and count, with each
/// slice's percentage of `total_value`. Sorted descending by value.
fn platform_distribution(
    investments: &[&Investment],
    platforms: &[Platform],
    total_value: f64,
) -> Vec<PlatformSlice> {
    let mut grouped: HashMap<Uuid, (f64, usize)> = HashMap::new();
    for inv in investments {
        let entry = grouped.entry(inv.platform_id).or_insert((0.0, 0));
        entry.0 += inv.face_value;
        entry.1 += 1;
    }

    let names: HashMap<Uuid, &str> = platforms
        .iter()
        .map(|p| (p.id, p.name.as_str()))
        .collect();

    let mut slices: Vec<PlatformSlice> = grouped
        .into_iter()
        .map(|(platform_id, (value, count))| PlatformSlice {
            platform_id,
            name: names
                .get(&platform_id)
                .map_or_else(|| "(unknown)".to_string(), |n| (*n).to_string()),
            value,
            count,
            percentage: pct_of(value, total_value),
        })
        .collect();

    slices.sort_by(|a, b| {
        b.value
            .partial_cmp(&a.value)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    slices
}
