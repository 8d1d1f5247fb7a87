use chrono::{Datelike, NaiveDate};

use crate::models::cashflow::{Cashflow, CashflowKind, CashflowStatus};
use crate::models::forecast::{ForecastSummaries, ForecastSummary, MonthlyForecast};

/// Buckets future cashflows into calendar-month horizons and produces
/// cumulative checkpoint summaries.
///
/// Operates directly on the cashflow records — no investment metadata is
/// needed beyond what the cashflow itself carries. `today` is captured once
/// per invocation by the caller; with a frozen `today` the output is fully
/// deterministic.
pub struct ForecastService;

impl ForecastService {
    pub fn new() -> Self {
        Self
    }

    /// Produce exactly `horizon_months` ordered buckets, starting at the
    /// calendar month of `today` (offset 0).
    ///
    /// A cashflow lands in the bucket of its due date's calendar month iff
    /// it is not yet received and its month is not before the current one.
    /// Unreceived cashflows due earlier in the current month still count
    /// in bucket 0; months before that are excluded from the forward view.
    #[must_use]
    pub fn calculate_monthly_forecast(
        &self,
        cashflows: &[Cashflow],
        horizon_months: usize,
        today: NaiveDate,
    ) -> Vec<MonthlyForecast> {
        let mut buckets: Vec<MonthlyForecast> = (0..horizon_months)
            .map(|offset| MonthlyForecast {
                month: add_months(first_of_month(today), offset as i32),
                principal: 0.0,
                profit: 0.0,
                total: 0.0,
            })
            .collect();

        for cf in cashflows {
            if cf.status == CashflowStatus::Received {
                continue;
            }
            let offset = month_offset(today, cf.due_date);
            if offset < 0 || offset as usize >= horizon_months {
                continue;
            }
            let bucket = &mut buckets[offset as usize];
            match cf.kind {
                CashflowKind::Principal => bucket.principal += cf.amount,
                CashflowKind::Profit => bucket.profit += cf.amount,
            }
            bucket.total = bucket.principal + bucket.profit;
        }

        buckets
    }

    /// Cumulative sums over buckets `[0, k)` for the standard checkpoint
    /// horizons, clamped to the available bucket count.
    #[must_use]
    pub fn calculate_forecast_summaries(&self, forecast: &[MonthlyForecast]) -> ForecastSummaries {
        ForecastSummaries {
            month1: cumulative(forecast, 1),
            months3: cumulative(forecast, 3),
            months6: cumulative(forecast, 6),
            months12: cumulative(forecast, 12),
            months24: cumulative(forecast, 24),
            months60: cumulative(forecast, 60),
        }
    }
}

impl Default for ForecastService {
    fn default() -> Self {
        Self::new()
    }
}

fn cumulative(forecast: &[MonthlyForecast], horizon: usize) -> ForecastSummary {
    let upto = horizon.min(forecast.len());
    let mut summary = ForecastSummary::default();
    for bucket in &forecast[..upto] {
        summary.principal += bucket.principal;
        summary.profit += bucket.profit;
        summary.total += bucket.total;
    }
    summary
}

/// Whole calendar months from `today`'s month to `date`'s month
/// (negative when `date` is in an earlier month).
fn month_offset(today: NaiveDate, date: NaiveDate) -> i32 {
    (date.year() - today.year()) * 12 + (date.month() as i32 - today.month() as i32)
}

fn first_of_month(date: NaiveDate) -> NaiveDate {
    // day 1 always exists for a valid year/month
    NaiveDate::from_ymd_opt(date.year(), date.month(), 1).unwrap_or(date)
}

/// The first of the month `offset` months after `start` (itself a first-of-month).
fn add_months(start: NaiveDate, offset: i32) -> NaiveDate {
    let zero_based = start.year() * 12 + start.month() as i32 - 1 + offset;
    let year = zero_based.div_euclid(12);
    let month = (zero_based.rem_euclid(12) + 1) as u32;
    NaiveDate::from_ymd_opt(year, month, 1).unwrap_or(start)
}
