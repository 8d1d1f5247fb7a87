use chrono::NaiveDate;

use crate::models::cashflow::Cashflow;
use crate::models::investment::{Investment, InvestmentState, RepaymentHealth};

/// Days past due after which a late investment counts as defaulted.
pub const DEFAULT_GRACE_DAYS: i64 = 60;

/// Derives per-investment repayment health from cashflow due dates.
///
/// Pure predicates — no I/O, no caching, re-evaluated on every call.
/// The stored [`InvestmentState`] stays authoritative for the lifecycle;
/// this service only computes the overdue overlay on top of it.
pub struct ClassificationService;

impl ClassificationService {
    pub fn new() -> Self {
        Self
    }

    /// True iff the investment is active and has at least one unreceived
    /// cashflow past its due date. Pending and completed investments are
    /// never late. An investment with no cashflows is never late.
    #[must_use]
    pub fn is_late(
        &self,
        investment: &Investment,
        cashflows: &[Cashflow],
        today: NaiveDate,
    ) -> bool {
        if investment.state != InvestmentState::Active {
            return false;
        }
        cashflows
            .iter()
            .filter(|cf| cf.investment_id == investment.id)
            .any(|cf| cf.is_overdue(today))
    }

    /// True iff the investment is active and has at least one unreceived
    /// cashflow more than [`DEFAULT_GRACE_DAYS`] past due.
    #[must_use]
    pub fn is_defaulted(
        &self,
        investment: &Investment,
        cashflows: &[Cashflow],
        today: NaiveDate,
    ) -> bool {
        if investment.state != InvestmentState::Active {
            return false;
        }
        cashflows
            .iter()
            .filter(|cf| cf.investment_id == investment.id)
            .any(|cf| cf.is_overdue(today) && cf.days_overdue(today) > DEFAULT_GRACE_DAYS)
    }

    /// The combined overlay: Defaulted wins over Late wins over OnTime.
    #[must_use]
    pub fn health(
        &self,
        investment: &Investment,
        cashflows: &[Cashflow],
        today: NaiveDate,
    ) -> RepaymentHealth {
        if self.is_defaulted(investment, cashflows, today) {
            RepaymentHealth::Defaulted
        } else if self.is_late(investment, cashflows, today) {
            RepaymentHealth::Late
        } else {
            RepaymentHealth::OnTime
        }
    }
}

impl Default for ClassificationService {
    fn default() -> Self {
        Self::new()
    }
}
