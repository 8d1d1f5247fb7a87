use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stored lifecycle state of an investment. Set only by explicit user
/// action (entry, activation, completion) — never derived.
///
/// The late/defaulted dimension is deliberately NOT part of this enum.
/// It is a [`RepaymentHealth`] overlay recomputed on read from the
/// cashflow due dates, so it can never go stale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InvestmentState {
    /// Entered but not yet funded/started
    Pending,
    /// Running — capital is deployed
    Active,
    /// Fully repaid (or written off by explicit user action)
    Completed,
}

impl std::fmt::Display for InvestmentState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InvestmentState::Pending => write!(f, "Pending"),
            InvestmentState::Active => write!(f, "Active"),
            InvestmentState::Completed => write!(f, "Completed"),
        }
    }
}

/// Derived repayment health of an investment, computed from its unreceived
/// cashflows' due dates. Never persisted — always recomputed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RepaymentHealth {
    /// No overdue cashflows
    OnTime,
    /// At least one unreceived cashflow past its due date
    Late,
    /// At least one unreceived cashflow more than 60 days past due
    Defaulted,
}

impl std::fmt::Display for RepaymentHealth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RepaymentHealth::OnTime => write!(f, "On Time"),
            RepaymentHealth::Late => write!(f, "Late"),
            RepaymentHealth::Defaulted => write!(f, "Defaulted"),
        }
    }
}

/// A single investment position.
///
/// Monetary fields are plain numbers in the portfolio's base currency;
/// parsing/validation of user input happens at the application boundary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Investment {
    /// Unique identifier
    pub id: Uuid,

    /// Display name (e.g., "Riga apartment loan #14")
    pub name: String,

    /// Nominal principal amount
    pub face_value: f64,

    /// Annualized expected rate, in percent (input assumption, not derived)
    pub expected_irr: f64,

    /// Expected profit over the whole term — profit only, excludes principal
    pub total_expected_profit: f64,

    /// Funding/start date
    pub start_date: NaiveDate,

    /// Contractual end date
    pub end_date: NaiveDate,

    /// Stored lifecycle state (user-controlled)
    pub state: InvestmentState,

    /// The platform this investment belongs to
    pub platform_id: Uuid,
}

impl Investment {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        name: impl Into<String>,
        face_value: f64,
        expected_irr: f64,
        total_expected_profit: f64,
        start_date: NaiveDate,
        end_date: NaiveDate,
        platform_id: Uuid,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            face_value,
            expected_irr,
            total_expected_profit,
            start_date,
            end_date,
            state: InvestmentState::Active,
            platform_id,
        }
    }

    /// Whole calendar months between start and end, clamped to at least 1.
    /// Day-of-month is ignored; this is the duration basis for APR and
    /// the duration average.
    #[must_use]
    pub fn duration_months(&self) -> i32 {
        use chrono::Datelike;
        let months = (self.end_date.year() - self.start_date.year()) * 12
            + (self.end_date.month() as i32 - self.start_date.month() as i32);
        months.max(1)
    }
}
