use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// What a scheduled payment repays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CashflowKind {
    /// Repayment of invested principal
    Principal,
    /// Interest / profit portion
    Profit,
}

impl std::fmt::Display for CashflowKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CashflowKind::Principal => write!(f, "Principal"),
            CashflowKind::Profit => write!(f, "Profit"),
        }
    }
}

/// Payment status of a cashflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CashflowStatus {
    /// Scheduled, due date still far out
    Upcoming,
    /// Due soon / awaiting payment
    Expected,
    /// Money arrived
    Received,
}

impl std::fmt::Display for CashflowStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CashflowStatus::Upcoming => write!(f, "Upcoming"),
            CashflowStatus::Expected => write!(f, "Expected"),
            CashflowStatus::Received => write!(f, "Received"),
        }
    }
}

/// A scheduled principal or profit payment tied to one investment.
///
/// Invariant: `received_date` is `Some` exactly when `status == Received`.
/// Use [`Cashflow::mark_received`] / [`Cashflow::mark_unreceived`] to
/// change status so the invariant holds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cashflow {
    /// Unique identifier
    pub id: Uuid,

    /// The investment this payment belongs to
    pub investment_id: Uuid,

    /// Principal or Profit
    pub kind: CashflowKind,

    /// Payment amount (always positive)
    pub amount: f64,

    /// Contractual due date
    pub due_date: NaiveDate,

    /// Payment status
    pub status: CashflowStatus,

    /// Date the payment actually arrived — set iff status is Received
    #[serde(default)]
    pub received_date: Option<NaiveDate>,
}

impl Cashflow {
    pub fn new(
        investment_id: Uuid,
        kind: CashflowKind,
        amount: f64,
        due_date: NaiveDate,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            investment_id,
            kind,
            amount,
            due_date,
            status: CashflowStatus::Expected,
            received_date: None,
        }
    }

    /// Mark this cashflow as received on `date`.
    pub fn mark_received(&mut self, date: NaiveDate) {
        self.status = CashflowStatus::Received;
        self.received_date = Some(date);
    }

    /// Revert a received cashflow back to Expected (corrective edit).
    pub fn mark_unreceived(&mut self) {
        self.status = CashflowStatus::Expected;
        self.received_date = None;
    }

    /// True if the payment hasn't arrived and its due date has passed.
    #[must_use]
    pub fn is_overdue(&self, today: NaiveDate) -> bool {
        self.status != CashflowStatus::Received && self.due_date < today
    }

    /// How many days past due this cashflow is (negative if not yet due).
    #[must_use]
    pub fn days_overdue(&self, today: NaiveDate) -> i64 {
        (today - self.due_date).num_days()
    }
}
