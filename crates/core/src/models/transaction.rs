use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Direction/category of a cash ledger entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransactionKind {
    /// Cash paid into the account
    Deposit,
    /// Cash taken out of the account
    Withdrawal,
    /// Cash deployed into an investment
    Investment,
    /// Cash returned from an investment (principal or profit payout)
    Distribution,
}

impl std::fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TransactionKind::Deposit => write!(f, "Deposit"),
            TransactionKind::Withdrawal => write!(f, "Withdrawal"),
            TransactionKind::Investment => write!(f, "Investment"),
            TransactionKind::Distribution => write!(f, "Distribution"),
        }
    }
}

/// A single entry in the cash ledger, independent of any investment.
///
/// There is no stored running balance — the balance is always the signed
/// sum over the full ledger, recomputed on demand.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CashTransaction {
    /// Unique identifier
    pub id: Uuid,

    /// Entry category
    pub kind: TransactionKind,

    /// Amount (always positive; direction comes from `kind`)
    pub amount: f64,

    /// Date of the transaction
    pub date: NaiveDate,

    /// Free-form tag (e.g., "salary", "EstateGuru payout")
    #[serde(default)]
    pub source: String,
}

impl CashTransaction {
    pub fn new(kind: TransactionKind, amount: f64, date: NaiveDate) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind,
            amount,
            date,
            source: String::new(),
        }
    }

    /// Create a transaction with a source tag attached.
    pub fn with_source(
        kind: TransactionKind,
        amount: f64,
        date: NaiveDate,
        source: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind,
            amount,
            date,
            source: source.into(),
        }
    }

    /// The amount with its ledger sign applied: deposits and distributions
    /// add cash, withdrawals and investments remove it.
    #[must_use]
    pub fn signed_amount(&self) -> f64 {
        match self.kind {
            TransactionKind::Deposit | TransactionKind::Distribution => self.amount,
            TransactionKind::Withdrawal | TransactionKind::Investment => -self.amount,
        }
    }
}
