use serde::{Deserialize, Serialize};

use super::cashflow::Cashflow;
use super::investment::Investment;
use super::platform::Platform;
use super::transaction::CashTransaction;

/// The main data container: every entity collection the engine consumes.
///
/// This is what gets serialized for export; persistence of the resulting
/// JSON (file, REST backend, ...) is entirely the host application's job.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PortfolioData {
    /// All investment positions
    pub investments: Vec<Investment>,

    /// Scheduled/received payments, each tied to one investment
    pub cashflows: Vec<Cashflow>,

    /// The cash ledger (deposits, withdrawals, investments, distributions)
    pub cash_transactions: Vec<CashTransaction>,

    /// Platforms that group investments
    pub platforms: Vec<Platform>,
}

impl PortfolioData {
    pub fn new() -> Self {
        Self::default()
    }
}
