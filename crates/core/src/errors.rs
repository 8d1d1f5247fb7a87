use thiserror::Error;

/// Unified error type for the entire invest-tracker-core library.
/// Every fallible public function returns `Result<T, CoreError>`.
///
/// Degenerate numeric inputs (zero denominators, empty collections) are NOT
/// errors — the calculation services guard them locally and return 0.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Business Logic ──────────────────────────────────────────────
    #[error("Validation failed: {0}")]
    ValidationError(String),

    #[error("Investment not found: {0}")]
    InvestmentNotFound(String),

    #[error("Cashflow not found: {0}")]
    CashflowNotFound(String),

    #[error("Cash transaction not found: {0}")]
    TransactionNotFound(String),

    #[error("Platform not found: {0}")]
    PlatformNotFound(String),

    #[error("Platform {0} still has investments attached")]
    PlatformInUse(String),

    // ── Export / Import ─────────────────────────────────────────────
    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Deserialization error: {0}")]
    Deserialization(String),
}

impl From<serde_json::Error> for CoreError {
    fn from(e: serde_json::Error) -> Self {
        CoreError::Deserialization(e.to_string())
    }
}
