pub mod errors;
pub mod models;
pub mod services;

use chrono::NaiveDate;
use uuid::Uuid;

use models::{
    cashflow::{Cashflow, CashflowKind, CashflowStatus},
    forecast::{ForecastSummaries, MonthlyForecast},
    investment::{Investment, InvestmentState, RepaymentHealth},
    metrics::{DashboardMetrics, DateRange},
    platform::{Platform, PlatformKind},
    portfolio::PortfolioData,
    scenario::ScenarioInputs,
    transaction::{CashTransaction, TransactionKind},
};
use services::{
    classification_service::ClassificationService, forecast_service::ForecastService,
    metrics_service::MetricsService, projection_service::ProjectionService,
};

use errors::CoreError;
use services::projection_service::ProjectionPoint;

/// Cache key for a memoized dashboard snapshot. Any mutation bumps the
/// revision, so a stale entry can never be served.
type MetricsCacheKey = (u64, Option<DateRange>, NaiveDate);

/// Main entry point for the Invest Tracker core library.
/// Owns the entity collections and all services that operate on them.
///
/// Everything is synchronous, in-memory, pure computation: no I/O, no
/// network, no persistence. The host application feeds data in through the
/// validated CRUD methods (or a JSON import) and renders whatever the
/// analytics methods return.
#[must_use]
pub struct InvestmentTracker {
    data: PortfolioData,
    classification_service: ClassificationService,
    metrics_service: MetricsService,
    forecast_service: ForecastService,
    projection_service: ProjectionService,
    /// Tracks whether any mutation has occurred since the last save/load.
    dirty: bool,
    /// Bumped on every mutation; keys the metrics cache.
    revision: u64,
    /// One-entry memoization of the last dashboard snapshot.
    metrics_cache: Option<(MetricsCacheKey, DashboardMetrics)>,
}

impl std::fmt::Debug for InvestmentTracker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InvestmentTracker")
            .field("investments", &self.data.investments.len())
            .field("cashflows", &self.data.cashflows.len())
            .field("cash_transactions", &self.data.cash_transactions.len())
            .field("platforms", &self.data.platforms.len())
            .field("dirty", &self.dirty)
            .finish()
    }
}

impl Default for InvestmentTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl InvestmentTracker {
    /// Create a brand new empty tracker.
    pub fn new() -> Self {
        Self::from_data(PortfolioData::new())
    }

    /// Build a tracker around already-fetched collections (e.g., loaded by
    /// the host application from its own storage). The data is validated;
    /// import is all-or-nothing.
    pub fn from_collections(data: PortfolioData) -> Result<Self, CoreError> {
        Self::validate_data(&data)?;
        Ok(Self::from_data(data))
    }

    // ── Platforms ───────────────────────────────────────────────────

    /// Register a platform. Name must be non-empty.
    pub fn add_platform(
        &mut self,
        name: impl Into<String>,
        kind: PlatformKind,
    ) -> Result<Uuid, CoreError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(CoreError::ValidationError(
                "Platform name must not be empty".into(),
            ));
        }
        let platform = Platform::new(name, kind);
        let id = platform.id;
        self.data.platforms.push(platform);
        self.touch();
        Ok(id)
    }

    /// Remove a platform. Fails while any investment still references it.
    pub fn remove_platform(&mut self, platform_id: Uuid) -> Result<(), CoreError> {
        let idx = self
            .data
            .platforms
            .iter()
            .position(|p| p.id == platform_id)
            .ok_or_else(|| CoreError::PlatformNotFound(platform_id.to_string()))?;

        if self
            .data
            .investments
            .iter()
            .any(|inv| inv.platform_id == platform_id)
        {
            return Err(CoreError::PlatformInUse(platform_id.to_string()));
        }

        self.data.platforms.remove(idx);
        self.touch();
        Ok(())
    }

    #[must_use]
    pub fn get_platform(&self, platform_id: Uuid) -> Option<&Platform> {
        self.data.platforms.iter().find(|p| p.id == platform_id)
    }

    #[must_use]
    pub fn platforms(&self) -> &[Platform] {
        &self.data.platforms
    }

    // ── Investments ─────────────────────────────────────────────────

    /// Record a new investment (created Active).
    ///
    /// Rules: face value must be positive, expected profit non-negative,
    /// end date must not precede start date, and the platform must exist.
    #[allow(clippy::too_many_arguments)]
    pub fn add_investment(
        &mut self,
        name: impl Into<String>,
        face_value: f64,
        expected_irr: f64,
        total_expected_profit: f64,
        start_date: NaiveDate,
        end_date: NaiveDate,
        platform_id: Uuid,
    ) -> Result<Uuid, CoreError> {
        let investment = Investment::new(
            name,
            face_value,
            expected_irr,
            total_expected_profit,
            start_date,
            end_date,
            platform_id,
        );
        self.validate_investment(&investment)?;
        let id = investment.id;
        self.data.investments.push(investment);
        self.touch();
        Ok(id)
    }

    /// Update an investment's fields. Validates the new state before
    /// committing (corrective edits to completed investments included).
    #[allow(clippy::too_many_arguments)]
    pub fn update_investment(
        &mut self,
        investment_id: Uuid,
        name: impl Into<String>,
        face_value: f64,
        expected_irr: f64,
        total_expected_profit: f64,
        start_date: NaiveDate,
        end_date: NaiveDate,
        platform_id: Uuid,
    ) -> Result<(), CoreError> {
        let idx = self.investment_index(investment_id)?;

        let mut updated = self.data.investments[idx].clone();
        updated.name = name.into();
        updated.face_value = face_value;
        updated.expected_irr = expected_irr;
        updated.total_expected_profit = total_expected_profit;
        updated.start_date = start_date;
        updated.end_date = end_date;
        updated.platform_id = platform_id;

        self.validate_investment(&updated)?;
        self.data.investments[idx] = updated;
        self.touch();
        Ok(())
    }

    /// Remove an investment along with all of its cashflows.
    pub fn remove_investment(&mut self, investment_id: Uuid) -> Result<(), CoreError> {
        let idx = self.investment_index(investment_id)?;
        self.data.investments.remove(idx);
        self.data
            .cashflows
            .retain(|cf| cf.investment_id != investment_id);
        self.touch();
        Ok(())
    }

    /// Mark an investment as completed (explicit user action).
    pub fn mark_investment_completed(&mut self, investment_id: Uuid) -> Result<(), CoreError> {
        self.set_investment_state(investment_id, InvestmentState::Completed)
    }

    /// (Re)activate an investment (e.g., a pending one that funded).
    pub fn mark_investment_active(&mut self, investment_id: Uuid) -> Result<(), CoreError> {
        self.set_investment_state(investment_id, InvestmentState::Active)
    }

    fn set_investment_state(
        &mut self,
        investment_id: Uuid,
        state: InvestmentState,
    ) -> Result<(), CoreError> {
        let idx = self.investment_index(investment_id)?;
        self.data.investments[idx].state = state;
        self.touch();
        Ok(())
    }

    #[must_use]
    pub fn get_investment(&self, investment_id: Uuid) -> Option<&Investment> {
        self.data
            .investments
            .iter()
            .find(|inv| inv.id == investment_id)
    }

    #[must_use]
    pub fn investments(&self) -> &[Investment] {
        &self.data.investments
    }

    /// Investments on a given platform.
    #[must_use]
    pub fn investments_for_platform(&self, platform_id: Uuid) -> Vec<&Investment> {
        self.data
            .investments
            .iter()
            .filter(|inv| inv.platform_id == platform_id)
            .collect()
    }

    /// Investments in a given stored state.
    #[must_use]
    pub fn investments_in_state(&self, state: InvestmentState) -> Vec<&Investment> {
        self.data
            .investments
            .iter()
            .filter(|inv| inv.state == state)
            .collect()
    }

    /// Derived repayment health of one investment, as of today.
    pub fn investment_health(&self, investment_id: Uuid) -> Result<RepaymentHealth, CoreError> {
        self.investment_health_as_of(investment_id, today())
    }

    /// Derived repayment health with an explicit "now" reference
    /// (for reproducible tests and historical views).
    pub fn investment_health_as_of(
        &self,
        investment_id: Uuid,
        as_of: NaiveDate,
    ) -> Result<RepaymentHealth, CoreError> {
        let investment = self
            .get_investment(investment_id)
            .ok_or_else(|| CoreError::InvestmentNotFound(investment_id.to_string()))?;
        Ok(self
            .classification_service
            .health(investment, &self.data.cashflows, as_of))
    }

    // ── Cashflows ───────────────────────────────────────────────────

    /// Schedule a cashflow for an investment. Amount must be positive and
    /// the investment must exist.
    pub fn add_cashflow(
        &mut self,
        investment_id: Uuid,
        kind: CashflowKind,
        amount: f64,
        due_date: NaiveDate,
    ) -> Result<Uuid, CoreError> {
        if amount <= 0.0 {
            return Err(CoreError::ValidationError(
                "Cashflow amount must be positive".into(),
            ));
        }
        if self.get_investment(investment_id).is_none() {
            return Err(CoreError::InvestmentNotFound(investment_id.to_string()));
        }
        let cashflow = Cashflow::new(investment_id, kind, amount, due_date);
        let id = cashflow.id;
        self.data.cashflows.push(cashflow);
        self.touch();
        Ok(id)
    }

    pub fn remove_cashflow(&mut self, cashflow_id: Uuid) -> Result<(), CoreError> {
        let idx = self
            .data
            .cashflows
            .iter()
            .position(|cf| cf.id == cashflow_id)
            .ok_or_else(|| CoreError::CashflowNotFound(cashflow_id.to_string()))?;
        self.data.cashflows.remove(idx);
        self.touch();
        Ok(())
    }

    /// Mark a cashflow as received on `date`. Keeps the received-date
    /// invariant: the date is set exactly when the status is Received.
    pub fn mark_cashflow_received(
        &mut self,
        cashflow_id: Uuid,
        date: NaiveDate,
    ) -> Result<(), CoreError> {
        let cashflow = self.cashflow_mut(cashflow_id)?;
        cashflow.mark_received(date);
        self.touch();
        Ok(())
    }

    /// Revert a received cashflow back to Expected (corrective edit).
    pub fn mark_cashflow_unreceived(&mut self, cashflow_id: Uuid) -> Result<(), CoreError> {
        let cashflow = self.cashflow_mut(cashflow_id)?;
        cashflow.mark_unreceived();
        self.touch();
        Ok(())
    }

    #[must_use]
    pub fn get_cashflow(&self, cashflow_id: Uuid) -> Option<&Cashflow> {
        self.data.cashflows.iter().find(|cf| cf.id == cashflow_id)
    }

    #[must_use]
    pub fn cashflows(&self) -> &[Cashflow] {
        &self.data.cashflows
    }

    /// Cashflows of one investment, ordered by due date.
    #[must_use]
    pub fn cashflows_for_investment(&self, investment_id: Uuid) -> Vec<&Cashflow> {
        let mut flows: Vec<&Cashflow> = self
            .data
            .cashflows
            .iter()
            .filter(|cf| cf.investment_id == investment_id)
            .collect();
        flows.sort_by_key(|cf| cf.due_date);
        flows
    }

    /// All overdue (unreceived, past-due) cashflows as of `as_of`,
    /// most overdue first.
    #[must_use]
    pub fn overdue_cashflows(&self, as_of: NaiveDate) -> Vec<&Cashflow> {
        let mut flows: Vec<&Cashflow> = self
            .data
            .cashflows
            .iter()
            .filter(|cf| cf.is_overdue(as_of))
            .collect();
        flows.sort_by_key(|cf| cf.due_date);
        flows
    }

    // ── Cash Ledger ─────────────────────────────────────────────────

    /// Record a cash ledger entry. Amount must be positive; the direction
    /// comes from the kind.
    pub fn add_cash_transaction(
        &mut self,
        kind: TransactionKind,
        amount: f64,
        date: NaiveDate,
    ) -> Result<Uuid, CoreError> {
        self.push_cash_transaction(CashTransaction::new(kind, amount, date))
    }

    /// Record a cash ledger entry with a source tag.
    pub fn add_cash_transaction_with_source(
        &mut self,
        kind: TransactionKind,
        amount: f64,
        date: NaiveDate,
        source: impl Into<String>,
    ) -> Result<Uuid, CoreError> {
        self.push_cash_transaction(CashTransaction::with_source(kind, amount, date, source))
    }

    fn push_cash_transaction(&mut self, tx: CashTransaction) -> Result<Uuid, CoreError> {
        if tx.amount <= 0.0 {
            return Err(CoreError::ValidationError(
                "Transaction amount must be positive".into(),
            ));
        }
        let id = tx.id;
        self.data.cash_transactions.push(tx);
        self.touch();
        Ok(id)
    }

    pub fn remove_cash_transaction(&mut self, transaction_id: Uuid) -> Result<(), CoreError> {
        let idx = self
            .data
            .cash_transactions
            .iter()
            .position(|tx| tx.id == transaction_id)
            .ok_or_else(|| CoreError::TransactionNotFound(transaction_id.to_string()))?;
        self.data.cash_transactions.remove(idx);
        self.touch();
        Ok(())
    }

    #[must_use]
    pub fn cash_transactions(&self) -> &[CashTransaction] {
        &self.data.cash_transactions
    }

    /// The current cash balance: signed sum over the full ledger.
    #[must_use]
    pub fn cash_balance(&self) -> f64 {
        self.data
            .cash_transactions
            .iter()
            .map(|tx| tx.signed_amount())
            .sum()
    }

    // ── Dashboard Metrics ───────────────────────────────────────────

    /// Aggregate dashboard snapshot as of today, memoized until the next
    /// mutation. `date_range` restricts investments by start date.
    pub fn dashboard_metrics(&mut self, date_range: Option<DateRange>) -> DashboardMetrics {
        self.dashboard_metrics_as_of(date_range, today())
    }

    /// Dashboard snapshot with an explicit "now" reference.
    pub fn dashboard_metrics_as_of(
        &mut self,
        date_range: Option<DateRange>,
        as_of: NaiveDate,
    ) -> DashboardMetrics {
        let key: MetricsCacheKey = (self.revision, date_range, as_of);
        if let Some((cached_key, cached)) = &self.metrics_cache {
            if *cached_key == key {
                return cached.clone();
            }
        }

        let metrics = self.metrics_service.calculate_dashboard_metrics(
            &self.data.investments,
            &self.data.cash_transactions,
            &self.data.platforms,
            &self.data.cashflows,
            date_range,
            as_of,
        );
        self.metrics_cache = Some((key, metrics.clone()));
        metrics
    }

    // ── Forecast ────────────────────────────────────────────────────

    /// Per-month forward cashflow forecast starting from the current
    /// calendar month.
    #[must_use]
    pub fn monthly_forecast(&self, horizon_months: usize) -> Vec<MonthlyForecast> {
        self.monthly_forecast_as_of(horizon_months, today())
    }

    /// Forecast with an explicit "now" reference.
    #[must_use]
    pub fn monthly_forecast_as_of(
        &self,
        horizon_months: usize,
        as_of: NaiveDate,
    ) -> Vec<MonthlyForecast> {
        self.forecast_service
            .calculate_monthly_forecast(&self.data.cashflows, horizon_months, as_of)
    }

    /// Cumulative checkpoint summaries over a forecast horizon.
    #[must_use]
    pub fn forecast_summaries(&self, horizon_months: usize) -> ForecastSummaries {
        self.forecast_summaries_as_of(horizon_months, today())
    }

    /// Summaries with an explicit "now" reference.
    #[must_use]
    pub fn forecast_summaries_as_of(
        &self,
        horizon_months: usize,
        as_of: NaiveDate,
    ) -> ForecastSummaries {
        let forecast = self.monthly_forecast_as_of(horizon_months, as_of);
        self.forecast_service.calculate_forecast_summaries(&forecast)
    }

    // ── Goal Projection ─────────────────────────────────────────────

    /// Projected value at the end of the scenario horizon.
    #[must_use]
    pub fn project_future_value(&self, inputs: &ScenarioInputs) -> f64 {
        self.projection_service.project_future_value(inputs)
    }

    /// Yearly checkpoints of the same projection, for the goal chart.
    #[must_use]
    pub fn project_growth_series(&self, inputs: &ScenarioInputs) -> Vec<ProjectionPoint> {
        self.projection_service.project_growth_series(inputs)
    }

    /// Monthly contribution needed to hit the scenario target.
    #[must_use]
    pub fn required_monthly_deposit(&self, inputs: &ScenarioInputs) -> f64 {
        self.projection_service.solve_required_monthly_deposit(inputs)
    }

    /// How much the planned monthly deposit falls short of the required
    /// one, floored at 0. Same rate/horizon basis as the solver.
    #[must_use]
    pub fn monthly_gap(&self, inputs: &ScenarioInputs) -> f64 {
        let required = self.required_monthly_deposit(inputs);
        (required - inputs.monthly_deposit).max(0.0)
    }

    /// Goal progress of `current_value` against the scenario target, in
    /// percent (unclamped).
    #[must_use]
    pub fn goal_progress(&self, inputs: &ScenarioInputs, current_value: f64) -> f64 {
        self.projection_service
            .goal_progress(current_value, inputs.target_amount)
    }

    // ── Export / Import ─────────────────────────────────────────────

    /// Export the full data set as a JSON string for the host to persist.
    pub fn export_to_json(&self) -> Result<String, CoreError> {
        serde_json::to_string_pretty(&self.data)
            .map_err(|e| CoreError::Serialization(format!("Failed to serialize portfolio: {e}")))
    }

    /// Replace the current data set with one parsed from JSON.
    /// All-or-nothing: if any record fails validation, nothing changes.
    pub fn import_from_json(&mut self, json: &str) -> Result<(), CoreError> {
        let data: PortfolioData = serde_json::from_str(json)?;
        Self::validate_data(&data)?;
        self.data = data;
        self.touch();
        Ok(())
    }

    /// Borrow the underlying collections (read-only).
    #[must_use]
    pub fn data(&self) -> &PortfolioData {
        &self.data
    }

    // ── Dirty State ─────────────────────────────────────────────────

    /// Returns `true` if anything changed since the last save/load.
    #[must_use]
    pub fn has_unsaved_changes(&self) -> bool {
        self.dirty
    }

    /// Clear the unsaved-changes flag after the host persisted the export.
    pub fn mark_saved(&mut self) {
        self.dirty = false;
    }

    // ── Internal ────────────────────────────────────────────────────

    fn from_data(data: PortfolioData) -> Self {
        Self {
            data,
            classification_service: ClassificationService::new(),
            metrics_service: MetricsService::new(),
            forecast_service: ForecastService::new(),
            projection_service: ProjectionService::new(),
            dirty: false,
            revision: 0,
            metrics_cache: None,
        }
    }

    /// Every mutation goes through here: sets the dirty flag and bumps the
    /// revision, which invalidates the metrics cache.
    fn touch(&mut self) {
        self.dirty = true;
        self.revision += 1;
        self.metrics_cache = None;
    }

    fn investment_index(&self, investment_id: Uuid) -> Result<usize, CoreError> {
        self.data
            .investments
            .iter()
            .position(|inv| inv.id == investment_id)
            .ok_or_else(|| CoreError::InvestmentNotFound(investment_id.to_string()))
    }

    fn cashflow_mut(&mut self, cashflow_id: Uuid) -> Result<&mut Cashflow, CoreError> {
        self.data
            .cashflows
            .iter_mut()
            .find(|cf| cf.id == cashflow_id)
            .ok_or_else(|| CoreError::CashflowNotFound(cashflow_id.to_string()))
    }

    fn validate_investment(&self, investment: &Investment) -> Result<(), CoreError> {
        if investment.face_value <= 0.0 {
            return Err(CoreError::ValidationError(
                "Face value must be positive".into(),
            ));
        }
        if investment.total_expected_profit < 0.0 {
            return Err(CoreError::ValidationError(
                "Expected profit must not be negative".into(),
            ));
        }
        if investment.end_date < investment.start_date {
            return Err(CoreError::ValidationError(format!(
                "End date {} precedes start date {}",
                investment.end_date, investment.start_date
            )));
        }
        if self.get_platform(investment.platform_id).is_none() {
            return Err(CoreError::PlatformNotFound(
                investment.platform_id.to_string(),
            ));
        }
        Ok(())
    }

    /// Structural validation of a whole imported data set.
    fn validate_data(data: &PortfolioData) -> Result<(), CoreError> {
        for inv in &data.investments {
            if inv.face_value <= 0.0 {
                return Err(CoreError::ValidationError(format!(
                    "Investment '{}' has non-positive face value",
                    inv.name
                )));
            }
            if inv.end_date < inv.start_date {
                return Err(CoreError::ValidationError(format!(
                    "Investment '{}' ends before it starts",
                    inv.name
                )));
            }
        }
        for cf in &data.cashflows {
            if cf.amount <= 0.0 {
                return Err(CoreError::ValidationError(format!(
                    "Cashflow {} has non-positive amount",
                    cf.id
                )));
            }
            if !data.investments.iter().any(|inv| inv.id == cf.investment_id) {
                return Err(CoreError::InvestmentNotFound(cf.investment_id.to_string()));
            }
            let date_matches_status = cf.received_date.is_some()
                == (cf.status == CashflowStatus::Received);
            if !date_matches_status {
                return Err(CoreError::ValidationError(format!(
                    "Cashflow {} breaks the received-date invariant",
                    cf.id
                )));
            }
        }
        for tx in &data.cash_transactions {
            if tx.amount <= 0.0 {
                return Err(CoreError::ValidationError(format!(
                    "Transaction {} has non-positive amount",
                    tx.id
                )));
            }
        }
        Ok(())
    }
}

/// The wall-clock "now" reference, captured once per facade invocation.
fn today() -> NaiveDate {
    chrono::Utc::now().date_naive()
}
