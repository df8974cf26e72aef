//! The application state context: one `BudgetState`, its persistence and its
//! lifecycle.

use std::{path::Path, sync::Arc};

use budgetcraft_config::Config;
use budgetcraft_core::{
    reconcile_all, storage::state_warnings, AllocationConfirmation, Aggregates, BudgetService,
    CategoryService, CategoryUpdate, Clock, ExpenseFilter, ExpenseService, ReconcileReport,
    RenameOutcome, SummaryService, SystemClock,
};
use budgetcraft_domain::{
    BudgetCategory, BudgetState, CategoryColorRegistry, CategoryKind, Direction, Expense,
    NewExpense, SpendingCategory,
};
use budgetcraft_storage_json::{JsonFileStore, MemoryStore};
use tracing::{debug, info, warn};

use crate::{
    defaults,
    errors::BudgetResult,
    persistence::{ActiveTab, DebouncedWriter, PersistenceGateway, UiPreferences},
};

/// Knobs taken from [`Config`] when building a store.
#[derive(Debug, Clone)]
pub struct StoreOptions {
    pub persist_debounce: std::time::Duration,
    pub seed_sample_expenses: bool,
}

impl Default for StoreOptions {
    fn default() -> Self {
        Self::from(&Config::default())
    }
}

impl From<&Config> for StoreOptions {
    fn from(config: &Config) -> Self {
        Self {
            persist_debounce: config.persist_debounce(),
            seed_sample_expenses: config.seed_sample_expenses,
        }
    }
}

/// Owns the budget state and mirrors it to storage.
///
/// Every command runs to completion against the in-memory state before
/// returning; failed commands leave it untouched. Writes are debounced: call
/// [`BudgetStore::tick`] periodically, or [`BudgetStore::flush`] to write now.
/// Dropping the store flushes pending changes.
pub struct BudgetStore {
    state: BudgetState,
    preferences: UiPreferences,
    gateway: PersistenceGateway,
    writer: DebouncedWriter,
    clock: Arc<dyn Clock>,
    seed_sample_expenses: bool,
}

impl BudgetStore {
    /// Loads every slice from `gateway`, falling back to defaults per slice,
    /// then repairs colors and dangling expense references.
    pub fn init_from_persistence(
        mut gateway: PersistenceGateway,
        clock: Arc<dyn Clock>,
        options: StoreOptions,
    ) -> Self {
        if !gateway.is_available() {
            gateway.disable();
        }
        let keys = gateway.keys().clone();

        let mut state = BudgetState::new(gateway.get(&keys.income(), defaults::DEFAULT_INCOME));
        state.budget_categories = gateway.get(&keys.budget_categories(), defaults::budget_categories());
        state.spending_categories =
            gateway.get(&keys.spending_categories(), defaults::spending_categories());
        state.expenses = gateway.get(
            &keys.expenses(),
            defaults::expenses(options.seed_sample_expenses),
        );
        // Stored color maps are not read back; the registry mirrors the lists.
        state.sync_colors();
        let renumbered = state.dedupe_expense_ids(clock.now_millis());
        if renumbered > 0 {
            warn!(renumbered, "stored ledger had repeated expense ids");
        }

        let report = reconcile_all(&mut state);
        if !report.is_clean() {
            info!(
                reassigned = report.reassigned.len(),
                orphaned = report.orphaned.len(),
                "repaired expense categories on load"
            );
        }
        state.refresh_spent();
        for warning in state_warnings(&state) {
            debug!(%warning, "loaded state anomaly");
        }

        let preferences = UiPreferences {
            active_tab: gateway.get(&keys.active_tab(), ActiveTab::default()),
        };
        info!(
            namespace = %keys.namespace(),
            expenses = state.expenses.len(),
            persistent = gateway.is_enabled(),
            "budget store initialized"
        );
        let mut store = Self {
            state,
            preferences,
            gateway,
            writer: DebouncedWriter::new(options.persist_debounce),
            clock,
            seed_sample_expenses: options.seed_sample_expenses,
        };
        if renumbered > 0 {
            store.touch();
        }
        store
    }

    /// Opens the file-backed store described by `config` under `home`.
    pub fn open(config: &Config, home: &Path) -> BudgetResult<Self> {
        let store = JsonFileStore::new(config.resolve_data_dir(home))?;
        let gateway = PersistenceGateway::new(Arc::new(store), config.namespace());
        Ok(Self::init_from_persistence(
            gateway,
            Arc::new(SystemClock),
            StoreOptions::from(config),
        ))
    }

    /// Store with volatile storage, for tests and previews.
    pub fn in_memory(clock: Arc<dyn Clock>, options: StoreOptions) -> Self {
        let gateway = PersistenceGateway::new(
            Arc::new(MemoryStore::new()),
            Config::default_namespace(),
        );
        Self::init_from_persistence(gateway, clock, options)
    }

    pub fn state(&self) -> &BudgetState {
        &self.state
    }

    pub fn income(&self) -> f64 {
        self.state.income
    }

    pub fn budget_categories(&self) -> &[BudgetCategory] {
        BudgetService::list(&self.state)
    }

    pub fn spending_categories(&self) -> &[SpendingCategory] {
        CategoryService::list(&self.state)
    }

    pub fn expenses(&self) -> &[Expense] {
        ExpenseService::list(&self.state)
    }

    pub fn colors(&self) -> &CategoryColorRegistry {
        &self.state.colors
    }

    pub fn preferences(&self) -> UiPreferences {
        self.preferences
    }

    pub fn aggregates(&self) -> Aggregates {
        SummaryService::snapshot(&self.state)
    }

    pub fn filtered_expenses(&self, filter: &ExpenseFilter) -> Vec<&Expense> {
        ExpenseService::filter(&self.state, filter)
    }

    pub fn total_allocated(&self) -> f64 {
        BudgetService::total_allocated(&self.state)
    }

    pub fn remaining_allocatable(&self) -> f64 {
        BudgetService::remaining_allocatable(&self.state)
    }

    pub fn has_pending_changes(&self) -> bool {
        self.writer.is_dirty()
    }

    pub fn is_persistent(&self) -> bool {
        self.gateway.is_enabled()
    }

    pub fn set_income(&mut self, value: f64) -> BudgetResult<()> {
        BudgetService::set_income(&mut self.state, value)?;
        self.touch();
        Ok(())
    }

    pub fn set_income_input(&mut self, raw: &str) -> BudgetResult<f64> {
        let value = BudgetService::set_income_input(&mut self.state, raw)?;
        self.touch();
        Ok(value)
    }

    pub fn add_budget_category(
        &mut self,
        name: &str,
        color: &str,
        raw_amount: &str,
    ) -> BudgetResult<AllocationConfirmation> {
        let confirmation = BudgetService::add_category(&mut self.state, name, color, raw_amount)?;
        self.touch();
        Ok(confirmation)
    }

    pub fn add_budget_category_by_percentage(
        &mut self,
        name: &str,
        color: &str,
        percentage: f64,
    ) -> BudgetResult<AllocationConfirmation> {
        let confirmation =
            BudgetService::add_category_by_percentage(&mut self.state, name, color, percentage)?;
        self.touch();
        Ok(confirmation)
    }

    pub fn update_budget_category(
        &mut self,
        index: usize,
        update: CategoryUpdate,
    ) -> BudgetResult<AllocationConfirmation> {
        let confirmation = BudgetService::update_category(&mut self.state, index, update)?;
        self.touch();
        Ok(confirmation)
    }

    pub fn rename_budget_category(
        &mut self,
        old_name: &str,
        new_name: &str,
    ) -> BudgetResult<AllocationConfirmation> {
        let confirmation = BudgetService::rename_category(&mut self.state, old_name, new_name)?;
        self.touch();
        Ok(confirmation)
    }

    pub fn recolor_budget_category(&mut self, name: &str, color: &str) -> BudgetResult<()> {
        BudgetService::recolor_category(&mut self.state, name, color)?;
        self.touch();
        Ok(())
    }

    pub fn delete_budget_category(&mut self, name: &str) -> BudgetResult<ReconcileReport> {
        let report = BudgetService::delete_category(&mut self.state, name)?;
        self.touch();
        Ok(report)
    }

    pub fn add_spending_category(&mut self, name: &str, color: &str) -> BudgetResult<()> {
        CategoryService::add_category(&mut self.state, name, color)?;
        self.touch();
        Ok(())
    }

    pub fn rename_spending_category(
        &mut self,
        old_name: &str,
        new_name: &str,
        color: &str,
    ) -> BudgetResult<RenameOutcome> {
        let outcome = CategoryService::rename_category(&mut self.state, old_name, new_name, color)?;
        self.touch();
        Ok(outcome)
    }

    pub fn recolor_spending_category(&mut self, name: &str, color: &str) -> BudgetResult<()> {
        CategoryService::recolor_category(&mut self.state, name, color)?;
        self.touch();
        Ok(())
    }

    pub fn delete_spending_category(&mut self, name: &str) -> BudgetResult<ReconcileReport> {
        let report = CategoryService::delete_category(&mut self.state, name)?;
        self.touch();
        Ok(report)
    }

    pub fn add_expense(&mut self, expense: NewExpense) -> BudgetResult<i64> {
        let id = ExpenseService::add(&mut self.state, self.clock.as_ref(), expense)?;
        self.touch();
        Ok(id)
    }

    pub fn add_expenses(&mut self, expenses: Vec<NewExpense>) -> BudgetResult<Vec<i64>> {
        if expenses.is_empty() {
            return Ok(Vec::new());
        }
        let ids = ExpenseService::add_batch(&mut self.state, self.clock.as_ref(), expenses)?;
        self.touch();
        Ok(ids)
    }

    pub fn update_expense(&mut self, id: i64, record: Expense) -> BudgetResult<()> {
        ExpenseService::update(&mut self.state, id, record)?;
        self.touch();
        Ok(())
    }

    pub fn delete_expense(&mut self, id: i64) -> BudgetResult<Expense> {
        let removed = ExpenseService::delete(&mut self.state, id)?;
        self.touch();
        Ok(removed)
    }

    pub fn clear_expenses(&mut self) -> usize {
        let removed = ExpenseService::clear_all(&mut self.state);
        if removed > 0 {
            self.touch();
        }
        removed
    }

    pub fn reorder_expenses(&mut self, ordered: Vec<Expense>) -> BudgetResult<()> {
        ExpenseService::reorder(&mut self.state, ordered)?;
        self.touch();
        Ok(())
    }

    pub fn move_expense(&mut self, index: usize, direction: Direction) -> bool {
        let moved = ExpenseService::move_adjacent(&mut self.state, index, direction);
        if moved {
            self.touch();
        }
        moved
    }

    pub fn set_active_tab(&mut self, tab: ActiveTab) {
        if self.preferences.active_tab != tab {
            self.preferences.active_tab = tab;
            self.touch();
        }
    }

    /// Writes pending changes once the debounce period has elapsed.
    /// Returns `true` when a flush happened.
    pub fn tick(&mut self) -> bool {
        if self.writer.is_due(self.clock.now()) {
            self.flush();
            true
        } else {
            false
        }
    }

    /// Writes every slice immediately. Returns `false` when persistence is
    /// unavailable and the data only lives in memory.
    pub fn flush(&mut self) -> bool {
        self.writer.mark_clean();
        if !self.gateway.is_enabled() {
            return false;
        }
        let keys = self.gateway.keys().clone();
        let state = &self.state;
        let gateway = &mut self.gateway;
        let written = gateway.set(&keys.income(), &state.income)
            && gateway.set(&keys.budget_categories(), &state.budget_categories)
            && gateway.set(&keys.spending_categories(), &state.spending_categories)
            && gateway.set(
                &keys.category_colors(),
                state.colors.entries(CategoryKind::Spending),
            )
            && gateway.set(&keys.budget_colors(), state.colors.entries(CategoryKind::Budget))
            && gateway.set(&keys.expenses(), &state.expenses)
            && gateway.set(&keys.active_tab(), &self.preferences.active_tab);
        if written {
            debug!(expenses = state.expenses.len(), "budget state persisted");
        } else {
            warn!("budget state could not be persisted");
        }
        written
    }

    /// Deletes every stored slice and resets to first-run defaults.
    pub fn reset(&mut self) {
        self.gateway.clear();
        let mut state = BudgetState::new(defaults::DEFAULT_INCOME);
        state.budget_categories = defaults::budget_categories();
        state.spending_categories = defaults::spending_categories();
        state.expenses = defaults::expenses(self.seed_sample_expenses);
        state.sync_colors();
        state.refresh_spent();
        self.state = state;
        self.preferences = UiPreferences::default();
        self.touch();
        info!("budget store reset to defaults");
    }

    /// Marks the state dirty and re-derives per-category spending.
    fn touch(&mut self) {
        self.state.refresh_spent();
        self.writer.mark_dirty(self.clock.now());
    }
}

impl Drop for BudgetStore {
    fn drop(&mut self) {
        if self.writer.is_dirty() {
            self.flush();
        }
    }
}
