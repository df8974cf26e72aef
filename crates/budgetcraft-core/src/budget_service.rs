//! Income and budget-category allocation rules.

use budgetcraft_domain::{
    finite_or_zero, percentage_of, round_currency, AmountInput, BudgetCategory, BudgetState,
    CategoryKind,
};
use tracing::info;

use crate::{
    reconcile::{cascade_rename, reconcile_expenses, ReconcileReport},
    validation, CoreError, CoreResult,
};

/// Float slack allowed when comparing allocation totals against income.
const ALLOCATION_TOLERANCE: f64 = 1e-9;

/// Partial edit applied by [`BudgetService::update_category`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CategoryUpdate {
    pub name: Option<String>,
    pub color: Option<String>,
    /// Raw amount text; switches the category to amount mode.
    pub amount: Option<String>,
    /// Switches the category to percentage mode.
    pub percentage: Option<f64>,
}

impl CategoryUpdate {
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    pub fn amount(mut self, raw: impl Into<String>) -> Self {
        self.amount = Some(raw.into());
        self
    }

    pub fn percentage(mut self, percentage: f64) -> Self {
        self.percentage = Some(percentage);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.color.is_none() && self.amount.is_none() && self.percentage.is_none()
    }
}

/// Result of a successful allocation change.
#[derive(Debug, Clone, PartialEq)]
pub struct AllocationConfirmation {
    pub category: BudgetCategory,
    pub total_allocated: f64,
    pub percent_of_income: f64,
    /// Expenses repaired by the reconciliation pass a rename triggered.
    pub reconcile: ReconcileReport,
}

impl AllocationConfirmation {
    fn new(state: &BudgetState, category: BudgetCategory, reconcile: ReconcileReport) -> Self {
        let total_allocated = state.total_allocated();
        Self {
            category,
            total_allocated: round_currency(total_allocated),
            percent_of_income: round_currency(percentage_of(total_allocated, state.income)),
            reconcile,
        }
    }

    /// Human-readable confirmation, e.g. for a toast.
    pub fn message(&self) -> String {
        format!(
            "Saved `{}`. Total allocated: ${:.2} ({:.1}% of income)",
            self.category.name, self.total_allocated, self.percent_of_income
        )
    }
}

/// Owns the rules for income and the budget-category list.
pub struct BudgetService;

impl BudgetService {
    /// Sets income without rescaling any category allocation.
    pub fn set_income(state: &mut BudgetState, value: f64) -> CoreResult<()> {
        if !value.is_finite() {
            return Err(CoreError::Validation("Income must be a number".into()));
        }
        if value < 0.0 {
            return Err(CoreError::Validation("Income cannot be negative".into()));
        }
        state.income = value;
        info!(income = value, "income updated");
        Ok(())
    }

    /// Parses income typed into a form field.
    pub fn set_income_input(state: &mut BudgetState, raw: &str) -> CoreResult<f64> {
        let value = raw
            .trim()
            .parse::<f64>()
            .map_err(|_| CoreError::Validation(format!("Income `{}` is not a number", raw.trim())))?;
        Self::set_income(state, value)?;
        Ok(value)
    }

    /// Appends an amount-based category. Blank or `"."` input allocates zero.
    pub fn add_category(
        state: &mut BudgetState,
        name: &str,
        color: &str,
        raw_amount: &str,
    ) -> CoreResult<AllocationConfirmation> {
        let name = Self::validate_new_name(state, name)?;
        let color = validation::color(color)?;
        let amount = parse_amount(raw_amount)?;
        let category = BudgetCategory::with_amount(name, color, amount, state.income);
        Self::append(state, category)
    }

    /// Appends a percentage-based category.
    pub fn add_category_by_percentage(
        state: &mut BudgetState,
        name: &str,
        color: &str,
        percentage: f64,
    ) -> CoreResult<AllocationConfirmation> {
        let name = Self::validate_new_name(state, name)?;
        let color = validation::color(color)?;
        validate_percentage(percentage)?;
        let category = BudgetCategory::with_percentage(name, color, percentage);
        Self::append(state, category)
    }

    /// Applies a partial edit to the category at `index`.
    ///
    /// A name change renames the budget color entry and rewrites every
    /// expense that referenced the old name before the reconciliation pass
    /// runs. The allocation limit is only enforced when the allocation
    /// itself changes, so recoloring an over-allocated budget still works.
    pub fn update_category(
        state: &mut BudgetState,
        index: usize,
        update: CategoryUpdate,
    ) -> CoreResult<AllocationConfirmation> {
        let current = state
            .budget_categories
            .get(index)
            .cloned()
            .ok_or_else(|| CoreError::CategoryNotFound(format!("budget category #{index}")))?;
        let mut updated = current.clone();

        if let Some(name) = update.name.as_deref() {
            let name = validation::category_name(name)?;
            validation::unique_name(
                CategoryKind::Budget,
                state.budget_categories.iter().map(|cat| cat.name.as_str()),
                Some(index),
                &name,
            )?;
            updated.name = name;
        }
        if let Some(color) = update.color.as_deref() {
            updated.color = validation::color(color)?;
        }

        let allocation_changed = match (update.amount.as_deref(), update.percentage) {
            (Some(_), Some(_)) => {
                return Err(CoreError::Validation(
                    "Provide either an amount or a percentage, not both".into(),
                ))
            }
            (Some(raw), None) => {
                updated.set_amount(parse_amount(raw)?, state.income);
                true
            }
            (None, Some(percentage)) => {
                validate_percentage(percentage)?;
                updated.set_percentage(percentage);
                true
            }
            (None, None) => false,
        };

        if allocation_changed {
            let income = state.income;
            let others = state.total_allocated() - current.allocated_amount(income);
            let requested = updated.allocated_amount(income);
            ensure_within_income(others, requested, income)?;
        }

        let old_name = current.name;
        let renamed = old_name != updated.name;
        state.budget_categories[index] = updated.clone();
        if renamed {
            state.colors.rename(CategoryKind::Budget, &old_name, &updated.name);
        }
        state
            .colors
            .set(CategoryKind::Budget, updated.name.clone(), updated.color.clone());

        let reconcile = if renamed {
            cascade_rename(state, CategoryKind::Budget, &old_name, &updated.name);
            reconcile_expenses(state, CategoryKind::Budget)
        } else {
            ReconcileReport::default()
        };
        info!(category = %updated.name, renamed, allocation_changed, "budget category updated");
        Ok(AllocationConfirmation::new(state, updated, reconcile))
    }

    /// Renames the category called `old_name`; see [`BudgetService::update_category`].
    pub fn rename_category(
        state: &mut BudgetState,
        old_name: &str,
        new_name: &str,
    ) -> CoreResult<AllocationConfirmation> {
        let index = Self::index_of(state, old_name)?;
        Self::update_category(state, index, CategoryUpdate::default().name(new_name))
    }

    pub fn recolor_category(state: &mut BudgetState, name: &str, color: &str) -> CoreResult<()> {
        let index = Self::index_of(state, name)?;
        Self::update_category(state, index, CategoryUpdate::default().color(color))?;
        Ok(())
    }

    /// Removes the category and its color. Expenses that referenced it are
    /// reassigned by the reconciliation pass, never deleted.
    pub fn delete_category(state: &mut BudgetState, name: &str) -> CoreResult<ReconcileReport> {
        let index = Self::index_of(state, name)?;
        let removed = state.budget_categories.remove(index);
        state.colors.remove(CategoryKind::Budget, &removed.name);
        let report = reconcile_expenses(state, CategoryKind::Budget);
        info!(
            category = %removed.name,
            reassigned = report.reassigned.len(),
            "budget category deleted"
        );
        Ok(report)
    }

    pub fn total_allocated(state: &BudgetState) -> f64 {
        state.total_allocated()
    }

    /// `income - total_allocated`; negative when over-allocated.
    pub fn remaining_allocatable(state: &BudgetState) -> f64 {
        finite_or_zero(state.income - state.total_allocated())
    }

    pub fn is_over_allocated(state: &BudgetState) -> bool {
        state.total_allocated() > state.income + ALLOCATION_TOLERANCE
    }

    pub fn list(state: &BudgetState) -> &[BudgetCategory] {
        &state.budget_categories
    }

    fn append(state: &mut BudgetState, category: BudgetCategory) -> CoreResult<AllocationConfirmation> {
        let requested = category.allocated_amount(state.income);
        ensure_within_income(state.total_allocated(), requested, state.income)?;
        state
            .colors
            .set(CategoryKind::Budget, category.name.clone(), category.color.clone());
        state.budget_categories.push(category.clone());
        info!(category = %category.name, amount = requested, "budget category added");
        Ok(AllocationConfirmation::new(
            state,
            category,
            ReconcileReport::default(),
        ))
    }

    fn validate_new_name(state: &BudgetState, name: &str) -> CoreResult<String> {
        let name = validation::category_name(name)?;
        validation::unique_name(
            CategoryKind::Budget,
            state.budget_categories.iter().map(|cat| cat.name.as_str()),
            None,
            &name,
        )?;
        Ok(name)
    }

    fn index_of(state: &BudgetState, name: &str) -> CoreResult<usize> {
        state
            .budget_category_index(name)
            .ok_or_else(|| CoreError::CategoryNotFound(name.to_string()))
    }
}

fn parse_amount(raw: &str) -> CoreResult<AmountInput> {
    AmountInput::parse(raw).map_err(|err| CoreError::Validation(err.to_string()))
}

fn validate_percentage(percentage: f64) -> CoreResult<()> {
    if !percentage.is_finite() || !(0.0..=100.0).contains(&percentage) {
        return Err(CoreError::Validation(format!(
            "Percentage must be between 0 and 100, got {percentage}"
        )));
    }
    Ok(())
}

fn ensure_within_income(existing: f64, requested: f64, income: f64) -> CoreResult<()> {
    let total = existing + requested;
    if total > income + ALLOCATION_TOLERANCE {
        return Err(CoreError::OverAllocation {
            requested,
            total,
            income,
        });
    }
    Ok(())
}
