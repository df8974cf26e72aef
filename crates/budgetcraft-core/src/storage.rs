use std::collections::HashSet;

use budgetcraft_domain::{BudgetState, CategoryKind, FALLBACK_COLOR};

use crate::CoreError;

/// Opaque string key/value store that persisted state slices are written to.
///
/// Implementations hold raw JSON text; serialization and fallback-to-default
/// policy live in the caller.
pub trait KeyValueStore: Send + Sync {
    fn get_raw(&self, key: &str) -> Result<Option<String>, CoreError>;
    fn set_raw(&self, key: &str, value: &str) -> Result<(), CoreError>;
    fn remove(&self, key: &str) -> Result<(), CoreError>;
    /// Removes every key whose name starts with `prefix`.
    fn clear(&self, prefix: &str) -> Result<(), CoreError>;
}

/// Detects dangling references and other anomalies within a state snapshot.
pub fn state_warnings(state: &BudgetState) -> Vec<String> {
    let spending: HashSet<&str> = state
        .spending_categories
        .iter()
        .map(|cat| cat.name.as_str())
        .collect();
    let budget: HashSet<&str> = state
        .budget_categories
        .iter()
        .map(|cat| cat.name.as_str())
        .collect();
    let mut warnings = Vec::new();

    for expense in &state.expenses {
        if !spending.contains(expense.category.as_str()) {
            warnings.push(format!(
                "expense {} references missing spending category `{}`",
                expense.id, expense.category
            ));
        }
        if !budget.contains(expense.budget_category.as_str()) {
            warnings.push(format!(
                "expense {} references missing budget category `{}`",
                expense.id, expense.budget_category
            ));
        }
        if !(expense.amount.is_finite() && expense.amount > 0.0) {
            warnings.push(format!(
                "expense {} has non-positive amount {}",
                expense.id, expense.amount
            ));
        }
    }
    if state.total_allocated() > state.income {
        warnings.push(format!(
            "budget categories allocate {:.2} against income of {:.2}",
            state.total_allocated(),
            state.income
        ));
    }
    for cat in &state.spending_categories {
        if state.colors.get(CategoryKind::Spending, &cat.name) != cat.color {
            warnings.push(format!("spending color for `{}` is out of sync", cat.name));
        }
    }
    for cat in &state.budget_categories {
        if state.colors.get(CategoryKind::Budget, &cat.name) != cat.color {
            warnings.push(format!("budget color for `{}` is out of sync", cat.name));
        }
    }
    for kind in [CategoryKind::Spending, CategoryKind::Budget] {
        for name in state.colors.entries(kind).keys() {
            if !state.has_category(kind, name) {
                warnings.push(format!(
                    "{kind} color entry `{name}` has no category (renders as {FALLBACK_COLOR})"
                ));
            }
        }
    }
    warnings
}
