//! Rename cascades and orphan repair for expense category references.

use budgetcraft_domain::{BudgetState, CategoryKind};
use tracing::debug;

/// One expense whose category reference was moved by the reconciliation pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reassignment {
    pub expense_id: i64,
    pub kind: CategoryKind,
    pub from: String,
    pub to: String,
}

/// Outcome of a reconciliation pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReconcileReport {
    pub reassigned: Vec<Reassignment>,
    /// Expenses left pointing at a missing category because none survive.
    pub orphaned: Vec<i64>,
}

impl ReconcileReport {
    pub fn is_clean(&self) -> bool {
        self.reassigned.is_empty() && self.orphaned.is_empty()
    }

    pub fn merge(mut self, other: ReconcileReport) -> Self {
        self.reassigned.extend(other.reassigned);
        self.orphaned.extend(other.orphaned);
        self
    }
}

/// Rewrites every expense reference equal to `old_name` to `new_name`.
/// Returns how many expenses changed.
pub fn cascade_rename(state: &mut BudgetState, kind: CategoryKind, old_name: &str, new_name: &str) -> usize {
    if old_name == new_name {
        return 0;
    }
    let mut changed = 0;
    for expense in state
        .expenses
        .iter_mut()
        .filter(|expense| expense.category_for(kind) == old_name)
    {
        expense.set_category_for(kind, new_name);
        changed += 1;
    }
    debug!(%kind, old_name, new_name, changed, "cascaded category rename into expenses");
    changed
}

/// Reassigns expenses whose `kind` reference no longer names an existing
/// category: first to a category sharing the orphaned name's first
/// character, then to the first surviving category. With no categories left
/// the expense stays orphaned.
pub fn reconcile_expenses(state: &mut BudgetState, kind: CategoryKind) -> ReconcileReport {
    let names: Vec<String> = state
        .category_names(kind)
        .into_iter()
        .map(str::to_string)
        .collect();
    let mut report = ReconcileReport::default();

    for expense in state.expenses.iter_mut() {
        let current = expense.category_for(kind);
        if names.iter().any(|name| name == current) {
            continue;
        }
        match pick_replacement(current, &names) {
            Some(replacement) => {
                debug!(
                    expense_id = expense.id,
                    %kind,
                    from = current,
                    to = replacement,
                    "reassigning orphaned expense"
                );
                report.reassigned.push(Reassignment {
                    expense_id: expense.id,
                    kind,
                    from: current.to_string(),
                    to: replacement.to_string(),
                });
                expense.set_category_for(kind, replacement);
            }
            None => {
                debug!(expense_id = expense.id, %kind, category = current, "expense left orphaned");
                report.orphaned.push(expense.id);
            }
        }
    }
    report
}

/// Runs the reconciliation pass over both category kinds.
pub fn reconcile_all(state: &mut BudgetState) -> ReconcileReport {
    let spending = reconcile_expenses(state, CategoryKind::Spending);
    let budget = reconcile_expenses(state, CategoryKind::Budget);
    spending.merge(budget)
}

fn pick_replacement<'a>(orphan: &str, names: &'a [String]) -> Option<&'a str> {
    let first = orphan.chars().next();
    first
        .and_then(|initial| names.iter().find(|name| name.chars().next() == Some(initial)))
        .or_else(|| names.first())
        .map(String::as_str)
}

#[cfg(test)]
mod tests {
    use super::*;
    use budgetcraft_domain::{BudgetCategory, NewExpense};

    fn state_with(budget: &[&str], expense_budgets: &[&str]) -> BudgetState {
        let mut state = BudgetState::new(5000.0);
        for name in budget {
            state
                .budget_categories
                .push(BudgetCategory::with_percentage(*name, "#000000", 10.0));
        }
        for (index, budget_category) in expense_budgets.iter().enumerate() {
            state.expenses.push(
                NewExpense::new("2024-01-01", "Item", 10.0, "Food", *budget_category)
                    .into_expense(index as i64 + 1),
            );
        }
        state
    }

    #[test]
    fn prefers_first_letter_match() {
        let mut state = state_with(&["Needs", "Wants", "Savings Plan"], &["Savings"]);
        let report = reconcile_expenses(&mut state, CategoryKind::Budget);
        assert_eq!(state.expenses[0].budget_category, "Savings Plan");
        assert_eq!(report.reassigned.len(), 1);
    }

    #[test]
    fn falls_back_to_first_surviving_category() {
        let mut state = state_with(&["Needs", "Wants"], &["Savings", "Needs"]);
        reconcile_expenses(&mut state, CategoryKind::Budget);
        assert_eq!(state.expenses[0].budget_category, "Needs");
        assert_eq!(state.expenses[1].budget_category, "Needs");
    }

    #[test]
    fn empty_orphan_name_goes_to_first_category() {
        let mut state = state_with(&["Wants"], &[""]);
        reconcile_expenses(&mut state, CategoryKind::Budget);
        assert_eq!(state.expenses[0].budget_category, "Wants");
    }

    #[test]
    fn leaves_orphans_when_no_categories_remain() {
        let mut state = state_with(&[], &["Savings"]);
        let report = reconcile_expenses(&mut state, CategoryKind::Budget);
        assert_eq!(state.expenses[0].budget_category, "Savings");
        assert_eq!(report.orphaned, vec![1]);
    }

    #[test]
    fn cascade_only_touches_matching_references() {
        let mut state = state_with(&["Needs"], &["Needs", "Wants", "Needs"]);
        let changed = cascade_rename(&mut state, CategoryKind::Budget, "Needs", "Essentials");
        assert_eq!(changed, 2);
        assert_eq!(state.expenses[1].budget_category, "Wants");
        assert!(state
            .expenses
            .iter()
            .all(|expense| expense.budget_category != "Needs"));
    }
}
