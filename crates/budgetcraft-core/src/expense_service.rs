//! Business logic helpers for the ordered expense ledger.

use std::collections::HashSet;

use budgetcraft_domain::{BudgetState, Direction, Expense, NewExpense};
use tracing::{debug, info};

use crate::{filter::ExpenseFilter, time::Clock, CoreError, CoreResult};

/// Provides validated CRUD and ordering helpers for expenses.
pub struct ExpenseService;

impl ExpenseService {
    /// Appends an expense and returns the id the ledger assigned to it.
    pub fn add(state: &mut BudgetState, clock: &dyn Clock, expense: NewExpense) -> CoreResult<i64> {
        validate(&expense.date, &expense.description, expense.amount)?;
        let id = state.next_expense_id(clock.now_millis());
        debug!(id, description = %expense.description, "expense added");
        state.expenses.push(expense.into_expense(id));
        Ok(id)
    }

    /// Validates every record first, then appends them with sequential ids.
    pub fn add_batch(
        state: &mut BudgetState,
        clock: &dyn Clock,
        expenses: Vec<NewExpense>,
    ) -> CoreResult<Vec<i64>> {
        for (row, expense) in expenses.iter().enumerate() {
            validate(&expense.date, &expense.description, expense.amount).map_err(|err| match err {
                CoreError::Validation(message) => {
                    CoreError::Validation(format!("record {}: {message}", row + 1))
                }
                other => other,
            })?;
        }
        let now = clock.now_millis();
        let mut ids = Vec::with_capacity(expenses.len());
        for expense in expenses {
            let id = state.next_expense_id(now);
            state.expenses.push(expense.into_expense(id));
            ids.push(id);
        }
        info!(count = ids.len(), "expense batch added");
        Ok(ids)
    }

    /// Replaces the record with `id` in place. The stored id is preserved.
    pub fn update(state: &mut BudgetState, id: i64, mut record: Expense) -> CoreResult<()> {
        validate(&record.date, &record.description, record.amount)?;
        let slot = state.expense_mut(id).ok_or(CoreError::ExpenseNotFound(id))?;
        record.id = id;
        *slot = record;
        Ok(())
    }

    /// Removes the expense with `id`, returning it.
    pub fn delete(state: &mut BudgetState, id: i64) -> CoreResult<Expense> {
        let index = state
            .expenses
            .iter()
            .position(|expense| expense.id == id)
            .ok_or(CoreError::ExpenseNotFound(id))?;
        Ok(state.expenses.remove(index))
    }

    /// Empties the ledger, returning how many records were removed.
    pub fn clear_all(state: &mut BudgetState) -> usize {
        let removed = state.expenses.len();
        state.expenses.clear();
        if removed > 0 {
            info!(removed, "expense ledger cleared");
        }
        removed
    }

    /// Replaces the ledger order wholesale. `ordered` must contain exactly the
    /// ids currently in the ledger.
    pub fn reorder(state: &mut BudgetState, ordered: Vec<Expense>) -> CoreResult<()> {
        let current: HashSet<i64> = state.expenses.iter().map(|e| e.id).collect();
        let proposed: HashSet<i64> = ordered.iter().map(|e| e.id).collect();
        if ordered.len() != state.expenses.len() || proposed != current {
            return Err(CoreError::Validation(
                "Reordered list must contain exactly the existing expenses".into(),
            ));
        }
        for expense in &ordered {
            validate(&expense.date, &expense.description, expense.amount)?;
        }
        state.expenses = ordered;
        Ok(())
    }

    /// Swaps the record at `index` with its neighbor. Returns `false` (and
    /// leaves the ledger untouched) at either boundary or for a bad index.
    pub fn move_adjacent(state: &mut BudgetState, index: usize, direction: Direction) -> bool {
        let len = state.expenses.len();
        if index >= len {
            return false;
        }
        let target = match direction {
            Direction::Up if index > 0 => index - 1,
            Direction::Down if index + 1 < len => index + 1,
            _ => return false,
        };
        state.expenses.swap(index, target);
        true
    }

    /// Returns a snapshot of the ledger in display order.
    pub fn list(state: &BudgetState) -> &[Expense] {
        &state.expenses
    }

    pub fn filter<'a>(state: &'a BudgetState, filter: &ExpenseFilter) -> Vec<&'a Expense> {
        filter.apply(&state.expenses)
    }
}

fn validate(date: &str, description: &str, amount: f64) -> CoreResult<()> {
    if date.trim().is_empty() {
        return Err(CoreError::Validation("Expense date is required".into()));
    }
    if description.trim().is_empty() {
        return Err(CoreError::Validation("Expense description is required".into()));
    }
    if !amount.is_finite() || amount <= 0.0 {
        return Err(CoreError::Validation(format!(
            "Expense amount must be greater than zero, got {amount}"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::ManualClock;
    use chrono::{TimeZone, Utc};

    fn clock() -> ManualClock {
        ManualClock::new(Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap())
    }

    fn groceries() -> NewExpense {
        NewExpense::new("2024-01-01", "Groceries", 42.0, "Food", "Needs")
    }

    #[test]
    fn update_fails_for_missing_expense() {
        let mut state = BudgetState::new(1000.0);
        let err = ExpenseService::update(&mut state, 99, groceries().into_expense(99))
            .expect_err("update must fail for unknown id");
        assert!(matches!(err, CoreError::ExpenseNotFound(99)), "unexpected error: {err:?}");
    }

    #[test]
    fn update_keeps_position_and_id() {
        let mut state = BudgetState::new(1000.0);
        let clock = clock();
        let first = ExpenseService::add(&mut state, &clock, groceries()).unwrap();
        let second = ExpenseService::add(&mut state, &clock, groceries()).unwrap();

        let mut edited = state.expenses[0].clone();
        edited.id = 12345;
        edited.description = "Farmers market".into();
        ExpenseService::update(&mut state, first, edited).unwrap();

        assert_eq!(state.expenses[0].id, first);
        assert_eq!(state.expenses[0].description, "Farmers market");
        assert_eq!(state.expenses[1].id, second);
    }

    #[test]
    fn add_rejects_non_positive_amounts() {
        let mut state = BudgetState::new(1000.0);
        let mut expense = groceries();
        expense.amount = 0.0;
        let err = ExpenseService::add(&mut state, &clock(), expense).unwrap_err();
        assert!(matches!(err, CoreError::Validation(_)));
        assert!(state.expenses.is_empty());
    }

    #[test]
    fn batch_is_all_or_nothing() {
        let mut state = BudgetState::new(1000.0);
        let mut bad = groceries();
        bad.description = " ".into();
        let err = ExpenseService::add_batch(&mut state, &clock(), vec![groceries(), bad]).unwrap_err();
        assert!(err.to_string().contains("record 2"), "unexpected error: {err}");
        assert!(state.expenses.is_empty());
    }

    #[test]
    fn batch_ids_are_distinct() {
        let mut state = BudgetState::new(1000.0);
        let ids =
            ExpenseService::add_batch(&mut state, &clock(), vec![groceries(); 5]).unwrap();
        let unique: HashSet<i64> = ids.iter().copied().collect();
        assert_eq!(unique.len(), 5);
    }

    #[test]
    fn move_adjacent_is_noop_at_boundaries() {
        let mut state = BudgetState::new(1000.0);
        let clock = clock();
        ExpenseService::add(&mut state, &clock, groceries()).unwrap();
        ExpenseService::add(&mut state, &clock, groceries()).unwrap();
        let before = state.expenses.clone();

        assert!(!ExpenseService::move_adjacent(&mut state, 0, Direction::Up));
        assert!(!ExpenseService::move_adjacent(&mut state, 1, Direction::Down));
        assert!(!ExpenseService::move_adjacent(&mut state, 7, Direction::Up));
        assert_eq!(state.expenses, before);
    }

    #[test]
    fn reorder_rejects_foreign_records() {
        let mut state = BudgetState::new(1000.0);
        let clock = clock();
        ExpenseService::add(&mut state, &clock, groceries()).unwrap();
        let foreign = vec![groceries().into_expense(1)];
        assert!(ExpenseService::reorder(&mut state, foreign).is_err());
    }

    #[test]
    fn delete_returns_removed_record() {
        let mut state = BudgetState::new(1000.0);
        let id = ExpenseService::add(&mut state, &clock(), groceries()).unwrap();
        let removed = ExpenseService::delete(&mut state, id).unwrap();
        assert_eq!(removed.id, id);
        assert!(state.expense(id).is_none());
    }
}
