mod common;

use budgetcraft::BudgetError;
use budgetcraft_core::{BalanceStatus, CategoryUpdate, CoreError, ExpenseFilter};
use budgetcraft_domain::{CategoryKind, Direction, NewExpense, FALLBACK_COLOR};
use common::empty_store;

fn expense(description: &str, amount: f64, category: &str, budget: &str) -> NewExpense {
    NewExpense::new("2024-06-01", description, amount, category, budget)
}

#[test]
fn fresh_store_starts_from_defaults() {
    let (store, _clock) = empty_store();

    assert_eq!(store.income(), 5000.0);
    let names: Vec<&str> = store.budget_categories().iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["Needs", "Wants", "Savings"]);
    assert_eq!(store.spending_categories().len(), 5);
    assert!(store.expenses().is_empty());
    assert_eq!(store.colors().get(CategoryKind::Budget, "Savings"), "#4169E1");
    assert_eq!(store.remaining_allocatable(), 0.0);
}

#[test]
fn over_allocation_scenario() {
    let (mut store, _clock) = empty_store();
    store.delete_budget_category("Needs").unwrap();
    store.delete_budget_category("Wants").unwrap();
    store.delete_budget_category("Savings").unwrap();

    let needs = store.add_budget_category("Needs", "#FFBB28", "2500").expect("needs fits");
    assert_eq!(needs.category.percentage, 50.0);
    assert!(needs.message().contains("50.0% of income"));

    let err = store
        .add_budget_category("Wants", "#00C49F", "3000")
        .expect_err("wants overflows income");
    assert!(matches!(err, BudgetError::Core(CoreError::OverAllocation { .. })));
    assert!(err.is_user_error());
    assert_eq!(store.budget_categories().len(), 1);
}

#[test]
fn spending_rename_scenario() {
    let (mut store, _clock) = empty_store();
    let food_color = store.colors().get(CategoryKind::Spending, "Food").to_string();
    for description in ["Bread", "Cheese", "Apples"] {
        store.add_expense(expense(description, 4.0, "Food", "Needs")).unwrap();
    }

    store
        .rename_spending_category("Food", "Groceries", &food_color)
        .expect("rename food");

    assert!(store.expenses().iter().all(|e| e.category == "Groceries"));
    assert_eq!(store.colors().get(CategoryKind::Spending, "Groceries"), food_color);
    assert_eq!(store.colors().get(CategoryKind::Spending, "Food"), FALLBACK_COLOR);
    assert!(store.has_pending_changes());
}

#[test]
fn savings_deletion_scenario() {
    let (mut store, _clock) = empty_store();
    let id = store.add_expense(expense("Index fund", 200.0, "Food", "Savings")).unwrap();

    let report = store.delete_budget_category("Savings").unwrap();

    assert_eq!(report.reassigned.len(), 1);
    let moved = store.expenses().iter().find(|e| e.id == id).unwrap();
    assert_eq!(moved.budget_category, "Needs");
}

#[test]
fn income_decrease_scenario() {
    let (mut store, _clock) = empty_store();
    store.add_expense(expense("Rent", 900.0, "Rent", "Needs")).unwrap();

    store.set_income(100.0).expect("income decrease allowed");

    let aggregates = store.aggregates();
    assert_eq!(aggregates.total_allocated, 5000.0);
    assert_eq!(aggregates.allocation_overflow, 4900.0);
    assert_eq!(aggregates.balance.status, BalanceStatus::OverBudget);
    assert_eq!(aggregates.balance.amount, 800.0);
}

#[test]
fn budget_update_by_index_switches_allocation_mode() {
    let (mut store, _clock) = empty_store();
    store.set_income(10_000.0).unwrap();

    let confirmation = store
        .update_budget_category(1, CategoryUpdate::default().percentage(25.0).color("#000000"))
        .expect("switch wants to percentage");

    assert!(!confirmation.category.is_amount_based());
    assert_eq!(confirmation.category.allocated_amount(10_000.0), 2500.0);
    assert_eq!(store.colors().get(CategoryKind::Budget, "Wants"), "#000000");
    assert!(store
        .update_budget_category(9, CategoryUpdate::default().name("Nope"))
        .is_err());
}

#[test]
fn expense_editing_and_ordering() {
    let (mut store, _clock) = empty_store();
    let first = store.add_expense(expense("Coffee", 3.0, "Food", "Wants")).unwrap();
    let second = store.add_expense(expense("Train", 12.0, "Transportation", "Needs")).unwrap();
    let third = store.add_expense(expense("Cinema", 15.0, "Entertainment", "Wants")).unwrap();

    assert!(store.move_expense(2, Direction::Up));
    let order: Vec<i64> = store.expenses().iter().map(|e| e.id).collect();
    assert_eq!(order, vec![first, third, second]);

    let mut edited = store.expenses()[0].clone();
    edited.amount = 4.5;
    store.update_expense(first, edited).unwrap();
    assert_eq!(store.expenses()[0].amount, 4.5);

    let mut reversed = store.expenses().to_vec();
    reversed.reverse();
    store.reorder_expenses(reversed).unwrap();
    assert_eq!(store.expenses()[0].id, second);

    let wants = store.filtered_expenses(&ExpenseFilter::new().search("wants"));
    assert_eq!(wants.len(), 2);

    store.delete_expense(third).unwrap();
    assert!(matches!(
        store.delete_expense(third),
        Err(BudgetError::Core(CoreError::ExpenseNotFound(_)))
    ));
    assert_eq!(store.clear_expenses(), 2);
    assert_eq!(store.clear_expenses(), 0);
}

#[test]
fn budget_category_spent_follows_the_ledger() {
    let clock = common::manual_clock();
    let mut store = budgetcraft::BudgetStore::in_memory(clock, common::options(true));

    let progress = store.aggregates().budget_progress;
    for (category, expected) in store.budget_categories().iter().zip(&progress) {
        assert_eq!(category.spent, expected.spent, "{}", category.name);
    }
    assert!(store.budget_categories()[0].spent > 0.0);

    let before = store.budget_categories()[2].spent;
    let id = store.add_expense(expense("Bond", 250.0, "Food", "Savings")).unwrap();
    assert_eq!(store.budget_categories()[2].spent, before + 250.0);

    store.delete_expense(id).unwrap();
    assert_eq!(store.budget_categories()[2].spent, before);
}
