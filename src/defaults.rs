//! First-run data used when a persisted slice is missing or unreadable.

use budgetcraft_domain::{AmountInput, BudgetCategory, Expense, NewExpense, SpendingCategory};

pub const DEFAULT_INCOME: f64 = 5000.0;

pub fn budget_categories() -> Vec<BudgetCategory> {
    [("Needs", 2500.0, "#FFBB28"), ("Wants", 1500.0, "#00C49F"), ("Savings", 1000.0, "#4169E1")]
        .into_iter()
        .map(|(name, amount, color)| {
            BudgetCategory::with_amount(name, color, AmountInput::from_value(amount), DEFAULT_INCOME)
        })
        .collect()
}

pub fn spending_categories() -> Vec<SpendingCategory> {
    [
        ("Food", "#FF6B6B"),
        ("Rent", "#4ECDC4"),
        ("Transportation", "#45B7D1"),
        ("Utilities", "#FFA07A"),
        ("Entertainment", "#98D8C8"),
    ]
    .into_iter()
    .map(|(name, color)| SpendingCategory::new(name, color))
    .collect()
}

/// Demo ledger shown on a fresh install.
pub fn sample_expenses() -> Vec<Expense> {
    [
        ("2023-07-01", "Grocery Shopping", 75.5, "Food", "Needs"),
        ("2023-07-03", "Electric Bill", 120.0, "Utilities", "Needs"),
        ("2023-07-04", "Movie Tickets", 30.0, "Entertainment", "Wants"),
        ("2023-07-05", "Gas", 45.0, "Transportation", "Needs"),
        ("2023-07-06", "Rent Payment", 1000.0, "Rent", "Needs"),
        ("2023-07-10", "Dining Out", 60.0, "Food", "Wants"),
        ("2023-07-15", "Internet Bill", 80.0, "Utilities", "Needs"),
    ]
    .into_iter()
    .enumerate()
    .map(|(index, (date, description, amount, category, budget))| {
        NewExpense::new(date, description, amount, category, budget).into_expense(index as i64 + 1)
    })
    .collect()
}

pub fn expenses(seed_samples: bool) -> Vec<Expense> {
    if seed_samples {
        sample_expenses()
    } else {
        Vec::new()
    }
}
