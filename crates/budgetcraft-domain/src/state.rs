//! Aggregate budget state shared by the services.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::{
    category::{BudgetCategory, SpendingCategory},
    colors::CategoryColorRegistry,
    common::*,
    expense::Expense,
};

/// Income, both category lists, the ordered expense ledger and the color
/// projection, held together so a single operation can keep them consistent.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct BudgetState {
    pub income: f64,
    #[serde(default)]
    pub budget_categories: Vec<BudgetCategory>,
    #[serde(default)]
    pub spending_categories: Vec<SpendingCategory>,
    #[serde(default)]
    pub expenses: Vec<Expense>,
    #[serde(default)]
    pub colors: CategoryColorRegistry,
    #[serde(skip)]
    last_expense_id: i64,
}

impl BudgetState {
    pub fn new(income: f64) -> Self {
        Self {
            income: finite_or_zero(income).max(0.0),
            ..Self::default()
        }
    }

    pub fn budget_category(&self, name: &str) -> Option<&BudgetCategory> {
        self.budget_categories.iter().find(|cat| cat.name == name)
    }

    pub fn budget_category_index(&self, name: &str) -> Option<usize> {
        self.budget_categories.iter().position(|cat| cat.name == name)
    }

    pub fn spending_category(&self, name: &str) -> Option<&SpendingCategory> {
        self.spending_categories.iter().find(|cat| cat.name == name)
    }

    pub fn spending_category_index(&self, name: &str) -> Option<usize> {
        self.spending_categories.iter().position(|cat| cat.name == name)
    }

    /// Names of the categories in a namespace, in list order.
    pub fn category_names(&self, kind: CategoryKind) -> Vec<&str> {
        match kind {
            CategoryKind::Spending => self
                .spending_categories
                .iter()
                .map(|cat| cat.name.as_str())
                .collect(),
            CategoryKind::Budget => self
                .budget_categories
                .iter()
                .map(|cat| cat.name.as_str())
                .collect(),
        }
    }

    pub fn has_category(&self, kind: CategoryKind, name: &str) -> bool {
        match kind {
            CategoryKind::Spending => self.spending_category(name).is_some(),
            CategoryKind::Budget => self.budget_category(name).is_some(),
        }
    }

    pub fn expense(&self, id: i64) -> Option<&Expense> {
        self.expenses.iter().find(|expense| expense.id == id)
    }

    pub fn expense_mut(&mut self, id: i64) -> Option<&mut Expense> {
        self.expenses.iter_mut().find(|expense| expense.id == id)
    }

    /// Sum of every budget category's dollar allocation under current income.
    pub fn total_allocated(&self) -> f64 {
        finite_or_zero(
            self.budget_categories
                .iter()
                .map(|cat| cat.allocated_amount(self.income))
                .sum(),
        )
    }

    /// Issues a fresh expense id no smaller than `now_ms` and strictly greater
    /// than every id issued or stored so far.
    pub fn next_expense_id(&mut self, now_ms: i64) -> i64 {
        let stored_max = self.expenses.iter().map(|e| e.id).max().unwrap_or(0);
        let floor = self.last_expense_id.max(stored_max).saturating_add(1);
        let id = now_ms.max(floor);
        self.last_expense_id = id;
        id
    }

    /// Gives every repeated expense id after its first occurrence a fresh id.
    /// Returns how many records were renumbered.
    pub fn dedupe_expense_ids(&mut self, now_ms: i64) -> usize {
        let mut seen = HashSet::new();
        let repeated: Vec<usize> = self
            .expenses
            .iter()
            .enumerate()
            .filter(|(_, expense)| !seen.insert(expense.id))
            .map(|(index, _)| index)
            .collect();
        for &index in &repeated {
            let id = self.next_expense_id(now_ms);
            self.expenses[index].id = id;
        }
        repeated.len()
    }

    /// Recomputes each budget category's `spent` from the ledger.
    pub fn refresh_spent(&mut self) {
        for category in &mut self.budget_categories {
            let spent: f64 = self
                .expenses
                .iter()
                .filter(|expense| expense.budget_category == category.name)
                .map(|expense| expense.amount)
                .sum();
            category.spent = round_currency(spent);
        }
    }

    /// Rebuilds both color namespaces from the category lists.
    pub fn sync_colors(&mut self) {
        let spending: Vec<(String, String)> = self
            .spending_categories
            .iter()
            .map(|cat| (cat.name.clone(), cat.color.clone()))
            .collect();
        let budget: Vec<(String, String)> = self
            .budget_categories
            .iter()
            .map(|cat| (cat.name.clone(), cat.color.clone()))
            .collect();
        self.colors.rebuild(CategoryKind::Spending, spending);
        self.colors.rebuild(CategoryKind::Budget, budget);
    }
}
