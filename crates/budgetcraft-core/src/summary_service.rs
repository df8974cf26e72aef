use budgetcraft_domain::{finite_or_zero, percentage_of, round_currency, BudgetState, CategoryKind};
use serde::{Deserialize, Serialize};

/// Chart color for the unspent slice of income.
pub const REMAINING_COLOR: &str = "#D3D3D3";
/// Chart color for spending beyond income.
pub const OVER_BUDGET_COLOR: &str = "#FF4136";

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum BalanceStatus {
    Remaining,
    OverBudget,
}

impl BalanceStatus {
    pub fn label(self) -> &'static str {
        match self {
            BalanceStatus::Remaining => "Remaining",
            BalanceStatus::OverBudget => "Over Budget",
        }
    }

    pub fn color(self) -> &'static str {
        match self {
            BalanceStatus::Remaining => REMAINING_COLOR,
            BalanceStatus::OverBudget => OVER_BUDGET_COLOR,
        }
    }
}

/// `income - total_spent`, split into magnitude and sign.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct BudgetBalance {
    /// Absolute difference between income and spending.
    pub amount: f64,
    pub status: BalanceStatus,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CategoryTotal {
    pub name: String,
    pub amount: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BudgetProgress {
    pub name: String,
    pub color: String,
    pub budgeted: f64,
    pub spent: f64,
    /// Negative once the category is overspent.
    pub remaining: f64,
    /// `spent / budgeted * 100`; zero when nothing is budgeted.
    pub progress_percent: f64,
}

impl BudgetProgress {
    pub fn is_overspent(&self) -> bool {
        self.remaining < 0.0
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CategoryShare {
    pub name: String,
    pub amount: f64,
    /// Percent of total spending.
    pub share: f64,
}

/// Every dashboard figure computed from one state snapshot.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Aggregates {
    pub income: f64,
    pub total_spent: f64,
    pub total_allocated: f64,
    /// Amount by which allocations exceed income; zero when within income.
    pub allocation_overflow: f64,
    pub balance: BudgetBalance,
    pub spent_by_category: Vec<CategoryTotal>,
    pub spent_by_budget_category: Vec<CategoryTotal>,
    pub top_category: Option<CategoryTotal>,
    pub budget_progress: Vec<BudgetProgress>,
    pub category_breakdown: Vec<CategoryShare>,
}

/// Derived figures, recomputed from scratch on every call.
pub struct SummaryService;

impl SummaryService {
    pub fn total_spent(state: &BudgetState) -> f64 {
        finite_or_zero(state.expenses.iter().map(|expense| expense.amount).sum())
    }

    /// Spending grouped by the expense field for `kind`, in order of first
    /// appearance in the ledger.
    pub fn spent_by_category(state: &BudgetState, kind: CategoryKind) -> Vec<CategoryTotal> {
        let mut totals: Vec<CategoryTotal> = Vec::new();
        for expense in &state.expenses {
            let name = expense.category_for(kind);
            match totals.iter_mut().find(|total| total.name == name) {
                Some(total) => total.amount += expense.amount,
                None => totals.push(CategoryTotal {
                    name: name.to_string(),
                    amount: expense.amount,
                }),
            }
        }
        totals
    }

    pub fn remaining_or_over_budget(state: &BudgetState) -> BudgetBalance {
        let difference = finite_or_zero(state.income - Self::total_spent(state));
        let status = if difference < 0.0 {
            BalanceStatus::OverBudget
        } else {
            BalanceStatus::Remaining
        };
        BudgetBalance {
            amount: difference.abs(),
            status,
        }
    }

    /// Spending category with the highest total. Ties go to the category that
    /// appeared first in the ledger.
    pub fn top_category(state: &BudgetState) -> Option<CategoryTotal> {
        Self::spent_by_category(state, CategoryKind::Spending)
            .into_iter()
            .fold(None, |best: Option<CategoryTotal>, candidate| match best {
                Some(current) if current.amount >= candidate.amount => Some(current),
                _ => Some(candidate),
            })
    }

    /// Budgeted versus spent for every budget category, in list order.
    pub fn budget_progress(state: &BudgetState) -> Vec<BudgetProgress> {
        let spent = Self::spent_by_category(state, CategoryKind::Budget);
        state
            .budget_categories
            .iter()
            .map(|category| {
                let budgeted = category.allocated_amount(state.income);
                let spent = spent
                    .iter()
                    .find(|total| total.name == category.name)
                    .map_or(0.0, |total| total.amount);
                BudgetProgress {
                    name: category.name.clone(),
                    color: category.color.clone(),
                    budgeted: round_currency(budgeted),
                    spent: round_currency(spent),
                    remaining: round_currency(budgeted - spent),
                    progress_percent: round_currency(percentage_of(spent, budgeted)),
                }
            })
            .collect()
    }

    /// Spending-category totals with their share of all spending, largest first.
    pub fn category_breakdown(state: &BudgetState) -> Vec<CategoryShare> {
        let total = Self::total_spent(state);
        let mut shares: Vec<CategoryShare> = Self::spent_by_category(state, CategoryKind::Spending)
            .into_iter()
            .map(|entry| CategoryShare {
                share: round_currency(percentage_of(entry.amount, total)),
                amount: round_currency(entry.amount),
                name: entry.name,
            })
            .collect();
        // Stable sort keeps first-seen order among equal amounts.
        shares.sort_by(|a, b| b.amount.total_cmp(&a.amount));
        shares
    }

    pub fn snapshot(state: &BudgetState) -> Aggregates {
        let total_allocated = state.total_allocated();
        Aggregates {
            income: state.income,
            total_spent: round_currency(Self::total_spent(state)),
            total_allocated: round_currency(total_allocated),
            allocation_overflow: round_currency((total_allocated - state.income).max(0.0)),
            balance: Self::remaining_or_over_budget(state),
            spent_by_category: Self::spent_by_category(state, CategoryKind::Spending),
            spent_by_budget_category: Self::spent_by_category(state, CategoryKind::Budget),
            top_category: Self::top_category(state),
            budget_progress: Self::budget_progress(state),
            category_breakdown: Self::category_breakdown(state),
        }
    }
}
