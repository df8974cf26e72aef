//! Domain types representing budget and spending categories.

use serde::{Deserialize, Serialize};

use crate::{amount::AmountInput, common::*};

/// A named bucket that income is allocated to.
///
/// When `amount` is present it is the authoritative allocation and
/// `percentage` is derived from it; otherwise `percentage` is authoritative.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BudgetCategory {
    pub name: String,
    #[serde(default)]
    pub percentage: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<AmountInput>,
    #[serde(default)]
    pub spent: f64,
    pub color: String,
}

impl BudgetCategory {
    /// Creates an amount-based category, deriving its percentage from `income`.
    pub fn with_amount(
        name: impl Into<String>,
        color: impl Into<String>,
        amount: AmountInput,
        income: f64,
    ) -> Self {
        let percentage = percentage_of(amount.to_number(), income);
        Self {
            name: name.into(),
            percentage,
            amount: Some(amount),
            spent: 0.0,
            color: color.into(),
        }
    }

    /// Creates a percentage-based category.
    pub fn with_percentage(name: impl Into<String>, color: impl Into<String>, percentage: f64) -> Self {
        Self {
            name: name.into(),
            percentage: finite_or_zero(percentage),
            amount: None,
            spent: 0.0,
            color: color.into(),
        }
    }

    /// Dollar allocation under the given income.
    pub fn allocated_amount(&self, income: f64) -> f64 {
        match &self.amount {
            Some(amount) => amount.to_number(),
            None => amount_of(self.percentage, income),
        }
    }

    /// Share of income, derived live from the amount when one is set.
    pub fn allocated_percentage(&self, income: f64) -> f64 {
        match &self.amount {
            Some(amount) => percentage_of(amount.to_number(), income),
            None => finite_or_zero(self.percentage),
        }
    }

    pub fn is_amount_based(&self) -> bool {
        self.amount.is_some()
    }

    /// Replaces the amount and re-derives the stored percentage.
    pub fn set_amount(&mut self, amount: AmountInput, income: f64) {
        self.percentage = percentage_of(amount.to_number(), income);
        self.amount = Some(amount);
    }

    /// Switches the category to percentage mode.
    pub fn set_percentage(&mut self, percentage: f64) {
        self.percentage = finite_or_zero(percentage);
        self.amount = None;
    }
}

/// A free-form tag describing what an expense was for.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SpendingCategory {
    pub name: String,
    pub color: String,
}

impl SpendingCategory {
    pub fn new(name: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            color: color.into(),
        }
    }
}

/// `amount / income * 100`, defined as zero when income is zero.
pub fn percentage_of(amount: f64, income: f64) -> f64 {
    if income == 0.0 {
        return 0.0;
    }
    finite_or_zero(amount / income * 100.0)
}

/// `percentage / 100 * income`.
pub fn amount_of(percentage: f64, income: f64) -> f64 {
    finite_or_zero(percentage / 100.0 * income)
}
