//! Domain models for logged expenses.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::common::*;

/// Category assigned when imported rows omit one.
pub const UNCATEGORIZED: &str = "Uncategorized";

/// A single logged expense.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Expense {
    pub id: i64,
    pub date: String,
    pub description: String,
    pub amount: f64,
    pub category: String,
    pub budget_category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl Expense {
    /// Parses the ISO date, if it is one.
    pub fn parsed_date(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(self.date.trim(), "%Y-%m-%d").ok()
    }

    /// Returns the category reference of the given kind.
    pub fn category_for(&self, kind: CategoryKind) -> &str {
        match kind {
            CategoryKind::Spending => &self.category,
            CategoryKind::Budget => &self.budget_category,
        }
    }

    pub fn set_category_for(&mut self, kind: CategoryKind, name: impl Into<String>) {
        match kind {
            CategoryKind::Spending => self.category = name.into(),
            CategoryKind::Budget => self.budget_category = name.into(),
        }
    }
}

/// An expense before the ledger has assigned it an id.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewExpense {
    pub date: String,
    pub description: String,
    pub amount: f64,
    pub category: String,
    pub budget_category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl NewExpense {
    pub fn new(
        date: impl Into<String>,
        description: impl Into<String>,
        amount: f64,
        category: impl Into<String>,
        budget_category: impl Into<String>,
    ) -> Self {
        Self {
            date: date.into(),
            description: description.into(),
            amount,
            category: category.into(),
            budget_category: budget_category.into(),
            notes: None,
        }
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        let notes = notes.into();
        self.notes = if notes.trim().is_empty() { None } else { Some(notes) };
        self
    }

    pub fn into_expense(self, id: i64) -> Expense {
        Expense {
            id,
            date: self.date,
            description: self.description,
            amount: self.amount,
            category: self.category,
            budget_category: self.budget_category,
            notes: self.notes,
        }
    }
}

/// Direction for adjacent-swap reordering.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
}
