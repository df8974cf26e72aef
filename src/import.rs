//! CSV import and export of the expense ledger.
//!
//! Columns: `date, description, amount, category, budgetCategory, notes`.

use std::{
    fs::File,
    io::{Read, Write},
    path::Path,
};

use budgetcraft_domain::{Expense, NewExpense, UNCATEGORIZED};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::{
    errors::{BudgetError, BudgetResult},
    store::BudgetStore,
};

/// Counts reported after an import.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportSummary {
    pub imported: usize,
    pub skipped: usize,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct CsvExpenseRow {
    date: Option<String>,
    description: Option<String>,
    amount: Option<String>,
    category: Option<String>,
    #[serde(rename = "budgetCategory")]
    budget_category: Option<String>,
    notes: Option<String>,
}

#[derive(Debug, Serialize)]
struct CsvExpenseRecord<'a> {
    date: &'a str,
    description: &'a str,
    amount: f64,
    category: &'a str,
    #[serde(rename = "budgetCategory")]
    budget_category: &'a str,
    notes: &'a str,
}

impl CsvExpenseRow {
    /// Converts a row, or returns why it was dropped.
    fn into_new_expense(self) -> Result<NewExpense, &'static str> {
        let date = non_blank(self.date).ok_or("missing date")?;
        let description = non_blank(self.description).ok_or("missing description")?;
        let raw_amount = non_blank(self.amount).ok_or("missing amount")?;
        let amount = raw_amount
            .parse::<f64>()
            .map_err(|_| "amount is not a number")?;
        if !amount.is_finite() || amount <= 0.0 {
            return Err("amount must be positive");
        }
        let category = non_blank(self.category).unwrap_or_else(|| UNCATEGORIZED.to_string());
        let budget_category =
            non_blank(self.budget_category).unwrap_or_else(|| UNCATEGORIZED.to_string());
        let mut expense = NewExpense::new(date, description, amount, category, budget_category);
        if let Some(notes) = self.notes {
            expense = expense.with_notes(notes);
        }
        Ok(expense)
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|text| text.trim().to_string())
        .filter(|text| !text.is_empty())
}

/// Parses CSV rows into expenses, dropping invalid rows.
pub fn parse_expenses_csv<R: Read>(reader: R) -> BudgetResult<(Vec<NewExpense>, usize)> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut expenses = Vec::new();
    let mut skipped = 0;
    for (index, row) in rdr.deserialize::<CsvExpenseRow>().enumerate() {
        match row?.into_new_expense() {
            Ok(expense) => expenses.push(expense),
            Err(reason) => {
                debug!(row = index + 2, reason, "skipping CSV row");
                skipped += 1;
            }
        }
    }
    Ok((expenses, skipped))
}

/// Adds every valid row to the ledger with fresh ids.
pub fn import_expenses_csv<R: Read>(store: &mut BudgetStore, reader: R) -> BudgetResult<ImportSummary> {
    let (expenses, skipped) = parse_expenses_csv(reader)?;
    let imported = store.add_expenses(expenses)?.len();
    info!(imported, skipped, "expenses imported from CSV");
    Ok(ImportSummary { imported, skipped })
}

pub fn import_expenses_csv_path(store: &mut BudgetStore, path: &Path) -> BudgetResult<ImportSummary> {
    let file = File::open(path).map_err(|err| {
        BudgetError::Import(format!("cannot open `{}`: {err}", path.display()))
    })?;
    import_expenses_csv(store, file)
}

/// Writes expenses in ledger order. Returns the number of rows written.
pub fn export_expenses_csv<W: Write>(expenses: &[Expense], writer: W) -> BudgetResult<usize> {
    let mut wtr = csv::Writer::from_writer(writer);
    for expense in expenses {
        wtr.serialize(CsvExpenseRecord {
            date: &expense.date,
            description: &expense.description,
            amount: expense.amount,
            category: &expense.category,
            budget_category: &expense.budget_category,
            notes: expense.notes.as_deref().unwrap_or_default(),
        })?;
    }
    wtr.flush()?;
    Ok(expenses.len())
}

pub fn export_expenses_csv_path(expenses: &[Expense], path: &Path) -> BudgetResult<usize> {
    let file = File::create(path)?;
    export_expenses_csv(expenses, file)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rows_missing_required_fields_are_skipped() {
        let data = "\
date,description,amount,category,budgetCategory,notes
2024-01-02,Coffee,3.50,Food,Wants,
,No date,4,Food,Wants,
2024-01-03,,4,Food,Wants,
2024-01-04,Bad amount,abc,Food,Wants,
2024-01-05,Refund,-10,Food,Wants,
2024-01-06,Mystery,12,,,
";
        let (expenses, skipped) = parse_expenses_csv(data.as_bytes()).unwrap();
        assert_eq!(skipped, 4);
        assert_eq!(expenses.len(), 2);
        assert_eq!(expenses[1].category, UNCATEGORIZED);
        assert_eq!(expenses[1].budget_category, UNCATEGORIZED);
        assert_eq!(expenses[0].notes, None);
    }

    #[test]
    fn optional_columns_may_be_absent() {
        let data = "date,description,amount\n2024-01-02,Coffee,3.5\n";
        let (expenses, skipped) = parse_expenses_csv(data.as_bytes()).unwrap();
        assert_eq!(skipped, 0);
        assert_eq!(expenses[0].category, UNCATEGORIZED);
    }

    #[test]
    fn export_writes_header_and_rows() {
        let expenses = vec![NewExpense::new("2024-01-02", "Coffee, large", 3.5, "Food", "Wants")
            .with_notes("with oat milk")
            .into_expense(1)];
        let mut out = Vec::new();
        let rows = export_expenses_csv(&expenses, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(rows, 1);
        assert_eq!(
            text,
            "date,description,amount,category,budgetCategory,notes\n\
             2024-01-02,\"Coffee, large\",3.5,Food,Wants,with oat milk\n"
        );
    }
}
