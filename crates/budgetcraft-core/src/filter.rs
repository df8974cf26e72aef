use budgetcraft_domain::Expense;

/// Search and filter criteria for the expense list. Every set criterion must
/// match; unset criteria match everything.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExpenseFilter {
    /// Case-insensitive substring over description, category and budget category.
    pub search: Option<String>,
    /// Exact spending-category match.
    pub category: Option<String>,
    pub min_amount: Option<f64>,
    pub max_amount: Option<f64>,
}

impl ExpenseFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn search(mut self, term: impl Into<String>) -> Self {
        let term = term.into();
        self.search = if term.trim().is_empty() { None } else { Some(term) };
        self
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn min_amount(mut self, min: f64) -> Self {
        self.min_amount = Some(min);
        self
    }

    pub fn max_amount(mut self, max: f64) -> Self {
        self.max_amount = Some(max);
        self
    }

    pub fn matches(&self, expense: &Expense) -> bool {
        let matches_search = self.search.as_deref().map_or(true, |term| {
            let needle = term.to_lowercase();
            [
                expense.description.as_str(),
                expense.category.as_str(),
                expense.budget_category.as_str(),
            ]
            .iter()
            .any(|field| field.to_lowercase().contains(&needle))
        });
        let matches_category = self
            .category
            .as_deref()
            .map_or(true, |category| expense.category == category);
        let matches_min = self.min_amount.map_or(true, |min| expense.amount >= min);
        let matches_max = self.max_amount.map_or(true, |max| expense.amount <= max);
        matches_search && matches_category && matches_min && matches_max
    }

    pub fn apply<'a>(&self, expenses: &'a [Expense]) -> Vec<&'a Expense> {
        expenses.iter().filter(|expense| self.matches(expense)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use budgetcraft_domain::NewExpense;

    fn sample() -> Vec<Expense> {
        vec![
            NewExpense::new("2023-07-01", "Grocery Shopping", 75.5, "Food", "Needs").into_expense(1),
            NewExpense::new("2023-07-04", "Movie Tickets", 30.0, "Entertainment", "Wants")
                .into_expense(2),
            NewExpense::new("2023-07-10", "Dining Out", 60.0, "Food", "Wants").into_expense(3),
        ]
    }

    #[test]
    fn empty_filter_matches_everything() {
        assert_eq!(ExpenseFilter::new().apply(&sample()).len(), 3);
    }

    #[test]
    fn search_covers_budget_category_case_insensitively() {
        let expenses = sample();
        let hits = ExpenseFilter::new().search("WANTS").apply(&expenses);
        let ids: Vec<i64> = hits.iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![2, 3]);
    }

    #[test]
    fn criteria_combine_with_and() {
        let expenses = sample();
        let hits = ExpenseFilter::new()
            .category("Food")
            .min_amount(60.0)
            .max_amount(75.5)
            .apply(&expenses);
        let ids: Vec<i64> = hits.iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![1, 3]);

        let none = ExpenseFilter::new()
            .category("Food")
            .search("movie")
            .apply(&expenses);
        assert!(none.is_empty());
    }
}
