use budgetcraft_domain::{BudgetState, CategoryKind, SpendingCategory};
use tracing::info;

use crate::{
    reconcile::{cascade_rename, reconcile_expenses, ReconcileReport},
    validation, CoreError, CoreResult,
};

/// What a spending-category rename touched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenameOutcome {
    pub cascaded: usize,
    pub reconcile: ReconcileReport,
}

/// Maintains the free-form spending categories used to tag expenses.
pub struct CategoryService;

impl CategoryService {
    pub fn add_category(state: &mut BudgetState, name: &str, color: &str) -> CoreResult<()> {
        let name = validation::category_name(name)?;
        let color = validation::color(color)?;
        validation::unique_name(
            CategoryKind::Spending,
            state.spending_categories.iter().map(|cat| cat.name.as_str()),
            None,
            &name,
        )?;
        state
            .colors
            .set(CategoryKind::Spending, name.clone(), color.clone());
        info!(category = %name, "spending category added");
        state.spending_categories.push(SpendingCategory::new(name, color));
        Ok(())
    }

    /// Renames and recolors a category in one step, cascading the new name
    /// into every expense and the spending color map.
    pub fn rename_category(
        state: &mut BudgetState,
        old_name: &str,
        new_name: &str,
        color: &str,
    ) -> CoreResult<RenameOutcome> {
        let index = Self::index_of(state, old_name)?;
        let new_name = validation::category_name(new_name)?;
        let color = validation::color(color)?;
        validation::unique_name(
            CategoryKind::Spending,
            state.spending_categories.iter().map(|cat| cat.name.as_str()),
            Some(index),
            &new_name,
        )?;

        let old_name = std::mem::replace(&mut state.spending_categories[index].name, new_name.clone());
        state.spending_categories[index].color = color.clone();
        state.colors.rename(CategoryKind::Spending, &old_name, &new_name);
        state.colors.set(CategoryKind::Spending, new_name.clone(), color);

        let cascaded = cascade_rename(state, CategoryKind::Spending, &old_name, &new_name);
        let reconcile = reconcile_expenses(state, CategoryKind::Spending);
        info!(from = %old_name, to = %new_name, cascaded, "spending category renamed");
        Ok(RenameOutcome {
            cascaded,
            reconcile,
        })
    }

    pub fn recolor_category(state: &mut BudgetState, name: &str, color: &str) -> CoreResult<()> {
        let index = Self::index_of(state, name)?;
        let color = validation::color(color)?;
        state.spending_categories[index].color = color.clone();
        state.colors.set(CategoryKind::Spending, name, color);
        Ok(())
    }

    /// Removes the category; referencing expenses are repaired, not deleted.
    pub fn delete_category(state: &mut BudgetState, name: &str) -> CoreResult<ReconcileReport> {
        let index = Self::index_of(state, name)?;
        let removed = state.spending_categories.remove(index);
        state.colors.remove(CategoryKind::Spending, &removed.name);
        let report = reconcile_expenses(state, CategoryKind::Spending);
        info!(
            category = %removed.name,
            reassigned = report.reassigned.len(),
            "spending category deleted"
        );
        Ok(report)
    }

    pub fn list(state: &BudgetState) -> &[SpendingCategory] {
        &state.spending_categories
    }

    fn index_of(state: &BudgetState, name: &str) -> CoreResult<usize> {
        state
            .spending_category_index(name)
            .ok_or_else(|| CoreError::CategoryNotFound(name.to_string()))
    }
}
