use budgetcraft_domain::CategoryKind;
use thiserror::Error;

pub type CoreResult<T> = Result<T, CoreError>;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("Validation failed: {0}")]
    Validation(String),
    #[error(
        "Allocating {requested:.2} would bring the total to {total:.2}, exceeding income of {income:.2}"
    )]
    OverAllocation {
        requested: f64,
        total: f64,
        income: f64,
    },
    #[error("A {kind} category named `{name}` already exists")]
    DuplicateName { kind: CategoryKind, name: String },
    #[error("Category not found: {0}")]
    CategoryNotFound(String),
    #[error("Expense not found: {0}")]
    ExpenseNotFound(i64),
    #[error("Storage error: {0}")]
    Storage(String),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl CoreError {
    /// `true` for failures caused by user input rather than the environment.
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            CoreError::Validation(_)
                | CoreError::OverAllocation { .. }
                | CoreError::DuplicateName { .. }
                | CoreError::CategoryNotFound(_)
                | CoreError::ExpenseNotFound(_)
        )
    }
}
