use budgetcraft_config::ConfigError;
use budgetcraft_core::CoreError;
use thiserror::Error;

/// Error type returned by every `BudgetStore` command and collaborator.
#[derive(Debug, Error)]
pub enum BudgetError {
    #[error(transparent)]
    Core(#[from] CoreError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("Usage: {0}")]
    Usage(String),
    #[error("Import failed: {0}")]
    Import(String),
    #[error("Storage error: {0}")]
    Storage(String),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl BudgetError {
    /// `true` when the caller should show the message inline rather than abort.
    pub fn is_user_error(&self) -> bool {
        match self {
            BudgetError::Core(err) => err.is_user_error(),
            BudgetError::Usage(_) | BudgetError::Import(_) => true,
            _ => false,
        }
    }
}

pub type BudgetResult<T> = Result<T, BudgetError>;
