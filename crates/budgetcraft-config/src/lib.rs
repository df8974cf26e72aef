//! budgetcraft-config
//!
//! Runtime configuration for BudgetCraft: storage namespace, data location,
//! persistence debounce and logging defaults, plus disk persistence helpers.

pub mod error;
pub mod manager;
pub mod model;

pub use error::ConfigError;
pub use manager::ConfigManager;
pub use model::{Config, HOME_ENV};
