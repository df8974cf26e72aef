//! budgetcraft-core
//!
//! Business rules for BudgetCraft: allocation, category maintenance, the
//! expense ledger, reconciliation and derived aggregates.
//! Depends on budgetcraft-domain. No terminal I/O, no direct storage interactions.

pub mod budget_service;
pub mod category_service;
pub mod error;
pub mod expense_service;
pub mod filter;
pub mod reconcile;
pub mod storage;
pub mod summary_service;
pub mod time;
mod validation;

pub use budget_service::*;
pub use category_service::*;
pub use error::{CoreError, CoreResult};
pub use expense_service::*;
pub use filter::*;
pub use reconcile::*;
pub use summary_service::*;
pub use time::*;
