//! budgetcraft-domain
//!
//! Pure domain models (categories, expenses, color registry, budget state).
//! No I/O, no storage. Only data types and the invariants they can check locally.

pub mod amount;
pub mod category;
pub mod colors;
pub mod common;
pub mod expense;
pub mod state;

pub use amount::*;
pub use category::*;
pub use colors::*;
pub use common::*;
pub use expense::*;
pub use state::*;
