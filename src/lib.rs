#![doc(test(attr(deny(warnings))))]

//! BudgetCraft keeps income, budget allocations, spending categories and the
//! expense ledger mutually consistent, and mirrors them to a key/value store.

pub mod commands;
pub mod defaults;
pub mod errors;
pub mod import;
pub mod persistence;
pub mod store;
pub mod utils;

pub use errors::{BudgetError, BudgetResult};
pub use import::{
    export_expenses_csv, export_expenses_csv_path, import_expenses_csv, import_expenses_csv_path,
    ImportSummary,
};
pub use persistence::{ActiveTab, DebouncedWriter, PersistenceGateway, StorageKeys, UiPreferences};
pub use store::{BudgetStore, StoreOptions};

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing with the default filter.
pub fn init() {
    init_with_filter(None);
}

/// Initializes global tracing; `directive` replaces the default filter
/// unless `RUST_LOG` is set.
pub fn init_with_filter(directive: Option<&str>) {
    INIT_TRACING.call_once(|| {
        utils::init_tracing(directive);
        tracing::info!("BudgetCraft tracing initialized.");
    });
}
