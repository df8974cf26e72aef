#![allow(dead_code)]

use std::{
    path::{Path, PathBuf},
    sync::{Arc, Mutex},
};

use budgetcraft::{BudgetStore, PersistenceGateway, StoreOptions};
use budgetcraft_core::ManualClock;
use budgetcraft_storage_json::JsonFileStore;
use chrono::{TimeZone, Utc};
use once_cell::sync::Lazy;
use tempfile::TempDir;

/// Holds TempDir guards so temporary folders live for the duration of the test run.
static TEST_DIRS: Lazy<Mutex<Vec<TempDir>>> = Lazy::new(|| Mutex::new(Vec::new()));

/// Creates a unique directory that outlives the calling test.
pub fn temp_dir() -> PathBuf {
    let temp = TempDir::new().expect("create temp dir");
    let path = temp.path().to_path_buf();
    TEST_DIRS.lock().expect("lock temp dir registry").push(temp);
    path
}

pub fn manual_clock() -> Arc<ManualClock> {
    Arc::new(ManualClock::new(
        Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap(),
    ))
}

pub fn options(seed_sample_expenses: bool) -> StoreOptions {
    StoreOptions {
        persist_debounce: std::time::Duration::from_millis(500),
        seed_sample_expenses,
    }
}

/// Opens a file-backed store over `dir` with the given clock.
pub fn open_store(dir: &Path, clock: Arc<ManualClock>, options: StoreOptions) -> BudgetStore {
    let storage = JsonFileStore::new(dir).expect("create json store");
    let gateway = PersistenceGateway::new(Arc::new(storage), "budgetcraft");
    BudgetStore::init_from_persistence(gateway, clock, options)
}

/// Fresh in-memory store without sample expenses.
pub fn empty_store() -> (BudgetStore, Arc<ManualClock>) {
    let clock = manual_clock();
    let store = BudgetStore::in_memory(clock.clone(), options(false));
    (store, clock)
}
