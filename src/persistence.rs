//! Namespaced JSON slices over a [`KeyValueStore`], with debounced writes.

use std::{fmt, sync::Arc};

use budgetcraft_core::storage::KeyValueStore;
use chrono::{DateTime, Duration, Utc};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use tracing::{debug, warn};

/// Which dashboard tab was last open.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ActiveTab {
    #[default]
    Spending,
    Budget,
}

impl fmt::Display for ActiveTab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ActiveTab::Spending => "spending",
            ActiveTab::Budget => "budget",
        })
    }
}

/// UI state persisted alongside the budget.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UiPreferences {
    pub active_tab: ActiveTab,
}

/// Fully-qualified key names for one namespace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageKeys {
    namespace: String,
}

impl StorageKeys {
    pub fn new(namespace: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
        }
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    fn key(&self, suffix: &str) -> String {
        format!("{}-{}", self.namespace, suffix)
    }

    pub fn income(&self) -> String {
        self.key("income")
    }

    pub fn budget_categories(&self) -> String {
        self.key("budget-categories")
    }

    pub fn spending_categories(&self) -> String {
        self.key("spending-categories")
    }

    pub fn category_colors(&self) -> String {
        self.key("category-colors")
    }

    pub fn budget_colors(&self) -> String {
        self.key("budget-colors")
    }

    pub fn expenses(&self) -> String {
        self.key("expenses")
    }

    pub fn active_tab(&self) -> String {
        self.key("active-tab")
    }

    /// Scratch key written by the availability probe.
    pub fn probe(&self) -> String {
        self.key("test")
    }

    /// Prefix shared by every key in the namespace.
    pub fn prefix(&self) -> String {
        self.key("")
    }
}

/// Typed access to the key/value store. Reads never fail: missing or corrupt
/// values yield the supplied default. The first failed write disables the
/// gateway for the rest of the session.
pub struct PersistenceGateway {
    store: Arc<dyn KeyValueStore>,
    keys: StorageKeys,
    enabled: bool,
}

impl PersistenceGateway {
    pub fn new(store: Arc<dyn KeyValueStore>, namespace: impl Into<String>) -> Self {
        Self {
            store,
            keys: StorageKeys::new(namespace),
            enabled: true,
        }
    }

    pub fn keys(&self) -> &StorageKeys {
        &self.keys
    }

    /// `false` once a write has failed or the store was found unusable.
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn disable(&mut self) {
        if self.enabled {
            warn!(namespace = %self.keys.namespace(), "persistence disabled, continuing in memory only");
        }
        self.enabled = false;
    }

    /// Round-trips a scratch value to check the store accepts writes.
    pub fn is_available(&self) -> bool {
        let key = self.keys.probe();
        let probe = || -> Result<bool, budgetcraft_core::CoreError> {
            self.store.set_raw(&key, "test")?;
            let read_back = self.store.get_raw(&key)?;
            self.store.remove(&key)?;
            Ok(read_back.as_deref() == Some("test"))
        };
        match probe() {
            Ok(ok) => ok,
            Err(err) => {
                warn!(error = %err, "storage availability probe failed");
                false
            }
        }
    }

    pub fn get<T: DeserializeOwned>(&self, key: &str, default: T) -> T {
        if !self.enabled {
            return default;
        }
        match self.store.get_raw(key) {
            Ok(Some(raw)) => match serde_json::from_str(&raw) {
                Ok(value) => value,
                Err(err) => {
                    warn!(key, error = %err, "stored value is corrupt, using default");
                    default
                }
            },
            Ok(None) => {
                debug!(key, "no stored value, using default");
                default
            }
            Err(err) => {
                warn!(key, error = %err, "failed to read stored value, using default");
                default
            }
        }
    }

    /// Serializes and writes `value`. Returns `false` when nothing was written.
    pub fn set<T: Serialize + ?Sized>(&mut self, key: &str, value: &T) -> bool {
        if !self.enabled {
            return false;
        }
        let raw = match serde_json::to_string(value) {
            Ok(raw) => raw,
            Err(err) => {
                warn!(key, error = %err, "failed to serialize value");
                return false;
            }
        };
        match self.store.set_raw(key, &raw) {
            Ok(()) => true,
            Err(err) => {
                warn!(key, error = %err, "failed to persist value");
                self.disable();
                false
            }
        }
    }

    /// Removes every key in the namespace.
    pub fn clear(&mut self) -> bool {
        if !self.enabled {
            return false;
        }
        match self.store.clear(&self.keys.prefix()) {
            Ok(()) => true,
            Err(err) => {
                warn!(error = %err, "failed to clear stored values");
                false
            }
        }
    }
}

/// Trailing debounce: a write becomes due once `quiet_period` has passed
/// since the most recent change.
#[derive(Debug, Clone)]
pub struct DebouncedWriter {
    quiet_period: Duration,
    dirty_since: Option<DateTime<Utc>>,
}

impl DebouncedWriter {
    pub fn new(quiet_period: std::time::Duration) -> Self {
        Self {
            quiet_period: Duration::from_std(quiet_period).unwrap_or_else(|_| Duration::days(1)),
            dirty_since: None,
        }
    }

    pub fn mark_dirty(&mut self, now: DateTime<Utc>) {
        self.dirty_since = Some(now);
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty_since.is_some()
    }

    pub fn is_due(&self, now: DateTime<Utc>) -> bool {
        self.dirty_since
            .map_or(false, |since| now - since >= self.quiet_period)
    }

    pub fn mark_clean(&mut self) {
        self.dirty_since = None;
    }
}
