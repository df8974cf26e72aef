use serde::{Deserialize, Serialize};
use std::{path::PathBuf, time::Duration};

/// Environment variable that overrides the BudgetCraft home directory.
pub const HOME_ENV: &str = "BUDGETCRAFT_HOME";

/// Stores user-configurable runtime settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    /// Prefix for every persisted key, e.g. `budgetcraft-income`.
    #[serde(default = "Config::default_namespace")]
    pub storage_namespace: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// Optional custom directory for persisted slices. Defaults to `<home>/data`.
    pub data_dir: Option<PathBuf>,

    #[serde(default = "Config::default_debounce_ms")]
    pub persist_debounce_ms: u64,

    /// Seed the sample expenses when no expense slice is stored yet.
    #[serde(default = "Config::default_seed_sample_expenses")]
    pub seed_sample_expenses: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_filter: Option<String>,

    #[serde(default = "Config::default_ui_color_enabled")]
    pub ui_color_enabled: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            storage_namespace: Self::default_namespace(),
            data_dir: None,
            persist_debounce_ms: Self::default_debounce_ms(),
            seed_sample_expenses: Self::default_seed_sample_expenses(),
            log_filter: None,
            ui_color_enabled: Self::default_ui_color_enabled(),
        }
    }
}

impl Config {
    pub fn default_namespace() -> String {
        "budgetcraft".into()
    }

    pub fn default_debounce_ms() -> u64 {
        500
    }

    pub fn default_seed_sample_expenses() -> bool {
        true
    }

    pub fn default_ui_color_enabled() -> bool {
        true
    }

    pub fn persist_debounce(&self) -> Duration {
        Duration::from_millis(self.persist_debounce_ms)
    }

    /// Namespace with surrounding whitespace removed; blank falls back to the default.
    pub fn namespace(&self) -> &str {
        let trimmed = self.storage_namespace.trim();
        if trimmed.is_empty() {
            "budgetcraft"
        } else {
            trimmed
        }
    }

    /// Home directory: `$BUDGETCRAFT_HOME`, else the platform data dir, else
    /// the user's home, else the working directory.
    pub fn default_home() -> PathBuf {
        Self::home_from(std::env::var_os(HOME_ENV).map(PathBuf::from))
    }

    pub fn home_from(override_dir: Option<PathBuf>) -> PathBuf {
        if let Some(dir) = override_dir.filter(|dir| !dir.as_os_str().is_empty()) {
            return dir;
        }
        dirs::data_dir()
            .map(|base| base.join("budgetcraft"))
            .or_else(|| dirs::home_dir().map(|home| home.join(".budgetcraft")))
            .unwrap_or_else(|| PathBuf::from(".budgetcraft"))
    }

    pub fn resolve_data_dir(&self, home: &std::path::Path) -> PathBuf {
        match &self.data_dir {
            Some(path) => path.clone(),
            None => home.join("data"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let cfg: Config = serde_json::from_str("{}").expect("empty object");
        assert_eq!(cfg, Config::default());
        assert_eq!(cfg.persist_debounce(), Duration::from_millis(500));
    }

    #[test]
    fn blank_namespace_uses_default() {
        let cfg = Config {
            storage_namespace: "   ".into(),
            ..Config::default()
        };
        assert_eq!(cfg.namespace(), "budgetcraft");
    }

    #[test]
    fn explicit_home_override_wins() {
        let home = Config::home_from(Some(PathBuf::from("/srv/budget")));
        assert_eq!(home, PathBuf::from("/srv/budget"));
        assert_eq!(
            Config::default().resolve_data_dir(&home),
            PathBuf::from("/srv/budget/data")
        );
    }
}
