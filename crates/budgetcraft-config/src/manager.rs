use std::{
    fs::{self, File},
    io::{BufReader, Write},
    path::{Path, PathBuf},
};

use crate::{Config, ConfigError};

const CONFIG_DIR: &str = "config";
const CONFIG_FILE: &str = "config.json";

/// Reads and writes the JSON config file of one BudgetCraft home.
#[derive(Debug, Clone)]
pub struct ConfigManager {
    config_path: PathBuf,
}

impl ConfigManager {
    pub fn new(config_path: PathBuf) -> Self {
        Self { config_path }
    }

    /// Places the config file at `<home>/config/config.json`.
    pub fn with_base_dir(home: PathBuf) -> Result<Self, ConfigError> {
        let dir = home.join(CONFIG_DIR);
        fs::create_dir_all(&dir)?;
        Ok(Self::new(dir.join(CONFIG_FILE)))
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    /// Stored config, or [`Config::default`] when the file does not exist.
    pub fn load(&self) -> Result<Config, ConfigError> {
        if !self.config_path.is_file() {
            return Ok(Config::default());
        }
        let reader = BufReader::new(File::open(&self.config_path)?);
        serde_json::from_reader(reader).map_err(|err| {
            ConfigError::Serde(format!("{}: {err}", self.config_path.display()))
        })
    }

    /// Like [`ConfigManager::load`], but writes the defaults out on first run
    /// so users have a file to edit.
    pub fn load_or_create(&self) -> Result<Config, ConfigError> {
        if self.config_path.is_file() {
            return self.load();
        }
        let config = Config::default();
        self.save(&config)?;
        Ok(config)
    }

    /// Writes next to the target and renames over it.
    pub fn save(&self, config: &Config) -> Result<(), ConfigError> {
        if let Some(parent) = self.config_path.parent() {
            fs::create_dir_all(parent)?;
        }
        let mut json = serde_json::to_string_pretty(config)
            .map_err(|err| ConfigError::Serde(err.to_string()))?;
        json.push('\n');

        let staging = self.config_path.with_extension("json.tmp");
        {
            let mut file = File::create(&staging)?;
            file.write_all(json.as_bytes())?;
            file.sync_all()?;
        }
        fs::rename(&staging, &self.config_path)?;
        Ok(())
    }
}
