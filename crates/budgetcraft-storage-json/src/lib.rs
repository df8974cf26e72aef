//! Key/value persistence for BudgetCraft state slices.

use std::{
    collections::HashMap,
    fs::{self, File},
    io::{ErrorKind, Write},
    path::{Path, PathBuf},
    sync::RwLock,
};

use budgetcraft_core::{storage::KeyValueStore, CoreError};
use budgetcraft_domain::BudgetState;
use tracing::debug;

const VALUE_EXTENSION: &str = "json";
const TMP_SUFFIX: &str = "tmp";

/// Filesystem-backed store keeping one `<key>.json` file per key.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    root: PathBuf,
}

impl JsonFileStore {
    pub fn new(root: impl Into<PathBuf>) -> Result<Self, CoreError> {
        let root = root.into();
        fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn key_path(&self, key: &str) -> PathBuf {
        self.root
            .join(format!("{}.{}", canonical_key(key), VALUE_EXTENSION))
    }

    /// Keys currently on disk, sorted.
    pub fn keys(&self) -> Result<Vec<String>, CoreError> {
        if !self.root.exists() {
            return Ok(Vec::new());
        }
        let mut keys = Vec::new();
        for entry in fs::read_dir(&self.root)? {
            let path = entry?.path();
            if !path.is_file() {
                continue;
            }
            if path.extension().and_then(|ext| ext.to_str()) != Some(VALUE_EXTENSION) {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|stem| stem.to_str()) {
                keys.push(stem.to_string());
            }
        }
        keys.sort();
        Ok(keys)
    }
}

impl KeyValueStore for JsonFileStore {
    fn get_raw(&self, key: &str) -> Result<Option<String>, CoreError> {
        match fs::read_to_string(self.key_path(key)) {
            Ok(data) => Ok(Some(data)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    fn set_raw(&self, key: &str, value: &str) -> Result<(), CoreError> {
        let path = self.key_path(key);
        let tmp = tmp_path(&path);
        write_atomic(&tmp, value)?;
        fs::rename(&tmp, &path)?;
        debug!(key, bytes = value.len(), "stored value");
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), CoreError> {
        let path = self.key_path(key);
        if path.exists() {
            fs::remove_file(path)?;
        }
        Ok(())
    }

    fn clear(&self, prefix: &str) -> Result<(), CoreError> {
        let prefix = canonical_key(prefix);
        for key in self.keys()? {
            if key.starts_with(&prefix) {
                fs::remove_file(self.key_path(&key))?;
            }
        }
        Ok(())
    }
}

/// Volatile store used for tests and as the in-memory fallback.
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: RwLock<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.values.read().map(|values| values.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl KeyValueStore for MemoryStore {
    fn get_raw(&self, key: &str) -> Result<Option<String>, CoreError> {
        let values = self.values.read().map_err(|_| poisoned())?;
        Ok(values.get(key).cloned())
    }

    fn set_raw(&self, key: &str, value: &str) -> Result<(), CoreError> {
        let mut values = self.values.write().map_err(|_| poisoned())?;
        values.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), CoreError> {
        let mut values = self.values.write().map_err(|_| poisoned())?;
        values.remove(key);
        Ok(())
    }

    fn clear(&self, prefix: &str) -> Result<(), CoreError> {
        let mut values = self.values.write().map_err(|_| poisoned())?;
        values.retain(|key, _| !key.starts_with(prefix));
        Ok(())
    }
}

/// Saves the whole state as one pretty-printed JSON document.
pub fn save_state_to_path(state: &BudgetState, path: &Path) -> Result<(), CoreError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let data =
        serde_json::to_string_pretty(state).map_err(|err| CoreError::Storage(err.to_string()))?;
    let tmp = tmp_path(path);
    write_atomic(&tmp, &data)?;
    fs::rename(&tmp, path)?;
    Ok(())
}

/// Loads a snapshot written by [`save_state_to_path`].
pub fn load_state_from_path(path: &Path) -> Result<BudgetState, CoreError> {
    let data = fs::read_to_string(path)?;
    serde_json::from_str(&data).map_err(|err| CoreError::Storage(err.to_string()))
}

fn canonical_key(key: &str) -> String {
    let sanitized: String = key
        .trim()
        .to_lowercase()
        .chars()
        .map(|c| match c {
            'a'..='z' | '0'..='9' | '-' | '_' => c,
            _ => '_',
        })
        .collect();
    if sanitized.trim_matches('_').is_empty() {
        "value".into()
    } else {
        sanitized
    }
}

fn poisoned() -> CoreError {
    CoreError::Storage("memory store lock poisoned".into())
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

fn write_atomic(path: &Path, data: &str) -> Result<(), CoreError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    Ok(())
}
