use budgetcraft_config::{Config, ConfigError, ConfigManager};
use std::fs;
use tempfile::tempdir;

#[test]
fn default_config_uses_budgetcraft_namespace() {
    let cfg = Config::default();

    assert_eq!(cfg.namespace(), "budgetcraft");
    assert_eq!(cfg.persist_debounce_ms, 500);
    assert!(cfg.seed_sample_expenses);
}

#[test]
fn config_manager_persists_and_loads_config() {
    let dir = tempdir().expect("tempdir");
    let manager = ConfigManager::with_base_dir(dir.path().to_path_buf()).expect("manager");

    let cfg = Config {
        storage_namespace: "household".to_string(),
        persist_debounce_ms: 50,
        seed_sample_expenses: false,
        log_filter: Some("budgetcraft=debug".into()),
        ..Config::default()
    };

    manager.save(&cfg).expect("save config");
    assert!(manager.config_path().ends_with("config/config.json"));
    let loaded = manager.load().expect("load config");

    assert_eq!(loaded, cfg);
}

#[test]
fn missing_config_file_loads_defaults() {
    let dir = tempdir().expect("tempdir");
    let manager = ConfigManager::new(dir.path().join("absent.json"));
    assert_eq!(manager.load().expect("defaults"), Config::default());
}

#[test]
fn corrupt_config_is_a_serde_error() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("config.json");
    fs::write(&path, "not json").unwrap();
    let err = ConfigManager::new(path).load().expect_err("corrupt config");
    assert!(matches!(err, ConfigError::Serde(_)));
}

#[test]
fn load_or_create_writes_defaults_once() {
    let dir = tempdir().expect("tempdir");
    let manager = ConfigManager::with_base_dir(dir.path().to_path_buf()).expect("manager");

    let created = manager.load_or_create().expect("first run");
    assert_eq!(created, Config::default());
    assert!(manager.config_path().is_file());

    let edited = Config {
        ui_color_enabled: false,
        ..Config::default()
    };
    manager.save(&edited).expect("save edit");
    assert_eq!(manager.load_or_create().expect("second run"), edited);
}
