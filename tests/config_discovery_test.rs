use std::env;
use std::fs;

use smokesignal::config::{ConfigManager, CONFIG_ENV_VAR};
use smokesignal::logging::{init_logger, LogConfig};
use smokesignal::DeliveryPolicy;
use tempfile::tempdir;

// Both discovery cases live in one test since they share the process environment
#[test]
fn test_env_var_config_is_discovered_first() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let config_path = temp_dir.path().join("override.toml");
    fs::write(&config_path, "[registry]\ndelivery = \"isolate\"\n").expect("Failed to write config file");

    env::set_var(CONFIG_ENV_VAR, &config_path);
    let manager = ConfigManager::load().expect("Failed to load config");
    assert_eq!(manager.config_file_path(), Some(config_path.as_path()));
    assert_eq!(manager.get_registry_config().unwrap().delivery, DeliveryPolicy::Isolate);

    // A missing override is skipped and discovery moves on
    let missing = temp_dir.path().join("absent.toml");
    env::set_var(CONFIG_ENV_VAR, &missing);
    let manager = ConfigManager::load().expect("Discovery should tolerate a missing override");
    assert_ne!(manager.config_file_path(), Some(missing.as_path()));

    env::remove_var(CONFIG_ENV_VAR);
}

#[test]
fn test_logger_installs_only_once() {
    init_logger(LogConfig::default()).expect("First logger install should succeed");
    log::info!("logger installed");

    let error = init_logger(LogConfig::default()).unwrap_err();
    assert!(error.to_string().contains("Failed to set global logger"));
}
