//! Persistence tests: JSON files, config files and the error log on disk.

use std::path::PathBuf;
use tempfile::TempDir;

use crate::config::{AppConfig, Environment};
use crate::error_log::{ErrorLog, Severity};
use crate::persistence::{ensure_dir, load_json, load_json_or_default, save_json};

// ============================================================================
// JSON Persistence Tests
// ============================================================================

#[tokio::test]
async fn test_save_creates_parent_directories() {
    let temp_dir = TempDir::new().unwrap();
    let nested_path = temp_dir.path().join("deeply").join("nested").join("test.json");

    let data = serde_json::json!({"key": "value"});

    save_json(&nested_path, &data).await.unwrap();
    assert!(nested_path.exists());
}

#[tokio::test]
async fn test_load_nonexistent_file() {
    let file_path = PathBuf::from("/nonexistent/path/config.json");

    let result: Result<AppConfig, _> = load_json(&file_path).await;
    assert!(result.unwrap_err().is_not_found());
}

#[tokio::test]
async fn test_load_corrupt_file_or_default() {
    let temp_dir = TempDir::new().unwrap();
    let file_path = temp_dir.path().join("corrupt.json");
    tokio::fs::write(&file_path, "{not json").await.unwrap();

    let result: Result<AppConfig, _> = load_json(&file_path).await;
    assert!(!result.unwrap_err().is_not_found());

    let config: AppConfig = load_json_or_default(&file_path).await;
    assert_eq!(config, AppConfig::default());
}

#[tokio::test]
async fn test_ensure_dir_idempotent() {
    let temp_dir = TempDir::new().unwrap();
    let dir_path = temp_dir.path().join("test_dir");

    ensure_dir(&dir_path).await.unwrap();
    ensure_dir(&dir_path).await.unwrap();

    assert!(dir_path.is_dir());
}

#[tokio::test]
async fn test_atomic_write_leaves_no_temp_file() {
    let temp_dir = TempDir::new().unwrap();
    let file_path = temp_dir.path().join("atomic.json");

    save_json(&file_path, &AppConfig::default()).await.unwrap();

    assert!(!file_path.with_extension("json.tmp").exists());
    assert!(file_path.exists());
}

// ============================================================================
// Config Files
// ============================================================================

#[tokio::test]
async fn test_config_roundtrip() {
    let temp_dir = TempDir::new().unwrap();
    let file_path = temp_dir.path().join("config.json");

    let config = AppConfig {
        api_url: "http://localhost:8000".to_string(),
        environment: Environment::Development,
        enable_logging: true,
        ..AppConfig::default()
    };

    config.save_to(&file_path).await.unwrap();
    let loaded = AppConfig::load_from(&file_path).await.unwrap();

    assert_eq!(loaded, config);
}

#[tokio::test]
async fn test_config_with_unknown_fields() {
    let temp_dir = TempDir::new().unwrap();
    let file_path = temp_dir.path().join("config.json");

    let json = r#"{
        "api_url": "https://staging.felfwd.app",
        "domain": "felfwd.app",
        "enable_devtools": true
    }"#;
    tokio::fs::write(&file_path, json).await.unwrap();

    let loaded = AppConfig::load_from(&file_path).await.unwrap();
    assert_eq!(loaded.api_url, "https://staging.felfwd.app");
    assert!(loaded.is_production());
}

// ============================================================================
// Error Log Files
// ============================================================================

#[tokio::test]
async fn test_error_log_unicode_roundtrip() {
    let temp_dir = TempDir::new().unwrap();
    let file_path = temp_dir.path().join("logs").join("error_log.json");

    let log = ErrorLog::new();
    log.log_message(Severity::Warning, "déménagement 🚀 日本語", None);
    log.persist(&file_path).await.unwrap();

    let loaded = ErrorLog::load(&file_path).await.unwrap();
    assert_eq!(loaded.entries(), log.entries());
}

#[tokio::test]
async fn test_error_log_remove_persisted() {
    let temp_dir = TempDir::new().unwrap();
    let file_path = temp_dir.path().join("error_log.json");

    let log = ErrorLog::new();
    log.log_message(Severity::Error, "boom", None);
    log.persist(&file_path).await.unwrap();
    assert!(file_path.exists());

    ErrorLog::remove_persisted(&file_path).await.unwrap();
    assert!(!file_path.exists());
}
