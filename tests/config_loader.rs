//! Configuration file loading, validation, and overrides.

mod common;

use common::temp_config;
use std::path::PathBuf;
use vocabvault::config::{Config, ConfigError, ConfigStore};

#[test]
fn test_config_default_values() {
    let config = Config::default();

    assert_eq!(
        config.api.base_url,
        "https://vocabapp-backend-3ec74c7b267c.herokuapp.com"
    );
    assert_eq!(config.api.connect_timeout_seconds, 5);
    assert!(config.api.timeout_seconds.is_none());
    assert!(!config.google.is_enabled());
    assert!(config.storage.database_path().ends_with("vocabvault/vocabVault.db"));
    assert!(config.storage.session_path().ends_with("vocabvault/session.json"));
}

#[test]
fn test_config_path_ends_with_expected() {
    let path = Config::config_path();
    assert!(path.ends_with("vocabvault/config.toml"));
}

#[test]
fn test_missing_file_gives_defaults() {
    let config = Config::load_from(&PathBuf::from("/nonexistent/vocabvault.toml")).unwrap();
    assert_eq!(config, Config::default());
}

#[test]
fn test_partial_file_keeps_other_defaults() {
    let (_dir, path) = temp_config(
        r#"
[api]
base_url = "http://localhost:3000"
timeout_seconds = 10

[storage]
database_path = "/tmp/vocab-test.db"
"#,
    );

    let config = Config::load_from(&path).unwrap();
    assert_eq!(config.api.base_url, "http://localhost:3000");
    assert_eq!(config.api.timeout_seconds, Some(10));
    assert_eq!(config.api.connect_timeout_seconds, 5);
    assert_eq!(
        config.storage.database_path(),
        PathBuf::from("/tmp/vocab-test.db")
    );
    assert!(!config.google.is_enabled());
}

#[test]
fn test_invalid_toml_is_parse_error() {
    let (_dir, path) = temp_config("[api\nbase_url = ");
    assert!(matches!(
        Config::load_from(&path),
        Err(ConfigError::ParseError { .. })
    ));
}

#[test]
fn test_non_http_base_url_rejected() {
    let (_dir, path) = temp_config("[api]\nbase_url = \"ftp://example.com\"\n");
    let err = Config::load_from(&path).unwrap_err();
    assert!(matches!(err, ConfigError::ValidationError { .. }));
    assert!(err.to_string().contains("api.base_url"));
}

#[test]
fn test_google_urls_checked_only_when_enabled() {
    let (_dir, path) = temp_config("[google]\nauth_url = \"not a url\"\n");
    assert!(Config::load_from(&path).is_ok());

    let (_dir, path) = temp_config(
        "[google]\nclient_id = \"abc\"\nauth_url = \"not a url\"\n",
    );
    let err = Config::load_from(&path).unwrap_err();
    assert!(err.to_string().contains("google.auth_url"));
}

#[test]
fn test_base_url_override() {
    let config = Config::default()
        .with_base_url(Some("http://127.0.0.1:9000/".to_string()))
        .unwrap();
    assert_eq!(config.api.base_url, "http://127.0.0.1:9000");

    assert!(Config::default()
        .with_base_url(Some("nonsense".to_string()))
        .is_err());

    let unchanged = Config::default().with_base_url(None).unwrap();
    assert_eq!(unchanged, Config::default());
}

#[test]
fn test_store_hands_out_sections() {
    let (_dir, path) = temp_config(
        "[api]\nbase_url = \"http://one.example\"\n\n[google]\nclient_id = \"abc\"\n",
    );
    let config = Config::load_from(&path).unwrap();
    let store = ConfigStore::new(config.clone(), path.clone());

    assert_eq!(store.api(), config.api);
    assert_eq!(store.api().base_url, "http://one.example");
    assert!(store.google().is_enabled());
    assert_eq!(store.storage(), config.storage);
    assert_eq!(store.path(), path.as_path());
}
