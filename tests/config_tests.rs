use std::fs;

use edgeseer::domain::ProviderId;
use edgeseer::error::{ConfigError, Error};
use edgeseer::infrastructure::config::settings::Config;

fn write_temp_config(dir: &tempfile::TempDir, contents: &str) -> std::path::PathBuf {
    let path = dir.path().join("config.toml");
    fs::write(&path, contents).expect("write temp config");
    path
}

#[test]
fn config_loads_example_file() {
    let config = Config::load(concat!(env!("CARGO_MANIFEST_DIR"), "/config.example.toml"))
        .expect("example config is valid");
    assert_eq!(config.llm.provider, ProviderId::Anthropic);
    assert!(config.proxy_url().is_ok());
}

#[test]
fn config_rejects_invalid_temperature() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_temp_config(
        &dir,
        r#"
[logging]
level = "info"
format = "pretty"

[analysis]
temperature = -0.1
"#,
    );

    match Config::load(&path) {
        Err(Error::Config(ConfigError::InvalidValue {
            field: "analysis.temperature",
            ..
        })) => {}
        Err(err) => panic!("Expected invalid temperature error, got {err}"),
        Ok(_) => panic!("Expected invalid temperature error"),
    }
}

#[test]
fn config_reports_unreadable_file() {
    let dir = tempfile::tempdir().unwrap();
    let err = Config::load(dir.path().join("missing.toml")).unwrap_err();
    assert!(matches!(err, Error::Config(ConfigError::ReadFile(_))));
}

#[test]
fn config_reports_malformed_toml() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_temp_config(&dir, "[proxy\nbase_url = 1");
    assert!(matches!(
        Config::load(&path),
        Err(Error::Config(ConfigError::Parse(_)))
    ));
}

#[test]
fn missing_file_falls_back_to_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let config = Config::load_or_default(dir.path().join("absent.toml")).unwrap();
    assert_eq!(config.llm.model, "claude-sonnet-4-5");
}

#[test]
fn proxy_token_never_comes_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_temp_config(&dir, "[proxy]\nservice_token = \"from-file\"\n");
    let config = Config::load(&path).unwrap();
    assert_ne!(config.proxy.service_token.as_deref(), Some("from-file"));
    assert!(!format!("{config:?}").contains("from-file"));
}
