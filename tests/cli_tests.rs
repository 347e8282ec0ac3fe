use assert_cmd::Command;
use predicates::prelude::*;

fn edgeseer() -> Command {
    let mut cmd = Command::cargo_bin("edgeseer").expect("binary builds");
    cmd.env_remove("RUST_LOG");
    cmd
}

#[test]
fn help_lists_subcommands() {
    edgeseer()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("analyze"))
        .stdout(predicate::str::contains("check-key"))
        .stdout(predicate::str::contains("models"));
}

#[test]
fn models_lists_provider_catalog() {
    let dir = tempfile::tempdir().unwrap();
    edgeseer()
        .current_dir(dir.path())
        .args(["models", "--provider", "gemini"])
        .assert()
        .success()
        .stdout(predicate::str::contains("gemini-2.5-flash"))
        .stdout(predicate::str::contains("claude").not());
}

#[test]
fn models_json_is_parseable() {
    let dir = tempfile::tempdir().unwrap();
    let output = edgeseer()
        .current_dir(dir.path())
        .args(["models", "--json"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let models: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert!(models.as_array().unwrap().len() >= 6);
}

#[test]
fn invalid_config_exits_nonzero_with_field_name() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "[analysis]\ntemperature = 9\n").unwrap();

    edgeseer()
        .args(["models", "--config"])
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("analysis.temperature"));
}

#[test]
fn check_key_without_key_fails_cleanly() {
    let dir = tempfile::tempdir().unwrap();
    edgeseer()
        .current_dir(dir.path())
        .env_remove("EDGESEER_TEST_MISSING_KEY")
        .args(["check-key", "--provider", "openai", "--key-env", "EDGESEER_TEST_MISSING_KEY"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("EDGESEER_TEST_MISSING_KEY"));
}

#[test]
fn analyze_rejects_unknown_model_before_network() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("request.json");
    std::fs::write(
        &input,
        r#"{"markets": [{"id": "m", "question": "Q?", "outcomePrices": [0.5, 0.5]}], "bankroll": 10}"#,
    )
    .unwrap();
    let state = dir.path().join("limits.json");
    let config = dir.path().join("config.toml");
    std::fs::write(
        &config,
        format!("[rate_limit]\nstate_path = {:?}\n", state.display().to_string()),
    )
    .unwrap();

    edgeseer()
        .args(["analyze", "--provider", "openai", "--model", "gpt-99", "--input"])
        .arg(&input)
        .arg("--config")
        .arg(&config)
        .assert()
        .failure()
        .stderr(predicate::str::contains("gpt-99"));
}
