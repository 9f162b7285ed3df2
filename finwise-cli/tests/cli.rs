use assert_cmd::Command;
use predicates::prelude::*;
use std::path::PathBuf;

fn statement_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .unwrap()
        .join("fixtures")
        .join("statement.csv")
}

fn finwise(home: &tempfile::TempDir) -> Command {
    let mut cmd = Command::cargo_bin("finwise").unwrap();
    cmd.env("FINWISE_HOME", home.path()).env("RUST_LOG", "off");
    cmd
}

#[test]
fn test_columns_shows_detected_mapping() {
    let home = tempfile::tempdir().unwrap();
    finwise(&home)
        .args(["columns", "--csv"])
        .arg(statement_path())
        .assert()
        .success()
        .stdout(predicate::str::contains("date:        Posting Date"))
        .stdout(predicate::str::contains("description: Payee"));
}

#[test]
fn test_categorize_json_keyword_mode() {
    let home = tempfile::tempdir().unwrap();
    let out = finwise(&home)
        .args(["categorize", "--mode", "keyword", "--json", "--csv"])
        .arg(statement_path())
        .output()
        .unwrap();
    assert!(out.status.success());

    let body: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    let txns = body["transactions"].as_array().unwrap();
    assert_eq!(txns.len(), 11);
    assert_eq!(txns[0]["category"], "Food & Dining");
}

#[test]
fn test_summary_puts_income_first() {
    let home = tempfile::tempdir().unwrap();
    let out = finwise(&home)
        .args(["summary", "--json", "--csv"])
        .arg(statement_path())
        .output()
        .unwrap();
    assert!(out.status.success());

    let stats: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(stats[0]["category"], "Income");
}

#[test]
fn test_unknown_override_column_fails() {
    let home = tempfile::tempdir().unwrap();
    finwise(&home)
        .args(["categorize", "--description-column", "Memo", "--csv"])
        .arg(statement_path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Memo"));
}

#[test]
fn test_classify_json_rejects_bad_payload() {
    let home = tempfile::tempdir().unwrap();
    finwise(&home)
        .args(["classify-json", "--mode", "keyword"])
        .write_stdin(r#"{"items": []}"#)
        .assert()
        .failure()
        .stdout(predicate::str::contains("missing transactions"));
}

#[test]
fn test_config_init_writes_file() {
    let home = tempfile::tempdir().unwrap();
    finwise(&home).args(["config", "init"]).assert().success();
    let written = std::fs::read_to_string(home.path().join("config.toml")).unwrap();
    assert!(written.contains("fiqa-mistral-7b-lora"));
}

#[test]
fn test_config_init_keeps_existing_file() {
    let home = tempfile::tempdir().unwrap();
    let path = home.path().join("config.toml");
    std::fs::write(&path, "[classifier]\nmode = \"remote\"\n").unwrap();

    finwise(&home)
        .args(["config", "init"])
        .assert()
        .success()
        .stdout(predicate::str::contains("left unchanged"));
    assert_eq!(
        std::fs::read_to_string(&path).unwrap(),
        "[classifier]\nmode = \"remote\"\n"
    );
}

#[test]
fn test_invalid_config_names_the_file() {
    let home = tempfile::tempdir().unwrap();
    std::fs::write(home.path().join("config.toml"), "[classifier]\nmode = 3\n").unwrap();

    finwise(&home)
        .args(["config", "show"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid config"));
}
