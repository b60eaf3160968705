//! CLI integration tests using assert_cmd.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn windcheck() -> Command {
    #[allow(deprecated)]
    let mut cmd = Command::cargo_bin("windcheck").unwrap();
    // Keep the host environment out of config resolution
    cmd.env_remove("WINDCHECK_OPENAI_KEY")
        .env_remove("WINDCHECK_SERVICE_ACCOUNT_FILE")
        .env_remove("WINDCHECK_SPREADSHEET");
    cmd
}

#[test]
fn help_output() {
    windcheck()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("LLM-graded technical assessments"));
}

#[test]
fn version_output() {
    windcheck()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("windcheck"));
}

#[test]
fn init_creates_files() {
    let dir = TempDir::new().unwrap();

    windcheck()
        .current_dir(dir.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Created windcheck.toml"))
        .stdout(predicate::str::contains("Created catalogs/wind-energy.toml"));

    assert!(dir.path().join("windcheck.toml").exists());
    assert!(dir.path().join("catalogs/wind-energy.toml").exists());
}

#[test]
fn init_skips_existing() {
    let dir = TempDir::new().unwrap();

    // First init
    windcheck()
        .current_dir(dir.path())
        .arg("init")
        .assert()
        .success();

    // Second init should skip
    windcheck()
        .current_dir(dir.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("already exists"));
}

#[test]
fn validate_generated_catalog() {
    let dir = TempDir::new().unwrap();

    windcheck()
        .current_dir(dir.path())
        .arg("init")
        .assert()
        .success();

    windcheck()
        .current_dir(dir.path())
        .arg("validate")
        .arg("--catalog")
        .arg("catalogs/wind-energy.toml")
        .assert()
        .success()
        .stdout(predicate::str::contains("2 questions"))
        .stdout(predicate::str::contains("All catalogs valid"));
}

#[test]
fn validate_warns_on_empty_pattern() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("bad.toml");
    std::fs::write(
        &path,
        r#"
[catalog]
id = "bad"
name = "Bad"

[[questions]]
id = "q1"
text = "Frage?"
pattern = ""
"#,
    )
    .unwrap();

    windcheck()
        .arg("validate")
        .arg("--catalog")
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("WARNING"))
        .stdout(predicate::str::contains("pattern is empty"));
}

#[test]
fn validate_nonexistent_file() {
    windcheck()
        .arg("validate")
        .arg("--catalog")
        .arg("nonexistent.toml")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error"));
}

#[test]
fn catalog_lists_builtin_questions() {
    windcheck()
        .arg("catalog")
        .assert()
        .success()
        .stdout(predicate::str::contains("IGBT"))
        .stdout(predicate::str::contains("Blasenspeicher"));
}

#[test]
fn run_without_scorer_key_fails_before_input() {
    let dir = TempDir::new().unwrap();

    windcheck()
        .current_dir(dir.path())
        .env("HOME", dir.path())
        .arg("run")
        .assert()
        .failure()
        .stderr(predicate::str::contains("no scorer API key"));
}

#[test]
fn run_without_service_account_fails_before_input() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("windcheck.toml"),
        r#"
[scorer]
api_key = "sk-test"
"#,
    )
    .unwrap();

    windcheck()
        .current_dir(dir.path())
        .env("HOME", dir.path())
        .arg("run")
        .assert()
        .failure()
        .stderr(predicate::str::contains("no service account key"));
}
