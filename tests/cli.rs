use assert_cmd::Command;
use predicates::prelude::*;
use std::path::Path;

fn herokron(home: &Path) -> Command {
    let mut cmd = Command::cargo_bin("herokron").unwrap();
    cmd.env("HEROKRON_HOME", home)
        .env("HEROKRON_API_URL", "http://127.0.0.1:9")
        .env("NO_COLOR", "1");
    cmd
}

#[test]
fn no_arguments_prints_help() {
    let temp_dir = tempfile::tempdir().unwrap();

    herokron(temp_dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage"))
        .stdout(predicate::str::contains("--on"));
}

#[test]
fn database_is_created_with_defaults() {
    let temp_dir = tempfile::tempdir().unwrap();

    herokron(temp_dir.path())
        .arg("--database")
        .assert()
        .success()
        .stdout(predicate::str::contains("Database: "))
        .stdout(predicate::str::contains("database.json"))
        .stdout(predicate::str::contains("[*] color:\t7762880"));

    assert!(temp_dir.path().join("database.json").exists());
}

#[test]
fn set_color_persists() {
    let temp_dir = tempfile::tempdir().unwrap();

    herokron(temp_dir.path())
        .args(["-color", "#000001"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Embed color set to #000001."));

    herokron(temp_dir.path())
        .arg("--database")
        .assert()
        .success()
        .stdout(predicate::str::contains("[*] color:\t1"));
}

#[test]
fn invalid_color_fails() {
    let temp_dir = tempfile::tempdir().unwrap();

    herokron(temp_dir.path())
        .args(["--set-color", "not-a-color"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Error:"));
}

#[test]
fn no_print_silences_stdout() {
    let temp_dir = tempfile::tempdir().unwrap();

    herokron(temp_dir.path())
        .args(["--set-color", "5", "--no-print"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
}

#[test]
fn webhook_is_validated_and_stored() {
    let temp_dir = tempfile::tempdir().unwrap();

    herokron(temp_dir.path())
        .args(["--set-webhook", "https://example.com/not-a-webhook"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Discord webhook format"));

    herokron(temp_dir.path())
        .args(["-webhook", "https://discord.com/api/webhooks/123/abc-DEF"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Discord webhook set."))
        .stdout(predicate::str::contains("[*] id:\t123"));

    herokron(temp_dir.path())
        .arg("--clear-webhook")
        .assert()
        .success()
        .stdout(predicate::str::contains("[*] id:").not());
}

#[test]
fn removing_unknown_key_is_a_no_op() {
    let temp_dir = tempfile::tempdir().unwrap();

    herokron(temp_dir.path())
        .args(["--remove-key", "secret-token-1234"])
        .assert()
        .success()
        .stdout(predicate::str::contains("****1234 is not in the database"))
        .stdout(predicate::str::contains("secret-token").not());
}

#[test]
fn unknown_app_fails_with_empty_database() {
    let temp_dir = tempfile::tempdir().unwrap();

    herokron(temp_dir.path())
        .args(["--status", "missing-app"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains(
            "App couldn't be found in the local database: missing-app",
        ));
}

#[test]
fn sync_with_no_keys() {
    let temp_dir = tempfile::tempdir().unwrap();

    herokron(temp_dir.path())
        .arg("--sync")
        .assert()
        .success()
        .stdout(predicate::str::contains("No API keys in the database."));
}

#[test]
fn apps_and_keys_are_empty_on_fresh_database() {
    let temp_dir = tempfile::tempdir().unwrap();

    herokron(temp_dir.path())
        .arg("-apps")
        .assert()
        .success();

    herokron(temp_dir.path())
        .arg("--keys")
        .assert()
        .success();
}

#[test]
fn on_and_off_together_is_a_usage_error() {
    let temp_dir = tempfile::tempdir().unwrap();

    herokron(temp_dir.path())
        .args(["-on", "a", "--off", "b"])
        .assert()
        .code(2);
}

#[test]
fn corrupt_database_is_reset() {
    let temp_dir = tempfile::tempdir().unwrap();
    std::fs::write(temp_dir.path().join("database.json"), "{not json").unwrap();

    herokron(temp_dir.path())
        .arg("--database")
        .assert()
        .success()
        .stdout(predicate::str::contains("[*] keys:"));
}

#[test]
fn failed_sync_still_runs_the_requested_query() {
    let temp_dir = tempfile::tempdir().unwrap();
    std::fs::write(
        temp_dir.path().join("database.json"),
        r#"{"keys": [{"unreachable-key": ["svc-a"]}], "color": 1, "webhook": {}}"#,
    )
    .unwrap();

    herokron(temp_dir.path())
        .args(["--sync", "--database"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("Failed to sync ****-key"))
        .stdout(predicate::str::contains("[*] svc-a"))
        .stderr(predicate::str::contains("1 API key(s) failed to sync"));
}
