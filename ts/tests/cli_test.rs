//! Tests for the `ts` binary

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const KEY: &str = "my-local-explorer-itineraries";

fn ts(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("ts").unwrap();
    cmd.arg("--dir").arg(dir.path());
    cmd
}

#[test]
fn test_keys_on_empty_store() {
    let dir = TempDir::new().unwrap();
    ts(&dir)
        .arg("keys")
        .assert()
        .success()
        .stdout(predicate::str::contains("No keys found"));
}

#[test]
fn test_ids_and_delete() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join(format!("{}.json", KEY)),
        r#"[{"id":"1","location":"Kyoto"},{"id":"2","location":"Lisbon"}]"#,
    )
    .unwrap();

    ts(&dir)
        .args(["ids", KEY])
        .assert()
        .success()
        .stdout(predicate::str::contains("Kyoto").and(predicate::str::contains("Lisbon")));

    ts(&dir).args(["delete", KEY, "1"]).assert().success();

    ts(&dir)
        .args(["dump", KEY])
        .assert()
        .success()
        .stdout(predicate::str::contains("Lisbon").and(predicate::str::contains("Kyoto").not()));
}

#[test]
fn test_dump_absent_key_prints_empty_array() {
    let dir = TempDir::new().unwrap();
    ts(&dir)
        .args(["dump", KEY])
        .assert()
        .success()
        .stdout(predicate::str::contains("[]"));
}

#[test]
fn test_dump_corrupt_collection_warns_and_prints_empty_array() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join(format!("{}.json", KEY)), "garbage").unwrap();

    ts(&dir)
        .env_remove("RUST_LOG")
        .args(["dump", KEY])
        .assert()
        .success()
        .stdout(predicate::str::contains("[]"))
        .stderr(predicate::str::contains("Error parsing saved records"));
}
