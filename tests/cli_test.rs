/// CLI binary integration tests using assert_cmd
///
/// These tests invoke the actual binary against a temporary storage root
mod common;

use std::path::Path;
use std::process::Command;

use assert_cmd::prelude::*;
use common::ScribeDirBuilder;
use predicates::prelude::*;

fn scribe(root: &Path) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_scribe"));
    cmd.env("SCRIBE_DIR", root).env_remove("SCRIBE_LOG");
    cmd
}

fn record(root: &Path, timestamp: i64, command: &str) {
    scribe(root)
        .args(["record", "--timestamp", &timestamp.to_string(), "--", command])
        .assert()
        .success()
        .stderr(predicate::str::is_empty());
}

#[test]
fn test_cli_init_creates_layout_and_prints_script() {
    let temp = tempfile::TempDir::new().unwrap();
    let root = temp.path().join(".scribe");

    scribe(&root)
        .args(["init", "--shell", "zsh"])
        .assert()
        .success()
        .stdout(predicate::str::contains("add-zsh-hook preexec"))
        .stdout(predicate::str::contains("scribe record"));

    assert!(root.join("data").join("index.db").is_file());
    assert!(root.join("data").join("debug.log").is_file());
    let latest = std::fs::read_to_string(root.join("history").join("LATEST")).unwrap();
    assert_eq!(latest, "version=1,encoding=base64\n---\n");
}

#[test]
fn test_cli_init_is_repeatable() {
    let temp = tempfile::TempDir::new().unwrap();
    let root = temp.path().join(".scribe");

    scribe(&root).args(["init", "--shell", "bash"]).assert().success();
    record(&root, 1000, "ls -la");
    scribe(&root).args(["init", "--shell", "fish"]).assert().success();

    scribe(&root)
        .args(["search", "ls"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1  ls -la"));
}

#[test]
fn test_cli_record_then_search() {
    let temp = tempfile::TempDir::new().unwrap();
    let root = temp.path().join(".scribe");
    scribe(&root).args(["init", "--shell", "zsh"]).assert().success();

    record(&root, 1000, "ls -la");
    record(&root, 1010, "git status");
    record(&root, 1020, "git commit -m fix");

    scribe(&root)
        .args(["search", "git"])
        .assert()
        .success()
        .stdout("   2  git status\n   3  git commit -m fix\n");
}

#[test]
fn test_cli_search_multiword_query() {
    let temp = tempfile::TempDir::new().unwrap();
    let root = temp.path().join(".scribe");
    scribe(&root).args(["init", "--shell", "zsh"]).assert().success();

    record(&root, 1000, "git commit -m fix");
    record(&root, 1010, "git commit --amend");

    scribe(&root)
        .args(["search", "commit", "-m"])
        .assert()
        .success()
        .stdout("   1  git commit -m fix\n");
}

#[test]
fn test_cli_record_skips_own_invocations() {
    let temp = tempfile::TempDir::new().unwrap();
    let root = temp.path().join(".scribe");
    scribe(&root).args(["init", "--shell", "zsh"]).assert().success();

    record(&root, 1000, "scribe search foo");
    record(&root, 1001, "scribe");

    scribe(&root).args(["search", ""]).assert().success().stdout(predicate::str::is_empty());
}

#[test]
fn test_cli_record_keeps_leading_space() {
    let temp = tempfile::TempDir::new().unwrap();
    let root = temp.path().join(".scribe");
    scribe(&root).args(["init", "--shell", "zsh"]).assert().success();

    record(&root, 1000, " ls -la");

    scribe(&root).args(["search", "ls"]).assert().success().stdout("   1   ls -la\n");
}

#[test]
fn test_cli_record_without_index_area_still_logs() {
    let temp = tempfile::TempDir::new().unwrap();
    let root = temp.path().join(".scribe");
    scribe(&root).args(["init", "--shell", "zsh"]).assert().success();
    std::fs::remove_dir_all(root.join("data")).unwrap();

    scribe(&root)
        .args(["record", "--timestamp", "1000", "--", "ls -la"])
        .assert()
        .success()
        .stderr(predicate::str::contains("reset-index"));

    let latest = std::fs::read_to_string(root.join("history").join("LATEST")).unwrap();
    assert_eq!(latest, "version=1,encoding=base64\n---\n1000:bHMgLWxh\n");

    std::fs::create_dir(root.join("data")).unwrap();
    scribe(&root).arg("reset-index").assert().success();
    scribe(&root).args(["search", "ls"]).assert().success().stdout("   1  ls -la\n");
}

#[test]
fn test_cli_reset_index_rebuilds_from_log() {
    let dir = ScribeDirBuilder::new()
        .with_segment("log.1", "1590000000:echo old\n")
        .with_latest(&common::scenario_entries())
        .with_index()
        .build();

    scribe(dir.root())
        .arg("reset-index")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Rebuilt index: 4 entries from 2 segments (0 stale rows removed)",
        ));

    scribe(dir.root())
        .args(["search", "echo"])
        .assert()
        .success()
        .stdout("   1  echo old\n");
}

#[test]
fn test_cli_reset_index_reports_skipped_segment() {
    let dir = ScribeDirBuilder::new()
        .with_segment("log.1", "orphan line\n")
        .with_latest(&common::scenario_entries())
        .with_index()
        .build();

    scribe(dir.root())
        .arg("reset-index")
        .assert()
        .success()
        .stdout(predicate::str::contains("Rebuilt index: 3 entries from 1 segments"))
        .stderr(predicate::str::contains("Warning: skipped"))
        .stderr(predicate::str::contains("log.1"));
}

#[test]
fn test_cli_migrate_history() {
    let dir = ScribeDirBuilder::new()
        .with_segment("log.1", "1590000000:echo one\n")
        .with_segment("log.2", "1590000001:echo two\n")
        .build();

    scribe(dir.root())
        .arg("migrate-history")
        .assert()
        .success()
        .stdout(predicate::str::contains("Migrated history: 2 of 2 segments upgraded"));

    scribe(dir.root())
        .arg("migrate-history")
        .assert()
        .success()
        .stdout(predicate::str::contains("Migrated history: 0 of 2 segments upgraded"));
}

#[test]
fn test_cli_root_flag_overrides_environment() {
    let temp = tempfile::TempDir::new().unwrap();
    let root = temp.path().join("custom");
    let unused = temp.path().join("unused");

    scribe(&unused)
        .args(["init", "--shell", "zsh", "--root"])
        .arg(&root)
        .assert()
        .success();

    assert!(root.join("history").join("LATEST").is_file());
    assert!(!unused.exists());
}

#[test]
fn test_cli_errors_keep_exit_status_zero() {
    let temp = tempfile::TempDir::new().unwrap();
    let root = temp.path().join("never-initialized");

    scribe(&root)
        .args(["search", "git"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::starts_with("Error:"));
}

#[test]
fn test_cli_no_command_shows_help_message() {
    let temp = tempfile::TempDir::new().unwrap();
    scribe(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Use --help for usage information"));
}

#[test]
fn test_cli_help_flag() {
    let temp = tempfile::TempDir::new().unwrap();
    scribe(temp.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Record shell history and search it incrementally"))
        .stdout(predicate::str::contains("reset-index"))
        .stdout(predicate::str::contains("migrate-history"));
}

#[test]
fn test_cli_version_flag() {
    let temp = tempfile::TempDir::new().unwrap();
    scribe(temp.path())
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("0.1.0"));
}

#[test]
fn test_cli_invalid_command() {
    let temp = tempfile::TempDir::new().unwrap();
    scribe(temp.path())
        .arg("invalid-command")
        .assert()
        .failure()
        .stderr(predicate::str::contains("unrecognized subcommand"));
}
