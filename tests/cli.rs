//! Command-surface integration tests
//!
//! Run the skald binary against a throwaway HOME so no real credential is
//! picked up.

use assert_cmd::Command;
use predicates::prelude::*;

fn skald(home: &std::path::Path) -> Command {
    let mut cmd = Command::cargo_bin("skald").unwrap();
    cmd.env("HOME", home);
    cmd
}

#[test]
fn help_lists_subcommands() {
    let tmp = tempfile::tempdir().unwrap();

    skald(tmp.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("auth"))
        .stdout(predicate::str::contains("chat"))
        .stdout(predicate::str::contains("memo"))
        .stdout(predicate::str::contains("docs"));
}

#[test]
fn chat_ask_requires_auth() {
    let tmp = tempfile::tempdir().unwrap();

    skald(tmp.path())
        .args(["chat", "ask", "what is skald?"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("skald auth"))
        .stderr(predicate::str::contains("skald chat ask"));
}

#[test]
fn docs_generate_requires_auth() {
    let tmp = tempfile::tempdir().unwrap();

    skald(tmp.path())
        .args(["docs", "generate"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("skald docs generate"));
}

#[test]
fn memo_add_requires_auth() {
    let tmp = tempfile::tempdir().unwrap();

    skald(tmp.path())
        .args(["memo", "add", "--title", "t", "--file-path", "missing.md"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("skald memo add"));
}

#[test]
fn docs_init_writes_starter_outline() {
    let tmp = tempfile::tempdir().unwrap();
    let project = tmp.path().join("project");
    std::fs::create_dir_all(&project).unwrap();

    skald(tmp.path())
        .args(["docs", "init", "--config-path"])
        .arg(&project)
        .assert()
        .success()
        .stdout(predicate::str::contains("Created example outline.yml"));

    let outline = project.join(".skald").join("outline.yml");
    assert!(outline.exists());
}

#[test]
fn docs_init_is_idempotent() {
    let tmp = tempfile::tempdir().unwrap();
    let project = tmp.path().join("project");
    let outline = project.join(".skald").join("outline.yml");
    std::fs::create_dir_all(outline.parent().unwrap()).unwrap();
    std::fs::write(&outline, "mine: {}\n").unwrap();

    skald(tmp.path())
        .args(["docs", "init", "--config-path"])
        .arg(&project)
        .assert()
        .success()
        .stdout(predicate::str::contains("already exists"));

    assert_eq!(std::fs::read_to_string(&outline).unwrap(), "mine: {}\n");
}

#[test]
fn memo_add_missing_file_with_auth() {
    let tmp = tempfile::tempdir().unwrap();
    let skald_dir = tmp.path().join(".skald");
    std::fs::create_dir_all(&skald_dir).unwrap();
    std::fs::write(
        skald_dir.join("config"),
        r#"{"apiKey":"sk-test","updatedAt":"2026-01-01T00:00:00Z"}"#,
    )
    .unwrap();

    skald(tmp.path())
        .args(["memo", "add", "--title", "t", "--file-path", "does-not-exist.md"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("File not found"));
}
