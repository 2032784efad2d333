mod common;

use assert_cmd::Command;
use common::{sample_payload_json, setup_repo_with_staged_change};
use predicates::prelude::*;

#[allow(deprecated)]
fn cmd() -> Command {
    Command::cargo_bin("dualrev").unwrap()
}

// --- Help & version ---

#[test]
fn help_flag() {
    cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("reconcile"));
}

#[test]
fn version_flag() {
    cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("dualrev"));
}

#[test]
fn compare_help() {
    cmd()
        .args(["compare", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("saved reviewer outputs"));
}

// --- compare subcommand ---

#[test]
fn compare_two_identical_payload_files() {
    let dir = tempfile::TempDir::new().unwrap();
    let a = dir.path().join("a.json");
    let b = dir.path().join("b.json");
    std::fs::write(&a, sample_payload_json()).unwrap();
    std::fs::write(&b, sample_payload_json()).unwrap();

    cmd()
        .args(["compare", "--a"])
        .arg(&a)
        .arg("--b")
        .arg(&b)
        .assert()
        .success()
        .stdout(predicate::str::contains("# Dual Review Report"))
        .stdout(predicate::str::contains("**Score:**"))
        .stdout(predicate::str::contains("Matched: 1 of 1 unique issues"))
        .stdout(predicate::str::contains("- (none)"));
}

#[test]
fn compare_accepts_fenced_output() {
    let dir = tempfile::TempDir::new().unwrap();
    let a = dir.path().join("a.txt");
    let b = dir.path().join("b.json");
    std::fs::write(&a, format!("```json\n{}\n```", sample_payload_json())).unwrap();
    std::fs::write(&b, sample_payload_json()).unwrap();

    cmd()
        .args(["compare", "--a"])
        .arg(&a)
        .arg("--b")
        .arg(&b)
        .assert()
        .success()
        .stdout(predicate::str::contains("Matched: 1 of 1 unique issues"));
}

#[test]
fn compare_rejects_prose_output() {
    let dir = tempfile::TempDir::new().unwrap();
    let a = dir.path().join("a.txt");
    let b = dir.path().join("b.json");
    std::fs::write(&a, "I reviewed the diff and it looks fine.").unwrap();
    std::fs::write(&b, sample_payload_json()).unwrap();

    cmd()
        .args(["compare", "--a"])
        .arg(&a)
        .arg("--b")
        .arg(&b)
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("extraction error"));
}

#[test]
fn compare_missing_file_errors() {
    cmd()
        .args(["compare", "--a", "/nonexistent/a.json", "--b", "/nonexistent/b.json"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("error:"));
}

// --- diff subcommand ---

#[test]
fn diff_prints_staged_diff() {
    let repo = setup_repo_with_staged_change();
    cmd()
        .arg("diff")
        .arg("--cwd")
        .arg(repo.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("hello world"));
}

#[test]
fn diff_unstaged_flag() {
    let repo = setup_repo_with_staged_change();
    cmd()
        .args(["diff", "--unstaged"])
        .arg("--cwd")
        .arg(repo.path())
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
}

// --- config ---

#[test]
fn explicit_missing_config_errors() {
    cmd()
        .args(["diff", "--config", "/nonexistent/dualrev.toml"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("config file not found"));
}
