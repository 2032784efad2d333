#![allow(dead_code)]

use std::path::Path;
use std::process::Command;

pub fn run_git(dir: &Path, args: &[&str]) {
    let output = Command::new("git")
        .args(args)
        .current_dir(dir)
        .output()
        .unwrap();
    assert!(
        output.status.success(),
        "git {:?} in {} failed: {}",
        args,
        dir.display(),
        String::from_utf8_lossy(&output.stderr)
    );
}

/// Create a repo with an initial commit and a staged change to `a.txt`.
pub fn setup_repo_with_staged_change() -> tempfile::TempDir {
    let repo = tempfile::TempDir::new().unwrap();
    run_git(repo.path(), &["init"]);
    run_git(repo.path(), &["config", "user.email", "test@test.com"]);
    run_git(repo.path(), &["config", "user.name", "Test"]);
    std::fs::write(repo.path().join("a.txt"), "hello\n").unwrap();
    run_git(repo.path(), &["add", "a.txt"]);
    run_git(repo.path(), &["commit", "-m", "init"]);
    std::fs::write(repo.path().join("a.txt"), "hello world\n").unwrap();
    run_git(repo.path(), &["add", "a.txt"]);
    repo
}

/// A minimal conforming payload with one high-severity security issue.
pub fn sample_payload_json() -> &'static str {
    r#"{"issues":[{"category":"security","severity":"high","file":"api/user.controller.ts","line":42,"message":"Potential SQL injection","fix":"Use parameterized queries"}],"summary":{"counts":{"low":0,"med":0,"high":1}}}"#
}
