use std::path::Path;
use std::process::Command;

use tracing::debug;

use crate::error::{Error, Result};

/// Compute the diff to review, robustly across git versions and states.
///
/// With `staged` set, tries `git diff --cached`, then `git diff --staged`,
/// then falls back to the unstaged diff. Failed attempts are swallowed;
/// only exhausting every candidate is an error.
pub fn compute_diff(cwd: &Path, staged: bool) -> Result<String> {
    let candidates: &[&[&str]] = if staged {
        &[
            &["diff", "--cached"],
            &["diff", "--staged"],
            &["diff"],
        ]
    } else {
        &[&["diff"]]
    };

    for args in candidates {
        match try_git(cwd, args) {
            Ok(out) => return Ok(out),
            Err(e) => debug!("git {args:?} failed: {e}"),
        }
    }

    Err(Error::Diff(format!(
        "no git diff command succeeded in {}",
        cwd.display()
    )))
}

fn try_git(cwd: &Path, args: &[&str]) -> Result<String> {
    let output = Command::new("git")
        .args(args)
        .current_dir(cwd)
        .output()
        .map_err(|e| Error::Diff(format!("failed to run git: {e}")))?;

    if !output.status.success() {
        return Err(Error::Diff(format!(
            "git {args:?} exited with {}: {}",
            output.status,
            String::from_utf8_lossy(&output.stderr).trim()
        )));
    }

    String::from_utf8(output.stdout)
        .map_err(|e| Error::Diff(format!("git produced non-utf8 output: {e}")))
}
