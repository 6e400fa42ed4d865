//! Git primitives, shelling out to the `git` CLI.

use std::path::Path;
use std::process::Command;

use crate::error::{Error, Result};

/// Short identifier of the most recent commit in `repo`.
pub fn short_head_revision(repo: &Path) -> Result<String> {
    let output = Command::new("git")
        .args(["log", "--format=%h", "-n", "1"])
        .current_dir(repo)
        .output()
        .map_err(|e| Error::git_command_failed(format!("Failed to run git log: {}", e)))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(Error::git_command_failed(format!(
            "git log failed: {}",
            stderr.trim()
        )));
    }

    let revision = String::from_utf8_lossy(&output.stdout).trim().to_string();
    if revision.is_empty() {
        return Err(Error::git_command_failed(
            "git log returned no revision (empty repository?)".to_string(),
        ));
    }

    Ok(revision)
}

/// Number of commits after `base`, up to and including HEAD.
///
/// `git rev-list --count` reports exactly the commit count, so base == HEAD
/// is 0 rather than a parsing accident.
pub fn commits_since(repo: &Path, base: &str) -> Result<u32> {
    let range = format!("{}..HEAD", base);
    let output = Command::new("git")
        .args(["rev-list", "--count", &range])
        .current_dir(repo)
        .output()
        .map_err(|e| Error::git_command_failed(format!("Failed to run git rev-list: {}", e)))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(Error::git_command_failed(format!(
            "git rev-list failed for {}: {}",
            range,
            stderr.trim()
        )));
    }

    parse_commit_count(&String::from_utf8_lossy(&output.stdout))
}

/// Shallow single-branch clone of `branch` into `target`.
pub fn clone_branch_shallow(url: &str, branch: &str, target: &Path) -> Result<()> {
    let output = Command::new("git")
        .args([
            "clone",
            "-b",
            branch,
            "--depth",
            "1",
            url,
            &target.to_string_lossy(),
        ])
        .output()
        .map_err(|e| Error::git_command_failed(format!("Failed to run git clone: {}", e)))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(Error::git_command_failed(format!(
            "git clone of branch '{}' failed: {}",
            branch,
            stderr.trim()
        )));
    }

    Ok(())
}

/// Parse `git rev-list --count` output into a commit count.
pub(crate) fn parse_commit_count(raw: &str) -> Result<u32> {
    raw.trim().parse::<u32>().map_err(|_| {
        Error::git_command_failed(format!(
            "Unexpected git rev-list output: {:?}",
            raw.trim()
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_commit_count_handles_zero() {
        assert_eq!(parse_commit_count("0\n").unwrap(), 0);
    }

    #[test]
    fn parse_commit_count_handles_plain_number() {
        assert_eq!(parse_commit_count("417").unwrap(), 417);
        assert_eq!(parse_commit_count("  42  \n").unwrap(), 42);
    }

    #[test]
    fn parse_commit_count_rejects_garbage() {
        assert!(parse_commit_count("").is_err());
        assert!(parse_commit_count("fatal: bad revision").is_err());
    }
}
