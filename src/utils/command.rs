//! Command execution primitives with consistent error handling.

use std::path::{Path, PathBuf};
use std::process::{Child, Command, Output, Stdio};

use serde::Serialize;

use crate::error::{Error, Result};

/// Resolve a required external tool on PATH.
///
/// Called before any destructive filesystem step so a missing tool aborts
/// the run with nothing mutated.
pub fn require_tool(tool: &str) -> Result<PathBuf> {
    which::which(tool).map_err(|_| Error::tool_missing(tool))
}

/// Run a command and return stdout on success.
///
/// Returns trimmed stdout if the command succeeds.
/// Returns an error with stderr (or stdout fallback) if it fails.
pub fn run(program: &str, args: &[&str], dir: Option<&Path>, context: &str) -> Result<String> {
    let mut cmd = Command::new(program);
    cmd.args(args);
    if let Some(dir) = dir {
        cmd.current_dir(dir);
    }

    let output = cmd.output().map_err(|e| {
        Error::internal_io(
            format!("Failed to run {}: {}", context, e),
            Some(context.to_string()),
        )
    })?;

    if !output.status.success() {
        return Err(Error::internal_io(
            format!("{} failed: {}", context, error_text(&output)),
            Some(context.to_string()),
        ));
    }

    Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
}

/// Extract error text from command output.
///
/// Prefers stderr, falls back to stdout if stderr is empty.
pub fn error_text(output: &Output) -> String {
    let stderr = String::from_utf8_lossy(&output.stderr);
    if !stderr.trim().is_empty() {
        stderr.trim().to_string()
    } else {
        String::from_utf8_lossy(&output.stdout).trim().to_string()
    }
}

/// Spawn a process detached, inheriting stdio, and return its PID.
///
/// The child is never waited on; it either runs to completion or keeps
/// running after this process exits.
pub fn spawn_detached(program: &str, args: &[&str], dir: Option<&Path>) -> Result<u32> {
    let mut cmd = Command::new(program);
    cmd.args(args);
    if let Some(dir) = dir {
        cmd.current_dir(dir);
    }

    let child = cmd.spawn().map_err(|e| {
        Error::internal_io(
            format!("Failed to spawn {}: {}", program, e),
            Some(program.to_string()),
        )
    })?;

    Ok(child.id())
}

/// A spawned check whose output is being captured while it runs.
///
/// Spawn many, then `wait` each: checks run concurrently and callers get a
/// uniform exit-status-plus-output result per check.
pub struct PendingCheck {
    pub label: String,
    child: Child,
}

/// Result of one awaited check.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckOutcome {
    pub label: String,
    pub exit_code: i32,
    pub success: bool,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub output: String,
}

/// Spawn a process with captured stdout/stderr for a later `wait`.
pub fn spawn_capture(
    program: &str,
    args: &[&str],
    dir: Option<&Path>,
    label: impl Into<String>,
) -> Result<PendingCheck> {
    let mut cmd = Command::new(program);
    cmd.args(args).stdout(Stdio::piped()).stderr(Stdio::piped());
    if let Some(dir) = dir {
        cmd.current_dir(dir);
    }

    let child = cmd.spawn().map_err(|e| {
        Error::internal_io(
            format!("Failed to spawn {}: {}", program, e),
            Some(program.to_string()),
        )
    })?;

    Ok(PendingCheck {
        label: label.into(),
        child,
    })
}

impl PendingCheck {
    pub fn wait(self) -> Result<CheckOutcome> {
        let label = self.label;
        let output = self.child.wait_with_output().map_err(|e| {
            Error::internal_io(
                format!("Failed to collect output for {}: {}", label, e),
                Some(label.clone()),
            )
        })?;

        let mut text = String::from_utf8_lossy(&output.stdout).trim().to_string();
        let stderr = String::from_utf8_lossy(&output.stderr);
        if !stderr.trim().is_empty() {
            if !text.is_empty() {
                text.push('\n');
            }
            text.push_str(stderr.trim());
        }

        Ok(CheckOutcome {
            label,
            exit_code: output.status.code().unwrap_or(-1),
            success: output.status.success(),
            output: text,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn run_succeeds_with_valid_command() {
        let result = run("echo", &["hello"], None, "echo test");
        assert!(result.is_ok());
        assert_eq!(result.unwrap(), "hello");
    }

    #[test]
    fn run_fails_with_invalid_command() {
        let result = run("nonexistent_command_xyz", &[], None, "test");
        assert!(result.is_err());
    }

    #[test]
    fn require_tool_finds_shell() {
        assert!(require_tool("sh").is_ok());
    }

    #[test]
    fn require_tool_reports_missing_tool() {
        let err = require_tool("nonexistent_tool_xyz").unwrap_err();
        assert_eq!(err.code, crate::error::ErrorCode::ToolMissing);
    }

    #[test]
    fn spawn_capture_reports_failure_with_output() {
        let check = spawn_capture("sh", &["-c", "echo broken >&2; exit 3"], None, "sh").unwrap();
        let outcome = check.wait().unwrap();
        assert!(!outcome.success);
        assert_eq!(outcome.exit_code, 3);
        assert!(outcome.output.contains("broken"));
    }

    #[test]
    fn spawn_capture_success_keeps_stdout() {
        let check = spawn_capture("echo", &["fine"], None, "echo").unwrap();
        let outcome = check.wait().unwrap();
        assert!(outcome.success);
        assert_eq!(outcome.output, "fine");
    }
}
