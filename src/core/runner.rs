//! Launchers for the external test runner, dev server, and style checker.
//!
//! The test runner and server are fire-and-forget: spawn, report the PID,
//! and exit. Lint is the one launcher that awaits its children, because
//! only failing files are worth reporting.

use std::env;
use std::path::PathBuf;

use serde::Serialize;

use crate::config::{
    BuildContext, BROWSER_MANIFEST_ENV, DEFAULT_BROWSER_MANIFEST, DEFAULT_TEST_MANIFEST,
    TEST_MANIFEST_ENV,
};
use crate::error::{Error, Result};
use crate::utils::command::{self, CheckOutcome};

const PYTHON: &str = "python3";
const STYLE_CHECKER: &str = "gjslint";

/// Globs style-checked per invocation, relative to the project root.
const LINT_GLOBS: &[&str] = &[
    "src/*.js",
    "web/*.js",
    "test/*.js",
    "test/unit/*.js",
    "extensions/firefox/*.js",
    "extensions/firefox/components/*.js",
    "extensions/chrome/*.js",
];

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LaunchReport {
    pub command: String,
    pub pid: u32,
    pub cwd: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LintReport {
    pub checked: usize,
    pub failed: usize,
    pub failures: Vec<CheckOutcome>,
}

/// Manifest filename for the browser test run, overridable via env.
pub fn test_manifest() -> String {
    env::var(TEST_MANIFEST_ENV).unwrap_or_else(|_| DEFAULT_TEST_MANIFEST.to_string())
}

/// Browser manifest path relative to `test/`, overridable via env.
pub fn browser_manifest() -> String {
    env::var(BROWSER_MANIFEST_ENV).unwrap_or_else(|_| DEFAULT_BROWSER_MANIFEST.to_string())
}

/// Launch the reference-test runner against the configured browser set.
///
/// The browser manifest is validated before anything is spawned; a missing
/// manifest is a hard error, not a silent skip.
pub fn browser_tests(ctx: &BuildContext) -> Result<LaunchReport> {
    command::require_tool(PYTHON)?;

    let browsers = browser_manifest();
    let manifest = test_manifest();

    let browsers_path = ctx.test_dir().join(&browsers);
    if !browsers_path.is_file() {
        return Err(Error::input_file_missing(
            browsers_path.to_string_lossy(),
            Some("browsertest".to_string()),
        )
        .with_hint("Copy one of the examples in test/resources/browser_manifests/")
        .with_hint(format!(
            "Or point {} at an existing manifest",
            BROWSER_MANIFEST_ENV
        )));
    }

    let browser_arg = format!("--browserManifestFile={}", browsers);
    let manifest_arg = format!("--manifestFile={}", manifest);
    let args = [
        "test.py",
        "--reftest",
        browser_arg.as_str(),
        manifest_arg.as_str(),
    ];

    let test_dir = ctx.test_dir();
    let pid = command::spawn_detached(PYTHON, &args, Some(&test_dir))?;
    log_status!("browsertest", "Test runner started (pid {})", pid);

    Ok(LaunchReport {
        command: format!("{} {}", PYTHON, args.join(" ")),
        pid,
        cwd: test_dir.to_string_lossy().to_string(),
    })
}

/// Kick off the unit-test subsystem's own build tool.
pub fn unit_tests(ctx: &BuildContext) -> Result<LaunchReport> {
    command::require_tool("make")?;

    let unit_dir = ctx.test_dir().join("unit");
    if !unit_dir.is_dir() {
        return Err(Error::input_file_missing(
            unit_dir.to_string_lossy(),
            Some("unittest".to_string()),
        ));
    }

    let pid = command::spawn_detached("make", &[], Some(&unit_dir))?;
    log_status!("unittest", "Unit test build started (pid {})", pid);

    Ok(LaunchReport {
        command: "make".to_string(),
        pid,
        cwd: unit_dir.to_string_lossy().to_string(),
    })
}

/// Start the local development server on the fixed port.
pub fn dev_server(ctx: &BuildContext) -> Result<LaunchReport> {
    command::require_tool(PYTHON)?;

    let args = ["-u", "test.py", "--port=8888"];
    let test_dir = ctx.test_dir();
    let pid = command::spawn_detached(PYTHON, &args, Some(&test_dir))?;
    log_status!("server", "Local server started on :8888 (pid {})", pid);

    Ok(LaunchReport {
        command: format!("{} {}", PYTHON, args.join(" ")),
        pid,
        cwd: test_dir.to_string_lossy().to_string(),
    })
}

/// Files covered by the lint target, in glob order.
pub fn collect_lint_files(ctx: &BuildContext) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for pattern in LINT_GLOBS {
        let full = ctx.root.join(pattern);
        let entries = glob::glob(&full.to_string_lossy()).map_err(|e| {
            Error::validation_invalid_argument(
                "pattern",
                format!("Invalid lint glob '{}': {}", pattern, e),
            )
        })?;
        for entry in entries {
            let path = entry
                .map_err(|e| Error::internal_io(e.to_string(), Some("lint glob".to_string())))?;
            if path.is_file() {
                files.push(path);
            }
        }
    }
    Ok(files)
}

/// Style-check every matched file, one checker process per file, all
/// running concurrently. Passing files stay silent; each failing file's
/// captured output is carried in the report (and echoed to stderr when
/// interactive).
pub fn lint(ctx: &BuildContext) -> Result<LintReport> {
    command::require_tool(STYLE_CHECKER)?;

    let files = collect_lint_files(ctx)?;
    let mut pending = Vec::with_capacity(files.len());
    for file in &files {
        let file_str = file.to_string_lossy().to_string();
        pending.push(command::spawn_capture(
            STYLE_CHECKER,
            &["--nojsdoc", file_str.as_str()],
            None,
            file_str.clone(),
        )?);
    }

    let checked = pending.len();
    let mut failures = Vec::new();
    for check in pending {
        let outcome = check.wait()?;
        if !outcome.success {
            log_status!("lint", "{} failed:\n{}", outcome.label, outcome.output);
            failures.push(outcome);
        }
    }

    Ok(LintReport {
        checked,
        failed: failures.len(),
        failures,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::fs;
    use tempfile::tempdir;

    #[test]
    fn missing_browser_manifest_is_fatal_before_spawn() {
        let dir = tempdir().unwrap();
        let ctx = BuildContext::new(PathBuf::from(dir.path()));
        fs::ensure_dir(&ctx.test_dir()).unwrap();

        let err = browser_tests(&ctx).unwrap_err();
        // Either python3 itself is absent or the manifest check fired; both
        // are preflight failures and nothing was spawned.
        assert!(matches!(
            err.code,
            crate::error::ErrorCode::InputFileMissing | crate::error::ErrorCode::ToolMissing
        ));
        if err.code == crate::error::ErrorCode::InputFileMissing {
            assert!(!err.hints.is_empty());
        }
    }

    #[test]
    fn lint_glob_set_matches_fixture_tree() {
        let dir = tempdir().unwrap();
        let ctx = BuildContext::new(PathBuf::from(dir.path()));
        for rel in [
            "src/core.js",
            "web/viewer.js",
            "test/driver.js",
            "test/unit/util_spec.js",
            "extensions/firefox/bootstrap.js",
            "extensions/firefox/components/protocol.js",
            "extensions/chrome/background.js",
        ] {
            let path = ctx.root.join(rel);
            fs::ensure_dir(path.parent().unwrap()).unwrap();
            std::fs::write(&path, "// js\n").unwrap();
        }
        // Files outside the glob set are not linted.
        std::fs::write(ctx.root.join("src/notes.txt"), "text").unwrap();

        let files = collect_lint_files(&ctx).unwrap();
        assert_eq!(files.len(), 7);
        assert!(files.iter().all(|f| f.extension().unwrap() == "js"));
    }
}
