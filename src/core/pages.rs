//! Publishing checkout for the website branch.

use serde::Serialize;

use crate::config::{BuildContext, PAGES_BRANCH};
use crate::error::{Error, Result};
use crate::git;
use crate::utils::{command, fs};

/// Subdirectories downstream publishing steps expect to exist.
const PAGES_SKELETON: &[&str] = &["web", "web/images", "build", "extensions/firefox"];

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PagesReport {
    pub path: String,
    pub cloned: bool,
}

/// Ensure a local checkout of the pages branch exists under the build
/// directory, emptied and ready to be repopulated by the caller.
///
/// A fresh clone has its tracked contents deleted; publishing later re-adds
/// everything, so deletions and moves are tracked too. An existing checkout
/// is reused as-is, without pulling.
pub fn ensure_pages_checkout(ctx: &BuildContext) -> Result<PagesReport> {
    command::require_tool("git")?;
    fs::ensure_dir(&ctx.build_dir())?;

    let pages_dir = ctx.pages_dir();
    let cloned = if !pages_dir.exists() {
        let url = ctx.pages_repo_url();
        log_status!(
            "pages",
            "Cloning {} ({}) into {}, this can take a while",
            url,
            PAGES_BRANCH,
            pages_dir.display()
        );
        git::clone_branch_shallow(&url, PAGES_BRANCH, &pages_dir)?;
        clear_tracked_contents(ctx)?;
        true
    } else {
        false
    };

    for sub in PAGES_SKELETON {
        fs::ensure_dir(&pages_dir.join(sub))?;
    }

    Ok(PagesReport {
        path: pages_dir.to_string_lossy().to_string(),
        cloned,
    })
}

/// Delete everything in the checkout except the repository metadata.
fn clear_tracked_contents(ctx: &BuildContext) -> Result<()> {
    let pages_dir = ctx.pages_dir();
    let entries = std::fs::read_dir(&pages_dir)
        .map_err(|e| Error::internal_io(e.to_string(), Some("list pages checkout".to_string())))?;

    for entry in entries {
        let entry = entry
            .map_err(|e| Error::internal_io(e.to_string(), Some("list pages checkout".to_string())))?;
        if entry.file_name() == ".git" {
            continue;
        }
        let path = entry.path();
        if path.is_dir() {
            fs::remove_tree(&path)?;
        } else {
            fs::remove_file(&path, "clear pages checkout")?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use tempfile::tempdir;

    #[test]
    fn existing_checkout_is_reused_and_skeleton_created() {
        let dir = tempdir().unwrap();
        let ctx = BuildContext::new(PathBuf::from(dir.path()));
        // Simulate a previous clone.
        fs::ensure_dir(&ctx.pages_dir().join(".git")).unwrap();

        let report = ensure_pages_checkout(&ctx).unwrap();
        assert!(!report.cloned);
        for sub in PAGES_SKELETON {
            assert!(ctx.pages_dir().join(sub).is_dir(), "missing {}", sub);
        }
    }

    #[test]
    fn clearing_tracked_contents_preserves_repo_metadata() {
        let dir = tempdir().unwrap();
        let ctx = BuildContext::new(PathBuf::from(dir.path()));
        let pages = ctx.pages_dir();
        fs::ensure_dir(&pages.join(".git")).unwrap();
        fs::ensure_dir(&pages.join("web")).unwrap();
        std::fs::write(pages.join("index.html"), "stale").unwrap();
        std::fs::write(pages.join(".git/HEAD"), "ref: refs/heads/gh-pages").unwrap();

        clear_tracked_contents(&ctx).unwrap();
        assert!(pages.join(".git/HEAD").exists());
        assert!(!pages.join("index.html").exists());
        assert!(!pages.join("web").exists());
    }
}
