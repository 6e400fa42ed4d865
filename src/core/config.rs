//! Fixed build configuration and the per-run context object.
//!
//! All paths derive from one root captured at startup; nothing here mutates
//! after construction except the lazily computed build number.

use std::env;
use std::path::PathBuf;
use std::sync::OnceLock;

use crate::error::{Error, Result};
use crate::git;

/// Ordered list of viewer sources, relative to `src/`.
/// Order is load order; the bundle is concatenated exactly as listed.
pub const SOURCE_FILES: &[&str] = &[
    "core.js",
    "util.js",
    "dom.js",
    "canvas.js",
    "lexer.js",
    "parser.js",
    "stream.js",
    "colorspace.js",
    "crypto.js",
    "fonts.js",
    "glyphlist.js",
    "metrics.js",
    "image.js",
    "pattern.js",
    "annotation.js",
    "worker.js",
    "../external/imgcodec/jpg.js",
    "text_layer.js",
];

/// Shared web UI files copied into both extension content trees,
/// relative to the project root.
pub const EXTENSION_WEB_FILES: &[&str] = &[
    "web/images",
    "web/viewer.css",
    "web/viewer.js",
    "web/viewer.html",
    "web/viewer-production.html",
];

// Marker lines recognized in source and template files.
pub const INCLUDE_ALL_MARKER: &str = "READER_INCLUDE_ALL";
pub const INCLUDE_BUILD_MARKER: &str = "READER_INCLUDE_BUILD";
pub const INCLUDE_BUNDLE_MARKER: &str = "READER_INCLUDE_BUNDLE";
pub const REMOVE_CORE_MARKER: &str = "READER_REMOVE_CORE";
pub const REMOVE_FIREFOX_MARKER: &str = "READER_REMOVE_FIREFOX_EXTENSION";
pub const INCLUDE_FIREFOX_MARKER: &str = "READER_INCLUDE_FIREFOX_EXTENSION";

/// Literal token replaced by the short head revision in the bundle wrapper.
pub const BUNDLE_VERSION_TOKEN: &str = "READER_BUNDLE_VERSION";

/// Literal token replaced by the build number in extension manifests.
pub const BUILD_NUMBER_TOKEN: &str = "READER_BUILD";

/// Baseline commit for the build number; the number is the count of commits
/// after this revision.
pub const BASE_REVISION: &str = "8c2f5f2e499013de66eb421737a4dbb4a9271eda";

/// Branch published to and cloned by the pages checkout.
pub const PAGES_BRANCH: &str = "gh-pages";

const DEFAULT_PAGES_REPO: &str = "git@github.com:extra-chill/reader.git";

/// Environment override for the publishing remote.
pub const PAGES_REPO_ENV: &str = "ROADIE_PAGES_REPO";

// Environment overrides for the browser test target.
pub const TEST_MANIFEST_ENV: &str = "ROADIE_TEST_MANIFEST";
pub const BROWSER_MANIFEST_ENV: &str = "ROADIE_BROWSER_MANIFEST";

pub const DEFAULT_TEST_MANIFEST: &str = "test_manifest.json";
pub const DEFAULT_BROWSER_MANIFEST: &str = "resources/browser_manifests/browser_manifest.json";

/// Per-run build context: the project root plus everything derived from it.
///
/// Constructed once in `main` and passed by reference to every target, so
/// there is no hidden cross-target state beyond the cached build number.
#[derive(Debug)]
pub struct BuildContext {
    pub root: PathBuf,
    build_number: OnceLock<u32>,
}

impl BuildContext {
    pub fn new(root: PathBuf) -> Self {
        Self {
            root,
            build_number: OnceLock::new(),
        }
    }

    pub fn from_current_dir() -> Result<Self> {
        let root = env::current_dir().map_err(|e| {
            Error::internal_io(e.to_string(), Some("resolve working directory".to_string()))
        })?;
        Ok(Self::new(root))
    }

    pub fn src_dir(&self) -> PathBuf {
        self.root.join("src")
    }

    pub fn web_dir(&self) -> PathBuf {
        self.root.join("web")
    }

    pub fn test_dir(&self) -> PathBuf {
        self.root.join("test")
    }

    pub fn extensions_dir(&self) -> PathBuf {
        self.root.join("extensions")
    }

    pub fn build_dir(&self) -> PathBuf {
        self.root.join("build")
    }

    /// The merged bundle artifact.
    pub fn bundle_target(&self) -> PathBuf {
        self.build_dir().join("reader.js")
    }

    pub fn pages_dir(&self) -> PathBuf {
        self.build_dir().join("gh-pages")
    }

    pub fn firefox_build_dir(&self) -> PathBuf {
        self.build_dir().join("firefox")
    }

    pub fn chrome_build_dir(&self) -> PathBuf {
        self.build_dir().join("chrome")
    }

    pub fn pages_repo_url(&self) -> String {
        env::var(PAGES_REPO_ENV).unwrap_or_else(|_| DEFAULT_PAGES_REPO.to_string())
    }

    /// Build number: commits since `BASE_REVISION`, computed once per run.
    ///
    /// Targets that stamp manifests call this before any destructive step so
    /// a failing git query aborts the run with nothing mutated.
    pub fn build_number(&self) -> Result<u32> {
        if let Some(n) = self.build_number.get() {
            return Ok(*n);
        }
        let n = git::commits_since(&self.root, BASE_REVISION)?;
        Ok(*self.build_number.get_or_init(|| n))
    }
}
