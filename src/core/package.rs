//! Extension packaging: platform build trees and their archives.
//!
//! Both platforms share the same skeleton (static extension files, the
//! bundle, the shared web UI). They differ in how the bundle ships:
//! Firefox inlines it into the viewer markup, Chrome keeps it as an
//! external file next to the viewer.

use std::io::Write;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::config::{
    BuildContext, BUILD_NUMBER_TOKEN, EXTENSION_WEB_FILES, INCLUDE_BUNDLE_MARKER,
    INCLUDE_FIREFOX_MARKER, REMOVE_CORE_MARKER, REMOVE_FIREFOX_MARKER,
};
use crate::error::{Error, Result};
use crate::template;
use crate::utils::fs;

const FIREFOX_ARCHIVE: &str = "reader.xpi";
const FIREFOX_STORE_ARCHIVE: &str = "reader-store.xpi";
const CHROME_ARCHIVE: &str = "reader-chrome.zip";

const FIREFOX_SNIPPET: &str = "viewer-snippet-firefox-extension.html";

/// Manifest line deleted for the store distribution; store-hosted installs
/// must not carry a self-update endpoint.
const UPDATE_URL_MARKER: &str = "updateURL";

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FirefoxArtifacts {
    pub build_dir: String,
    pub archive: String,
    pub store_archive: String,
    pub build_number: u32,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChromeArtifacts {
    pub build_dir: String,
    pub archive: String,
    pub build_number: u32,
}

/// Assemble and archive the Firefox extension tree.
pub fn firefox(ctx: &BuildContext, build_number: u32) -> Result<FirefoxArtifacts> {
    let ext_src = ctx.extensions_dir().join("firefox");
    check_packaging_inputs(ctx, &ext_src, "firefox")?;

    let build_dir = ctx.firefox_build_dir();
    let content = build_dir.join("content");
    let content_build = content.join("build");
    let content_web = content.join("web");

    fs::clear_dir(&build_dir)?;
    fs::ensure_dir(&content_build)?;
    fs::ensure_dir(&content_web)?;

    // Static extension files: scripts, manifests, platform components.
    fs::copy_matching(&ext_src, "*.js", &build_dir)?;
    fs::copy_matching(&ext_src, "*.rdf", &build_dir)?;
    fs::copy_tree(&ext_src.join("components"), &build_dir.join("components"))?;

    // Standalone bundle plus the shared web UI.
    fs::copy_file(&ctx.bundle_target(), &content_build.join("reader.js"), "copy bundle")?;
    copy_web_files(ctx, &content_web)?;
    fs::remove_file(&content_web.join("viewer-production.html"), "drop production viewer")?;

    // Inline the bundle into the platform snippet, then rewrite the viewer:
    // strip core-dev lines, strip the platform's dev lines, splice the snippet.
    let snippet_path = content_web.join(FIREFOX_SNIPPET);
    fs::copy_file(&ctx.web_dir().join(FIREFOX_SNIPPET), &snippet_path, "copy snippet")?;
    let bundle_text = fs::read_file(&content_build.join("reader.js"), "read bundle")?;
    template::replace_first_line_in_file(&snippet_path, INCLUDE_BUNDLE_MARKER, &bundle_text)?;

    let viewer = content_web.join("viewer.html");
    template::remove_lines_in_file(&viewer, REMOVE_CORE_MARKER)?;
    template::remove_lines_in_file(&viewer, REMOVE_FIREFOX_MARKER)?;
    let snippet = fs::read_file(&snippet_path, "read snippet")?;
    template::replace_first_line_in_file(&viewer, INCLUDE_FIREFOX_MARKER, &snippet)?;

    // The bundle ships inlined; the standalone copy is dead weight.
    fs::remove_tree(&content_build)?;

    stamp_build_number(&build_dir.join("install.rdf"), build_number)?;
    stamp_build_number(&build_dir.join("update.rdf"), build_number)?;

    let archive = build_dir.join(FIREFOX_ARCHIVE);
    archive_tree(&build_dir, &archive)?;
    log_status!("firefox", "Extension created: {}", archive.display());

    // Store variant: same tree minus the self-update endpoint.
    template::remove_lines_in_file(&build_dir.join("install.rdf"), UPDATE_URL_MARKER)?;
    let store_archive = build_dir.join(FIREFOX_STORE_ARCHIVE);
    archive_tree(&build_dir, &store_archive)?;
    log_status!("firefox", "Store extension created: {}", store_archive.display());

    Ok(FirefoxArtifacts {
        build_dir: build_dir.to_string_lossy().to_string(),
        archive: archive.to_string_lossy().to_string(),
        store_archive: store_archive.to_string_lossy().to_string(),
        build_number,
    })
}

/// Assemble and archive the Chrome extension tree.
pub fn chrome(ctx: &BuildContext, build_number: u32) -> Result<ChromeArtifacts> {
    let ext_src = ctx.extensions_dir().join("chrome");
    check_packaging_inputs(ctx, &ext_src, "chrome")?;

    let build_dir = ctx.chrome_build_dir();
    let content = build_dir.join("content");
    let content_build = content.join("build");
    let content_web = content.join("web");

    fs::clear_dir(&build_dir)?;
    fs::ensure_dir(&content_build)?;
    fs::ensure_dir(&content_web)?;

    fs::copy_matching(&ext_src, "*.json", &build_dir)?;
    fs::copy_matching(&ext_src, "*.html", &build_dir)?;

    // The bundle ships as an external file; the production viewer replaces
    // the development one under its own name.
    fs::copy_file(&ctx.bundle_target(), &content_build.join("reader.js"), "copy bundle")?;
    copy_web_files(ctx, &content_web)?;
    fs::move_file(
        &content_web.join("viewer-production.html"),
        &content_web.join("viewer.html"),
        "promote production viewer",
    )?;

    stamp_build_number(&build_dir.join("manifest.json"), build_number)?;

    let archive = build_dir.join(CHROME_ARCHIVE);
    archive_tree(&build_dir, &archive)?;
    log_status!("chrome", "Extension created: {}", archive.display());

    Ok(ChromeArtifacts {
        build_dir: build_dir.to_string_lossy().to_string(),
        archive: archive.to_string_lossy().to_string(),
        build_number,
    })
}

/// Preconditions shared by both packagers, checked before the platform
/// build directory is cleared so an abort leaves previous output intact.
fn check_packaging_inputs(ctx: &BuildContext, ext_src: &Path, platform: &str) -> Result<()> {
    if !ctx.bundle_target().is_file() {
        return Err(Error::input_file_missing(
            ctx.bundle_target().to_string_lossy(),
            Some(platform.to_string()),
        )
        .with_hint("Run 'roadie production' first to produce the bundle"));
    }
    if !ext_src.is_dir() {
        return Err(Error::input_file_missing(
            ext_src.to_string_lossy(),
            Some(platform.to_string()),
        ));
    }
    Ok(())
}

fn copy_web_files(ctx: &BuildContext, content_web: &Path) -> Result<()> {
    for entry in EXTENSION_WEB_FILES {
        let src = ctx.root.join(entry);
        let name = src.file_name().ok_or_else(|| {
            Error::internal_unexpected(format!("Invalid web file entry: {}", entry))
        })?;
        if src.is_dir() {
            fs::copy_tree(&src, &content_web.join(name))?;
        } else if src.is_file() {
            fs::copy_file(&src, &content_web.join(name), "copy web file")?;
        } else {
            return Err(Error::input_file_missing(
                src.to_string_lossy(),
                Some("extension web files".to_string()),
            ));
        }
    }
    Ok(())
}

/// Replace the literal build-number token everywhere in a manifest.
fn stamp_build_number(manifest: &Path, build_number: u32) -> Result<()> {
    let content = fs::read_file(manifest, "read manifest")?;
    let stamped = content.replace(BUILD_NUMBER_TOKEN, &build_number.to_string());
    fs::write_file(manifest, &stamped, "stamp manifest")
}

/// Zip a directory tree into `dest`.
///
/// Entries are written in sorted relative-path order, so an unchanged tree
/// archives to an identical file listing on every run. Existing archives in
/// the tree are skipped (the store variant is produced from the same tree).
pub fn archive_tree(dir: &Path, dest: &Path) -> Result<()> {
    let mut files = Vec::new();
    collect_files(dir, &mut files)?;
    files.sort();

    let out = std::fs::File::create(dest)
        .map_err(|e| Error::archive_failed(format!("{}: {}", dest.display(), e)))?;
    let mut zip = zip::ZipWriter::new(out);
    let options = zip::write::FileOptions::default();

    for path in files {
        if is_archive(&path) {
            continue;
        }
        let rel = path
            .strip_prefix(dir)
            .map_err(|e| Error::archive_failed(e.to_string()))?;
        let bytes = std::fs::read(&path)
            .map_err(|e| Error::archive_failed(format!("{}: {}", path.display(), e)))?;
        zip.start_file(rel.to_string_lossy().replace('\\', "/"), options)
            .map_err(|e| Error::archive_failed(e.to_string()))?;
        zip.write_all(&bytes)
            .map_err(|e| Error::archive_failed(e.to_string()))?;
    }

    zip.finish()
        .map_err(|e| Error::archive_failed(e.to_string()))?;
    Ok(())
}

fn collect_files(dir: &Path, out: &mut Vec<PathBuf>) -> Result<()> {
    let entries = std::fs::read_dir(dir)
        .map_err(|e| Error::archive_failed(format!("{}: {}", dir.display(), e)))?;
    for entry in entries {
        let entry = entry.map_err(|e| Error::archive_failed(e.to_string()))?;
        let path = entry.path();
        if path.is_dir() {
            collect_files(&path, out)?;
        } else {
            out.push(path);
        }
    }
    Ok(())
}

fn is_archive(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("xpi") | Some("zip")
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn archive_tree_lists_entries_in_sorted_order_and_skips_archives() {
        let dir = tempdir().unwrap();
        let tree = dir.path().join("tree");
        fs::ensure_dir(&tree.join("content/web")).unwrap();
        std::fs::write(tree.join("install.rdf"), "rdf").unwrap();
        std::fs::write(tree.join("content/web/viewer.html"), "html").unwrap();
        std::fs::write(tree.join("old.xpi"), "stale").unwrap();

        let dest = tree.join("reader.xpi");
        archive_tree(&tree, &dest).unwrap();

        let file = std::fs::File::open(&dest).unwrap();
        let mut archive = zip::ZipArchive::new(file).unwrap();
        // Read entries in archive (insertion) order; `file_names()` iterates a
        // HashMap and would return them in nondeterministic order.
        let names: Vec<String> = (0..archive.len())
            .map(|i| archive.by_index(i).unwrap().name().to_string())
            .collect();
        assert_eq!(names, vec!["content/web/viewer.html", "install.rdf"]);
    }

    #[test]
    fn stamp_build_number_replaces_token() {
        let dir = tempdir().unwrap();
        let manifest = dir.path().join("install.rdf");
        std::fs::write(&manifest, "<em:version>1.0.READER_BUILD</em:version>\n").unwrap();

        stamp_build_number(&manifest, 417).unwrap();
        let content = std::fs::read_to_string(&manifest).unwrap();
        assert_eq!(content, "<em:version>1.0.417</em:version>\n");
    }
}
