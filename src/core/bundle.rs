//! Production output: the merged source bundle and the production viewer
//! markup derived from it.

use std::path::Path;

use serde::Serialize;

use crate::config::{
    BuildContext, BUNDLE_VERSION_TOKEN, INCLUDE_ALL_MARKER, INCLUDE_BUILD_MARKER,
    REMOVE_CORE_MARKER, SOURCE_FILES,
};
use crate::error::{Error, Result};
use crate::template;
use crate::utils::fs;

/// Name of the wrapper template carrying the include-all marker,
/// relative to `src/`.
const WRAPPER_FILE: &str = "reader.js";

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BundleReport {
    pub bundle: String,
    pub revision: String,
    pub sources: usize,
}

/// Concatenate `SOURCE_FILES` in declared order. Any missing source is a
/// fatal input error; nothing is written by this step.
pub fn concat_sources(src_dir: &Path) -> Result<String> {
    let mut merged = String::new();
    for file in SOURCE_FILES {
        let path = src_dir.join(file);
        if !path.is_file() {
            return Err(Error::input_file_missing(
                path.to_string_lossy(),
                Some("bundle".to_string()),
            ));
        }
        let content = fs::read_file(&path, "read bundle source")?;
        merged.push_str(&content);
        if !content.ends_with('\n') {
            merged.push('\n');
        }
    }
    Ok(merged)
}

/// Produce `build/reader.js` from the wrapper template and the ordered
/// source list, stamping `revision` into the version token.
///
/// For a fixed source tree and revision the output is byte-identical
/// across runs.
pub fn write_bundle(ctx: &BuildContext, revision: &str) -> Result<BundleReport> {
    let wrapper_path = ctx.src_dir().join(WRAPPER_FILE);
    if !wrapper_path.is_file() {
        return Err(Error::input_file_missing(
            wrapper_path.to_string_lossy(),
            Some("bundle".to_string()),
        ));
    }

    let wrapper = fs::read_file(&wrapper_path, "read bundle wrapper")?;
    let sources = concat_sources(&ctx.src_dir())?;

    let merged = template::replace_first_matching_line(&wrapper, INCLUDE_ALL_MARKER, &sources);
    let stamped = merged.replace(BUNDLE_VERSION_TOKEN, revision);

    fs::ensure_dir(&ctx.build_dir())?;
    let target = ctx.bundle_target();
    fs::write_file(&target, &stamped, "write bundle")?;

    Ok(BundleReport {
        bundle: target.to_string_lossy().to_string(),
        revision: revision.to_string(),
        sources: SOURCE_FILES.len(),
    })
}

/// Produce `web/viewer-production.html`: development-only lines removed,
/// the include-build marker replaced by the production snippet. The source
/// viewer markup is left untouched.
pub fn generate_production_viewer(ctx: &BuildContext) -> Result<String> {
    let web = ctx.web_dir();
    let viewer_path = web.join("viewer.html");
    let snippet_path = web.join("viewer-snippet.html");
    for path in [&viewer_path, &snippet_path] {
        if !path.is_file() {
            return Err(Error::input_file_missing(
                path.to_string_lossy(),
                Some("viewer".to_string()),
            ));
        }
    }

    let viewer = fs::read_file(&viewer_path, "read viewer markup")?;
    let snippet = fs::read_file(&snippet_path, "read viewer snippet")?;

    let stripped = template::remove_matching_lines(&viewer, REMOVE_CORE_MARKER);
    let production = template::replace_first_matching_line(&stripped, INCLUDE_BUILD_MARKER, &snippet);

    let target = web.join("viewer-production.html");
    fs::write_file(&target, &production, "write production viewer")?;

    Ok(target.to_string_lossy().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use tempfile::tempdir;

    fn write_fixture_sources(root: &Path) {
        let src = root.join("src");
        for (i, file) in SOURCE_FILES.iter().enumerate() {
            let path = src.join(file);
            fs::ensure_dir(path.parent().unwrap()).unwrap();
            std::fs::write(&path, format!("// module {}\n", i)).unwrap();
        }
        std::fs::write(
            src.join(WRAPPER_FILE),
            "(function () {\n// READER_INCLUDE_ALL\n}).version = 'READER_BUNDLE_VERSION';\n",
        )
        .unwrap();
    }

    #[test]
    fn bundle_is_deterministic_and_stamps_revision() {
        let dir = tempdir().unwrap();
        write_fixture_sources(dir.path());
        let ctx = BuildContext::new(PathBuf::from(dir.path()));

        let report = write_bundle(&ctx, "ab12cd3").unwrap();
        let first = std::fs::read_to_string(&report.bundle).unwrap();
        assert!(first.contains("'ab12cd3'"));
        assert!(!first.contains("READER_BUNDLE_VERSION"));
        assert!(!first.contains("READER_INCLUDE_ALL"));
        // First source lands before the last one.
        assert!(first.find("// module 0").unwrap() < first.find("// module 17").unwrap());

        let again = write_bundle(&ctx, "ab12cd3").unwrap();
        let second = std::fs::read_to_string(&again.bundle).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn production_viewer_strips_dev_lines_and_inlines_snippet() {
        let dir = tempdir().unwrap();
        let web = dir.path().join("web");
        fs::ensure_dir(&web).unwrap();
        std::fs::write(
            web.join("viewer.html"),
            "<html>\n<script src=\"core.js\"></script><!-- READER_REMOVE_CORE -->\n\
             <!-- READER_INCLUDE_BUILD -->\n</html>\n",
        )
        .unwrap();
        std::fs::write(
            web.join("viewer-snippet.html"),
            "<script src=\"../build/reader.js\"></script>\n",
        )
        .unwrap();
        let ctx = BuildContext::new(PathBuf::from(dir.path()));

        let target = generate_production_viewer(&ctx).unwrap();
        let produced = std::fs::read_to_string(&target).unwrap();
        assert!(!produced.contains("READER_REMOVE_CORE"));
        assert!(produced.contains("../build/reader.js"));
        // The development markup is untouched.
        let original = std::fs::read_to_string(web.join("viewer.html")).unwrap();
        assert!(original.contains("READER_REMOVE_CORE"));
    }

    #[test]
    fn missing_source_aborts_before_writing() {
        let dir = tempdir().unwrap();
        write_fixture_sources(dir.path());
        std::fs::remove_file(dir.path().join("src/fonts.js")).unwrap();
        let ctx = BuildContext::new(PathBuf::from(dir.path()));

        let err = write_bundle(&ctx, "ab12cd3").unwrap_err();
        assert_eq!(err.code, crate::error::ErrorCode::InputFileMissing);
        assert!(!ctx.bundle_target().exists());
    }
}
