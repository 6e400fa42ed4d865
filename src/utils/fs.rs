//! File and directory primitives with consistent error handling.

use std::fs;
use std::path::Path;

use crate::error::{Error, Result};

fn io_err(e: impl std::fmt::Display, operation: &str) -> Error {
    Error::internal_io(e.to_string(), Some(operation.to_string()))
}

/// Read file contents with standardized error handling.
pub fn read_file(path: &Path, operation: &str) -> Result<String> {
    fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            io_err(format!("File not found: {}", path.display()), operation)
        } else {
            io_err(e, operation)
        }
    })
}

/// Write content to file with standardized error handling.
pub fn write_file(path: &Path, content: &str, operation: &str) -> Result<()> {
    fs::write(path, content).map_err(|e| io_err(e, operation))
}

/// Copy a single file, creating nothing; byte-level so binaries survive.
pub fn copy_file(src: &Path, dest: &Path, operation: &str) -> Result<()> {
    fs::copy(src, dest)
        .map(|_| ())
        .map_err(|e| io_err(format!("{} -> {}: {}", src.display(), dest.display(), e), operation))
}

/// Move (rename) a file, replacing any existing destination.
pub fn move_file(src: &Path, dest: &Path, operation: &str) -> Result<()> {
    fs::rename(src, dest)
        .map_err(|e| io_err(format!("{} -> {}: {}", src.display(), dest.display(), e), operation))
}

/// Delete a single file.
pub fn remove_file(path: &Path, operation: &str) -> Result<()> {
    fs::remove_file(path).map_err(|e| io_err(format!("{}: {}", path.display(), e), operation))
}

/// Create a directory and all parents; existing directories are fine.
pub fn ensure_dir(dir: &Path) -> Result<()> {
    if !dir.exists() {
        fs::create_dir_all(dir).map_err(|e| io_err(e, "create directory"))?;
    }
    Ok(())
}

/// Recursively delete a directory; absent directories are fine.
pub fn remove_tree(dir: &Path) -> Result<()> {
    if dir.exists() {
        fs::remove_dir_all(dir)
            .map_err(|e| io_err(format!("{}: {}", dir.display(), e), "remove directory"))?;
    }
    Ok(())
}

/// Recursively delete and recreate a directory, leaving it empty.
pub fn clear_dir(dir: &Path) -> Result<()> {
    remove_tree(dir)?;
    ensure_dir(dir)
}

/// Recursively copy a directory tree into `dest` (created as needed).
pub fn copy_tree(src: &Path, dest: &Path) -> Result<()> {
    if !src.is_dir() {
        return Err(io_err(
            format!("Not a directory: {}", src.display()),
            "copy tree",
        ));
    }
    ensure_dir(dest)?;

    let entries = fs::read_dir(src).map_err(|e| io_err(e, "copy tree"))?;
    for entry in entries {
        let entry = entry.map_err(|e| io_err(e, "copy tree"))?;
        let target = dest.join(entry.file_name());
        if entry.path().is_dir() {
            copy_tree(&entry.path(), &target)?;
        } else {
            copy_file(&entry.path(), &target, "copy tree")?;
        }
    }
    Ok(())
}

/// Copy every file in `dir` matching a glob `pattern` into `dest`.
pub fn copy_matching(dir: &Path, pattern: &str, dest: &Path) -> Result<()> {
    let full_pattern = dir.join(pattern);
    let entries = glob::glob(&full_pattern.to_string_lossy()).map_err(|e| {
        Error::validation_invalid_argument("pattern", format!("Invalid glob '{}': {}", pattern, e))
    })?;

    for entry in entries {
        let path = entry.map_err(|e| io_err(e, "copy matching"))?;
        if path.is_file() {
            let name = path.file_name().ok_or_else(|| {
                io_err(format!("Invalid path: {}", path.display()), "copy matching")
            })?;
            copy_file(&path, &dest.join(name), "copy matching")?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn read_file_returns_error_for_missing_file() {
        let result = read_file(Path::new("/nonexistent/path.txt"), "test read");
        assert!(result.is_err());
        let err = result.unwrap_err();
        assert_eq!(err.code.as_str(), "internal.io_error");
    }

    #[test]
    fn clear_dir_leaves_an_empty_directory() {
        let dir = tempdir().unwrap();
        let target = dir.path().join("out");
        ensure_dir(&target).unwrap();
        write_file(&target.join("stale.txt"), "old", "test write").unwrap();

        clear_dir(&target).unwrap();
        assert!(target.exists());
        assert_eq!(fs::read_dir(&target).unwrap().count(), 0);
    }

    #[test]
    fn copy_tree_replicates_nested_layout() {
        let dir = tempdir().unwrap();
        let src = dir.path().join("src");
        ensure_dir(&src.join("nested")).unwrap();
        write_file(&src.join("a.txt"), "a", "test write").unwrap();
        write_file(&src.join("nested/b.txt"), "b", "test write").unwrap();

        let dest = dir.path().join("dest");
        copy_tree(&src, &dest).unwrap();
        assert_eq!(fs::read_to_string(dest.join("a.txt")).unwrap(), "a");
        assert_eq!(fs::read_to_string(dest.join("nested/b.txt")).unwrap(), "b");
    }

    #[test]
    fn copy_matching_filters_by_pattern() {
        let dir = tempdir().unwrap();
        let src = dir.path().join("ext");
        ensure_dir(&src).unwrap();
        write_file(&src.join("a.js"), "js", "test write").unwrap();
        write_file(&src.join("b.rdf"), "rdf", "test write").unwrap();

        let dest = dir.path().join("out");
        ensure_dir(&dest).unwrap();
        copy_matching(&src, "*.js", &dest).unwrap();
        assert!(dest.join("a.js").exists());
        assert!(!dest.join("b.rdf").exists());
    }

    #[test]
    fn move_file_replaces_destination() {
        let dir = tempdir().unwrap();
        let a = dir.path().join("a.txt");
        let b = dir.path().join("b.txt");
        write_file(&a, "new", "test write").unwrap();
        write_file(&b, "old", "test write").unwrap();

        move_file(&a, &b, "test move").unwrap();
        assert!(!a.exists());
        assert_eq!(fs::read_to_string(&b).unwrap(), "new");
    }
}
