//! Line-oriented marker transforms for template files.
//!
//! Two distinct operations drive every template pass: deleting all lines
//! containing a marker, and replacing the first line containing a marker
//! with arbitrary (possibly multi-line) content. They are kept separate
//! because call sites rely on exactly one of the two behaviors.

use std::path::Path;

use crate::error::Result;
use crate::utils::fs;

/// Delete every line containing `marker`. Content without the marker is
/// returned unchanged, byte for byte.
pub fn remove_matching_lines(content: &str, marker: &str) -> String {
    if !content.contains(marker) {
        return content.to_string();
    }

    let mut out = String::with_capacity(content.len());
    for line in content.split_inclusive('\n') {
        if !line.contains(marker) {
            out.push_str(line);
        }
    }
    out
}

/// Replace the first line containing `marker` with `replacement`; any later
/// marker lines are left intact. The replaced line's terminator is preserved
/// when the replacement does not bring its own.
pub fn replace_first_matching_line(content: &str, marker: &str, replacement: &str) -> String {
    let mut out = String::with_capacity(content.len() + replacement.len());
    let mut replaced = false;

    for line in content.split_inclusive('\n') {
        if !replaced && line.contains(marker) {
            out.push_str(replacement);
            if line.ends_with('\n') && !replacement.ends_with('\n') {
                out.push('\n');
            }
            replaced = true;
        } else {
            out.push_str(line);
        }
    }
    out
}

/// In-place `remove_matching_lines` over a file.
pub fn remove_lines_in_file(path: &Path, marker: &str) -> Result<()> {
    let content = fs::read_file(path, "read template")?;
    fs::write_file(path, &remove_matching_lines(&content, marker), "rewrite template")
}

/// In-place `replace_first_matching_line` over a file.
pub fn replace_first_line_in_file(path: &Path, marker: &str, replacement: &str) -> Result<()> {
    let content = fs::read_file(path, "read template")?;
    fs::write_file(
        path,
        &replace_first_matching_line(&content, marker, replacement),
        "rewrite template",
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn remove_without_match_returns_input_unchanged() {
        let input = "line one\nline two\nline three\n";
        assert_eq!(remove_matching_lines(input, "MARKER"), input);
    }

    #[test]
    fn remove_deletes_every_matching_line() {
        let input = "keep\n<!-- MARKER -->\nkeep too\nMARKER again\n";
        assert_eq!(remove_matching_lines(input, "MARKER"), "keep\nkeep too\n");
    }

    #[test]
    fn remove_handles_missing_trailing_newline() {
        let input = "keep\nMARKER";
        assert_eq!(remove_matching_lines(input, "MARKER"), "keep\n");
    }

    #[test]
    fn replace_first_only_touches_first_occurrence() {
        let input = "a\nMARKER\nb\nMARKER\n";
        let out = replace_first_matching_line(input, "MARKER", "inserted");
        assert_eq!(out, "a\ninserted\nb\nMARKER\n");
    }

    #[test]
    fn replace_first_keeps_multiline_replacement_intact() {
        let input = "<head>\n<!-- MARKER -->\n</head>\n";
        let out = replace_first_matching_line(input, "MARKER", "one\ntwo\n");
        assert_eq!(out, "<head>\none\ntwo\n</head>\n");
    }

    #[test]
    fn replace_first_without_match_returns_input_unchanged() {
        let input = "a\nb\n";
        assert_eq!(replace_first_matching_line(input, "MARKER", "x"), input);
    }

    #[test]
    fn in_place_rewrite_round_trips_through_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("viewer.html");
        std::fs::write(&path, "keep\nDEV_ONLY\nkeep\n").unwrap();

        remove_lines_in_file(&path, "DEV_ONLY").unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "keep\nkeep\n");
    }
}
