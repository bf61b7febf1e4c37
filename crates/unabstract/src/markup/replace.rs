use std::path::Path;

use crate::file::{read_lines, write_text};
use crate::logging::targets;
use crate::markup::ReplacementCandidate;
use crate::{Error, Result};

/// Rewrite one markup line in place.
///
/// Re-reads `file_path`, replaces the first literal occurrence of `selector`
/// on line `line_index` with `utility_classes`, and writes the file back
/// atomically. Every other line is preserved byte for byte. `original_line`
/// is the line as it was when the candidate was produced; if the file has
/// changed since, the fresh line is patched instead.
///
/// # Errors
///
/// - [`Error::LineOutOfRange`] if the file no longer has that many lines.
/// - [`Error::SelectorNotOnLine`] if the fresh line lacks the selector.
/// - [`Error::File`] on read or write failure.
///
/// Nothing is written when an error is returned.
pub fn replace(
    file_path: &Path,
    line_index: usize,
    selector: &str,
    utility_classes: &str,
    original_line: &str,
) -> Result<()> {
    let mut lines = read_lines(file_path)?;
    let line_count = lines.len();

    let Some(line) = lines.get_mut(line_index) else {
        return Err(Error::LineOutOfRange {
            path: file_path.to_path_buf(),
            line: line_index,
            line_count,
        });
    };

    if line.as_str() != original_line {
        tracing::debug!(
            target: targets::MARKUP,
            file = %file_path.display(),
            line = line_index + 1,
            "line changed since it was matched"
        );
    }

    if !line.contains(selector) {
        return Err(Error::SelectorNotOnLine {
            path: file_path.to_path_buf(),
            line: line_index,
            selector: selector.to_string(),
        });
    }

    *line = line.replacen(selector, utility_classes, 1);
    write_text(file_path, &lines.concat())?;

    tracing::info!(
        target: targets::MARKUP,
        file = %file_path.display(),
        line = line_index + 1,
        %selector,
        classes = %utility_classes,
        "replaced abstraction"
    );
    Ok(())
}

/// Applies accepted candidates.
#[derive(Debug, Clone, Copy, Default)]
pub struct Replacer {
    dry_run: bool,
}

impl Replacer {
    pub fn new() -> Self {
        Self::default()
    }

    /// A replacer that checks candidates but never writes.
    pub fn dry_run() -> Self {
        Self { dry_run: true }
    }

    pub fn is_dry_run(&self) -> bool {
        self.dry_run
    }

    /// Rewrite the candidate's line.
    pub fn apply(&self, candidate: &ReplacementCandidate) -> Result<()> {
        if self.dry_run {
            tracing::info!(
                target: targets::MARKUP,
                file = %candidate.file_path.display(),
                line = candidate.display_line_number(),
                selector = %candidate.selector,
                "dry run, not writing"
            );
            return Ok(());
        }

        replace(
            &candidate.file_path,
            candidate.line_number,
            &candidate.selector,
            &candidate.utility_classes,
            &candidate.line_text,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::PathBuf;

    use tempfile::{TempDir, tempdir};

    fn page(content: &str) -> (TempDir, PathBuf) {
        let dir = tempdir().unwrap();
        let path = dir.path().join("page.html.twig");
        fs::write(&path, content).unwrap();
        (dir, path)
    }

    #[test]
    fn replaces_first_occurrence_only() {
        let (_dir, path) = page("<div class=\"card card\">\n");

        replace(&path, 0, "card", "p-4 rounded", "<div class=\"card card\">\n").unwrap();
        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "<div class=\"p-4 rounded card\">\n"
        );
    }

    #[test]
    fn other_lines_are_untouched() {
        let content = "<header class=\"card\">\r\n<div class=\"card\">\n\tkeep  me\n<footer class=\"card\">";
        let (_dir, path) = page(content);

        replace(&path, 1, "card", "p-4", "<div class=\"card\">\n").unwrap();

        let after = fs::read_to_string(&path).unwrap();
        assert_eq!(
            after,
            "<header class=\"card\">\r\n<div class=\"p-4\">\n\tkeep  me\n<footer class=\"card\">"
        );
    }

    #[test]
    fn selector_is_literal_text() {
        let (_dir, path) = page("<a class=\"w-1.5 w-105\">\n");

        replace(&path, 0, "w-1.5", "w-6", "").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "<a class=\"w-6 w-105\">\n");
    }

    #[test]
    fn fresh_line_wins_over_stale_snapshot() {
        let (_dir, path) = page("<div id=\"x\" class=\"card\">\n");

        replace(&path, 0, "card", "p-4", "<div class=\"card\">\n").unwrap();
        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "<div id=\"x\" class=\"p-4\">\n"
        );
    }

    #[test]
    fn line_out_of_range() {
        let (_dir, path) = page("<div class=\"card\">\n");

        let err = replace(&path, 3, "card", "p-4", "").unwrap_err();
        assert!(matches!(err, Error::LineOutOfRange { line: 3, line_count: 1, .. }));
        assert_eq!(fs::read_to_string(&path).unwrap(), "<div class=\"card\">\n");
    }

    #[test]
    fn selector_gone_writes_nothing() {
        let (_dir, path) = page("<div class=\"p-4\">\n");

        let err = replace(&path, 0, "card", "p-4", "<div class=\"card\">\n").unwrap_err();
        assert!(matches!(err, Error::SelectorNotOnLine { .. }));
        assert_eq!(fs::read_to_string(&path).unwrap(), "<div class=\"p-4\">\n");
    }

    #[test]
    fn missing_file_is_file_error() {
        let dir = tempdir().unwrap();
        let err = replace(&dir.path().join("gone.twig"), 0, "a", "b", "").unwrap_err();
        assert!(matches!(err, Error::File(_)));
    }

    #[test]
    fn dry_run_leaves_file() {
        let (_dir, path) = page("<div class=\"card\">\n");
        let candidate = ReplacementCandidate {
            selector: "card".to_string(),
            utility_classes: "p-4".to_string(),
            file_path: path.clone(),
            line_number: 0,
            line_text: "<div class=\"card\">\n".to_string(),
        };

        Replacer::dry_run().apply(&candidate).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "<div class=\"card\">\n");

        Replacer::new().apply(&candidate).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "<div class=\"p-4\">\n");
    }
}
