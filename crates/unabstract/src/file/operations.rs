//! Convenience functions for whole-file operations.

use std::fs;
use std::path::{Path, PathBuf};

use super::error::{FileError, FileResult};
use super::writer::AtomicWriter;

/// Reads the entire contents of a file as a UTF-8 string.
///
/// # Errors
///
/// Returns an error if the file does not exist, cannot be read, or is not
/// valid UTF-8.
pub fn read_text(path: impl AsRef<Path>) -> FileResult<String> {
    let path = path.as_ref();
    fs::read_to_string(path).map_err(|e| FileError::from_io(e, path))
}

/// Reads a file and splits it into lines that keep their terminators.
///
/// Joining the result reproduces the file byte for byte. A file without a
/// trailing newline ends with an unterminated line; an empty file has none.
pub fn read_lines(path: impl AsRef<Path>) -> FileResult<Vec<String>> {
    Ok(split_lines(&read_text(path)?))
}

/// Splits text into lines, keeping `\n` (and any `\r` before it).
pub fn split_lines(text: &str) -> Vec<String> {
    text.split_inclusive('\n').map(str::to_string).collect()
}

/// Writes text to a file atomically.
pub fn write_text(path: impl AsRef<Path>, contents: &str) -> FileResult<()> {
    AtomicWriter::write(path, |w| w.write_str(contents))
}

/// Returns the canonical, absolute form of a path.
pub fn canonicalize(path: impl AsRef<Path>) -> FileResult<PathBuf> {
    let path = path.as_ref();
    fs::canonicalize(path).map_err(|e| FileError::from_io(e, path))
}

#[cfg(test)]
mod tests {
    use super::*;

    use tempfile::tempdir;

    #[test]
    fn test_read_write_text() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("page.html.twig");

        write_text(&path, "<p class=\"lead\">hi</p>\n").unwrap();
        assert_eq!(read_text(&path).unwrap(), "<p class=\"lead\">hi</p>\n");
    }

    #[test]
    fn test_read_lines_keeps_terminators() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("page.html.twig");
        fs::write(&path, "one\r\ntwo\n\nthree").unwrap();

        let lines = read_lines(&path).unwrap();
        assert_eq!(lines, vec!["one\r\n", "two\n", "\n", "three"]);
        assert_eq!(lines.concat(), "one\r\ntwo\n\nthree");
    }

    #[test]
    fn test_split_lines_empty() {
        assert!(split_lines("").is_empty());
    }

    #[test]
    fn test_read_missing() {
        let dir = tempdir().unwrap();
        let err = read_text(dir.path().join("nope.twig")).unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_canonicalize_is_absolute() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("a.twig");
        fs::write(&path, "").unwrap();

        let canonical = canonicalize(dir.path().join(".").join("a.twig")).unwrap();
        assert!(canonical.is_absolute());
        assert_eq!(canonical, canonicalize(&path).unwrap());
    }
}
