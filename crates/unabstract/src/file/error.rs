//! Error types for file operations.

use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

/// Error type for file operations.
#[derive(Debug)]
pub struct FileError {
    /// The kind of error that occurred.
    kind: FileErrorKind,
    /// The path involved in the error, if any.
    path: Option<PathBuf>,
    /// The underlying source error, if any.
    source: Option<io::Error>,
}

/// The kind of file error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileErrorKind {
    /// File or directory not found.
    NotFound,
    /// Permission denied.
    PermissionDenied,
    /// Invalid path or glob pattern.
    InvalidPath,
    /// The path is a file, not a directory.
    NotDirectory,
    /// The path is a directory, not a file.
    IsDirectory,
    /// Contents are not valid UTF-8 text.
    InvalidData,
    /// An unknown or unclassified error occurred.
    Other,
}

impl FileErrorKind {
    fn from_io_kind(kind: io::ErrorKind) -> Self {
        match kind {
            io::ErrorKind::NotFound => FileErrorKind::NotFound,
            io::ErrorKind::PermissionDenied => FileErrorKind::PermissionDenied,
            io::ErrorKind::InvalidInput | io::ErrorKind::InvalidFilename => {
                FileErrorKind::InvalidPath
            }
            io::ErrorKind::NotADirectory => FileErrorKind::NotDirectory,
            io::ErrorKind::IsADirectory => FileErrorKind::IsDirectory,
            io::ErrorKind::InvalidData => FileErrorKind::InvalidData,
            _ => FileErrorKind::Other,
        }
    }
}

impl FileError {
    /// Creates a new file error.
    pub fn new(kind: FileErrorKind, path: Option<PathBuf>, source: Option<io::Error>) -> Self {
        Self { kind, path, source }
    }

    /// Creates a file error from an I/O error and path.
    pub fn from_io(err: io::Error, path: impl Into<PathBuf>) -> Self {
        Self {
            kind: FileErrorKind::from_io_kind(err.kind()),
            path: Some(path.into()),
            source: Some(err),
        }
    }

    /// Creates a "not a directory" error for a walk root.
    pub fn not_directory(path: impl Into<PathBuf>) -> Self {
        Self::new(FileErrorKind::NotDirectory, Some(path.into()), None)
    }

    /// Creates an "invalid path" error for a glob pattern that does not compile.
    pub fn invalid_pattern(pattern: &str, message: impl fmt::Display) -> Self {
        Self::new(
            FileErrorKind::InvalidPath,
            None,
            Some(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("invalid glob pattern '{}': {}", pattern, message),
            )),
        )
    }

    /// Returns the kind of error.
    pub fn kind(&self) -> FileErrorKind {
        self.kind
    }

    /// Returns the path involved in the error, if any.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Returns true if this error indicates the file was not found.
    pub fn is_not_found(&self) -> bool {
        self.kind == FileErrorKind::NotFound
    }
}

impl fmt::Display for FileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.path, &self.source) {
            (Some(path), Some(source)) => {
                write!(f, "{}: {} ({})", self.kind, path.display(), source)
            }
            (Some(path), None) => write!(f, "{}: {}", self.kind, path.display()),
            (None, Some(source)) => write!(f, "{}: {}", self.kind, source),
            (None, None) => write!(f, "{}", self.kind),
        }
    }
}

impl fmt::Display for FileErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FileErrorKind::NotFound => write!(f, "file not found"),
            FileErrorKind::PermissionDenied => write!(f, "permission denied"),
            FileErrorKind::InvalidPath => write!(f, "invalid path"),
            FileErrorKind::NotDirectory => write!(f, "not a directory"),
            FileErrorKind::IsDirectory => write!(f, "is a directory"),
            FileErrorKind::InvalidData => write!(f, "invalid data"),
            FileErrorKind::Other => write!(f, "file error"),
        }
    }
}

impl std::error::Error for FileError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|e| e as &(dyn std::error::Error + 'static))
    }
}

/// A specialized Result type for file operations.
pub type FileResult<T> = Result<T, FileError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = FileError::not_directory("/path/to/file.scss");
        assert_eq!(err.to_string(), "not a directory: /path/to/file.scss");
    }

    #[test]
    fn test_from_io_error_with_path() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "gone");
        let err = FileError::from_io(io_err, "/templates/card.html.twig");
        assert!(err.is_not_found());
        assert_eq!(err.path(), Some(Path::new("/templates/card.html.twig")));
        assert_eq!(
            err.to_string(),
            "file not found: /templates/card.html.twig (gone)"
        );
    }

    #[test]
    fn test_invalid_utf8_kind() {
        let io_err = io::Error::new(io::ErrorKind::InvalidData, "stream did not contain valid UTF-8");
        let err = FileError::from_io(io_err, "a.scss");
        assert_eq!(err.kind(), FileErrorKind::InvalidData);
    }

    #[test]
    fn test_invalid_pattern() {
        let err = FileError::invalid_pattern("[", "unclosed class");
        assert_eq!(err.kind(), FileErrorKind::InvalidPath);
        assert!(err.path().is_none());
        assert!(err.to_string().contains("'['"));
    }
}
