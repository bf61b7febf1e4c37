//! Error types for un-abstraction runs.

use std::fmt;
use std::path::PathBuf;

use crate::file::FileError;

/// Result type alias for run operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Which kind of source tree a path was given for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceRole {
    Markup,
    Stylesheet,
}

impl fmt::Display for SourceRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceRole::Markup => write!(f, "markup"),
            SourceRole::Stylesheet => write!(f, "stylesheet"),
        }
    }
}

/// Errors that can occur while discovering, resolving, or rewriting.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A root holds no files of the expected kind.
    #[error("invalid {role} path '{}': no matching files found", path.display())]
    InvalidInputPath { role: SourceRole, path: PathBuf },

    /// Stylesheet parsing or resolution failed.
    #[error(transparent)]
    Style(#[from] unabstract_style::Error),

    /// File I/O failed.
    #[error(transparent)]
    File(#[from] FileError),

    /// A candidate's line index is past the end of the file.
    #[error("line {} is out of range for {} ({line_count} lines)", line + 1, path.display())]
    LineOutOfRange {
        path: PathBuf,
        line: usize,
        line_count: usize,
    },

    /// The selector is no longer on the candidate's line.
    #[error("'{selector}' no longer appears on line {} of {}", line + 1, path.display())]
    SelectorNotOnLine {
        path: PathBuf,
        line: usize,
        selector: String,
    },

    /// Configuration file could not be read or parsed.
    #[error("invalid config '{}': {message}", path.display())]
    Config { path: PathBuf, message: String },

    /// Interactive confirmation failed.
    #[error("prompt failed: {0}")]
    Prompt(String),
}

impl Error {
    /// Create an invalid input path error.
    pub fn invalid_input_path(role: SourceRole, path: impl Into<PathBuf>) -> Self {
        Self::InvalidInputPath {
            role,
            path: path.into(),
        }
    }

    /// Create a config error.
    pub fn config(path: impl Into<PathBuf>, message: impl fmt::Display) -> Self {
        Self::Config {
            path: path.into(),
            message: message.to_string(),
        }
    }

    /// Whether the error only affects a single replacement.
    pub fn is_per_candidate(&self) -> bool {
        matches!(
            self,
            Error::LineOutOfRange { .. } | Error::SelectorNotOnLine { .. } | Error::File(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_input_path_names_role() {
        let err = Error::invalid_input_path(SourceRole::Stylesheet, "/assets/scss");
        assert_eq!(
            err.to_string(),
            "invalid stylesheet path '/assets/scss': no matching files found"
        );
    }

    #[test]
    fn line_numbers_display_one_based() {
        let err = Error::LineOutOfRange {
            path: PathBuf::from("a.twig"),
            line: 4,
            line_count: 3,
        };
        assert_eq!(err.to_string(), "line 5 is out of range for a.twig (3 lines)");
        assert!(err.is_per_candidate());
    }

    #[test]
    fn style_errors_convert() {
        let err: Error = unabstract_style::Error::not_a_class_selector(".&").into();
        assert!(matches!(err, Error::Style(_)));
        assert!(!err.is_per_candidate());
    }
}
