//! Error types for stylesheet parsing and resolution.

use std::path::PathBuf;

/// Result type alias for style operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while reading and resolving stylesheets.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Stylesheet parsing error.
    #[error("stylesheet parse error at line {line}, column {column}: {message}")]
    Parse {
        message: String,
        line: u32,
        column: u32,
    },

    /// A rule body the resolver does not know how to translate.
    #[error("unhandled rule kind '{kind}' in {} at line {line}, column {column}", source_file.display())]
    UnhandledRuleKind {
        kind: &'static str,
        source_file: PathBuf,
        line: u32,
        column: u32,
    },

    /// A selector path with a class marker but no class name after it.
    #[error("no class name could be extracted from selector '{selector}'")]
    NotAClassSelector { selector: String },

    /// File I/O error.
    #[error("failed to read stylesheet '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    /// Create a parse error.
    pub fn parse(message: impl Into<String>, line: u32, column: u32) -> Self {
        Self::Parse {
            message: message.into(),
            line,
            column,
        }
    }

    /// Create an unhandled rule kind error.
    pub fn unhandled_rule_kind(
        kind: &'static str,
        source_file: impl Into<PathBuf>,
        location: crate::rules::SourceLocation,
    ) -> Self {
        Self::UnhandledRuleKind {
            kind,
            source_file: source_file.into(),
            line: location.line,
            column: location.column,
        }
    }

    /// Create a selector extraction error.
    pub fn not_a_class_selector(selector: impl Into<String>) -> Self {
        Self::NotAClassSelector {
            selector: selector.into(),
        }
    }

    /// Create an I/O error.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
