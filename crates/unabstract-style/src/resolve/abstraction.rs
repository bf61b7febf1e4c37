//! Abstraction records and resolution output.

use std::fmt;
use std::path::PathBuf;

use indexmap::IndexMap;

use crate::rules::SourceLocation;

/// Selector name to abstraction, in first-declaration order.
pub type AbstractionMap = IndexMap<String, Abstraction>;

/// What a named selector stands for.
///
/// A record with neither field set is a placeholder: the selector was seen
/// in a rule whose body has not (yet) contributed anything resolvable.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Abstraction {
    /// Whitespace-collapsed utility classes from `@apply`.
    pub utility_classes: Option<String>,
    /// Name of the selector this one extends.
    pub extends: Option<String>,
}

impl Abstraction {
    /// Create a record holding utility classes.
    pub fn with_classes(classes: impl Into<String>) -> Self {
        Self {
            utility_classes: Some(classes.into()),
            extends: None,
        }
    }

    /// Whether nothing has been recorded for this selector.
    pub fn is_placeholder(&self) -> bool {
        self.utility_classes.is_none() && self.extends.is_none()
    }
}

/// Why a rule body could not be translated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WarningReason {
    /// Plain properties or other hand-written CSS.
    CustomCss,
}

impl fmt::Display for WarningReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WarningReason::CustomCss => write!(f, "Custom CSS"),
        }
    }
}

/// A rule body the resolver skipped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Warning {
    pub reason: WarningReason,
    pub source_file: PathBuf,
    /// Selector the body belongs to.
    pub selector: String,
    /// Position of the offending body node.
    pub location: SourceLocation,
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} in {}", self.reason, self.source_file.display())
    }
}

/// The frozen result of resolving every stylesheet of a run.
#[derive(Debug, Clone, Default)]
pub struct Resolution {
    pub abstractions: AbstractionMap,
    pub warnings: Vec<Warning>,
}

impl Resolution {
    /// Effective utility classes for a selector (see [`crate::resolve::flatten`]).
    pub fn flatten(&self, selector: &str) -> String {
        super::flatten(selector, &self.abstractions)
    }
}
