//! Selector type definitions.

use std::fmt;

/// One comma-separated selector of a rule (e.g. `.nav > .item:hover`).
///
/// A group holds one [`SelectorPath`] per compound selector, in source
/// order. Combinators between compounds are not kept: resolution only cares
/// about which compounds name a class.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct SelectorGroup {
    /// Compound selectors, left to right.
    pub alternatives: Vec<SelectorPath>,
}

impl SelectorGroup {
    /// Create a group from its compound selectors.
    pub fn new(alternatives: Vec<SelectorPath>) -> Self {
        Self { alternatives }
    }

    /// Create a group holding a single class selector.
    pub fn class(name: impl Into<String>) -> Self {
        Self::new(vec![SelectorPath::class(name)])
    }

    /// Iterate over the compounds that contain a class marker.
    pub fn class_paths(&self) -> impl Iterator<Item = &SelectorPath> {
        self.alternatives.iter().filter(|path| path.has_class_marker())
    }
}

impl fmt::Display for SelectorGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, path) in self.alternatives.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{}", path)?;
        }
        Ok(())
    }
}

/// A single compound selector as a flat list of tokens
/// (e.g. `.btn.primary:hover` is `. btn . primary : hover`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct SelectorPath {
    /// Tokens in source order.
    pub tokens: Vec<PathToken>,
}

impl SelectorPath {
    /// Create a path from tokens.
    pub fn new(tokens: Vec<PathToken>) -> Self {
        Self { tokens }
    }

    /// Create a `.name` path.
    pub fn class(name: impl Into<String>) -> Self {
        Self::new(vec![PathToken::ClassMarker, PathToken::Name(name.into())])
    }

    /// Whether any token is a class marker.
    pub fn has_class_marker(&self) -> bool {
        self.tokens.contains(&PathToken::ClassMarker)
    }

    /// Whether the path has no tokens.
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// The first name fragment, ignoring markers and punctuation.
    pub fn first_name(&self) -> Option<&str> {
        self.tokens.iter().find_map(|token| match token {
            PathToken::Name(name) => Some(name.as_str()),
            _ => None,
        })
    }
}

impl fmt::Display for SelectorPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for token in &self.tokens {
            write!(f, "{}", token)?;
        }
        Ok(())
    }
}

/// A token of a compound selector.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathToken {
    /// The `.` that introduces a class name.
    ClassMarker,
    /// An identifier fragment (type name, class name, id, pseudo-class name).
    Name(String),
    /// Any other punctuation (`#`, `&`, `%`, `:`, `*`, `[`, ...).
    Punct(char),
}

impl fmt::Display for PathToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathToken::ClassMarker => write!(f, "."),
            PathToken::Name(name) => write!(f, "{}", name),
            PathToken::Punct(c) => write!(f, "{}", c),
        }
    }
}
