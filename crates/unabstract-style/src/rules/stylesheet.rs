//! Parsed stylesheet files.

use std::path::{Path, PathBuf};

use crate::rules::StyleNode;
use crate::{Error, Result};

/// A parsed stylesheet: its top-level node forest plus where it came from.
#[derive(Debug, Clone, Default)]
pub struct StyleSheet {
    /// Top-level nodes in source order.
    pub nodes: Vec<StyleNode>,
    /// Source file path, used to attribute warnings.
    pub source_path: Option<PathBuf>,
}

impl StyleSheet {
    /// Create a stylesheet from an existing node forest.
    pub fn new(nodes: Vec<StyleNode>) -> Self {
        Self {
            nodes,
            source_path: None,
        }
    }

    /// Load a stylesheet from an SCSS file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;

        let mut sheet = Self::from_scss(&content)?;
        sheet.source_path = Some(path.to_path_buf());
        Ok(sheet)
    }

    /// Parse a stylesheet from SCSS text.
    pub fn from_scss(scss: &str) -> Result<Self> {
        let nodes = crate::parser::parse_scss(scss)?;
        Ok(Self::new(nodes))
    }

    /// Attach a source path.
    pub fn with_source_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.source_path = Some(path.into());
        self
    }

    /// Get the number of top-level nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if the stylesheet is empty.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Iterate over top-level nodes.
    pub fn iter(&self) -> impl Iterator<Item = &StyleNode> {
        self.nodes.iter()
    }
}
