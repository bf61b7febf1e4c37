//! Finding the markup and stylesheet files of a run.

use std::path::{Path, PathBuf};

use crate::error::SourceRole;
use crate::file::{WalkDir, WalkDirOptions, canonicalize};
use crate::logging::targets;
use crate::{Error, Result};

/// Where to look for sources and which files qualify.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveryOptions {
    pub markup_root: PathBuf,
    pub stylesheet_root: PathBuf,
    /// File-name globs for markup templates.
    pub markup_patterns: Vec<String>,
    /// File-name globs for stylesheets.
    pub stylesheet_patterns: Vec<String>,
    /// Directory names skipped under both roots.
    pub excluded_dirs: Vec<String>,
}

impl DiscoveryOptions {
    /// Options with the default patterns and exclusions.
    pub fn new(markup_root: impl Into<PathBuf>, stylesheet_root: impl Into<PathBuf>) -> Self {
        Self {
            markup_root: markup_root.into(),
            stylesheet_root: stylesheet_root.into(),
            markup_patterns: vec!["*.html.twig".to_string()],
            stylesheet_patterns: vec!["*.scss".to_string()],
            excluded_dirs: vec!["vendor".to_string(), "node_modules".to_string()],
        }
    }

    /// Replace the excluded directory names.
    pub fn exclude<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.excluded_dirs = names.into_iter().map(Into::into).collect();
        self
    }
}

/// The files of one run, each list sorted by canonical path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceSet {
    markup_files: Vec<PathBuf>,
    stylesheet_files: Vec<PathBuf>,
}

impl SourceSet {
    /// Walk both roots.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidInputPath`] when a root is missing or holds no
    /// qualifying file; markup is checked first.
    pub fn discover(options: &DiscoveryOptions) -> Result<Self> {
        let markup_files = find_files(
            SourceRole::Markup,
            &options.markup_root,
            &options.markup_patterns,
            &options.excluded_dirs,
        )?;
        let stylesheet_files = find_files(
            SourceRole::Stylesheet,
            &options.stylesheet_root,
            &options.stylesheet_patterns,
            &options.excluded_dirs,
        )?;

        tracing::info!(
            target: targets::DISCOVERY,
            markup = markup_files.len(),
            stylesheets = stylesheet_files.len(),
            "discovered source files"
        );

        Ok(Self {
            markup_files,
            stylesheet_files,
        })
    }

    /// Build a set from explicit file lists, in the given order.
    pub fn from_files(markup_files: Vec<PathBuf>, stylesheet_files: Vec<PathBuf>) -> Self {
        Self {
            markup_files,
            stylesheet_files,
        }
    }

    pub fn markup_files(&self) -> &[PathBuf] {
        &self.markup_files
    }

    pub fn stylesheet_files(&self) -> &[PathBuf] {
        &self.stylesheet_files
    }
}

fn find_files(
    role: SourceRole,
    root: &Path,
    patterns: &[String],
    excluded_dirs: &[String],
) -> Result<Vec<PathBuf>> {
    let Ok(root) = canonicalize(root) else {
        return Err(Error::invalid_input_path(role, root));
    };

    let options = WalkDirOptions::new()
        .globs(patterns.iter().cloned())
        .exclude_dirs(excluded_dirs.iter().cloned());
    let walker = match WalkDir::with_options(&root, options) {
        Ok(walker) => walker,
        Err(err) if err.kind() == crate::file::FileErrorKind::NotDirectory => {
            return Err(Error::invalid_input_path(role, root));
        }
        Err(err) => return Err(err.into()),
    };

    let files = walker.collect_sorted()?;
    tracing::debug!(
        target: targets::DISCOVERY,
        %role,
        root = %root.display(),
        count = files.len(),
        "walked source root"
    );

    if files.is_empty() {
        return Err(Error::invalid_input_path(role, root));
    }
    Ok(files)
}
