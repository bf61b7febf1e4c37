//! Run configuration loaded from `unabstract.toml`.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::discovery::DiscoveryOptions;
use crate::file::read_text;
use crate::logging::targets;
use crate::{Error, Result};

/// Config file looked up in the working directory when none is given.
pub const DEFAULT_CONFIG_FILE: &str = "unabstract.toml";

/// Settings for one run. Every field is optional in the file.
///
/// ```toml
/// markup_dir = "templates"
/// stylesheet_dir = "assets/styles"
/// markup_patterns = ["*.html.twig"]
/// stylesheet_patterns = ["*.scss"]
/// exclude = ["vendor", "node_modules", "dist"]
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct UnabstractConfig {
    pub markup_dir: Option<PathBuf>,
    pub stylesheet_dir: Option<PathBuf>,
    pub markup_patterns: Vec<String>,
    pub stylesheet_patterns: Vec<String>,
    pub exclude: Vec<String>,
}

impl Default for UnabstractConfig {
    fn default() -> Self {
        Self {
            markup_dir: None,
            stylesheet_dir: None,
            markup_patterns: vec!["*.html.twig".to_string()],
            stylesheet_patterns: vec!["*.scss".to_string()],
            exclude: vec!["vendor".to_string(), "node_modules".to_string()],
        }
    }
}

impl UnabstractConfig {
    /// Parse a config from TOML text.
    pub fn from_toml(text: &str, origin: &Path) -> Result<Self> {
        toml::from_str(text).map_err(|err| Error::config(origin, err))
    }

    /// Load a config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = read_text(path).map_err(|err| Error::config(path, err))?;
        Self::from_toml(&text, path)
    }

    /// Load a config file, or fall back to defaults when it does not exist.
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            tracing::debug!(
                target: targets::UNABSTRACT,
                path = %path.display(),
                "no config file, using defaults"
            );
            return Ok(Self::default());
        }
        Self::load(path)
    }

    /// Override the roots and exclusions with values given on the command line.
    ///
    /// A non-empty `exclude` replaces the configured list.
    pub fn with_overrides(
        mut self,
        markup_dir: Option<PathBuf>,
        stylesheet_dir: Option<PathBuf>,
        exclude: Vec<String>,
    ) -> Self {
        if markup_dir.is_some() {
            self.markup_dir = markup_dir;
        }
        if stylesheet_dir.is_some() {
            self.stylesheet_dir = stylesheet_dir;
        }
        if !exclude.is_empty() {
            self.exclude = exclude;
        }
        self
    }

    /// Convert into discovery options.
    ///
    /// # Errors
    ///
    /// [`Error::Config`] when either root is unset.
    pub fn discovery_options(&self) -> Result<DiscoveryOptions> {
        let markup_root = self
            .markup_dir
            .clone()
            .ok_or_else(|| Error::config(DEFAULT_CONFIG_FILE, "markup directory is not set"))?;
        let stylesheet_root = self
            .stylesheet_dir
            .clone()
            .ok_or_else(|| Error::config(DEFAULT_CONFIG_FILE, "stylesheet directory is not set"))?;

        Ok(DiscoveryOptions {
            markup_root,
            stylesheet_root,
            markup_patterns: self.markup_patterns.clone(),
            stylesheet_patterns: self.stylesheet_patterns.clone(),
            excluded_dirs: self.exclude.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    use tempfile::tempdir;

    #[test]
    fn loads_toml_config() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("unabstract.toml");
        fs::write(
            &path,
            "markup_dir = \"templates\"\nstylesheet_dir = \"styles\"\nexclude = [\"dist\"]\n",
        )
        .unwrap();

        let config = UnabstractConfig::load(&path).unwrap();
        assert_eq!(config.markup_dir, Some(PathBuf::from("templates")));
        assert_eq!(config.stylesheet_dir, Some(PathBuf::from("styles")));
        assert_eq!(config.exclude, vec!["dist"]);
        assert_eq!(config.markup_patterns, vec!["*.html.twig"]);
    }

    #[test]
    fn defaults_when_empty() {
        let config = UnabstractConfig::from_toml("", Path::new("x.toml")).unwrap();
        assert_eq!(config, UnabstractConfig::default());
        assert_eq!(config.exclude, vec!["vendor", "node_modules"]);
    }

    #[test]
    fn defaults_when_missing_file() {
        let dir = tempdir().unwrap();
        let config = UnabstractConfig::load_or_default(dir.path().join("unabstract.toml")).unwrap();
        assert_eq!(config, UnabstractConfig::default());
    }

    #[test]
    fn invalid_toml_is_config_error() {
        let err = UnabstractConfig::from_toml("exclude = 3", Path::new("bad.toml")).unwrap_err();
        match err {
            Error::Config { path, .. } => assert_eq!(path, PathBuf::from("bad.toml")),
            other => panic!("expected config error, got {:?}", other),
        }
    }

    #[test]
    fn command_line_overrides() {
        let config = UnabstractConfig {
            markup_dir: Some(PathBuf::from("templates")),
            ..UnabstractConfig::default()
        }
        .with_overrides(None, Some(PathBuf::from("scss")), vec!["build".to_string()]);

        assert_eq!(config.markup_dir, Some(PathBuf::from("templates")));
        assert_eq!(config.stylesheet_dir, Some(PathBuf::from("scss")));
        assert_eq!(config.exclude, vec!["build"]);

        let kept = config.clone().with_overrides(None, None, Vec::new());
        assert_eq!(kept.exclude, vec!["build"]);
    }

    #[test]
    fn discovery_options_need_roots() {
        assert!(UnabstractConfig::default().discovery_options().is_err());

        let options = UnabstractConfig::default()
            .with_overrides(Some("t".into()), Some("s".into()), Vec::new())
            .discovery_options()
            .unwrap();
        assert_eq!(options.markup_root, PathBuf::from("t"));
        assert_eq!(options.excluded_dirs, vec!["vendor", "node_modules"]);
    }
}
