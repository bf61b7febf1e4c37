//! Run orchestration.

use unabstract_style::resolve::{AbstractionMap, AbstractionResolver, Resolution, Warning};
use unabstract_style::rules::StyleSheet;

use crate::Result;
use crate::discovery::{DiscoveryOptions, SourceSet};
use crate::logging::targets;
use crate::markup::{CandidateMatcher, ReplacementCandidate, Replacer};

/// One un-abstraction run over a markup tree and a stylesheet tree.
///
/// The run discovers its files up front, resolves every stylesheet in
/// [`prepare`](Self::prepare), and then hands out candidates for the caller
/// to accept or skip.
///
/// # Example
///
/// ```ignore
/// use unabstract::{DiscoveryOptions, Unabstracter};
///
/// let mut run = Unabstracter::new(&DiscoveryOptions::new("templates", "assets/scss"))?;
/// for warning in run.prepare()? {
///     println!("WARNING: {}.", warning);
/// }
///
/// let candidates: Vec<_> = run.candidates().collect();
/// for candidate in candidates {
///     run.replace(&candidate?)?;
/// }
/// ```
#[derive(Debug)]
pub struct Unabstracter {
    sources: SourceSet,
    resolution: Resolution,
    replacer: Replacer,
}

impl Unabstracter {
    /// Discover the files of a run.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidInputPath`](crate::Error::InvalidInputPath) when
    /// either root has no qualifying files. Nothing is parsed yet.
    pub fn new(options: &DiscoveryOptions) -> Result<Self> {
        Ok(Self::from_sources(SourceSet::discover(options)?))
    }

    /// Start a run over an already known set of files.
    pub fn from_sources(sources: SourceSet) -> Self {
        Self {
            sources,
            resolution: Resolution::default(),
            replacer: Replacer::new(),
        }
    }

    /// Check candidates without writing them.
    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.replacer = if dry_run {
            Replacer::dry_run()
        } else {
            Replacer::new()
        };
        self
    }

    /// Parse and resolve every stylesheet, in discovery order.
    ///
    /// Resolution is all-or-nothing: on error the previous state is kept.
    /// Calling this again starts from scratch.
    pub fn prepare(&mut self) -> Result<&[Warning]> {
        let mut resolver = AbstractionResolver::new();

        for path in self.sources.stylesheet_files() {
            let sheet = StyleSheet::from_file(path)?;
            tracing::debug!(
                target: targets::UNABSTRACT,
                file = %path.display(),
                nodes = sheet.len(),
                "parsed stylesheet"
            );
            resolver.resolve_stylesheet(&sheet)?;
        }

        self.resolution = resolver.finish();
        tracing::info!(
            target: targets::UNABSTRACT,
            abstractions = self.resolution.abstractions.len(),
            warnings = self.resolution.warnings.len(),
            "resolved stylesheets"
        );
        Ok(&self.resolution.warnings)
    }

    pub fn abstractions(&self) -> &AbstractionMap {
        &self.resolution.abstractions
    }

    pub fn warnings(&self) -> &[Warning] {
        &self.resolution.warnings
    }

    /// Effective utility classes for a selector.
    pub fn flatten(&self, selector: &str) -> String {
        self.resolution.flatten(selector)
    }

    pub fn stylesheet_count(&self) -> usize {
        self.sources.stylesheet_files().len()
    }

    pub fn markup_count(&self) -> usize {
        self.sources.markup_files().len()
    }

    pub fn sources(&self) -> &SourceSet {
        &self.sources
    }

    /// Lazily match abstractions against the markup files.
    pub fn candidates(&self) -> CandidateMatcher<'_> {
        CandidateMatcher::new(&self.resolution.abstractions, self.sources.markup_files())
    }

    /// Apply one candidate.
    pub fn replace(&self, candidate: &ReplacementCandidate) -> Result<()> {
        self.replacer.apply(candidate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::PathBuf;

    use tempfile::tempdir;

    use crate::Error;

    #[test]
    fn prepare_folds_stylesheets_in_order() {
        let dir = tempdir().unwrap();
        let first = dir.path().join("a.scss");
        let second = dir.path().join("b.scss");
        let markup = dir.path().join("page.html.twig");
        fs::write(&first, ".card { @apply p-4; }\n").unwrap();
        fs::write(&second, ".card-alt { @extend .card; @apply shadow; }\n.x { color: red; }\n").unwrap();
        fs::write(&markup, "<div class=\"card-alt\"></div>\n").unwrap();

        let mut run = Unabstracter::from_sources(SourceSet::from_files(
            vec![markup],
            vec![first, second.clone()],
        ));
        let warnings = run.prepare().unwrap();
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].source_file, second);

        let names: Vec<_> = run.abstractions().keys().cloned().collect();
        assert_eq!(names, vec!["card", "card-alt", "x"]);
        assert_eq!(run.flatten("card-alt"), "shadow p-4");
        assert_eq!(run.stylesheet_count(), 2);
        assert_eq!(run.markup_count(), 1);
    }

    #[test]
    fn failed_prepare_keeps_previous_state() {
        let dir = tempdir().unwrap();
        let sheet = dir.path().join("a.scss");
        fs::write(&sheet, ".card { @apply p-4; }\n").unwrap();

        let mut run = Unabstracter::from_sources(SourceSet::from_files(Vec::new(), vec![sheet.clone()]));
        run.prepare().unwrap();

        fs::write(&sheet, ".card { @apply p-4; }\n.btn { @include ring; }\n").unwrap();
        let err = run.prepare().unwrap_err();
        assert!(matches!(
            err,
            Error::Style(unabstract_style::Error::UnhandledRuleKind { .. })
        ));
        assert_eq!(run.abstractions().len(), 1);
    }

    #[test]
    fn missing_stylesheet_aborts() {
        let mut run = Unabstracter::from_sources(SourceSet::from_files(
            Vec::new(),
            vec![PathBuf::from("/nonexistent/app.scss")],
        ));
        assert!(matches!(run.prepare(), Err(Error::Style(_))));
    }

    #[test]
    fn dry_run_replace_is_a_no_op() {
        let dir = tempdir().unwrap();
        let sheet = dir.path().join("a.scss");
        let markup = dir.path().join("page.html.twig");
        fs::write(&sheet, ".card { @apply p-4; }\n").unwrap();
        fs::write(&markup, "<div class=\"card\"></div>\n").unwrap();

        let mut run = Unabstracter::from_sources(SourceSet::from_files(vec![markup.clone()], vec![sheet]))
            .dry_run(true);
        run.prepare().unwrap();

        let candidates: Vec<_> = run.candidates().collect::<Result<_>>().unwrap();
        assert_eq!(candidates.len(), 1);
        run.replace(&candidates[0]).unwrap();
        assert_eq!(fs::read_to_string(&markup).unwrap(), "<div class=\"card\"></div>\n");
    }
}
