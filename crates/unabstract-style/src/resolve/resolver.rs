//! Abstraction resolution over stylesheet node forests.

use std::path::Path;

use crate::resolve::abstraction::{AbstractionMap, Resolution, Warning, WarningReason};
use crate::rules::{StyleNode, StyleSheet};
use crate::selector::{SelectorGroup, SelectorPath, extract_class_name};
use crate::{Error, Result};

/// Builds the selector to utility-class mapping for one run.
///
/// The resolver owns the abstraction map and the warning list while
/// stylesheets are folded into it, in the order they are given. Call
/// [`finish`](Self::finish) to freeze the result.
///
/// # Example
///
/// ```ignore
/// let mut resolver = AbstractionResolver::new();
/// for sheet in &stylesheets {
///     resolver.resolve_stylesheet(sheet)?;
/// }
/// let resolution = resolver.finish();
/// for warning in &resolution.warnings {
///     eprintln!("WARNING: {}.", warning);
/// }
/// ```
#[derive(Debug, Default)]
pub struct AbstractionResolver {
    abstractions: AbstractionMap,
    warnings: Vec<Warning>,
}

impl AbstractionResolver {
    /// Create an empty resolver.
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold a parsed stylesheet into the mapping.
    ///
    /// Stylesheets without a source path are attributed to `<inline>`.
    pub fn resolve_stylesheet(&mut self, sheet: &StyleSheet) -> Result<()> {
        let source = sheet
            .source_path
            .as_deref()
            .unwrap_or_else(|| Path::new("<inline>"));
        self.resolve(&sheet.nodes, source)
    }

    /// Fold a node forest from `source_file` into the mapping.
    ///
    /// # Errors
    ///
    /// - [`Error::UnhandledRuleKind`] for an `@include` or import inside a
    ///   class rule.
    /// - [`Error::NotAClassSelector`] when a class selector has no name.
    pub fn resolve(&mut self, forest: &[StyleNode], source_file: &Path) -> Result<()> {
        tracing::debug!(file = %source_file.display(), "resolving stylesheet");
        self.walk(forest, source_file, None)
    }

    /// Abstractions collected so far.
    pub fn abstractions(&self) -> &AbstractionMap {
        &self.abstractions
    }

    /// Warnings collected so far, in discovery order.
    pub fn warnings(&self) -> &[Warning] {
        &self.warnings
    }

    /// Freeze the collected state.
    pub fn finish(self) -> Resolution {
        Resolution {
            abstractions: self.abstractions,
            warnings: self.warnings,
        }
    }

    /// Depth-first, pre-order traversal. `selectors` are those of the
    /// closest enclosing rule; block at-rules clear them.
    fn walk(
        &mut self,
        nodes: &[StyleNode],
        source_file: &Path,
        selectors: Option<&[SelectorGroup]>,
    ) -> Result<()> {
        for node in nodes {
            match node {
                StyleNode::Rule(rule) => {
                    if !rule.children.is_empty() {
                        self.walk(&rule.children, source_file, Some(&rule.selectors))?;
                    }
                }
                StyleNode::AtBlock(block) => {
                    if !block.children.is_empty() {
                        self.walk(&block.children, source_file, None)?;
                    }
                }
                StyleNode::Directive(_)
                | StyleNode::Extend(_)
                | StyleNode::Assign(_)
                | StyleNode::Custom(_)
                | StyleNode::Include(_)
                | StyleNode::Import(_) => match selectors {
                    Some(selectors) => self.classify(node, selectors, source_file)?,
                    None => tracing::trace!(
                        kind = node.kind(),
                        location = %node.location(),
                        "body node outside of a rule"
                    ),
                },
            }
        }

        Ok(())
    }

    /// Record what a body node contributes to every class selector of its rule.
    fn classify(
        &mut self,
        node: &StyleNode,
        selectors: &[SelectorGroup],
        source_file: &Path,
    ) -> Result<()> {
        for group in selectors {
            for path in group.class_paths() {
                let selector = extract_class_name(path)?;
                let entry = self.abstractions.entry(selector.clone()).or_default();

                match node {
                    StyleNode::Directive(directive) if directive.is_apply() => {
                        entry.utility_classes = Some(collapse_whitespace(&directive.operand));
                    }
                    StyleNode::Directive(directive) => {
                        tracing::trace!(%selector, name = %directive.name, "ignoring directive");
                    }
                    StyleNode::Extend(extend) => {
                        for target in &extend.targets {
                            entry.extends = Some(extend_target_name(target)?);
                        }
                    }
                    StyleNode::Assign(_) | StyleNode::Custom(_) => {
                        tracing::warn!(
                            %selector,
                            file = %source_file.display(),
                            location = %node.location(),
                            "custom CSS cannot be un-abstracted"
                        );
                        self.warnings.push(Warning {
                            reason: WarningReason::CustomCss,
                            source_file: source_file.to_path_buf(),
                            selector,
                            location: node.location(),
                        });
                    }
                    StyleNode::Include(_) | StyleNode::Import(_) => {
                        return Err(Error::unhandled_rule_kind(
                            node.kind(),
                            source_file,
                            node.location(),
                        ));
                    }
                    // Containers are descended into by `walk`.
                    StyleNode::Rule(_) | StyleNode::AtBlock(_) => {}
                }
            }
        }

        Ok(())
    }
}

/// Collapse whitespace runs to single spaces and trim.
fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Name recorded for an `@extend` target: its class name, or for
/// placeholders and other non-class selectors the first name fragment.
fn extend_target_name(target: &SelectorPath) -> Result<String> {
    if target.has_class_marker() {
        return extract_class_name(target);
    }

    Ok(target
        .first_name()
        .map(str::to_string)
        .unwrap_or_else(|| target.to_string()))
}
