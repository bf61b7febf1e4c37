//! Stylesheet node definitions.

use std::fmt;

use crate::selector::{SelectorGroup, SelectorPath};

/// Position of a node in its source text (1-indexed).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SourceLocation {
    /// Line number.
    pub line: u32,
    /// Column number.
    pub column: u32,
}

impl SourceLocation {
    /// Create a location.
    pub const fn new(line: u32, column: u32) -> Self {
        Self { line, column }
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// A node of a parsed stylesheet.
///
/// Rules and block at-rules carry children; every other variant is a body
/// node that only has meaning inside a rule.
#[derive(Debug, Clone, PartialEq)]
pub enum StyleNode {
    /// A qualified rule: `selectors { children }`.
    Rule(RuleNode),
    /// A block at-rule without selectors of its own (`@media`, `@supports`).
    AtBlock(AtBlockNode),
    /// A statement at-rule such as `@apply p-4;` or `@tailwind base;`.
    Directive(DirectiveNode),
    /// `@extend .other;`
    Extend(ExtendNode),
    /// `property: value;` or `$variable: value;`
    Assign(Declaration),
    /// CSS that is present but is not a plain assignment.
    Custom(CustomNode),
    /// `@include mixin;`
    Include(IncludeNode),
    /// `@import`, `@use` or `@forward`.
    Import(ImportNode),
}

impl StyleNode {
    /// Short name of the node kind, used in diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            StyleNode::Rule(_) => "rule",
            StyleNode::AtBlock(_) => "at-block",
            StyleNode::Directive(_) => "directive",
            StyleNode::Extend(_) => "extend",
            StyleNode::Assign(_) => "assign",
            StyleNode::Custom(_) => "custom",
            StyleNode::Include(_) => "include",
            StyleNode::Import(_) => "import",
        }
    }

    /// Where the node starts in its source.
    pub fn location(&self) -> SourceLocation {
        match self {
            StyleNode::Rule(n) => n.location,
            StyleNode::AtBlock(n) => n.location,
            StyleNode::Directive(n) => n.location,
            StyleNode::Extend(n) => n.location,
            StyleNode::Assign(n) => n.location,
            StyleNode::Custom(n) => n.location,
            StyleNode::Include(n) => n.location,
            StyleNode::Import(n) => n.location,
        }
    }

    /// Nested nodes, empty for body nodes.
    pub fn children(&self) -> &[StyleNode] {
        match self {
            StyleNode::Rule(n) => &n.children,
            StyleNode::AtBlock(n) => &n.children,
            _ => &[],
        }
    }

    /// Create an `@apply` directive.
    pub fn apply(classes: impl Into<String>) -> Self {
        StyleNode::Directive(DirectiveNode {
            name: "apply".to_string(),
            operand: classes.into(),
            location: SourceLocation::default(),
        })
    }

    /// Create an `@extend` of a single class.
    pub fn extend_class(class: impl Into<String>) -> Self {
        StyleNode::Extend(ExtendNode {
            targets: vec![SelectorPath::class(class)],
            location: SourceLocation::default(),
        })
    }

    /// Create a property assignment.
    pub fn assign(property: impl Into<String>, value: impl Into<String>) -> Self {
        StyleNode::Assign(Declaration {
            property: property.into(),
            value: value.into(),
            location: SourceLocation::default(),
        })
    }
}

/// A qualified rule.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RuleNode {
    /// Comma-separated selectors.
    pub selectors: Vec<SelectorGroup>,
    /// Body, in source order.
    pub children: Vec<StyleNode>,
    /// Start of the selector.
    pub location: SourceLocation,
}

impl RuleNode {
    /// Create a rule for a single class selector.
    pub fn for_class(class: impl Into<String>, children: Vec<StyleNode>) -> Self {
        Self {
            selectors: vec![SelectorGroup::class(class)],
            children,
            location: SourceLocation::default(),
        }
    }
}

/// A block at-rule.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AtBlockNode {
    pub name: String,
    pub prelude: String,
    pub children: Vec<StyleNode>,
    pub location: SourceLocation,
}

/// A statement at-rule.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DirectiveNode {
    /// Lowercased at-keyword without `@`.
    pub name: String,
    /// Raw operand text, quotes removed.
    pub operand: String,
    pub location: SourceLocation,
}

impl DirectiveNode {
    /// Whether this is an `@apply` directive.
    pub fn is_apply(&self) -> bool {
        self.name == "apply"
    }
}

/// An `@extend` statement.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ExtendNode {
    pub targets: Vec<SelectorPath>,
    pub location: SourceLocation,
}

/// A property declaration.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Declaration {
    pub property: String,
    pub value: String,
    pub location: SourceLocation,
}

/// Unclassified CSS.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CustomNode {
    pub text: String,
    pub location: SourceLocation,
}

/// A mixin include.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct IncludeNode {
    pub mixin: String,
    pub location: SourceLocation,
}

/// A module import.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ImportNode {
    pub keyword: String,
    pub target: String,
    pub location: SourceLocation,
}
