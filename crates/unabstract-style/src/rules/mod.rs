//! Stylesheet nodes and stylesheets.

mod node;
mod stylesheet;

pub use node::{
    AtBlockNode, CustomNode, Declaration, DirectiveNode, ExtendNode, ImportNode, IncludeNode,
    RuleNode, SourceLocation, StyleNode,
};
pub use stylesheet::StyleSheet;
