//! SCSS abstraction resolution for un-abstracting Tailwind stylesheets.
//!
//! This crate reads SCSS files that wrap Tailwind utilities in named classes
//! and works out which utilities each class stands for:
//!
//! - **Parsing**: Tokenize SCSS into a forest of rules, at-rules and declarations
//! - **Selectors**: Class selector paths and class-name extraction
//! - **Resolution**: `@apply` and `@extend` folded into an ordered abstraction map
//!
//! # Example
//!
//! ```ignore
//! use unabstract_style::prelude::*;
//!
//! let sheet = StyleSheet::from_file("styles/app.scss")?;
//!
//! let mut resolver = AbstractionResolver::new();
//! resolver.resolve_stylesheet(&sheet)?;
//! let resolution = resolver.finish();
//!
//! assert_eq!(resolution.flatten("card"), "p-4 rounded");
//! ```

pub mod parser;
pub mod resolve;
pub mod rules;
pub mod selector;

mod error;

pub use error::{Error, Result};

/// Prelude module with commonly used types.
pub mod prelude {
    pub use crate::parser::parse_scss;
    pub use crate::resolve::{
        Abstraction, AbstractionMap, AbstractionResolver, Resolution, Warning, WarningReason,
        flatten,
    };
    pub use crate::rules::{SourceLocation, StyleNode, StyleSheet};
    pub use crate::selector::{SelectorGroup, SelectorPath, extract_class_name};
}
