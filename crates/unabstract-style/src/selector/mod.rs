//! Selector types and class name extraction.

mod extract;
mod types;

pub use extract::extract_class_name;
pub use types::*;
