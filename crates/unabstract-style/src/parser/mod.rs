//! SCSS parsing module.

mod scss_parser;

pub use scss_parser::parse_scss;
#[cfg(test)]
pub(crate) use scss_parser::parse_selector_groups;
