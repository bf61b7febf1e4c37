//! Unabstract - replace SCSS class abstractions with their Tailwind utilities.
//!
//! Stylesheets that wrap utility classes in named selectors (`@apply`,
//! `@extend`) are resolved into a selector to utility-class mapping; markup
//! templates are then scanned for class attributes using those selectors and
//! rewritten in place, one confirmed line at a time.
//!
//! # Example
//!
//! ```no_run
//! use unabstract::{DiscoveryOptions, Unabstracter};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut run = Unabstracter::new(&DiscoveryOptions::new("templates", "assets/scss"))?;
//!     run.prepare()?;
//!
//!     let candidates: Vec<_> = run.candidates().collect::<Result<_, _>>()?;
//!     for candidate in &candidates {
//!         run.replace(candidate)?;
//!     }
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod config;
pub mod discovery;
pub mod file;
pub mod logging;
pub mod markup;

mod engine;
mod error;

pub use config::UnabstractConfig;
pub use discovery::{DiscoveryOptions, SourceSet};
pub use engine::Unabstracter;
pub use error::{Error, Result, SourceRole};
pub use markup::{CandidateMatcher, ReplacementCandidate, Replacer};

/// Stylesheet model and resolution.
pub mod style {
    pub use unabstract_style::*;
}
