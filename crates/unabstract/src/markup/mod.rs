//! Markup side of a run: finding abstraction usages and rewriting them.

mod candidate;
mod matcher;
mod replace;

pub use candidate::ReplacementCandidate;
pub use matcher::{CandidateMatcher, line_qualifies};
pub use replace::{Replacer, replace};
