//! Abstraction resolution.
//!
//! Walks parsed stylesheets and records, for every class selector, the
//! utility classes it applies and the selector it extends.

mod abstraction;
mod flatten;
mod resolver;

pub use abstraction::{Abstraction, AbstractionMap, Resolution, Warning, WarningReason};
pub use flatten::flatten;
pub use resolver::AbstractionResolver;
