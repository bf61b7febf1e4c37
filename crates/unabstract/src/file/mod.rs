//! File I/O for source trees.
//!
//! Walking markup and stylesheet roots, reading files as text or as lines
//! that keep their terminators, and rewriting files atomically.
//!
//! ```ignore
//! use unabstract::file::{read_lines, write_text, WalkDir, WalkDirOptions};
//!
//! let walker = WalkDir::with_options("templates", WalkDirOptions::new()
//!     .glob("*.html.twig")
//!     .exclude_dirs(["vendor"]))?;
//!
//! for path in walker.collect_sorted()? {
//!     let lines = read_lines(&path)?;
//!     write_text(&path, &lines.concat())?;
//! }
//! ```

mod directory;
mod error;
mod operations;
mod writer;

pub use directory::{WalkDir, WalkDirOptions, WalkEntry};
pub use error::{FileError, FileErrorKind, FileResult};
pub use operations::{canonicalize, read_lines, read_text, split_lines, write_text};
pub use writer::AtomicWriter;
