//! Violation position resolution.
//!
//! Resolution parses a path expression, builds a position-tagged tree from
//! the raw source, and walks the tree to the best line it can find. Only the
//! setup can fail; the walk itself always produces a line.

pub mod finder;
pub mod walker;

pub use finder::{resolve_line, resolve_walk, LineNumberFinder, ResolveError};
pub use walker::{Walk, WalkState, Walker};
