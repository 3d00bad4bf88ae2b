//! Error types for path expression parsing.

use thiserror::Error;

/// Errors raised while turning a path expression into traversal steps.
///
/// These are always raised before any document is touched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PathSyntaxError {
    /// The path string is empty.
    #[error("traversal information not available: path is empty")]
    Empty,
    /// A segment has no key name (`a..b`, `.a`, `[0]`).
    #[error("empty segment at position {position} in path '{path}'")]
    EmptySegment { path: String, position: usize },
    /// An index suffix is not closed by `]` at the end of its segment.
    #[error("unterminated index in segment '{segment}', expected ']'")]
    UnterminatedIndex { segment: String },
    /// An index suffix is not a non-negative integer that fits in `usize`.
    #[error("incorrect value for index in '{segment}': '{index}' is not a non-negative integer")]
    InvalidIndex { segment: String, index: String },
}
