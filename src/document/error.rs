//! Error types for document tree building.

use thiserror::Error;

/// Errors raised when raw bytes cannot be turned into a document tree.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DocumentParseError {
    /// No bytes were supplied.
    #[error("document is empty")]
    Empty,
    /// The bytes are not valid UTF-8.
    #[error("document is not valid UTF-8: {0}")]
    Encoding(#[from] std::str::Utf8Error),
    /// The structured-text parser rejected the document.
    #[error("malformed document at line {line}, column {column}: {message}")]
    Syntax {
        line: usize,
        column: usize,
        message: String,
    },
}
