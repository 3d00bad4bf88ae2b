//! Line number lookup for a single violation.

use super::walker::{Walk, Walker};
use crate::document::{build_document, DocumentParseError};
use crate::linepath::{parse, PathSyntaxError, Step};
use log::warn;
use thiserror::Error;

/// Errors that prevent a resolution from starting.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    #[error("invalid path: {0}")]
    Path(#[from] PathSyntaxError),
    #[error("invalid document: {0}")]
    Document(#[from] DocumentParseError),
}

/// Finds the source line of a field inside one YAML or JSON document.
///
/// The path is validated when the finder is created, so a malformed path is
/// reported before the document is ever parsed.
///
/// # Example
///
/// ```
/// use iacline::resolver::LineNumberFinder;
///
/// let source = b"kind: Pod\nspec:\n  containers:\n    - name: app\n      image: nginx\n";
/// let finder = LineNumberFinder::new("spec.containers[0].image", source, 1).unwrap();
/// assert_eq!(finder.find_line_number().unwrap(), 5);
/// ```
#[derive(Debug, Clone)]
pub struct LineNumberFinder<'a> {
    steps: Vec<Step>,
    data: &'a [u8],
    start_line: usize,
}

impl<'a> LineNumberFinder<'a> {
    /// Creates a finder for `path` inside `data`, falling back to `start_line`.
    ///
    /// # Errors
    ///
    /// Returns a [`PathSyntaxError`] if `path` is malformed.
    pub fn new(path: &str, data: &'a [u8], start_line: usize) -> Result<Self, PathSyntaxError> {
        Ok(Self {
            steps: parse(path)?,
            data,
            start_line,
        })
    }

    /// Returns the parsed traversal steps.
    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    /// Returns the fallback line supplied by the caller.
    pub fn start_line(&self) -> usize {
        self.start_line
    }

    /// Builds the document and walks it, returning the full walk outcome.
    ///
    /// # Errors
    ///
    /// Returns a [`DocumentParseError`] if the document cannot be parsed.
    pub fn walk(&self) -> Result<Walk, DocumentParseError> {
        let document = build_document(self.data)?;
        Ok(Walker::new(&self.steps, &document).walk(self.start_line))
    }

    /// Returns the best known line for the path.
    ///
    /// # Errors
    ///
    /// Returns a [`DocumentParseError`] if the document cannot be parsed.
    pub fn find_line_number(&self) -> Result<usize, DocumentParseError> {
        self.walk().map(|walk| walk.line)
    }

    /// Returns the best known line, using the start line if the document
    /// cannot be parsed.
    pub fn find_line_number_or_start(&self) -> usize {
        match self.find_line_number() {
            Ok(line) => line,
            Err(err) => {
                warn!(
                    "could not resolve line, using start line {}: {}",
                    self.start_line, err
                );
                self.start_line
            }
        }
    }
}

/// Resolves `path` inside `data` to a source line.
///
/// # Errors
///
/// Returns a [`ResolveError`] if the path is malformed or the document
/// cannot be parsed. A path that simply does not exist in the document is
/// not an error; the closest enclosing line is returned instead.
///
/// # Examples
///
/// ```
/// use iacline::resolver::resolve_line;
///
/// let source = b"metadata:\n  name: web\n";
/// assert_eq!(resolve_line(source, "metadata.name", 1).unwrap(), 2);
/// assert_eq!(resolve_line(source, "metadata.namespace", 1).unwrap(), 2);
/// assert!(resolve_line(source, "metadata[0", 1).is_err());
/// ```
pub fn resolve_line(data: &[u8], path: &str, start_line: usize) -> Result<usize, ResolveError> {
    let finder = LineNumberFinder::new(path, data, start_line)?;
    Ok(finder.find_line_number()?)
}

/// Resolves `path` inside `data` and reports where the walk stopped.
///
/// # Errors
///
/// Same as [`resolve_line`].
pub fn resolve_walk(data: &[u8], path: &str, start_line: usize) -> Result<Walk, ResolveError> {
    let finder = LineNumberFinder::new(path, data, start_line)?;
    Ok(finder.walk()?)
}
