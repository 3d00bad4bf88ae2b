//! Path expression parser.

use super::ast::Step;
use super::error::PathSyntaxError;

/// Parser for dotted/bracketed path expressions.
pub struct Parser<'a> {
    input: &'a str,
    position: usize,
}

/// Parses a path expression into traversal steps.
///
/// Shorthand for [`Parser::parse`].
pub fn parse(path: &str) -> Result<Vec<Step>, PathSyntaxError> {
    Parser::parse(path)
}

impl<'a> Parser<'a> {
    /// Creates a new parser for the given path expression.
    pub fn new(path: &'a str) -> Self {
        Self {
            input: path,
            position: 0,
        }
    }

    /// Parses the path expression into an ordered list of steps.
    ///
    /// # Errors
    ///
    /// Returns a [`PathSyntaxError`] if the path is empty, a segment has no
    /// name, or an index suffix is unterminated or not a non-negative integer.
    pub fn parse(path: &'a str) -> Result<Vec<Step>, PathSyntaxError> {
        let mut parser = Parser::new(path);
        parser.parse_path()
    }

    fn parse_path(&mut self) -> Result<Vec<Step>, PathSyntaxError> {
        if self.input.is_empty() {
            return Err(PathSyntaxError::Empty);
        }

        let mut steps = Vec::new();
        for segment in self.input.split('.') {
            steps.push(self.parse_segment(segment)?);
            // Skip the segment and its trailing separator
            self.position += segment.len() + 1;
        }

        Ok(steps)
    }

    /// Parses one `name` or `name[index]` segment.
    fn parse_segment(&self, segment: &str) -> Result<Step, PathSyntaxError> {
        let (name, suffix) = match segment.split_once('[') {
            Some((name, suffix)) => (name, Some(suffix)),
            None => (segment, None),
        };

        if name.is_empty() {
            return Err(PathSyntaxError::EmptySegment {
                path: self.input.to_string(),
                position: self.position,
            });
        }

        match suffix {
            None => Ok(Step::Key(name.to_string())),
            Some(suffix) => {
                let index = self.parse_index(segment, suffix)?;
                Ok(Step::IndexedKey(name.to_string(), index))
            }
        }
    }

    /// Parses the text following `[`, which must be digits closed by `]`.
    fn parse_index(&self, segment: &str, suffix: &str) -> Result<usize, PathSyntaxError> {
        let digits = suffix
            .strip_suffix(']')
            .ok_or_else(|| PathSyntaxError::UnterminatedIndex {
                segment: segment.to_string(),
            })?;

        let invalid = || PathSyntaxError::InvalidIndex {
            segment: segment.to_string(),
            index: digits.to_string(),
        };

        if digits.is_empty() || !digits.chars().all(|ch| ch.is_ascii_digit()) {
            return Err(invalid());
        }
        digits.parse::<usize>().map_err(|_| invalid())
    }
}
