//! Traversal steps produced from a path expression.

use std::fmt;

/// One segment of a path expression.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Step {
    /// Mapping key (`name`)
    Key(String),
    /// Sequence element stored under a mapping key (`name[index]`)
    IndexedKey(String, usize),
}

impl Step {
    /// Returns the mapping key this step looks up.
    pub fn name(&self) -> &str {
        match self {
            Step::Key(name) | Step::IndexedKey(name, _) => name,
        }
    }

    /// Returns the sequence index, if the step addresses an element.
    pub fn index(&self) -> Option<usize> {
        match self {
            Step::Key(_) => None,
            Step::IndexedKey(_, index) => Some(*index),
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Step::Key(name) => write!(f, "{}", name),
            Step::IndexedKey(name, index) => write!(f, "{}[{}]", name, index),
        }
    }
}
