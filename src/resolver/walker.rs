use crate::document::node::Node;
use crate::linepath::Step;
use log::debug;
use serde::Serialize;

/// Where a walk stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum WalkState {
    /// Matched so far, more steps remain
    Descending,
    /// Every step matched
    Resolved,
    /// A lookup or index failed; the line is the last one resolved
    FallenBack,
}

/// Outcome of replaying a path against a document tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Walk {
    pub line: usize,
    pub state: WalkState,
}

/// Replays traversal steps against a position-tagged document tree.
pub struct Walker<'a> {
    steps: &'a [Step],
    root: &'a Node,
}

impl<'a> Walker<'a> {
    pub fn new(steps: &'a [Step], root: &'a Node) -> Self {
        Walker { steps, root }
    }

    /// Walks the steps and returns the best known line.
    ///
    /// The walk never fails: when a key is missing or an index is out of
    /// range it stops and reports the last line it resolved, or `start_line`
    /// if nothing matched.
    pub fn walk(&self, start_line: usize) -> Walk {
        let mut line = start_line;

        let mut current = match self.root.content() {
            Some(content) => content,
            None => {
                debug!("document has no content, keeping line {}", line);
                return Walk {
                    line,
                    state: WalkState::FallenBack,
                };
            }
        };

        let mut state = WalkState::Descending;
        for (position, step) in self.steps.iter().enumerate() {
            let terminal = position + 1 == self.steps.len();

            let (key, value) = match current.get_entry(step.name()) {
                Some(entry) => entry,
                None => {
                    debug!(
                        "key '{}' not found in {} at line {}, keeping line {}",
                        step.name(),
                        current.kind(),
                        current.line(),
                        line
                    );
                    return Walk {
                        line,
                        state: WalkState::FallenBack,
                    };
                }
            };

            match step {
                Step::Key(_) if terminal => {
                    // Report the declaration, not whatever the value spans
                    line = key.line();
                }
                Step::Key(_) => {
                    line = value.line();
                    current = value;
                }
                Step::IndexedKey(_, index) => {
                    line = value.line();
                    match value.get_item(*index) {
                        Some(item) => {
                            line = item.line();
                            current = item;
                        }
                        None => {
                            debug!(
                                "no element {} in {} '{}' at line {}, keeping line {}",
                                index,
                                value.kind(),
                                step.name(),
                                value.line(),
                                line
                            );
                            return Walk {
                                line,
                                state: WalkState::FallenBack,
                            };
                        }
                    }
                }
            }

            if terminal {
                state = WalkState::Resolved;
            }
        }

        Walk { line, state }
    }
}
