//! Document node representation with source positions.
//!
//! Every node records the 1-based line it starts on in the original source.
//! Mappings keep their key nodes alongside their values, so a lookup can
//! report either the line a key is declared on or the line its value starts on.
//!
//! # Example
//!
//! ```
//! use iacline::document::node::Node;
//!
//! // metadata:
//! //   name: web
//! let doc = Node::Document {
//!     line: 1,
//!     content: Some(Box::new(Node::Mapping {
//!         line: 1,
//!         entries: vec![(
//!             Node::scalar(1, "metadata"),
//!             Node::Mapping {
//!                 line: 2,
//!                 entries: vec![(Node::scalar(2, "name"), Node::scalar(2, "web"))],
//!             },
//!         )],
//!     })),
//! };
//!
//! let (key, value) = doc.content().unwrap().get_entry("metadata").unwrap();
//! assert_eq!(key.line(), 1);
//! assert_eq!(value.line(), 2);
//! ```

use std::fmt;

/// The kind of a document node, without its children.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Document,
    Mapping,
    Sequence,
    Scalar,
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            NodeKind::Document => "document",
            NodeKind::Mapping => "mapping",
            NodeKind::Sequence => "sequence",
            NodeKind::Scalar => "scalar",
        };
        write!(f, "{}", name)
    }
}

/// A position-tagged node of a parsed source document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// The document root; `content` is `None` for documents without nodes
    Document {
        line: usize,
        content: Option<Box<Node>>,
    },
    /// Ordered key/value pairs, keys kept as nodes for their positions
    Mapping {
        line: usize,
        entries: Vec<(Node, Node)>,
    },
    /// Ordered elements
    Sequence { line: usize, items: Vec<Node> },
    /// Scalar text; aliases are represented as scalars with empty text
    Scalar { line: usize, value: String },
}

impl Node {
    /// Creates a scalar node.
    pub fn scalar(line: usize, value: impl Into<String>) -> Self {
        Node::Scalar {
            line,
            value: value.into(),
        }
    }

    /// Returns the 1-based source line this node starts on.
    pub fn line(&self) -> usize {
        match self {
            Node::Document { line, .. }
            | Node::Mapping { line, .. }
            | Node::Sequence { line, .. }
            | Node::Scalar { line, .. } => *line,
        }
    }

    /// Returns the kind of this node.
    pub fn kind(&self) -> NodeKind {
        match self {
            Node::Document { .. } => NodeKind::Document,
            Node::Mapping { .. } => NodeKind::Mapping,
            Node::Sequence { .. } => NodeKind::Sequence,
            Node::Scalar { .. } => NodeKind::Scalar,
        }
    }

    /// Returns the scalar text, or `None` for non-scalar nodes.
    pub fn as_scalar(&self) -> Option<&str> {
        match self {
            Node::Scalar { value, .. } => Some(value),
            _ => None,
        }
    }

    /// Returns the content of a document node.
    ///
    /// Returns `None` for empty documents and for nodes that are not documents.
    pub fn content(&self) -> Option<&Node> {
        match self {
            Node::Document { content, .. } => content.as_deref(),
            _ => None,
        }
    }

    /// Finds the first entry whose key text equals `key` exactly.
    ///
    /// Returns the key node and the value node. Non-mapping nodes never match.
    pub fn get_entry(&self, key: &str) -> Option<(&Node, &Node)> {
        match self {
            Node::Mapping { entries, .. } => entries
                .iter()
                .find(|(k, _)| k.as_scalar() == Some(key))
                .map(|(k, v)| (k, v)),
            _ => None,
        }
    }

    /// Returns the element at `index` of a sequence node.
    pub fn get_item(&self, index: usize) -> Option<&Node> {
        match self {
            Node::Sequence { items, .. } => items.get(index),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn containers() -> Node {
        Node::Sequence {
            line: 4,
            items: vec![
                Node::Mapping {
                    line: 4,
                    entries: vec![(Node::scalar(4, "name"), Node::scalar(4, "web"))],
                },
                Node::Mapping {
                    line: 6,
                    entries: vec![(Node::scalar(6, "name"), Node::scalar(6, "sidecar"))],
                },
            ],
        }
    }

    #[test]
    fn test_line_and_kind() {
        let node = containers();
        assert_eq!(node.line(), 4);
        assert_eq!(node.kind(), NodeKind::Sequence);
        assert_eq!(node.kind().to_string(), "sequence");
    }

    #[test]
    fn test_get_item_in_and_out_of_bounds() {
        let node = containers();
        assert_eq!(node.get_item(1).map(Node::line), Some(6));
        assert!(node.get_item(2).is_none());
        assert!(Node::scalar(1, "x").get_item(0).is_none());
    }

    #[test]
    fn test_get_entry_exact_match() {
        let mapping = Node::Mapping {
            line: 1,
            entries: vec![
                (Node::scalar(1, "spec"), Node::scalar(1, "a")),
                (Node::scalar(2, "specs"), Node::scalar(2, "b")),
            ],
        };
        let (key, value) = mapping.get_entry("specs").unwrap();
        assert_eq!(key.line(), 2);
        assert_eq!(value.as_scalar(), Some("b"));
        assert!(mapping.get_entry("Spec").is_none());
    }

    #[test]
    fn test_get_entry_ignores_non_scalar_keys() {
        let mapping = Node::Mapping {
            line: 1,
            entries: vec![(
                Node::Sequence {
                    line: 1,
                    items: vec![],
                },
                Node::scalar(1, "v"),
            )],
        };
        assert!(mapping.get_entry("").is_none());
    }

    #[test]
    fn test_document_content() {
        let empty = Node::Document {
            line: 1,
            content: None,
        };
        assert!(empty.content().is_none());
        assert!(containers().content().is_none());
    }
}
