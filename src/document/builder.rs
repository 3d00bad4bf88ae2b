//! Document tree building with line preservation.
//!
//! The builder feeds the source through `yaml-rust2`'s event parser and
//! assembles a [`Node`] tree from the marked events, so every node keeps the
//! line its event was reported on. JSON is valid YAML flow syntax and goes
//! through the same path.
//!
//! # Example
//!
//! ```
//! use iacline::document::builder::build_document;
//!
//! let doc = build_document(b"kind: Pod\nmetadata:\n  name: web\n").unwrap();
//! let root = doc.content().unwrap();
//!
//! let (key, _) = root.get_entry("metadata").unwrap();
//! assert_eq!(key.line(), 2);
//! ```

use super::error::DocumentParseError;
use super::node::Node;
use yaml_rust2::parser::{Event, MarkedEventReceiver, Parser};
use yaml_rust2::scanner::{Marker, ScanError, TScalarStyle};

/// A container whose children are still being received.
enum Frame {
    Mapping {
        line: usize,
        entries: Vec<(Node, Node)>,
        pending_key: Option<Node>,
    },
    Sequence {
        line: usize,
        items: Vec<Node>,
    },
}

/// Event receiver assembling the first document of a stream.
#[derive(Default)]
struct TreeBuilder {
    stack: Vec<Frame>,
    root: Option<Node>,
}

impl TreeBuilder {
    /// Attaches a finished node to the innermost open container.
    fn attach(&mut self, node: Node) {
        match self.stack.last_mut() {
            Some(Frame::Mapping {
                entries,
                pending_key,
                ..
            }) => match pending_key.take() {
                Some(key) => entries.push((key, node)),
                None => *pending_key = Some(node),
            },
            Some(Frame::Sequence { items, .. }) => items.push(node),
            None => {
                if self.root.is_none() {
                    self.root = Some(node);
                }
            }
        }
    }

    /// Line for an implicit null, which the parser marks at the next token.
    ///
    /// A missing mapping value takes its key's line; a bare `-` entry takes
    /// the previous element's line, or the sequence's own for the first one.
    fn implicit_null_line(&self, marked: usize) -> usize {
        match self.stack.last() {
            Some(Frame::Mapping {
                pending_key: Some(key),
                ..
            }) => key.line(),
            Some(Frame::Sequence { line, items }) => {
                items.last().map(Node::line).unwrap_or(*line)
            }
            _ => marked,
        }
    }

    /// Closes the innermost container and attaches it to its parent.
    fn close(&mut self) {
        let node = match self.stack.pop() {
            Some(Frame::Mapping {
                line,
                mut entries,
                pending_key,
            }) => {
                // A dangling key only happens on truncated streams
                if let Some(key) = pending_key {
                    let line = key.line();
                    entries.push((key, Node::scalar(line, "")));
                }
                Node::Mapping { line, entries }
            }
            Some(Frame::Sequence { line, items }) => Node::Sequence { line, items },
            None => return,
        };
        self.attach(node);
    }

    fn finish(self) -> Node {
        let line = self.root.as_ref().map(Node::line).unwrap_or(1);
        Node::Document {
            line,
            content: self.root.map(Box::new),
        }
    }
}

impl MarkedEventReceiver for TreeBuilder {
    fn on_event(&mut self, ev: Event, mark: Marker) {
        let line = mark.line();
        match ev {
            Event::Scalar(value, style, ..) => {
                // Plain scalars are never empty in source, so this is an implicit null
                let line = if value.is_empty() && style == TScalarStyle::Plain {
                    self.implicit_null_line(line)
                } else {
                    line
                };
                self.attach(Node::Scalar { line, value })
            }
            Event::Alias(..) => self.attach(Node::scalar(line, "")),
            Event::SequenceStart(..) => self.stack.push(Frame::Sequence {
                line,
                items: Vec::new(),
            }),
            Event::MappingStart(..) => self.stack.push(Frame::Mapping {
                line,
                entries: Vec::new(),
                pending_key: None,
            }),
            Event::SequenceEnd | Event::MappingEnd => self.close(),
            _ => {}
        }
    }
}

impl From<ScanError> for DocumentParseError {
    fn from(err: ScanError) -> Self {
        let marker = err.marker();
        DocumentParseError::Syntax {
            line: marker.line(),
            column: marker.col() + 1,
            message: err.info().to_string(),
        }
    }
}

/// Parses raw source bytes into a position-tagged document tree.
///
/// Only the first document of a multi-document stream is built. A document
/// that parses but holds no nodes (for example, only comments) yields a
/// [`Node::Document`] whose content is `None`.
///
/// # Errors
///
/// This function will return an error if:
/// - `data` is empty
/// - `data` is not valid UTF-8
/// - The YAML/JSON parser rejects the text
///
/// # Examples
///
/// ```
/// use iacline::document::builder::build_document;
/// use iacline::document::DocumentParseError;
///
/// assert_eq!(build_document(b""), Err(DocumentParseError::Empty));
/// assert!(build_document(b"key: [unclosed").is_err());
/// ```
pub fn build_document(data: &[u8]) -> Result<Node, DocumentParseError> {
    if data.is_empty() {
        return Err(DocumentParseError::Empty);
    }
    let source = std::str::from_utf8(data)?;

    let mut builder = TreeBuilder::default();
    let mut parser = Parser::new_from_str(source);
    parser.load(&mut builder, false)?;

    Ok(builder.finish())
}

#[cfg(test)]
mod tests {
    use super::*;

    const POD: &str = "apiVersion: v1
kind: Pod
metadata:
  name: web
spec:
  containers:
    - name: app
      image: nginx
    - name: sidecar
      image: envoy
";

    #[test]
    fn test_build_scalar_lines() {
        let doc = build_document(POD.as_bytes()).unwrap();
        let root = doc.content().unwrap();

        let (key, value) = root.get_entry("kind").unwrap();
        assert_eq!(key.line(), 2);
        assert_eq!(value.as_scalar(), Some("Pod"));
        assert_eq!(value.line(), 2);
    }

    #[test]
    fn test_build_nested_mapping_lines() {
        let doc = build_document(POD.as_bytes()).unwrap();
        let root = doc.content().unwrap();

        let (key, metadata) = root.get_entry("metadata").unwrap();
        assert_eq!(key.line(), 3);
        assert!(matches!(metadata, Node::Mapping { .. }));
        assert_eq!(metadata.line(), 4);

        let (name_key, _) = metadata.get_entry("name").unwrap();
        assert_eq!(name_key.line(), 4);
    }

    #[test]
    fn test_build_sequence_element_lines() {
        let doc = build_document(POD.as_bytes()).unwrap();
        let (_, spec) = doc.content().unwrap().get_entry("spec").unwrap();
        let (_, containers) = spec.get_entry("containers").unwrap();

        match containers {
            Node::Sequence { items, .. } => {
                assert_eq!(items.len(), 2);
                assert_eq!(items[0].line(), 7);
                assert_eq!(items[1].line(), 9);
                let (image, _) = items[1].get_entry("image").unwrap();
                assert_eq!(image.line(), 10);
            }
            _ => panic!("Expected sequence"),
        }
    }

    #[test]
    fn test_build_preserves_key_order() {
        let doc = build_document(POD.as_bytes()).unwrap();
        match doc.content().unwrap() {
            Node::Mapping { entries, .. } => {
                let keys: Vec<_> = entries.iter().filter_map(|(k, _)| k.as_scalar()).collect();
                assert_eq!(keys, vec!["apiVersion", "kind", "metadata", "spec"]);
            }
            _ => panic!("Expected mapping"),
        }
    }

    #[test]
    fn test_build_json_document() {
        let json = "{\n  \"metadata\": {\n    \"name\": \"web\"\n  },\n  \"items\": [1, 2]\n}\n";
        let doc = build_document(json.as_bytes()).unwrap();
        let root = doc.content().unwrap();

        let (_, metadata) = root.get_entry("metadata").unwrap();
        let (name, _) = metadata.get_entry("name").unwrap();
        assert_eq!(name.line(), 3);

        let (items_key, items) = root.get_entry("items").unwrap();
        assert_eq!(items_key.line(), 5);
        assert_eq!(items.get_item(1).map(Node::line), Some(5));
    }

    #[test]
    fn test_build_only_first_document() {
        let yaml = "kind: Service\n---\nkind: Deployment\n";
        let doc = build_document(yaml.as_bytes()).unwrap();
        let (_, kind) = doc.content().unwrap().get_entry("kind").unwrap();
        assert_eq!(kind.as_scalar(), Some("Service"));
    }

    #[test]
    fn test_build_comment_only_document_has_no_content() {
        let doc = build_document(b"# nothing here\n").unwrap();
        assert!(matches!(doc, Node::Document { .. }));
        assert!(doc.content().is_none());
    }

    #[test]
    fn test_build_null_mapping_value_takes_key_line() {
        let yaml = "metadata:\n  labels:\n\nspec:\n  replicas: 2\n";
        let doc = build_document(yaml.as_bytes()).unwrap();
        let (_, metadata) = doc.content().unwrap().get_entry("metadata").unwrap();
        let (key, labels) = metadata.get_entry("labels").unwrap();
        assert_eq!(key.line(), 2);
        assert_eq!(labels.as_scalar(), Some(""));
        assert_eq!(labels.line(), 2);
    }

    #[test]
    fn test_build_null_value_at_end_of_input_takes_key_line() {
        let doc = build_document(b"spec:\n  securityContext:\n").unwrap();
        let (_, spec) = doc.content().unwrap().get_entry("spec").unwrap();
        let (_, context) = spec.get_entry("securityContext").unwrap();
        assert_eq!(context.line(), 2);
    }

    #[test]
    fn test_build_bare_sequence_entries_take_preceding_line() {
        let yaml = "containers:\n  -\n  - name: b\n  -\n";
        let doc = build_document(yaml.as_bytes()).unwrap();
        let (_, containers) = doc.content().unwrap().get_entry("containers").unwrap();
        match containers {
            Node::Sequence { line, items } => {
                assert_eq!(*line, 2);
                assert_eq!(items.len(), 3);
                assert_eq!(items[0].line(), 2);
                assert_eq!(items[1].line(), 3);
                // Later bare entries take the previous element's line
                assert_eq!(items[2].line(), 3);
            }
            _ => panic!("Expected sequence"),
        }
    }

    #[test]
    fn test_build_quoted_empty_value_keeps_its_position() {
        let doc = build_document(b"name: \"\"\nkind: Pod\n").unwrap();
        let (_, name) = doc.content().unwrap().get_entry("name").unwrap();
        assert_eq!(name.as_scalar(), Some(""));
        assert_eq!(name.line(), 1);
    }

    #[test]
    fn test_build_alias_becomes_empty_scalar() {
        let yaml = "base: &base\n  cpu: 1\nother: *base\n";
        let doc = build_document(yaml.as_bytes()).unwrap();
        let (_, other) = doc.content().unwrap().get_entry("other").unwrap();
        assert_eq!(other.as_scalar(), Some(""));
        assert_eq!(other.line(), 3);
    }

    #[test]
    fn test_build_empty_input_fails() {
        assert_eq!(build_document(b""), Err(DocumentParseError::Empty));
    }

    #[test]
    fn test_build_invalid_utf8_fails() {
        let result = build_document(&[b'a', b':', b' ', 0xff, 0xfe]);
        assert!(matches!(result, Err(DocumentParseError::Encoding(_))));
    }

    #[test]
    fn test_build_malformed_document_reports_position() {
        let result = build_document(b"metadata:\n  name: [web\n");
        match result {
            Err(DocumentParseError::Syntax { line, message, .. }) => {
                assert!(line >= 2);
                assert!(!message.is_empty());
            }
            other => panic!("Expected syntax error, got {:?}", other),
        }
    }
}
