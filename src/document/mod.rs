//! Position-aware document trees.
//!
//! This module parses raw YAML or JSON bytes into a [`Node`] tree that keeps
//! the 1-based source line of every mapping, sequence, key and scalar.

pub mod builder;
pub mod error;
pub mod node;

pub use builder::build_document;
pub use error::DocumentParseError;
pub use node::Node;
