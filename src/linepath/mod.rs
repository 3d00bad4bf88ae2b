//! Path expressions naming a field inside a normalized resource.
//!
//! A policy engine reports the violating field of a resource as a dotted path,
//! and this module turns that string into traversal steps that the resolver
//! can replay against the original source document.
//!
//! # Supported Syntax
//!
//! - `name` - Mapping key
//! - `name.name` - Nested mapping keys
//! - `name[index]` - Element `index` of the sequence stored under `name`
//!
//! # Examples
//!
//! ```
//! // metadata.name - the resource name
//! // spec.containers[1].securityContext - second container's security context
//! // spec.template.spec.volumes[0] - first volume of a pod template
//! ```

pub mod ast;
pub mod error;
pub mod parser;

pub use ast::Step;
pub use error::PathSyntaxError;
pub use parser::{parse, Parser};
