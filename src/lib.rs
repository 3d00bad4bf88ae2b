//! iacline resolves policy violation paths back to source lines.
//!
//! A policy engine evaluates a normalized resource model that has lost all
//! source positions, and reports violations as paths such as
//! `spec.containers[1].securityContext`. iacline re-reads the original YAML
//! or JSON document, keeping the line of every node, and replays the path to
//! find the closest line it can.
//!
//! ```
//! use iacline::resolve_line;
//!
//! let source = b"apiVersion: v1
//! kind: Pod
//! spec:
//!   containers:
//!     - name: app
//!       image: nginx
//!     - name: sidecar
//!       image: envoy
//! ";
//!
//! assert_eq!(resolve_line(source, "spec.containers[1].image", 1).unwrap(), 8);
//! // Fields missing from the source resolve to the closest enclosing line
//! assert_eq!(resolve_line(source, "spec.containers[1].securityContext", 1).unwrap(), 7);
//! ```

pub mod config;
pub mod document;
pub mod file;
pub mod linepath;
pub mod resolver;
pub mod violation;

pub use resolver::{resolve_line, LineNumberFinder, ResolveError};
