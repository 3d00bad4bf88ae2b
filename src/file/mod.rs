//! File I/O for source documents.
//!
//! This module reads IaC source documents from disk or stdin as raw bytes,
//! ready to be handed to the resolver.

pub mod loader;
