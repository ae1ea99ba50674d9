//! # podcheck-core — Foundational Types for podcheck
//!
//! Defines the data every other podcheck crate works with. Every other
//! crate in the workspace depends on `podcheck-core`; it depends on
//! nothing internal.
//!
//! ## Key Design Principles
//!
//! 1. **Line-annotated tree.** Every [`Node`] carries the 1-based source line
//!    it started on. Diagnostics are attributed from these lines alone; the
//!    validator never looks at raw text.
//!
//! 2. **Scalar keys only.** A mapping's keys are always scalars. The tree
//!    builder in [`document`] rejects anything else, so downstream code can
//!    treat keys as plain strings.
//!
//! 3. **Diagnostics are data.** Validation problems are appended to an
//!    [`ErrorCollector`] in the order they are found. Only unreadable or
//!    unparseable input is an `Err` ([`DocumentError`]).
//!
//! ## Crate Policy
//!
//! - No dependencies on other `podcheck-*` crates (this is the leaf of the DAG).
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod diagnostic;
pub mod document;
pub mod error;
pub mod node;

// Re-export primary types for ergonomic imports.
pub use diagnostic::{ErrorCollector, ValidationError};
pub use document::{load_file, parse_documents};
pub use error::DocumentError;
pub use node::{Node, NodeKind};
