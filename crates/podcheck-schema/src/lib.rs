//! # podcheck-schema — Pod Manifest Validation
//!
//! Validates a parsed Pod manifest against a fixed schema and reports every
//! violation with the line it was found on.
//!
//! ## Runtime Validation (`validate`)
//!
//! [`PodValidator`] walks the document tree depth-first. Each schema level
//! is a static table of fields; the walker dispatches present fields in the
//! order the author wrote them, then reports missing required ones. Key
//! entry point:
//!
//! - [`validate_pod`] — validates the documents of one file and returns the
//!   collected diagnostics.
//!
//! ## Building Blocks
//!
//! - [`fields`] — key lookup over a mapping node (last duplicate wins).
//! - [`format`] — pure predicates for names, image references, memory
//!   quantities, ports, and paths.
//! - [`profile`] — validation options (cpu rule selection).
//!
//! ## Crate Policy
//!
//! - Depends only on `podcheck-core` internally.
//! - Message templates are part of the output contract. Changing one is a
//!   breaking change for anything that parses the diagnostics.
//! - Validation never returns `Err`; every finding is a diagnostic.

pub mod fields;
pub mod format;
pub mod profile;
pub mod validate;

pub use fields::{Field, Fields};
pub use profile::{CpuPolicy, ValidationProfile};
pub use validate::{validate_pod, PodValidator};
