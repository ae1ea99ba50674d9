//! # podcheck-cli — Pod Manifest Checker
//!
//! Provides the `podcheck` command-line interface:
//!
//! ```bash
//! podcheck pod.yaml
//! podcheck --profile strict -v pod.yaml
//! ```
//!
//! Diagnostics go to standard error, one per line, as
//! `<file>:<line> <message>` (or `<file> <message>` when there is no line).
//! The exit code is 0 when the manifest is valid and 1 otherwise.
//!
//! ## Crate Policy
//!
//! - Argument parsing lives here; validation lives in `podcheck-schema`.
//! - Output format is a compatibility contract for CI scripts.

pub mod validate;

pub use validate::{run_validate, ProfileArg, ValidateArgs};
