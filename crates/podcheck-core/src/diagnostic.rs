//! # Diagnostics
//!
//! [`ValidationError`] is one line-attributed finding. [`ErrorCollector`] is
//! the append-only sink every validation rule writes to.
//!
//! ## Ordering
//!
//! Errors are kept in the order they were reported, which is the order the
//! validator walks the document. The collector never sorts, deduplicates,
//! or drops entries; callers render them as-is.

use std::fmt;

/// A single validation finding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// File identifier as given by the caller.
    pub file: String,
    /// 1-based line, or 0 when the finding has no natural line
    /// (for example a missing required field).
    pub line: usize,
    /// Human-readable message.
    pub message: String,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.line > 0 {
            write!(f, "{}:{} {}", self.file, self.line, self.message)
        } else {
            write!(f, "{} {}", self.file, self.message)
        }
    }
}

/// Ordered, append-only list of [`ValidationError`]s for one file.
#[derive(Debug, Clone)]
pub struct ErrorCollector {
    file: String,
    errors: Vec<ValidationError>,
}

impl ErrorCollector {
    /// Create an empty collector for `file`.
    pub fn new(file: impl Into<String>) -> Self {
        Self {
            file: file.into(),
            errors: Vec::new(),
        }
    }

    /// The file identifier stamped on every error.
    pub fn file(&self) -> &str {
        &self.file
    }

    /// Append an error. `line` 0 means "no specific line".
    pub fn report(&mut self, line: usize, message: impl Into<String>) {
        let message = message.into();
        tracing::trace!(line, message = %message, "validation error");
        self.errors.push(ValidationError {
            file: self.file.clone(),
            line,
            message,
        });
    }

    /// Returns the number of errors.
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Returns true if nothing has been reported.
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Returns a slice of all errors in report order.
    pub fn errors(&self) -> &[ValidationError] {
        &self.errors
    }

    /// Consumes self and returns the inner Vec.
    pub fn into_inner(self) -> Vec<ValidationError> {
        self.errors
    }
}

impl fmt::Display for ErrorCollector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, e) in self.errors.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{e}")?;
        }
        Ok(())
    }
}
