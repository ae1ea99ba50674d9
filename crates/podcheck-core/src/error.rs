//! # Error Types
//!
//! Input errors: the only conditions that stop a run before any schema
//! rule is evaluated. Everything the schema rules find is a
//! [`ValidationError`](crate::ValidationError) instead.

use thiserror::Error;

/// The manifest could not be turned into a document tree.
#[derive(Error, Debug)]
pub enum DocumentError {
    /// The file could not be read.
    #[error("cannot read '{path}': {source}")]
    Read {
        /// Path as given by the caller.
        path: String,
        /// Underlying IO failure.
        #[source]
        source: std::io::Error,
    },

    /// The YAML scanner or parser rejected the input.
    #[error("invalid YAML at line {line}: {reason}")]
    Syntax {
        /// 1-based line the scanner stopped on.
        line: usize,
        /// Scanner message.
        reason: String,
    },

    /// A mapping key was a mapping or sequence.
    #[error("unsupported non-scalar mapping key at line {line}")]
    ComplexKey {
        /// Line of the offending key.
        line: usize,
    },

    /// An alias referred to an anchor that was never defined.
    #[error("unknown alias at line {line}")]
    UnknownAlias {
        /// Line of the alias.
        line: usize,
    },

    /// Aliases expanded to more nodes than one stream may hold.
    #[error("alias expansion limit exceeded at line {line}")]
    AliasExpansion {
        /// Line of the alias that crossed the limit.
        line: usize,
    },
}

impl DocumentError {
    /// True when the input was read but could not be parsed.
    pub fn is_parse_error(&self) -> bool {
        !matches!(self, DocumentError::Read { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn read_error_is_not_a_parse_error() {
        let err = DocumentError::Read {
            path: "pod.yaml".to_string(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "missing"),
        };
        assert!(!err.is_parse_error());
        assert!(err.to_string().contains("pod.yaml"));
    }

    #[test]
    fn syntax_error_display_carries_line() {
        let err = DocumentError::Syntax {
            line: 7,
            reason: "did not find expected key".to_string(),
        };
        assert!(err.is_parse_error());
        assert_eq!(
            err.to_string(),
            "invalid YAML at line 7: did not find expected key"
        );
    }

    #[test]
    fn alias_expansion_is_a_parse_error() {
        let err = DocumentError::AliasExpansion { line: 9 };
        assert!(err.is_parse_error());
        assert_eq!(err.to_string(), "alias expansion limit exceeded at line 9");
    }
}
