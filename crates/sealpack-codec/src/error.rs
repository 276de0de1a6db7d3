//! # Design
//!
//! - Provide structured, constant-message errors for the codec layer.
//! - Capture the offending codec and input so failures are reproducible in tests.

use thiserror::Error;

/// Result type for codec operations.
pub type CodecResult<T> = Result<T, CodecError>;

/// Errors produced by the run-length codec and the substitution cipher.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CodecError {
    /// The transform was handed an empty buffer where data is required.
    #[error("codec received empty input")]
    EmptyInput {
        /// Codec that rejected the input.
        codec: &'static str,
    },
    /// The cipher key failed validation.
    #[error("invalid cipher key")]
    InvalidKey {
        /// Static reason for the rejection.
        reason: &'static str,
        /// Offending key material when available.
        value: Option<String>,
    },
}

impl CodecError {
    pub(crate) const fn empty_input(codec: &'static str) -> Self {
        Self::EmptyInput { codec }
    }

    pub(crate) const fn invalid_key(reason: &'static str, value: Option<String>) -> Self {
        Self::InvalidKey { reason, value }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codec_error_helpers_build_variants() {
        let empty = CodecError::empty_input("rle");
        assert!(matches!(empty, CodecError::EmptyInput { codec: "rle" }));

        let key = CodecError::invalid_key("non_alphabetic", Some("ab3".to_string()));
        assert!(matches!(
            key,
            CodecError::InvalidKey {
                reason: "non_alphabetic",
                ..
            }
        ));
    }
}
