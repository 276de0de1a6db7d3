//! Validated operation descriptors.
//!
//! Algorithm names and key material are validated once, when a descriptor is
//! constructed; downstream components match on closed enums and never see an
//! unrecognised name or an unchecked key.

use std::str::FromStr;

use sealpack_codec::Key;

use crate::error::{PipelineError, PipelineResult};

/// Supported compression codecs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompressionAlgorithm {
    /// Run-length encoding.
    Rle,
}

impl FromStr for CompressionAlgorithm {
    type Err = PipelineError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        match name {
            "rle" => Ok(Self::Rle),
            other => Err(PipelineError::UnsupportedAlgorithm {
                kind: "compression",
                name: other.to_string(),
            }),
        }
    }
}

/// Supported ciphers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CipherAlgorithm {
    /// Cyclic-key substitution cipher.
    Vigenere,
}

impl FromStr for CipherAlgorithm {
    type Err = PipelineError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        match name {
            "vigenere" => Ok(Self::Vigenere),
            other => Err(PipelineError::UnsupportedAlgorithm {
                kind: "cipher",
                name: other.to_string(),
            }),
        }
    }
}

/// A single validated transform request, immutable once constructed.
#[derive(Debug, Clone)]
pub enum Operation {
    /// Compress with the named codec.
    Compress {
        /// Codec to apply.
        algorithm: CompressionAlgorithm,
    },
    /// Decompress with the named codec.
    Decompress {
        /// Codec to apply.
        algorithm: CompressionAlgorithm,
    },
    /// Encrypt with the named cipher and a validated key.
    Encrypt {
        /// Cipher to apply.
        algorithm: CipherAlgorithm,
        /// Validated key material.
        key: Key,
    },
    /// Decrypt with the named cipher and a validated key.
    Decrypt {
        /// Cipher to apply.
        algorithm: CipherAlgorithm,
        /// Validated key material.
        key: Key,
    },
}

impl Operation {
    /// Build a compress operation from an algorithm name.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::UnsupportedAlgorithm`] for unrecognised names.
    pub fn compress(name: &str) -> PipelineResult<Self> {
        Ok(Self::Compress {
            algorithm: name.parse()?,
        })
    }

    /// Build a decompress operation from an algorithm name.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::UnsupportedAlgorithm`] for unrecognised names.
    pub fn decompress(name: &str) -> PipelineResult<Self> {
        Ok(Self::Decompress {
            algorithm: name.parse()?,
        })
    }

    /// Build an encrypt operation from a cipher name and raw key material.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::UnsupportedAlgorithm`] for unrecognised names,
    /// [`PipelineError::MissingKey`] when `key` is absent, and
    /// [`PipelineError::InvalidKey`] when the key fails validation.
    pub fn encrypt(name: &str, key: Option<&str>) -> PipelineResult<Self> {
        Ok(Self::Encrypt {
            algorithm: name.parse()?,
            key: validate_key(key)?,
        })
    }

    /// Build a decrypt operation from a cipher name and raw key material.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::UnsupportedAlgorithm`] for unrecognised names,
    /// [`PipelineError::MissingKey`] when `key` is absent, and
    /// [`PipelineError::InvalidKey`] when the key fails validation.
    pub fn decrypt(name: &str, key: Option<&str>) -> PipelineResult<Self> {
        Ok(Self::Decrypt {
            algorithm: name.parse()?,
            key: validate_key(key)?,
        })
    }

    /// Stable label for logging.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Compress { .. } => "compress",
            Self::Decompress { .. } => "decompress",
            Self::Encrypt { .. } => "encrypt",
            Self::Decrypt { .. } => "decrypt",
        }
    }
}

fn validate_key(key: Option<&str>) -> PipelineResult<Key> {
    let raw = key.ok_or(PipelineError::MissingKey)?;
    Key::new(raw).map_err(|source| PipelineError::InvalidKey { source })
}
