//! # Design
//!
//! - Provide structured, constant-message errors for the transform pipeline.
//! - Capture operation context (paths, algorithm names) to make failures
//!   reproducible in tests.
//! - Preserve source errors without interpolating context into error messages.

use std::io;
use std::path::PathBuf;

use sealpack_codec::CodecError;
use thiserror::Error;

use crate::model::Summary;

/// Result type for pipeline operations.
pub type PipelineResult<T> = Result<T, PipelineError>;

/// Errors produced by the file transform pipeline.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// IO failures while interacting with the filesystem.
    #[error("pipeline io failure")]
    Io {
        /// Operation that triggered the IO failure.
        operation: &'static str,
        /// Path involved in the IO failure.
        path: PathBuf,
        /// Underlying IO error.
        source: io::Error,
    },
    /// A codec rejected the contents of a file.
    #[error("pipeline codec failure")]
    Codec {
        /// Operation that triggered the codec failure.
        operation: &'static str,
        /// Input file whose contents were rejected.
        path: PathBuf,
        /// Underlying codec error.
        source: CodecError,
    },
    /// Encrypt or decrypt was requested without a key.
    #[error("cipher key required but not provided")]
    MissingKey,
    /// The provided cipher key failed validation.
    #[error("cipher key rejected")]
    InvalidKey {
        /// Underlying codec error.
        source: CodecError,
    },
    /// The requested algorithm name is not recognised.
    #[error("unsupported algorithm")]
    UnsupportedAlgorithm {
        /// Algorithm family that was requested.
        kind: &'static str,
        /// Name that failed to resolve.
        name: String,
    },
    /// The requested chain ordering is not one of the fixed orderings.
    #[error("unsupported chain ordering")]
    UnsupportedChain {
        /// Value that failed to resolve.
        value: String,
    },
    /// Directory mode was invoked on a path that is not a directory.
    #[error("input path is not a directory")]
    NotADirectory {
        /// Offending input path.
        path: PathBuf,
    },
    /// The output path exists but is not usable as a directory.
    #[error("output path conflicts with an existing entry")]
    OutputPathConflict {
        /// Offending output path.
        path: PathBuf,
    },
    /// A directory worker could not be joined.
    #[error("pipeline worker join failure")]
    Join {
        /// Operation that triggered the join failure.
        operation: &'static str,
        /// Underlying join error.
        source: tokio::task::JoinError,
    },
    /// One or more files in a directory failed while others succeeded.
    #[error("directory processing completed with failures")]
    PartialFailure {
        /// Aggregate outcome counts for the directory.
        summary: Summary,
    },
}

impl PipelineError {
    pub(crate) fn io(operation: &'static str, path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            operation,
            path: path.into(),
            source,
        }
    }

    pub(crate) fn codec(
        operation: &'static str,
        path: impl Into<PathBuf>,
        source: CodecError,
    ) -> Self {
        Self::Codec {
            operation,
            path: path.into(),
            source,
        }
    }

    pub(crate) const fn join(operation: &'static str, source: tokio::task::JoinError) -> Self {
        Self::Join { operation, source }
    }
}
