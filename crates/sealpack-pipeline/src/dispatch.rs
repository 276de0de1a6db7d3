//! Single-file dispatcher: read, transform, write.

use std::path::Path;

use sealpack_codec::{rle, vigenere};
use tracing::debug;

use crate::descriptor::{CipherAlgorithm, CompressionAlgorithm, Operation};
use crate::error::{PipelineError, PipelineResult};
use crate::gateway;

/// Apply `operation` to the file at `input` and write the result to `output`.
///
/// The input buffer and the transformed buffer are owned by this call and
/// released on every exit path. A failed write is reported as-is; no partial
/// output is rolled back.
///
/// # Errors
///
/// Returns [`PipelineError::Io`] for read/write failures and
/// [`PipelineError::Codec`] when the transform rejects the file contents.
pub fn process_file(input: &Path, output: &Path, operation: &Operation) -> PipelineResult<()> {
    let data = gateway::read_file(input)?;
    let transformed = apply(&data, operation, input)?;

    debug!(
        operation = operation.label(),
        input = %input.display(),
        input_bytes = data.len(),
        output_bytes = transformed.len(),
        "file transform applied"
    );

    gateway::write_file(output, &transformed)
}

fn apply(data: &[u8], operation: &Operation, input: &Path) -> PipelineResult<Vec<u8>> {
    match operation {
        Operation::Compress {
            algorithm: CompressionAlgorithm::Rle,
        } => rle::encode(data).map_err(|source| PipelineError::codec("compress", input, source)),
        Operation::Decompress {
            algorithm: CompressionAlgorithm::Rle,
        } => rle::decode(data).map_err(|source| PipelineError::codec("decompress", input, source)),
        Operation::Encrypt {
            algorithm: CipherAlgorithm::Vigenere,
            key,
        } => Ok(vigenere::encrypt(data, key)),
        Operation::Decrypt {
            algorithm: CipherAlgorithm::Vigenere,
            key,
        } => Ok(vigenere::decrypt(data, key)),
    }
}
