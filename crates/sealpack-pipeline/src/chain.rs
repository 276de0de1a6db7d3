//! Chained-operation orchestrator.
//!
//! Composes two dispatcher calls through a transient file staged next to the
//! final output. The transient file is owned by a removal guard from the
//! moment step 1 succeeds, so it is deleted on both the success and failure
//! exit of step 2.

use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use sealpack_codec::Key;
use tracing::{debug, warn};

use crate::descriptor::{CipherAlgorithm, CompressionAlgorithm, Operation};
use crate::dispatch;
use crate::error::{PipelineError, PipelineResult};

/// The four fixed two-step orderings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChainOrder {
    /// Compress, then encrypt the compressed bytes.
    CompressThenEncrypt,
    /// Decompress, then encrypt the decompressed bytes.
    DecompressThenEncrypt,
    /// Encrypt, then compress the encrypted bytes.
    EncryptThenCompress,
    /// Decrypt, then decompress the decrypted bytes.
    DecryptThenDecompress,
}

impl ChainOrder {
    /// Stable label for logging.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::CompressThenEncrypt => "compress-encrypt",
            Self::DecompressThenEncrypt => "decompress-encrypt",
            Self::EncryptThenCompress => "encrypt-compress",
            Self::DecryptThenDecompress => "decrypt-decompress",
        }
    }

    fn steps(
        self,
        compression: CompressionAlgorithm,
        cipher: CipherAlgorithm,
        key: &Key,
    ) -> (Operation, Operation) {
        let compress = Operation::Compress {
            algorithm: compression,
        };
        let decompress = Operation::Decompress {
            algorithm: compression,
        };
        let encrypt = Operation::Encrypt {
            algorithm: cipher,
            key: key.clone(),
        };
        let decrypt = Operation::Decrypt {
            algorithm: cipher,
            key: key.clone(),
        };

        match self {
            Self::CompressThenEncrypt => (compress, encrypt),
            Self::DecompressThenEncrypt => (decompress, encrypt),
            Self::EncryptThenCompress => (encrypt, compress),
            Self::DecryptThenDecompress => (decrypt, decompress),
        }
    }
}

impl FromStr for ChainOrder {
    type Err = PipelineError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "compress-encrypt" => Ok(Self::CompressThenEncrypt),
            "decompress-encrypt" => Ok(Self::DecompressThenEncrypt),
            "encrypt-compress" => Ok(Self::EncryptThenCompress),
            "decrypt-decompress" => Ok(Self::DecryptThenDecompress),
            other => Err(PipelineError::UnsupportedChain {
                value: other.to_string(),
            }),
        }
    }
}

/// Run the two steps of `order` from `input` to `output`, staging the
/// intermediate bytes in a transient file derived from `output`.
///
/// If step 1 fails its error is returned immediately and no transient file
/// exists; once step 1 succeeds, the transient file is removed before this
/// function returns, whether step 2 succeeds or not. Step 2's error, if any,
/// propagates after cleanup.
///
/// # Errors
///
/// Returns the first failing dispatcher error.
pub fn process_chained(
    input: &Path,
    output: &Path,
    order: ChainOrder,
    compression: CompressionAlgorithm,
    cipher: CipherAlgorithm,
    key: &Key,
) -> PipelineResult<()> {
    let (first, second) = order.steps(compression, cipher, key);
    let transient = transient_path(output);

    debug!(
        chain = order.as_str(),
        input = %input.display(),
        transient = %transient.display(),
        "running chained transform"
    );

    dispatch::process_file(input, &transient, &first)?;
    let _guard = TransientGuard { path: &transient };
    dispatch::process_file(&transient, output, &second)
}

// Process-unique suffix so the staged file can never collide with a real
// output file of the same run.
fn transient_path(output: &Path) -> PathBuf {
    let mut staged = output.as_os_str().to_os_string();
    staged.push(format!(".stage.{}", std::process::id()));
    PathBuf::from(staged)
}

struct TransientGuard<'a> {
    path: &'a Path,
}

impl Drop for TransientGuard<'_> {
    fn drop(&mut self) {
        if let Err(error) = fs::remove_file(self.path) {
            warn!(
                error = %error,
                path = %self.path.display(),
                "failed to remove transient artifact"
            );
        }
    }
}
