//! Whole-file read/write primitives.
//!
//! Reads materialise the entire file in memory; writes create-or-truncate and
//! are synced to disk before returning, so a successful write is durable.

use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

use crate::error::{PipelineError, PipelineResult};

/// Read the whole file at `path` into an owned buffer.
///
/// # Errors
///
/// Returns [`PipelineError::Io`] when the file cannot be opened or read.
pub fn read_file(path: &Path) -> PipelineResult<Vec<u8>> {
    fs::read(path).map_err(|source| PipelineError::io("gateway.read", path, source))
}

/// Write `data` to `path`, creating or truncating it, and sync to disk.
///
/// # Errors
///
/// Returns [`PipelineError::Io`] when the file cannot be created, written,
/// or synced.
pub fn write_file(path: &Path, data: &[u8]) -> PipelineResult<()> {
    let mut file =
        File::create(path).map_err(|source| PipelineError::io("gateway.create", path, source))?;
    file.write_all(data)
        .map_err(|source| PipelineError::io("gateway.write", path, source))?;
    file.sync_all()
        .map_err(|source| PipelineError::io("gateway.sync", path, source))
}
