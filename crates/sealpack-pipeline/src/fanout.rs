//! Directory fan-out coordinator.
//!
//! Every regular file directly inside the input directory gets its own
//! worker running the single-file dispatcher against a sibling output path.
//! Workers run concurrently behind a semaphore whose permit count is the
//! caller's explicit limit; one file's failure never aborts its siblings,
//! and the coordinator reports only after every worker has completed.

use std::fs;
use std::io;
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{info, warn};

use crate::descriptor::Operation;
use crate::dispatch;
use crate::error::{PipelineError, PipelineResult};
use crate::model::Summary;

struct FileTask {
    input: PathBuf,
    output: PathBuf,
    outcome: Option<PipelineResult<()>>,
}

/// Apply `operation` to every regular file in `input_dir`, writing each
/// result to the matching name under `output_dir`.
///
/// `limit` bounds the number of workers in flight at once; `None` grants one
/// permit per discovered file, i.e. fully parallel execution. The output
/// directory is created (or reused) strictly before any worker is launched.
///
/// Returns the aggregate [`Summary`] when every file succeeded. A directory
/// with no regular files succeeds trivially.
///
/// # Errors
///
/// Returns [`PipelineError::NotADirectory`] or
/// [`PipelineError::OutputPathConflict`] for precondition violations,
/// [`PipelineError::Io`] for enumeration failures, and
/// [`PipelineError::PartialFailure`], still carrying the summary, when one
/// or more files failed.
pub async fn process_directory(
    input_dir: &Path,
    output_dir: &Path,
    operation: &Operation,
    limit: Option<NonZeroUsize>,
) -> PipelineResult<Summary> {
    let meta = fs::metadata(input_dir)
        .map_err(|source| PipelineError::io("fanout.stat_input", input_dir, source))?;
    if !meta.is_dir() {
        return Err(PipelineError::NotADirectory {
            path: input_dir.to_path_buf(),
        });
    }

    prepare_output_dir(output_dir)?;

    let mut tasks = discover_tasks(input_dir, output_dir)?;
    if tasks.is_empty() {
        info!(input = %input_dir.display(), "directory contains no regular files");
        return Ok(Summary::default());
    }

    let permits = limit.map_or(tasks.len(), NonZeroUsize::get);
    let semaphore = Arc::new(Semaphore::new(permits));
    let mut workers = JoinSet::new();

    for (index, task) in tasks.iter().enumerate() {
        let semaphore = Arc::clone(&semaphore);
        let input = task.input.clone();
        let output = task.output.clone();
        let operation = operation.clone();

        workers.spawn(async move {
            // The coordinator owns the semaphore and never closes it.
            let _permit = semaphore.acquire_owned().await.ok();
            let outcome =
                match tokio::task::spawn_blocking(move || {
                    dispatch::process_file(&input, &output, &operation)
                })
                .await
                {
                    Ok(result) => result,
                    Err(source) => Err(PipelineError::join("fanout.worker", source)),
                };
            (index, outcome)
        });
    }

    while let Some(joined) = workers.join_next().await {
        match joined {
            Ok((index, outcome)) => {
                if let Err(error) = &outcome {
                    warn!(
                        error = %error,
                        input = %tasks[index].input.display(),
                        "file transform failed"
                    );
                }
                tasks[index].outcome = Some(outcome);
            }
            // A worker that dies without reporting leaves its outcome slot
            // empty; the slot is counted as failed when summarising, so the
            // aggregate invariant holds even on this path.
            Err(source) => {
                warn!(error = %source, "worker terminated without reporting");
            }
        }
    }

    let summary = summarize(&tasks);
    info!(
        input = %input_dir.display(),
        output = %output_dir.display(),
        operation = operation.label(),
        succeeded = summary.succeeded,
        failed = summary.failed,
        "directory processing complete"
    );

    if summary.is_clean() {
        Ok(summary)
    } else {
        Err(PipelineError::PartialFailure { summary })
    }
}

fn prepare_output_dir(output_dir: &Path) -> PipelineResult<()> {
    match fs::metadata(output_dir) {
        Ok(meta) if meta.is_dir() => Ok(()),
        Ok(_) => Err(PipelineError::OutputPathConflict {
            path: output_dir.to_path_buf(),
        }),
        Err(source) if source.kind() == io::ErrorKind::NotFound => fs::create_dir_all(output_dir)
            .map_err(|source| PipelineError::io("fanout.create_output_dir", output_dir, source)),
        Err(source) => Err(PipelineError::io(
            "fanout.stat_output",
            output_dir,
            source,
        )),
    }
}

fn discover_tasks(input_dir: &Path, output_dir: &Path) -> PipelineResult<Vec<FileTask>> {
    let mut tasks = Vec::new();
    let entries = fs::read_dir(input_dir)
        .map_err(|source| PipelineError::io("fanout.read_dir", input_dir, source))?;

    for entry in entries {
        let entry =
            entry.map_err(|source| PipelineError::io("fanout.read_dir_entry", input_dir, source))?;
        let file_type = entry
            .file_type()
            .map_err(|source| PipelineError::io("fanout.stat_entry", entry.path(), source))?;
        if !file_type.is_file() {
            continue;
        }
        tasks.push(FileTask {
            input: entry.path(),
            output: output_dir.join(entry.file_name()),
            outcome: None,
        });
    }

    Ok(tasks)
}

fn summarize(tasks: &[FileTask]) -> Summary {
    let mut summary = Summary::default();
    for task in tasks {
        match task.outcome {
            Some(Ok(())) => summary.succeeded += 1,
            _ => summary.failed += 1,
        }
    }
    summary
}
