//! The batch driver: validate, discover, prepare, then transform every file.
//!
//! ## Run shape
//!
//! 1. Resolve [`RunParams`] into a [`Transform`]. A missing or invalid value
//!    aborts here, before the filesystem is touched.
//! 2. Discover candidates with [`scan::find_images`]. No candidates ends the
//!    run successfully with `found == 0` and no output folder.
//! 3. Create the output folder.
//! 4. For each candidate: decode, transform, encode under the same file name
//!    in the output folder.
//!
//! Steps 1-3 fail the whole run with a [`BatchError`]. Step 4 never does:
//! each file yields its own `Result<PathBuf, ItemError>`, which is reported
//! and counted.
//!
//! ## Parallel Processing
//!
//! With `threads > 1` the per-file loop runs on a dedicated rayon pool.
//! Reports in the returned [`BatchOutcome`] keep discovery order either way;
//! only the live [`ProcessEvent`] stream may arrive out of order.

use crate::imaging::{
    BackendError, ImageBackend, ParamError, Quality, RunParams, RustBackend, Transform,
    TransformError,
};
use crate::scan::{self, ScanError};
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use std::sync::mpsc::Sender;
use thiserror::Error;

/// Errors that stop a run before any file is processed.
#[derive(Error, Debug)]
pub enum BatchError {
    #[error(transparent)]
    InvalidParameter(#[from] ParamError),
    #[error(transparent)]
    Scan(#[from] ScanError),
    #[error("Cannot start worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

/// Errors confined to a single file.
#[derive(Error, Debug)]
pub enum ItemError {
    #[error("{0}")]
    Decode(BackendError),
    #[error("{0}")]
    Transform(#[from] TransformError),
    #[error("{0}")]
    Encode(BackendError),
}

impl ItemError {
    /// Unreadable inputs are reported as skipped rather than failed.
    pub fn is_skip(&self) -> bool {
        matches!(self, ItemError::Decode(_))
    }
}

/// What happened to one candidate file.
#[derive(Debug)]
pub struct FileReport {
    pub source: PathBuf,
    pub result: Result<PathBuf, ItemError>,
}

/// Totals and per-file reports for a completed run.
#[derive(Debug)]
pub struct BatchOutcome {
    pub found: usize,
    pub succeeded: usize,
    pub failed: usize,
    /// In discovery order.
    pub files: Vec<FileReport>,
    pub output_dir: PathBuf,
}

/// Progress events sent while a run is underway.
#[derive(Debug, Clone, PartialEq)]
pub enum ProcessEvent {
    /// Candidates found and output folder ready.
    Started { found: usize, output_dir: PathBuf },
    FileProcessed { source: PathBuf, output: PathBuf },
    /// The file could not be decoded.
    FileSkipped { source: PathBuf, reason: String },
    /// Transform or write failed.
    FileFailed { source: PathBuf, reason: String },
}

impl ProcessEvent {
    fn for_report(report: &FileReport) -> Self {
        let source = report.source.clone();
        match &report.result {
            Ok(output) => ProcessEvent::FileProcessed {
                source,
                output: output.clone(),
            },
            Err(e) if e.is_skip() => ProcessEvent::FileSkipped {
                source,
                reason: e.to_string(),
            },
            Err(e) => ProcessEvent::FileFailed {
                source,
                reason: e.to_string(),
            },
        }
    }
}

fn send(progress: Option<&Sender<ProcessEvent>>, event: ProcessEvent) {
    if let Some(tx) = progress {
        // Printer gone means nobody is listening; the run carries on.
        tx.send(event).ok();
    }
}

/// Run a batch with the `image`-crate backend.
pub fn process(
    input_dir: &Path,
    output_dir: &Path,
    params: &RunParams,
    quality: Quality,
    threads: usize,
    progress: Option<Sender<ProcessEvent>>,
) -> Result<BatchOutcome, BatchError> {
    let backend = RustBackend::with_quality(quality);
    process_with_backend(&backend, input_dir, output_dir, params, threads, progress)
}

/// Run a batch using a specific backend (allows testing with mock).
pub fn process_with_backend(
    backend: &impl ImageBackend,
    input_dir: &Path,
    output_dir: &Path,
    params: &RunParams,
    threads: usize,
    progress: Option<Sender<ProcessEvent>>,
) -> Result<BatchOutcome, BatchError> {
    let transform = Transform::resolve(params)?;

    let candidates = scan::find_images(input_dir)?;
    if candidates.is_empty() {
        return Ok(BatchOutcome {
            found: 0,
            succeeded: 0,
            failed: 0,
            files: Vec::new(),
            output_dir: output_dir.to_path_buf(),
        });
    }

    scan::ensure_output_dir(output_dir)?;
    send(
        progress.as_ref(),
        ProcessEvent::Started {
            found: candidates.len(),
            output_dir: output_dir.to_path_buf(),
        },
    );

    let run = |tx: &mut Option<Sender<ProcessEvent>>, source: &PathBuf| {
        let report = FileReport {
            source: source.clone(),
            result: process_file(backend, &transform, source, output_dir),
        };
        send(tx.as_ref(), ProcessEvent::for_report(&report));
        report
    };

    let files: Vec<FileReport> = if threads > 1 {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build()?;
        pool.install(|| {
            candidates
                .par_iter()
                .map_with(progress.clone(), run)
                .collect()
        })
    } else {
        let mut tx = progress.clone();
        candidates.iter().map(|source| run(&mut tx, source)).collect()
    };

    let succeeded = files.iter().filter(|f| f.result.is_ok()).count();
    Ok(BatchOutcome {
        found: files.len(),
        succeeded,
        failed: files.len() - succeeded,
        files,
        output_dir: output_dir.to_path_buf(),
    })
}

/// Decode, transform and write one file under its original name.
fn process_file(
    backend: &impl ImageBackend,
    transform: &Transform,
    source: &Path,
    output_dir: &Path,
) -> Result<PathBuf, ItemError> {
    let image = backend.decode(source).map_err(ItemError::Decode)?;
    let result = transform.apply(&image)?;
    let dest = output_dir.join(source.file_name().unwrap_or_default());
    backend.encode(&result, &dest).map_err(ItemError::Encode)?;
    Ok(dest)
}
