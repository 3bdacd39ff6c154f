//! Diff API
//!
//! Entry point used by the command-line layer: validate both roots, scan
//! them concurrently, diff the two streams and order the result.

use crate::concurrency::AbortSignal;
use crate::diff::{compare, order_operations};
use crate::error::ScanError;
use crate::tree::path::canonicalize_root;
use crate::tree::scanner::{ScanConfig, TreeScanner};
use crate::types::FileOperation;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;
use tracing::{info, instrument};

/// A request to plan the operations that make `target` match `source`
#[derive(Debug, Clone)]
pub struct DiffRequest {
    pub source: PathBuf,
    pub target: PathBuf,
    pub scan: ScanConfig,
}

impl DiffRequest {
    pub fn new(source: impl Into<PathBuf>, target: impl Into<PathBuf>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            scan: ScanConfig::default(),
        }
    }

    pub fn with_scan_config(mut self, scan: ScanConfig) -> Self {
        self.scan = scan;
        self
    }
}

/// Check that `path` is a readable directory and return its canonical form
pub fn validate_root(path: &Path) -> Result<PathBuf, ScanError> {
    let metadata = std::fs::metadata(path).map_err(|e| {
        ScanError::validation(path, format!("directory does not exist or is inaccessible: {}", e))
    })?;
    if !metadata.is_dir() {
        return Err(ScanError::validation(path, "not a directory"));
    }
    std::fs::read_dir(path)
        .map_err(|e| ScanError::validation(path, format!("directory is not readable: {}", e)))?;

    canonicalize_root(path)
}

/// Compute the ordered operation list for `request`.
///
/// Either the full list is returned or the first error; a failed run
/// never yields partial results.
#[instrument(skip(request), fields(source = %request.source.display(), target = %request.target.display()))]
pub async fn diff_directories(request: &DiffRequest) -> Result<Vec<FileOperation>, ScanError> {
    let started = Instant::now();

    let source = validate_root(&request.source)?;
    let target = validate_root(&request.target)?;

    let signal = Arc::new(AbortSignal::new());
    let source_stream =
        TreeScanner::with_signal(source, request.scan.clone(), Arc::clone(&signal)).spawn();
    let target_stream =
        TreeScanner::with_signal(target, request.scan.clone(), Arc::clone(&signal)).spawn();

    let operations = compare(source_stream, target_stream).await?;
    let ordered = order_operations(operations);

    info!(
        operations = ordered.len(),
        duration_ms = started.elapsed().as_millis() as u64,
        "Diff finished"
    );

    Ok(ordered)
}
