//! Tree scanner: one walker feeding a bounded pool of hashing tasks.
//!
//! The pool size caps how many files are open at once. Output order is
//! unspecified; the stream ends only after the walker has finished and
//! every hashing task has delivered its record.

use crate::concurrency::AbortSignal;
use crate::error::ScanError;
use crate::tree::hasher::{self, DEFAULT_READ_BUFFER};
use crate::tree::path;
use crate::tree::walker::{WalkEntry, WalkSummary, Walker};
use crate::types::ChecksumedEntry;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::{mpsc, Semaphore};
use tokio::task::JoinHandle;
use tracing::{debug, info, trace};

/// Scanner configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanConfig {
    /// Concurrent hashing tasks per scanned tree (caps open file handles)
    #[serde(default = "default_workers")]
    pub workers: usize,

    /// Capacity of the raw-entry and checksum channels
    #[serde(default = "default_queue_capacity")]
    pub queue_capacity: usize,

    /// Read buffer used while hashing a file (bytes)
    #[serde(default = "default_read_buffer_size")]
    pub read_buffer_size: usize,
}

fn default_workers() -> usize {
    50
}

fn default_queue_capacity() -> usize {
    256
}

fn default_read_buffer_size() -> usize {
    DEFAULT_READ_BUFFER
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            workers: default_workers(),
            queue_capacity: default_queue_capacity(),
            read_buffer_size: default_read_buffer_size(),
        }
    }
}

impl ScanConfig {
    pub fn validate(&self) -> Result<(), String> {
        if self.workers == 0 {
            return Err("scan.workers must be at least 1".to_string());
        }
        if self.queue_capacity == 0 {
            return Err("scan.queue_capacity must be at least 1".to_string());
        }
        if self.read_buffer_size == 0 {
            return Err("scan.read_buffer_size must be at least 1".to_string());
        }
        Ok(())
    }
}

/// Scanner for a single root directory
pub struct TreeScanner {
    root: PathBuf,
    config: ScanConfig,
    signal: Arc<AbortSignal>,
}

impl TreeScanner {
    /// Create a scanner with its own abort signal
    pub fn new(root: PathBuf, config: ScanConfig) -> Self {
        Self::with_signal(root, config, Arc::new(AbortSignal::new()))
    }

    /// Create a scanner sharing `signal` with other tasks of the same run
    pub fn with_signal(root: PathBuf, config: ScanConfig, signal: Arc<AbortSignal>) -> Self {
        Self {
            root,
            config,
            signal,
        }
    }

    /// Start scanning and return the output stream.
    ///
    /// Must be called from within a tokio runtime.
    pub fn spawn(self) -> ScanStream {
        let capacity = self.config.queue_capacity.max(1);
        let (out_tx, out_rx) = mpsc::channel(capacity);

        let signal = Arc::clone(&self.signal);
        let dispatcher = tokio::spawn(dispatch(self.root, self.config, self.signal, out_tx));

        ScanStream {
            rx: out_rx,
            signal,
            dispatcher: Some(dispatcher),
        }
    }
}

/// Stream of checksummed entries produced by one scan
pub struct ScanStream {
    rx: mpsc::Receiver<ChecksumedEntry>,
    signal: Arc<AbortSignal>,
    dispatcher: Option<JoinHandle<()>>,
}

impl ScanStream {
    /// Wrap a channel of records produced elsewhere.
    ///
    /// The stream ends when every sender is dropped; producers report
    /// failures through `signal`.
    pub fn from_channel(rx: mpsc::Receiver<ChecksumedEntry>, signal: Arc<AbortSignal>) -> Self {
        Self {
            rx,
            signal,
            dispatcher: None,
        }
    }

    pub fn signal(&self) -> &Arc<AbortSignal> {
        &self.signal
    }

    /// Next record, or `None` once the scan is complete or cancelled.
    ///
    /// `None` does not mean success: check the abort signal afterwards.
    pub async fn next(&mut self) -> Option<ChecksumedEntry> {
        match self.rx.recv().await {
            Some(record) => Some(record),
            None => {
                if let Some(dispatcher) = self.dispatcher.take() {
                    if let Err(e) = dispatcher.await {
                        self.signal
                            .abort(ScanError::TaskFailed(format!("scan dispatcher: {}", e)));
                    }
                }
                None
            }
        }
    }

    /// Drain the stream into a vector, failing on the first recorded error.
    pub async fn collect(mut self) -> Result<Vec<ChecksumedEntry>, ScanError> {
        let mut records = Vec::new();
        while let Some(record) = self.next().await {
            if self.signal.is_aborted() {
                break;
            }
            records.push(record);
        }
        self.signal.check()?;
        Ok(records)
    }
}

/// Scan `root` to completion with a private abort signal
pub async fn scan_tree(root: &Path, config: &ScanConfig) -> Result<Vec<ChecksumedEntry>, ScanError> {
    TreeScanner::new(root.to_path_buf(), config.clone())
        .spawn()
        .collect()
        .await
}

/// Hand raw entries to hashing tasks, at most `config.workers` at a time.
async fn dispatch(
    root: PathBuf,
    config: ScanConfig,
    signal: Arc<AbortSignal>,
    out_tx: mpsc::Sender<ChecksumedEntry>,
) {
    let started = Instant::now();
    let (raw_tx, mut raw_rx) = mpsc::channel(config.queue_capacity.max(1));

    info!(root = %root.display(), workers = config.workers, "Scan started");

    let walker = Walker::new(root.clone());
    let walk_signal = Arc::clone(&signal);
    let walk_handle =
        tokio::task::spawn_blocking(move || walker.walk_into(&raw_tx, &walk_signal));

    let semaphore = Arc::new(Semaphore::new(config.workers.max(1)));
    let root = Arc::new(root);

    while let Some(entry) = raw_rx.recv().await {
        if signal.is_aborted() {
            break;
        }

        let permit = match Arc::clone(&semaphore).acquire_owned().await {
            Ok(permit) => permit,
            Err(_) => {
                signal.abort(ScanError::TaskFailed("hashing pool closed".to_string()));
                break;
            }
        };

        // The permit may have taken a while; re-check before opening a file.
        if signal.is_aborted() {
            break;
        }

        let tx = out_tx.clone();
        let task_root = Arc::clone(&root);
        let task_signal = Arc::clone(&signal);
        let buffer_size = config.read_buffer_size;
        tokio::spawn(async move {
            let _permit = permit;
            let result = tokio::task::spawn_blocking(move || {
                checksum_entry(&task_root, entry, buffer_size)
            })
            .await;

            match result {
                Ok(Ok(record)) => {
                    trace!(path = record.path(), checksum = %record.checksum_hex(), "Hashed entry");
                    if tx.send(record).await.is_err() {
                        trace!("Scan consumer dropped");
                    }
                }
                Ok(Err(e)) => task_signal.abort(e),
                Err(e) => task_signal.abort(ScanError::TaskFailed(format!("hashing task: {}", e))),
            }
        });
    }

    // Unblock a walker stuck on a full channel before joining it.
    drop(raw_rx);

    let summary = match walk_handle.await {
        Ok(summary) => summary,
        Err(e) => {
            signal.abort(ScanError::TaskFailed(format!("walker: {}", e)));
            WalkSummary::default()
        }
    };

    if signal.is_aborted() {
        debug!(root = %root.display(), "Scan stopped early");
    } else {
        info!(
            root = %root.display(),
            files = summary.files,
            directories = summary.directories,
            skipped = summary.skipped,
            duration_ms = started.elapsed().as_millis() as u64,
            "Scan dispatched"
        );
    }
}

/// Turn a raw entry into a record keyed relative to `root`.
fn checksum_entry(
    root: &Path,
    entry: WalkEntry,
    buffer_size: usize,
) -> Result<ChecksumedEntry, ScanError> {
    match entry {
        WalkEntry::Directory { path } => {
            let key = path::relative_key(root, &path)?;
            Ok(ChecksumedEntry::directory(key))
        }
        WalkEntry::File { path } => {
            let key = path::relative_key(root, &path)?;
            let checksum = hasher::compute_file_checksum(&path, buffer_size)?;
            Ok(ChecksumedEntry::file(key, checksum))
        }
    }
}
