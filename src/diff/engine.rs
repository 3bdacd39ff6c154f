//! Streaming set difference between two scanned trees.
//!
//! Each stream has its own reader task. Both readers share one map keyed
//! by relative path: the first visit of a path parks its record, the
//! second resolves it immediately and removes it. Whatever is still parked
//! once both streams are drained was seen by one tree only.

use crate::error::ScanError;
use crate::tree::scanner::ScanStream;
use crate::types::{ChecksumedEntry, FileOperation, Operation, Origin};
use dashmap::mapref::entry::Entry as MapEntry;
use dashmap::DashMap;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, trace, warn};

/// Record parked until the other tree visits the same path
#[derive(Debug, Clone)]
struct PendingEntry {
    origin: Origin,
    record: ChecksumedEntry,
}

/// Shared state of one diff run
#[derive(Debug, Default)]
pub struct DiffEngine {
    pending: DashMap<String, PendingEntry>,
}

impl DiffEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of paths seen by one tree only so far
    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    /// Visit a record from `origin`.
    ///
    /// Returns `Some(Copy)` when the other tree already visited this path
    /// with a different checksum. Insert-if-absent and resolve-and-remove
    /// happen under the entry's shard lock, so two readers racing on one
    /// path cannot both park it.
    pub fn visit(&self, origin: Origin, record: ChecksumedEntry) -> Option<FileOperation> {
        match self.pending.entry(record.entry.path.clone()) {
            MapEntry::Vacant(slot) => {
                slot.insert(PendingEntry { origin, record });
                None
            }
            MapEntry::Occupied(mut slot) => {
                if slot.get().origin == origin {
                    warn!(path = record.path(), %origin, "Path visited twice by one tree");
                    slot.insert(PendingEntry { origin, record });
                    return None;
                }
                let prior = slot.remove();
                resolve_overlap(prior, PendingEntry { origin, record })
            }
        }
    }

    /// Classify every path seen by one tree only.
    ///
    /// Only valid once both streams are drained; earlier, a path the other
    /// tree has not reached yet would be misclassified.
    pub fn sweep(self) -> Vec<FileOperation> {
        self.pending
            .into_iter()
            .map(|(_, pending)| classify_unmatched(pending))
            .collect()
    }
}

/// Both trees contain the path: copy if the content differs.
///
/// The emitted entry is the target-side record, whichever arrived first.
fn resolve_overlap(first: PendingEntry, second: PendingEntry) -> Option<FileOperation> {
    if first.record.checksum == second.record.checksum {
        trace!(path = second.record.path(), "Unchanged");
        return None;
    }

    let target = if first.origin == Origin::Target {
        first.record
    } else {
        second.record
    };
    trace!(path = target.path(), "Changed");
    Some(FileOperation::new(Operation::Copy, target.entry))
}

/// Only one tree contains the path.
fn classify_unmatched(pending: PendingEntry) -> FileOperation {
    let entry = pending.record.entry;
    let operation = match pending.origin {
        Origin::Source => Operation::Delete,
        Origin::Target if entry.is_directory => Operation::Create,
        Origin::Target => Operation::Copy,
    };
    trace!(path = %entry.path, %operation, origin = %pending.origin, "Unmatched");
    FileOperation::new(operation, entry)
}

/// Drain one stream into the shared engine, forwarding resolved operations.
async fn read_stream(
    mut stream: ScanStream,
    origin: Origin,
    engine: Arc<DiffEngine>,
    ops_tx: mpsc::Sender<FileOperation>,
) -> usize {
    let signal = Arc::clone(stream.signal());
    let mut visited = 0;

    while let Some(record) = stream.next().await {
        if signal.is_aborted() {
            debug!(%origin, "Reader stopping after abort");
            break;
        }
        visited += 1;
        if let Some(operation) = engine.visit(origin, record) {
            if ops_tx.send(operation).await.is_err() {
                break;
            }
        }
    }

    visited
}

/// Compute the unordered operation set turning `target` into `source`.
///
/// Returns an error, and no operations, if either stream recorded one.
pub async fn compare(
    source: ScanStream,
    target: ScanStream,
) -> Result<Vec<FileOperation>, ScanError> {
    let signals = [Arc::clone(source.signal()), Arc::clone(target.signal())];
    let engine = Arc::new(DiffEngine::new());
    let (ops_tx, mut ops_rx) = mpsc::channel(256);

    let source_reader = tokio::spawn(read_stream(
        source,
        Origin::Source,
        Arc::clone(&engine),
        ops_tx.clone(),
    ));
    let target_reader = tokio::spawn(read_stream(
        target,
        Origin::Target,
        Arc::clone(&engine),
        ops_tx,
    ));

    let mut operations = Vec::new();
    while let Some(operation) = ops_rx.recv().await {
        operations.push(operation);
    }

    // Join point: the sweep below needs both streams fully drained.
    let (source_visited, target_visited) = tokio::join!(source_reader, target_reader);
    let source_visited = source_visited
        .map_err(|e| ScanError::TaskFailed(format!("source reader: {}", e)))?;
    let target_visited = target_visited
        .map_err(|e| ScanError::TaskFailed(format!("target reader: {}", e)))?;

    for signal in &signals {
        signal.check()?;
    }

    let engine = Arc::try_unwrap(engine)
        .map_err(|_| ScanError::TaskFailed("diff engine still shared".to_string()))?;
    let changed = operations.len();
    let unmatched = engine.pending_len();
    operations.extend(engine.sweep());

    debug!(
        source_visited,
        target_visited,
        changed,
        unmatched,
        "Diff complete"
    );

    Ok(operations)
}
