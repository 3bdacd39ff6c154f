//! Filesystem walker feeding raw entries to the hashing pool

use crate::concurrency::AbortSignal;
use crate::error::ScanError;
use std::path::{Path, PathBuf};
use tokio::sync::mpsc;
use tracing::{debug, trace};
use walkdir::WalkDir;

/// Raw filesystem entry with its absolute path
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WalkEntry {
    /// A regular file
    File { path: PathBuf },
    /// A directory
    Directory { path: PathBuf },
}

impl WalkEntry {
    pub fn path(&self) -> &Path {
        match self {
            WalkEntry::File { path } | WalkEntry::Directory { path } => path,
        }
    }
}

/// Counts reported by a finished walk
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WalkSummary {
    pub files: usize,
    pub directories: usize,
    pub skipped: usize,
}

/// Depth-first walker over one root.
///
/// Emits every descendant of the root but never the root itself.
/// Symbolic links are not followed and, like other special files,
/// produce no entry.
pub struct Walker {
    root: PathBuf,
}

impl Walker {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    /// Walk the tree, pushing entries into `tx`.
    ///
    /// Blocks on a full channel. Stops early, without error, when the
    /// receiver is dropped or `signal` is aborted. A traversal error is
    /// recorded on `signal` and ends the walk.
    ///
    /// Must run on a blocking thread.
    pub fn walk_into(&self, tx: &mpsc::Sender<WalkEntry>, signal: &AbortSignal) -> WalkSummary {
        let mut summary = WalkSummary::default();

        let walker = WalkDir::new(&self.root).follow_links(false).min_depth(1);

        for entry in walker {
            if signal.is_aborted() {
                debug!(root = %self.root.display(), "Walk cancelled");
                break;
            }

            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    let path = e
                        .path()
                        .map(Path::to_path_buf)
                        .unwrap_or_else(|| self.root.clone());
                    signal.abort(ScanError::Traversal { path, source: e });
                    break;
                }
            };

            let file_type = entry.file_type();
            let walk_entry = if file_type.is_dir() {
                summary.directories += 1;
                WalkEntry::Directory {
                    path: entry.into_path(),
                }
            } else if file_type.is_file() {
                summary.files += 1;
                WalkEntry::File {
                    path: entry.into_path(),
                }
            } else {
                // Symlinks and special files
                summary.skipped += 1;
                debug!(path = %entry.path().display(), "Skipping non-regular entry");
                continue;
            };

            trace!(path = %walk_entry.path().display(), "Discovered entry");
            if tx.blocking_send(walk_entry).is_err() {
                debug!(root = %self.root.display(), "Walk receiver dropped");
                break;
            }
        }

        summary
    }
}
