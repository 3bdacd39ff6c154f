//! Cancellation shared by every task of one diff run.

use crate::error::ScanError;
use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{debug, warn};

/// First-error-wins slot plus a cancellation flag.
///
/// Both scans of a run share one signal: once any task records an error,
/// walkers stop enumerating and dispatchers stop handing out new files.
/// Hashes already in flight are allowed to finish.
#[derive(Debug, Default)]
pub struct AbortSignal {
    aborted: AtomicBool,
    error: Mutex<ErrorSlot>,
}

#[derive(Debug, Default)]
struct ErrorSlot {
    /// Set by the first `abort`, never cleared
    recorded: bool,
    error: Option<ScanError>,
}

impl AbortSignal {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an error and cancel the run.
    ///
    /// Only the first error is kept; later ones are logged and dropped,
    /// including after the first one has been taken.
    pub fn abort(&self, err: ScanError) {
        let mut slot = self.error.lock();
        if !slot.recorded {
            warn!(error = %err, "Aborting diff run");
            slot.recorded = true;
            slot.error = Some(err);
        } else {
            debug!(error = %err, "Dropping error reported after abort");
        }
        self.aborted.store(true, Ordering::SeqCst);
    }

    pub fn is_aborted(&self) -> bool {
        self.aborted.load(Ordering::SeqCst)
    }

    /// Take the recorded error, leaving the signal aborted.
    pub fn take_error(&self) -> Option<ScanError> {
        self.error.lock().error.take()
    }

    /// `Err` with the recorded error, unless it was already taken
    pub fn check(&self) -> Result<(), ScanError> {
        match self.take_error() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}
