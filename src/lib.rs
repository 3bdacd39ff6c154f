//! sumdiff: checksum based directory diff
//!
//! Scans two directory trees concurrently, hashes every file with SHA-256
//! and plans `delete`, `create` and `copy` operations in an order that is
//! safe to apply. Entries only under the source root are deletes; entries
//! only under the target root, or with different content, are creates
//! and copies.

pub mod api;
pub mod cli;
pub mod concurrency;
pub mod config;
pub mod diff;
pub mod error;
pub mod logging;
pub mod resource;
pub mod tree;
pub mod types;

pub use api::{diff_directories, DiffRequest};
pub use error::{ApiError, ScanError};
pub use types::{ChecksumedEntry, Entry, FileOperation, Operation};
