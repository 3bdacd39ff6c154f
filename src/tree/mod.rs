//! Directory tree scanning
//!
//! Walks a root, hashes every regular file and emits records keyed by
//! path relative to that root.

pub mod hasher;
pub mod path;
pub mod scanner;
pub mod walker;

pub use scanner::{scan_tree, ScanConfig, ScanStream, TreeScanner};
