//! Core data types shared by the scanner, the diff engine and the orderer.

use serde::{Deserialize, Serialize};
use std::fmt;

/// SHA-256 digest of a file's content. Empty for directories.
pub type Checksum = Vec<u8>;

/// A filesystem entry, keyed by its path relative to the scanned root.
///
/// Paths always use `/` as separator so that entries from two different
/// roots compare by path alone.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Entry {
    pub path: String,
    pub is_directory: bool,
}

impl Entry {
    pub fn file(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            is_directory: false,
        }
    }

    pub fn directory(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            is_directory: true,
        }
    }
}

/// An [`Entry`] together with its content checksum
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChecksumedEntry {
    pub entry: Entry,
    pub checksum: Checksum,
}

impl ChecksumedEntry {
    /// Directories carry no content, so their checksum is always empty.
    pub fn directory(path: impl Into<String>) -> Self {
        Self {
            entry: Entry::directory(path),
            checksum: Vec::new(),
        }
    }

    pub fn file(path: impl Into<String>, checksum: Checksum) -> Self {
        Self {
            entry: Entry::file(path),
            checksum,
        }
    }

    pub fn path(&self) -> &str {
        &self.entry.path
    }

    /// Hex rendering of the checksum, for logs.
    pub fn checksum_hex(&self) -> String {
        hex::encode(&self.checksum)
    }
}

/// Which of the two scanned trees produced a record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Origin {
    Source,
    Target,
}

impl fmt::Display for Origin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Origin::Source => write!(f, "source"),
            Origin::Target => write!(f, "target"),
        }
    }
}

/// Sync action for a single path.
///
/// Variant order is the apply order: every `Delete` runs before every
/// `Create`, which runs before every `Copy`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    Delete,
    Create,
    Copy,
}

impl Operation {
    pub const ALL: [Operation; 3] = [Operation::Delete, Operation::Create, Operation::Copy];

    pub fn name(&self) -> &'static str {
        match self {
            Operation::Delete => "delete",
            Operation::Create => "create",
            Operation::Copy => "copy",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A decided operation on one path
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FileOperation {
    pub operation: Operation,
    #[serde(flatten)]
    pub entry: Entry,
}

impl FileOperation {
    pub fn new(operation: Operation, entry: Entry) -> Self {
        Self { operation, entry }
    }

    pub fn path(&self) -> &str {
        &self.entry.path
    }

    pub fn is_directory(&self) -> bool {
        self.entry.is_directory
    }

    /// Segment count of the containing directory, see [`crate::tree::path::depth`].
    pub fn depth(&self) -> usize {
        crate::tree::path::depth(&self.entry.path, self.entry.is_directory)
    }
}

impl fmt::Display for FileOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} `{}`", self.operation, self.entry.path)
    }
}
