//! Content checksums using SHA-256

use crate::error::ScanError;
use crate::types::Checksum;
use sha2::{Digest, Sha256};
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Default read buffer for streaming a file through the hasher
pub const DEFAULT_READ_BUFFER: usize = 64 * 1024;

/// Compute the checksum of a file by streaming its bytes through SHA-256.
///
/// The file is opened and read in chunks of `buffer_size`; it is never
/// loaded into memory whole.
pub fn compute_file_checksum(path: &Path, buffer_size: usize) -> Result<Checksum, ScanError> {
    let to_hash_error = |source| ScanError::Hash {
        path: path.to_path_buf(),
        source,
    };

    let mut file = File::open(path).map_err(to_hash_error)?;
    let mut hasher = Sha256::new();
    let mut buffer = vec![0u8; buffer_size.max(1)];

    loop {
        let bytes_read = file.read(&mut buffer).map_err(to_hash_error)?;
        if bytes_read == 0 {
            break;
        }
        hasher.update(&buffer[..bytes_read]);
    }

    Ok(hasher.finalize().to_vec())
}

/// Compute the checksum of in-memory bytes
pub fn compute_content_checksum(content: &[u8]) -> Checksum {
    Sha256::digest(content).to_vec()
}
