//! Relative path keys and path depth

use crate::error::ScanError;
use std::path::{Component, Path, PathBuf};
use unicode_normalization::UnicodeNormalization;

/// Canonicalize a root directory without requiring UNC paths on Windows
pub fn canonicalize_root(path: &Path) -> Result<PathBuf, ScanError> {
    dunce::canonicalize(path)
        .map_err(|e| ScanError::validation(path, format!("cannot resolve path: {}", e)))
}

/// Express `path` relative to `root` as a comparison key.
///
/// The key joins components with `/` on every platform and is normalized
/// to Unicode NFC, so the same name produced by two filesystems compares
/// equal. Non UTF-8 names are rejected.
pub fn relative_key(root: &Path, path: &Path) -> Result<String, ScanError> {
    let relative = path.strip_prefix(root).map_err(|_| {
        ScanError::InvalidPath(format!(
            "{} is not under root {}",
            path.display(),
            root.display()
        ))
    })?;

    let mut segments = Vec::new();
    for component in relative.components() {
        match component {
            Component::Normal(name) => {
                let name = name.to_str().ok_or_else(|| {
                    ScanError::InvalidPath(format!("non UTF-8 name in {}", path.display()))
                })?;
                segments.push(name.nfc().collect::<String>());
            }
            Component::CurDir => {}
            _ => {
                return Err(ScanError::InvalidPath(format!(
                    "unexpected component in {}",
                    path.display()
                )))
            }
        }
    }

    if segments.is_empty() {
        return Err(ScanError::InvalidPath(format!(
            "{} is the scanned root",
            path.display()
        )));
    }

    Ok(segments.join("/"))
}

/// Number of directory segments from the root to the entry's containing
/// directory.
///
/// A directory counts its own segments; a file counts its parent's, so a
/// file directly under the root has depth 0.
pub fn depth(key: &str, is_directory: bool) -> usize {
    let dir = if is_directory {
        key
    } else {
        match key.rfind('/') {
            Some(idx) => &key[..idx],
            None => "",
        }
    };

    dir.split('/').filter(|segment| !segment.is_empty()).count()
}
