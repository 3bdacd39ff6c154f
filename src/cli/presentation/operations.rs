//! Diff output. One operation per line in text mode; a JSON array otherwise.

use crate::error::ApiError;
use crate::types::FileOperation;

/// ``<operation> `<path>` `` per line; empty input gives an empty string.
pub fn format_operations_text(operations: &[FileOperation]) -> String {
    operations
        .iter()
        .map(|op| op.to_string())
        .collect::<Vec<_>>()
        .join("\n")
}

/// `[{"operation", "path", "is_directory"}, ...]`; empty input gives `[]`.
pub fn format_operations_json(operations: &[FileOperation]) -> Result<String, ApiError> {
    serde_json::to_string_pretty(operations)
        .map_err(|e| ApiError::RuntimeError(format!("Failed to serialize operations: {}", e)))
}
