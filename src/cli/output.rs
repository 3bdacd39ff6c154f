//! CLI output: error mapping from domain errors to stable CLI surface.

use crate::error::ApiError;

/// Map domain errors to the single line printed on stderr.
pub fn map_error(e: &ApiError) -> String {
    format!("error: {}", e)
}
