//! Persisted source and target directories
//!
//! A small JSON file remembers the last source and target so that `diff`
//! can run without arguments.

use crate::error::ApiError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// File name of the resource file inside the config directory
pub const RESOURCE_FILE: &str = "resource.json";

/// Resource file location settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceConfig {
    /// Explicit resource file path (defaults to `<config dir>/sumdiff/resource.json`)
    #[serde(default)]
    pub path: Option<PathBuf>,
}

impl ResourceConfig {
    /// Resolve the resource file path
    pub fn resolve_path(&self) -> Result<PathBuf, ApiError> {
        if let Some(ref path) = self.path {
            return Ok(path.clone());
        }
        default_resource_path()
    }
}

/// `$XDG_CONFIG_HOME/sumdiff/resource.json` or the platform equivalent
pub fn default_resource_path() -> Result<PathBuf, ApiError> {
    crate::config::config_dir()
        .map(|dir| dir.join(RESOURCE_FILE))
        .ok_or_else(|| ApiError::ResourceError("Could not determine home directory".to_string()))
}

/// Last used source and target directories
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resource {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<PathBuf>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<PathBuf>,
}

impl Resource {
    /// Load from `path`. A missing file is an empty resource.
    pub fn load(path: &Path) -> Result<Self, ApiError> {
        if !path.exists() {
            debug!(path = %path.display(), "Resource file not found, starting empty");
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).map_err(|e| {
            ApiError::ResourceError(format!("Failed to read {}: {}", path.display(), e))
        })?;
        serde_json::from_str(&content).map_err(|e| {
            ApiError::ResourceError(format!("Failed to parse {}: {}", path.display(), e))
        })
    }

    /// Write to `path`, creating parent directories as needed
    pub fn save(&self, path: &Path) -> Result<(), ApiError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                ApiError::ResourceError(format!(
                    "Failed to create directory {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }

        let content = serde_json::to_string_pretty(self)
            .map_err(|e| ApiError::ResourceError(format!("Failed to serialize resource: {}", e)))?;
        fs::write(path, content).map_err(|e| {
            ApiError::ResourceError(format!("Failed to write {}: {}", path.display(), e))
        })?;
        debug!(path = %path.display(), "Resource file saved");
        Ok(())
    }

    pub fn set_source(&mut self, dir: &Path) -> Result<(), ApiError> {
        self.source = Some(existing_directory(dir)?);
        Ok(())
    }

    pub fn set_target(&mut self, dir: &Path) -> Result<(), ApiError> {
        self.target = Some(existing_directory(dir)?);
        Ok(())
    }

    /// Both directories, or an error naming what is missing
    pub fn validate(&self) -> Result<(&Path, &Path), ApiError> {
        match (&self.source, &self.target) {
            (Some(source), Some(target)) => Ok((source.as_path(), target.as_path())),
            _ => Err(ApiError::ResourceError(
                "`source` and `target` are required".to_string(),
            )),
        }
    }
}

fn existing_directory(dir: &Path) -> Result<PathBuf, ApiError> {
    if !dir.is_dir() {
        return Err(ApiError::ResourceError(format!(
            "directory {} does not exist",
            dir.display()
        )));
    }
    dunce::canonicalize(dir).map_err(|e| {
        ApiError::ResourceError(format!("Failed to resolve {}: {}", dir.display(), e))
    })
}
