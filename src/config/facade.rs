//! Config loading entry points.

use super::merge::merge_policy;
use super::sources::{environment, global_file};
use super::SumdiffConfig;
use crate::error::ApiError;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Loads [`SumdiffConfig`] from its layered sources
pub struct ConfigLoader;

impl ConfigLoader {
    /// Defaults, then the global config file, then the environment.
    pub fn load() -> Result<SumdiffConfig, ApiError> {
        let builder = merge_policy::builder_with_defaults()?;
        let builder = global_file::add_to_builder(builder)?;
        let builder = environment::add_to_builder(builder)?;
        Self::finish(builder.build()?)
    }

    /// Defaults, then `path` in place of the global file, then the environment.
    pub fn load_from_file(path: &Path) -> Result<SumdiffConfig, ApiError> {
        if !path.exists() {
            return Err(ApiError::ConfigError(format!(
                "Config file not found: {}",
                path.display()
            )));
        }
        let builder = merge_policy::builder_with_defaults()?;
        let builder = global_file::add_explicit_to_builder(builder, path)?;
        let builder = environment::add_to_builder(builder)?;
        Self::finish(builder.build()?)
    }

    /// `load_from_file` when a path is given, `load` otherwise
    pub fn load_with_override(path: Option<&Path>) -> Result<SumdiffConfig, ApiError> {
        match path {
            Some(path) => Self::load_from_file(path),
            None => Self::load(),
        }
    }

    /// Path of the global config file, whether or not it exists
    pub fn global_config_path() -> Option<PathBuf> {
        global_file::global_config_path()
    }

    fn finish(config: config::Config) -> Result<SumdiffConfig, ApiError> {
        let config: SumdiffConfig = config.try_deserialize()?;
        config.ensure_valid()?;
        debug!(
            workers = config.scan.workers,
            queue_capacity = config.scan.queue_capacity,
            "Configuration loaded"
        );
        Ok(config)
    }
}
