//! CLI route: single route table and run context. Dispatches to domain services and presentation.

use crate::api::{diff_directories, DiffRequest};
use crate::cli::parse::Commands;
use crate::cli::{add_usage, command_name};
use crate::config::{ConfigLoader, SumdiffConfig};
use crate::error::ApiError;
use crate::resource::Resource;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, info, warn};

use super::presentation::{
    format_add_result, format_operations_json, format_operations_text, format_resource_table,
};

/// Runtime context for CLI execution: loaded config and the resource file location.
pub struct RunContext {
    config: SumdiffConfig,
    resource_path: PathBuf,
}

impl RunContext {
    /// Create run context from an optional config path. Uses ConfigLoader only.
    pub fn new(config_path: Option<PathBuf>) -> Result<Self, ApiError> {
        let config = ConfigLoader::load_with_override(config_path.as_deref())?;
        Self::from_config(config)
    }

    /// Create run context from an already loaded config.
    pub fn from_config(config: SumdiffConfig) -> Result<Self, ApiError> {
        let resource_path = config.resource.resolve_path()?;
        debug!(resource_path = %resource_path.display(), "Run context ready");
        Ok(Self {
            config,
            resource_path,
        })
    }

    pub fn config(&self) -> &SumdiffConfig {
        &self.config
    }

    pub fn resource_path(&self) -> &Path {
        &self.resource_path
    }

    /// Execute a CLI command via the single route table.
    pub fn execute(&self, command: &Commands) -> Result<String, ApiError> {
        let started = Instant::now();
        let result = self.execute_inner(command);
        let duration_ms = started.elapsed().as_millis() as u64;
        match &result {
            Ok(_) => info!(command = command_name(command), duration_ms, "Command finished"),
            Err(e) => warn!(command = command_name(command), duration_ms, error = %e, "Command failed"),
        }
        result
    }

    fn execute_inner(&self, command: &Commands) -> Result<String, ApiError> {
        match command {
            Commands::Add { source, target } => {
                self.handle_add(source.as_deref(), target.as_deref())
            }
            Commands::List => self.handle_list(),
            Commands::Diff {
                source,
                target,
                format,
            } => self.handle_diff(source.as_deref(), target.as_deref(), format),
        }
    }

    fn handle_add(&self, source: Option<&Path>, target: Option<&Path>) -> Result<String, ApiError> {
        if source.is_none() && target.is_none() {
            return Ok(add_usage());
        }

        let mut resource = Resource::load(&self.resource_path)?;
        if let Some(dir) = source {
            resource.set_source(dir)?;
        }
        if let Some(dir) = target {
            resource.set_target(dir)?;
        }
        resource.save(&self.resource_path)?;

        Ok(format_add_result(
            &resource,
            source.is_some(),
            target.is_some(),
        ))
    }

    fn handle_list(&self) -> Result<String, ApiError> {
        let resource = Resource::load(&self.resource_path)?;
        Ok(format_resource_table(&resource, &self.resource_path))
    }

    fn handle_diff(
        &self,
        source: Option<&Path>,
        target: Option<&Path>,
        format: &str,
    ) -> Result<String, ApiError> {
        let mut resource = Resource::load(&self.resource_path)?;
        if let Some(dir) = source {
            resource.source = Some(dir.to_path_buf());
        }
        if let Some(dir) = target {
            resource.target = Some(dir.to_path_buf());
        }
        let (source, target) = resource.validate()?;

        let request =
            DiffRequest::new(source, target).with_scan_config(self.config.scan.clone());

        let runtime = tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
            .map_err(|e| ApiError::RuntimeError(format!("Failed to start runtime: {}", e)))?;
        let operations = runtime.block_on(diff_directories(&request))?;

        if format == "json" {
            format_operations_json(&operations)
        } else {
            Ok(format_operations_text(&operations))
        }
    }
}
