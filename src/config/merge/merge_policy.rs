//! Merge rules: defaults, override order.

use crate::logging::LoggingConfig;
use crate::tree::scanner::ScanConfig;
use config::Config;
use config::ConfigBuilder;
use config::ConfigError;

/// Create a Config builder with merge policy defaults applied.
pub fn builder_with_defaults() -> Result<ConfigBuilder<config::builder::DefaultState>, ConfigError>
{
    let scan = ScanConfig::default();
    let logging = LoggingConfig::default();

    Config::builder()
        .set_default("scan.workers", scan.workers as u64)?
        .set_default("scan.queue_capacity", scan.queue_capacity as u64)?
        .set_default("scan.read_buffer_size", scan.read_buffer_size as u64)?
        .set_default("logging.enabled", logging.enabled)?
        .set_default("logging.level", logging.level)?
        .set_default("logging.format", logging.format)?
        .set_default("logging.output", logging.output)
}
