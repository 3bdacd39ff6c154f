//! Environment source: SUMDIFF__SECTION__KEY, e.g. SUMDIFF__SCAN__WORKERS=8

use config::builder::DefaultState;
use config::ConfigBuilder;
use config::ConfigError;
use config::Environment;

pub const ENV_PREFIX: &str = "SUMDIFF";
pub const ENV_SEPARATOR: &str = "__";

/// Add the environment source to builder. Numbers and booleans are parsed.
pub fn add_to_builder(
    builder: ConfigBuilder<DefaultState>,
) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    Ok(builder.add_source(
        Environment::with_prefix(ENV_PREFIX)
            .prefix_separator(ENV_SEPARATOR)
            .separator(ENV_SEPARATOR)
            .try_parsing(true),
    ))
}
