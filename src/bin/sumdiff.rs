//! sumdiff CLI Binary
//!
//! Command-line interface for the checksum based directory diff.

use clap::Parser;
use std::process;
use sumdiff::cli::{map_error, Cli, RunContext};
use sumdiff::config::ConfigLoader;
use sumdiff::logging::{init_logging, LoggingConfig};
use tracing::{error, info};

fn main() {
    let cli = Cli::parse();

    let loaded = ConfigLoader::load_with_override(cli.config.as_deref());

    // Logging comes up before config errors are reported so they get logged too
    let logging_config = build_logging_config(&cli, loaded.as_ref().ok().map(|c| &c.logging));
    if let Err(e) = init_logging(&logging_config) {
        eprintln!("Failed to initialize logging: {}", e);
        process::exit(1);
    }

    info!("sumdiff starting");

    let context = match loaded.and_then(RunContext::from_config) {
        Ok(ctx) => ctx,
        Err(e) => {
            error!("Error loading configuration: {}", e);
            eprintln!("{}", map_error(&e));
            process::exit(1);
        }
    };

    match context.execute(&cli.command) {
        Ok(output) => {
            if !output.is_empty() {
                println!("{}", output);
            }
        }
        Err(e) => {
            error!("Command failed: {}", e);
            eprintln!("{}", map_error(&e));
            process::exit(1);
        }
    }
}

/// Build logging configuration from CLI args and the config file.
/// Precedence: CLI flags override config file override defaults.
fn build_logging_config(cli: &Cli, from_file: Option<&LoggingConfig>) -> LoggingConfig {
    let mut config = from_file.cloned().unwrap_or_default();

    if cli.quiet {
        config.enabled = false;
    }
    if cli.verbose {
        config.level = "debug".to_string();
    }
    if let Some(ref level) = cli.log_level {
        config.level = level.clone();
    }
    if let Some(ref format) = cli.log_format {
        config.format = format.clone();
    }
    if let Some(ref output) = cli.log_output {
        config.output = output.clone();
    }
    if let Some(ref file) = cli.log_file {
        config.file = file.clone();
        if cli.log_output.is_none() {
            config.output = "file".to_string();
        }
    }

    config
}
