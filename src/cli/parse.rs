//! CLI parse: clap types for sumdiff. No behavior; definitions only.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// sumdiff - checksum based directory diff
#[derive(Parser, Debug)]
#[command(name = "sumdiff")]
#[command(about = "Plan the operations that make one directory match another")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file path (replaces the global config file)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging (debug level)
    #[arg(long, global = true)]
    pub verbose: bool,

    /// Disable logging entirely
    #[arg(long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long, global = true)]
    pub log_format: Option<String>,

    /// Log output (stdout, stderr, file)
    #[arg(long, global = true)]
    pub log_output: Option<String>,

    /// Log file path (when output is "file")
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Remember the source and/or target directory
    Add {
        /// Source directory
        #[arg(long)]
        source: Option<PathBuf>,
        /// Target directory
        #[arg(long)]
        target: Option<PathBuf>,
    },
    /// Show the remembered source and target directories
    List,
    /// Compute delete, create and copy operations between source and target
    Diff {
        /// Source directory for this run only
        #[arg(long)]
        source: Option<PathBuf>,
        /// Target directory for this run only
        #[arg(long)]
        target: Option<PathBuf>,
        /// Output format (text or json)
        #[arg(long, default_value = "text", value_parser = ["text", "json"])]
        format: String,
    },
}
