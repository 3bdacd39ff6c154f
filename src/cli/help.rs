//! CLI help and command-name contract for logging and routing.

use crate::cli::parse::Commands;

/// Command name recorded with each command's log summary.
pub fn command_name(command: &Commands) -> &'static str {
    match command {
        Commands::Add { .. } => "add",
        Commands::List => "list",
        Commands::Diff { .. } => "diff",
    }
}

/// Printed by `add` when neither directory is given.
pub fn add_usage() -> String {
    [
        "Usage: sumdiff add [--source <DIR>] [--target <DIR>]",
        "",
        "Remember the directories used by `sumdiff diff`.",
        "At least one of --source or --target is required.",
    ]
    .join("\n")
}
