//! Integration tests for sumdiff

mod cli_commands;
mod diff_scenarios;
