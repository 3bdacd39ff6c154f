//! CLI domain: parse, route, help, output, and presentation only.
//! Route handlers call into `api` and `resource`; no diff logic lives here.

mod help;
mod output;
mod parse;
mod presentation;
mod route;

pub use help::{add_usage, command_name};
pub use output::map_error;
pub use parse::{Cli, Commands};
pub use presentation::{
    format_add_result, format_operations_json, format_operations_text, format_resource_table,
};
pub use route::RunContext;
