//! CLI presentation: text and json formatters per command family.

mod operations;
mod resource;

pub use operations::{format_operations_json, format_operations_text};
pub use resource::{format_add_result, format_resource_table};
