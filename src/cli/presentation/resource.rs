//! `add` and `list` output.

use crate::resource::Resource;
use comfy_table::Table;
use owo_colors::OwoColorize;
use std::path::Path;

fn display_or_dash(path: Option<&Path>) -> String {
    path.map(|p| p.display().to_string())
        .unwrap_or_else(|| "-".to_string())
}

/// Table of the remembered directories, with the resource file as heading
pub fn format_resource_table(resource: &Resource, resource_path: &Path) -> String {
    let mut table = Table::new();
    table.load_preset(comfy_table::presets::UTF8_FULL);
    table.set_header(vec!["Role", "Directory"]);
    table.add_row(vec![
        "source".to_string(),
        display_or_dash(resource.source.as_deref()),
    ]);
    table.add_row(vec![
        "target".to_string(),
        display_or_dash(resource.target.as_deref()),
    ]);

    format!(
        "{}\n{}",
        resource_path.display().to_string().bold(),
        table
    )
}

/// Summary after `add` updated the resource file
pub fn format_add_result(resource: &Resource, source_updated: bool, target_updated: bool) -> String {
    let mut lines = Vec::new();
    if source_updated {
        lines.push(format!(
            "source set to {}",
            display_or_dash(resource.source.as_deref())
        ));
    }
    if target_updated {
        lines.push(format!(
            "target set to {}",
            display_or_dash(resource.target.as_deref())
        ));
    }
    lines.join("\n")
}
