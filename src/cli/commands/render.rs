//! Render command handler

use anyhow::Context;
use std::path::PathBuf;
use tracing::info;

use super::theme::stored_settings;
use crate::config::Config;
use crate::dataset;
use crate::render::render_page;
use crate::table::{self, GroupBy};
use crate::theme::{Theme, ThemeSettings};

pub fn cmd_render(
    config: &Config,
    input: Option<PathBuf>,
    output: Option<PathBuf>,
    theme: Option<Theme>,
    group_by: Option<GroupBy>,
) -> anyhow::Result<()> {
    let input = input.unwrap_or_else(|| PathBuf::from(&config.paths.data_path));
    let output = output.unwrap_or_else(|| PathBuf::from(&config.paths.output_path));

    let entries = dataset::load_entries(&input)
        .with_context(|| format!("Failed to load dataset: {}", input.display()))?;

    let group_by = group_by.unwrap_or(config.render.group_by);
    let rows = table::flatten_with(&entries, group_by);
    let groups = table::group_count(&rows);

    let settings = theme.map_or_else(|| stored_settings(config), ThemeSettings::new);
    let html = render_page(&rows, settings, &config.render.options());

    if let Some(parent) = output.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }
    std::fs::write(&output, html)
        .with_context(|| format!("Failed to write page: {}", output.display()))?;

    info!(
        titles = entries.len(),
        rows = rows.len(),
        groups,
        ?group_by,
        theme = %settings.theme(),
        "Rendered comparison table"
    );
    println!(
        "✓ Rendered {} titles ({} rows) to {}",
        entries.len(),
        rows.len(),
        output.display()
    );

    Ok(())
}
