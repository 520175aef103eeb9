//! Rows command handler

use anyhow::Context;
use std::path::PathBuf;

use crate::config::Config;
use crate::dataset;
use crate::table::{self, DisplayRow, GroupBy};

pub fn cmd_rows(
    config: &Config,
    input: Option<PathBuf>,
    group_by: Option<GroupBy>,
    json: bool,
) -> anyhow::Result<()> {
    let input = input.unwrap_or_else(|| PathBuf::from(&config.paths.data_path));
    let entries = dataset::load_entries(&input)
        .with_context(|| format!("Failed to load dataset: {}", input.display()))?;

    let rows = table::flatten_with(&entries, group_by.unwrap_or(config.render.group_by));

    if json {
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }

    if rows.is_empty() {
        println!("Dataset is empty.");
        return Ok(());
    }

    println!(
        "{} rows in {} groups",
        rows.len(),
        table::group_count(&rows)
    );
    println!("{:-<96}", "");

    for row in &rows {
        print_row(row);
    }

    Ok(())
}

fn print_row(row: &DisplayRow<'_>) {
    let title = if row.is_first_of_group {
        format!("{} [{}]", row.title, row.group_span)
    } else {
        String::new()
    };

    println!(
        "{:<40} {:<26} {:<26}",
        truncate(&title, 40),
        release_label(row.best_name, row.best_status.as_str()),
        release_label(row.alt_name, row.alt_status.as_str()),
    );
}

fn release_label(name: &str, status: &str) -> String {
    let label = if status.is_empty() {
        name.to_string()
    } else {
        format!("{name} ({status})")
    };
    truncate(&label, 26)
}

fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        text.to_string()
    } else {
        let mut cut: String = text.chars().take(max.saturating_sub(1)).collect();
        cut.push('…');
        cut
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("exactly ten", 11), "exactly ten");
        assert_eq!(truncate("Shingeki no Kyojin", 8), "Shingek…");
    }

    #[test]
    fn test_release_label() {
        assert_eq!(release_label("Vodes", ""), "Vodes");
        assert_eq!(release_label("Vodes", "unmuxed"), "Vodes (unmuxed)");
    }
}
