//! Fetch command handler

use anyhow::Context;
use std::path::PathBuf;
use tracing::info;

use crate::clients::SeaDexClient;
use crate::config::Config;
use crate::dataset::{self, build_entries};

pub async fn cmd_fetch(config: &Config, output: Option<PathBuf>) -> anyhow::Result<()> {
    let output = output.unwrap_or_else(|| PathBuf::from(&config.paths.data_path));
    let client = SeaDexClient::new(&config.seadex);

    println!("Fetching SeaDex entries and title mapping...");
    let (titles, records) = tokio::try_join!(client.fetch_title_mapping(), client.fetch_entries())
        .context("Failed to download SeaDex data")?;
    info!(
        titles = titles.len(),
        records = records.len(),
        "Downloaded SeaDex data"
    );

    let entries = build_entries(&records, &titles);
    dataset::write_entries(&output, &entries)
        .with_context(|| format!("Failed to write dataset: {}", output.display()))?;

    println!(
        "✓ Wrote {} ({} anime entries).",
        output.display(),
        entries.len()
    );
    Ok(())
}
