//! Loading, writing and building the `releases.json` dataset.

pub mod builder;

use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

use crate::models::TitleEntry;

pub use builder::build_entries;

#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("Failed to access dataset {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed dataset: {0}")]
    Parse(#[source] serde_json::Error),

    #[error("Entry {index} has an empty title")]
    EmptyTitle { index: usize },

    #[error("Failed to serialize dataset: {0}")]
    Serialize(#[source] serde_json::Error),
}

/// Parses a dataset, rejecting it as a whole on the first malformed entry.
pub fn parse_entries(json: &str) -> Result<Vec<TitleEntry>, DatasetError> {
    let entries: Vec<TitleEntry> = serde_json::from_str(json).map_err(DatasetError::Parse)?;

    if let Some(index) = entries.iter().position(|e| e.title.trim().is_empty()) {
        return Err(DatasetError::EmptyTitle { index });
    }

    Ok(entries)
}

pub fn load_entries(path: &Path) -> Result<Vec<TitleEntry>, DatasetError> {
    let content = std::fs::read_to_string(path).map_err(|source| DatasetError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let entries = parse_entries(&content)?;
    info!("Loaded {} titles from {}", entries.len(), path.display());
    Ok(entries)
}

/// Pretty JSON with two-space indentation; non-ASCII titles are kept as-is.
pub fn to_json(entries: &[TitleEntry]) -> Result<String, DatasetError> {
    serde_json::to_string_pretty(entries).map_err(DatasetError::Serialize)
}

pub fn write_entries(path: &Path, entries: &[TitleEntry]) -> Result<(), DatasetError> {
    let io_error = |source| DatasetError::Io {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent).map_err(io_error)?;
    }

    std::fs::write(path, to_json(entries)?).map_err(io_error)?;
    info!("Wrote {} ({} anime entries).", path.display(), entries.len());
    Ok(())
}
