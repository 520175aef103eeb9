use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::info;

use crate::constants::{APP_NAME, page, paths, seadex};
use crate::render::RenderOptions;
use crate::table::GroupBy;
use crate::theme::FileThemeStore;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub general: GeneralConfig,

    pub paths: PathsConfig,

    pub render: RenderConfig,

    pub seadex: SeaDexConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    pub log_level: String,

    /// Number of tokio worker threads (default: 2)
    /// Set to 0 to use the number of CPU cores
    pub worker_threads: usize,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            worker_threads: 2,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    /// Dataset read by `render` and written by `fetch`.
    pub data_path: String,

    pub output_path: String,

    /// Theme preference file. Defaults to the platform config dir.
    pub preference_path: Option<String>,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            data_path: paths::DATA_FILE.to_string(),
            output_path: paths::OUTPUT_FILE.to_string(),
            preference_path: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    pub page_title: String,

    /// "entry" keeps every dataset entry in its own group, "title" merges
    /// adjacent entries that share a title.
    pub group_by: GroupBy,

    pub show_legend: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            page_title: page::DEFAULT_TITLE.to_string(),
            group_by: GroupBy::Entry,
            show_legend: true,
        }
    }
}

impl RenderConfig {
    #[must_use]
    pub fn options(&self) -> RenderOptions {
        RenderOptions {
            page_title: self.page_title.clone(),
            show_legend: self.show_legend,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SeaDexConfig {
    pub api_url: String,

    pub title_mapping_url: String,

    /// Request timeout in seconds (default: 30)
    pub request_timeout_seconds: u32,
}

impl Default for SeaDexConfig {
    fn default() -> Self {
        Self {
            api_url: seadex::API_URL.to_string(),
            title_mapping_url: seadex::TITLE_MAPPING_URL.to_string(),
            request_timeout_seconds: 30,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let paths = Self::config_paths();

        for path in &paths {
            if path.exists() {
                info!("Loading config from: {}", path.display());
                return Self::load_from_path(path);
            }
        }

        info!("No config file found, using defaults");
        Ok(Self::default())
    }

    pub fn load_from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    pub fn save_to_path(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        info!("Config saved to: {}", path.display());
        Ok(())
    }

    fn config_paths() -> Vec<PathBuf> {
        let mut paths = vec![];

        paths.push(PathBuf::from("config.toml"));

        if let Some(config_dir) = dirs::config_dir() {
            paths.push(config_dir.join(APP_NAME).join("config.toml"));
        }

        if let Some(home) = dirs::home_dir() {
            paths.push(home.join(format!(".{APP_NAME}")).join("config.toml"));
        }

        paths
    }

    fn default_config_path() -> PathBuf {
        PathBuf::from("config.toml")
    }

    pub fn create_default_if_missing() -> Result<bool> {
        let path = Self::default_config_path();
        if path.exists() {
            Ok(false)
        } else {
            let config = Self::default();
            config.save_to_path(&path)?;
            info!("Created default config file: {}", path.display());
            Ok(true)
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.paths.data_path.trim().is_empty() {
            anyhow::bail!("paths.data_path cannot be empty");
        }

        if self.paths.output_path.trim().is_empty() {
            anyhow::bail!("paths.output_path cannot be empty");
        }

        if self.seadex.request_timeout_seconds == 0 {
            anyhow::bail!("seadex.request_timeout_seconds must be > 0");
        }

        url::Url::parse(&self.seadex.api_url)
            .with_context(|| format!("Invalid SeaDex API URL: {}", self.seadex.api_url))?;

        Ok(())
    }

    #[must_use]
    pub fn theme_store(&self) -> FileThemeStore {
        self.paths
            .preference_path
            .as_deref()
            .map_or_else(FileThemeStore::default, FileThemeStore::new)
    }
}
