//! Light/dark theme preference.
//!
//! The renderer never reads ambient state: callers build a [`ThemeSettings`]
//! from a [`ThemeStore`] once, pass it in, and write changes back through the
//! same store.

use serde::{Deserialize, Serialize};
use std::cell::Cell;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

use crate::constants::APP_NAME;

/// Key used by the page script for `localStorage`.
pub const STORAGE_KEY: &str = "theme";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    #[default]
    Dark,
}

impl Theme {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }
}

impl std::fmt::Display for Theme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Theme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "light" => Ok(Self::Light),
            "dark" => Ok(Self::Dark),
            other => Err(format!("unknown theme '{other}' (expected light or dark)")),
        }
    }
}

#[derive(Debug, Error)]
pub enum ThemeStoreError {
    #[error("Failed to access theme preference at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid theme preference file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Failed to serialize theme preference: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// Read/write port for the persisted theme preference.
pub trait ThemeStore {
    /// Returns `Ok(None)` when no preference has been stored yet.
    fn load(&self) -> Result<Option<Theme>, ThemeStoreError>;

    fn save(&self, theme: Theme) -> Result<(), ThemeStoreError>;
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct PreferenceFile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    theme: Option<Theme>,
}

/// Stores the preference as a small TOML file.
#[derive(Debug, Clone)]
pub struct FileThemeStore {
    path: PathBuf,
}

impl FileThemeStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `<config dir>/seadex-table/preferences.toml`, falling back to the
    /// working directory when the platform has no config dir.
    #[must_use]
    pub fn default_path() -> PathBuf {
        dirs::config_dir().map_or_else(
            || PathBuf::from("preferences.toml"),
            |dir| dir.join(APP_NAME).join("preferences.toml"),
        )
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: std::io::Error) -> ThemeStoreError {
        ThemeStoreError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

impl Default for FileThemeStore {
    fn default() -> Self {
        Self::new(Self::default_path())
    }
}

impl ThemeStore for FileThemeStore {
    fn load(&self) -> Result<Option<Theme>, ThemeStoreError> {
        if !self.path.exists() {
            debug!("No theme preference at {}", self.path.display());
            return Ok(None);
        }

        let content = std::fs::read_to_string(&self.path).map_err(|e| self.io_error(e))?;
        let file: PreferenceFile =
            toml::from_str(&content).map_err(|source| ThemeStoreError::Parse {
                path: self.path.clone(),
                source,
            })?;

        Ok(file.theme)
    }

    fn save(&self, theme: Theme) -> Result<(), ThemeStoreError> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent).map_err(|e| self.io_error(e))?;
        }

        let content = toml::to_string_pretty(&PreferenceFile { theme: Some(theme) })?;
        std::fs::write(&self.path, content).map_err(|e| self.io_error(e))?;
        info!("Theme preference saved to: {}", self.path.display());
        Ok(())
    }
}

/// In-process store, used for dry runs and tests.
#[derive(Debug, Default)]
pub struct MemoryThemeStore {
    theme: Cell<Option<Theme>>,
}

impl ThemeStore for MemoryThemeStore {
    fn load(&self) -> Result<Option<Theme>, ThemeStoreError> {
        Ok(self.theme.get())
    }

    fn save(&self, theme: Theme) -> Result<(), ThemeStoreError> {
        self.theme.set(Some(theme));
        Ok(())
    }
}

/// Theme settings handed to the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ThemeSettings {
    theme: Theme,
}

impl ThemeSettings {
    #[must_use]
    pub const fn new(theme: Theme) -> Self {
        Self { theme }
    }

    /// Reads the stored preference once. Absence means dark.
    pub fn load(store: &impl ThemeStore) -> Result<Self, ThemeStoreError> {
        Ok(Self::new(store.load()?.unwrap_or_default()))
    }

    #[must_use]
    pub const fn theme(&self) -> Theme {
        self.theme
    }

    /// Flips the theme and persists the new value.
    pub fn toggle(&mut self, store: &impl ThemeStore) -> Result<Theme, ThemeStoreError> {
        self.set(store, self.theme.toggled())
    }

    pub fn set(&mut self, store: &impl ThemeStore, theme: Theme) -> Result<Theme, ThemeStoreError> {
        store.save(theme)?;
        self.theme = theme;
        Ok(theme)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_store() -> FileThemeStore {
        FileThemeStore::new(
            std::env::temp_dir()
                .join(format!("seadex-table-theme-{}", uuid::Uuid::new_v4()))
                .join("preferences.toml"),
        )
    }

    #[test]
    fn test_absent_preference_defaults_to_dark() {
        let store = MemoryThemeStore::default();
        let settings = ThemeSettings::load(&store).unwrap();
        assert_eq!(settings.theme(), Theme::Dark);
    }

    #[test]
    fn test_toggle_persists() {
        let store = MemoryThemeStore::default();
        let mut settings = ThemeSettings::load(&store).unwrap();

        assert_eq!(settings.toggle(&store).unwrap(), Theme::Light);
        assert_eq!(store.load().unwrap(), Some(Theme::Light));

        assert_eq!(settings.toggle(&store).unwrap(), Theme::Dark);
        assert_eq!(ThemeSettings::load(&store).unwrap().theme(), Theme::Dark);
    }

    #[test]
    fn test_file_store_round_trip() {
        let store = temp_store();
        assert_eq!(store.load().unwrap(), None);

        let mut settings = ThemeSettings::load(&store).unwrap();
        settings.set(&store, Theme::Light).unwrap();

        let reloaded = FileThemeStore::new(store.path());
        assert_eq!(reloaded.load().unwrap(), Some(Theme::Light));

        let content = std::fs::read_to_string(store.path()).unwrap();
        assert!(content.contains(r#"theme = "light""#));

        if let Some(dir) = store.path().parent() {
            let _ = std::fs::remove_dir_all(dir);
        }
    }

    #[test]
    fn test_file_store_rejects_garbage() {
        let store = temp_store();
        if let Some(parent) = store.path().parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(store.path(), "theme = \"sepia\"").unwrap();

        assert!(matches!(store.load(), Err(ThemeStoreError::Parse { .. })));

        if let Some(dir) = store.path().parent() {
            let _ = std::fs::remove_dir_all(dir);
        }
    }

    #[test]
    fn test_theme_parse() {
        assert_eq!("Light".parse::<Theme>(), Ok(Theme::Light));
        assert_eq!("dark".parse::<Theme>(), Ok(Theme::Dark));
        assert!("sepia".parse::<Theme>().is_err());
        assert_eq!(Theme::Light.toggled(), Theme::Dark);
    }
}
