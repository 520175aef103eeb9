//! Theme preference command handlers

use anyhow::Context;
use tracing::warn;

use crate::config::Config;
use crate::theme::{Theme, ThemeSettings, ThemeStore};

/// Loads the stored preference, falling back to the default theme when the
/// preference file cannot be read.
pub(crate) fn stored_settings(config: &Config) -> ThemeSettings {
    let store = config.theme_store();
    ThemeSettings::load(&store).unwrap_or_else(|e| {
        warn!("Ignoring theme preference: {}", e);
        ThemeSettings::default()
    })
}

pub fn cmd_theme_show(config: &Config) -> anyhow::Result<()> {
    let store = config.theme_store();
    let stored = store.load().context("Failed to read theme preference")?;

    match stored {
        Some(theme) => println!("Theme: {theme}"),
        None => println!("Theme: {} (default)", Theme::default()),
    }
    println!("Stored in: {}", store.path().display());
    Ok(())
}

pub fn cmd_theme_toggle(config: &Config) -> anyhow::Result<()> {
    let store = config.theme_store();
    let mut settings = stored_settings(config);
    let theme = settings
        .toggle(&store)
        .context("Failed to save theme preference")?;

    println!("✓ Theme switched to {theme}");
    Ok(())
}

pub fn cmd_theme_set(config: &Config, theme: Theme) -> anyhow::Result<()> {
    let store = config.theme_store();
    let mut settings = stored_settings(config);
    settings
        .set(&store, theme)
        .context("Failed to save theme preference")?;

    println!("✓ Theme set to {theme}");
    Ok(())
}
