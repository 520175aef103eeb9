//! CLI module - Command-line interface for seadex-table
//!
//! This module provides a structured CLI using clap for argument parsing.

mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::table::GroupBy;
use crate::theme::Theme;

/// seadex-table - SeaDex release comparison page generator
/// Renders the best and alternative release groups per anime as one static table
#[derive(Parser)]
#[command(name = "seadex-table")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Use this config file instead of the default search paths
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Render the dataset into a static HTML page
    #[command(alias = "r")]
    Render {
        /// Dataset to read (defaults to paths.data_path)
        #[arg(long, short)]
        input: Option<PathBuf>,
        /// HTML file to write (defaults to paths.output_path)
        #[arg(long, short)]
        output: Option<PathBuf>,
        /// Initial theme; overrides the stored preference for this render
        #[arg(long)]
        theme: Option<Theme>,
        /// Row grouping: entry or title
        #[arg(long)]
        group_by: Option<GroupBy>,
    },

    /// Print the flattened table rows
    Rows {
        /// Dataset to read (defaults to paths.data_path)
        #[arg(long, short)]
        input: Option<PathBuf>,
        /// Row grouping: entry or title
        #[arg(long)]
        group_by: Option<GroupBy>,
        /// Emit JSON instead of a text listing
        #[arg(long)]
        json: bool,
    },

    /// Download SeaDex data and rebuild the dataset
    Fetch {
        /// Where to write the dataset (defaults to paths.data_path)
        #[arg(long, short)]
        output: Option<PathBuf>,
    },

    /// Show or change the stored theme preference
    Theme {
        #[command(subcommand)]
        command: ThemeCommands,
    },

    /// Create default config file
    Init,
}

#[derive(Subcommand)]
pub enum ThemeCommands {
    /// Print the stored theme
    Show,
    /// Switch between light and dark
    Toggle,
    /// Store an explicit theme
    Set {
        /// light or dark
        theme: Theme,
    },
}

pub use commands::*;
