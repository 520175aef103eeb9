pub mod cli;
pub mod clients;
pub mod config;
pub mod constants;
pub mod dataset;
pub mod models;
pub mod render;
pub mod table;
pub mod theme;

use anyhow::Context;
use cli::{Cli, Commands, ThemeCommands};
pub use config::Config;
use tracing::debug;
use tracing_subscriber::EnvFilter;

pub fn init_logging(config: &Config) -> anyhow::Result<()> {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.general.log_level));

    let fmt_layer = tracing_subscriber::fmt::layer().with_writer(std::io::stderr);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()
        .context("Failed to initialize logging")
}

pub async fn run(cli: Cli, config: Config) -> anyhow::Result<()> {
    init_logging(&config)?;
    config.validate()?;
    debug!("Using data path {}", config.paths.data_path);

    match cli.command {
        Commands::Render {
            input,
            output,
            theme,
            group_by,
        } => cli::cmd_render(&config, input, output, theme, group_by),

        Commands::Rows {
            input,
            group_by,
            json,
        } => cli::cmd_rows(&config, input, group_by, json),

        Commands::Fetch { output } => cli::cmd_fetch(&config, output).await,

        Commands::Theme { command } => match command {
            ThemeCommands::Show => cli::cmd_theme_show(&config),
            ThemeCommands::Toggle => cli::cmd_theme_toggle(&config),
            ThemeCommands::Set { theme } => cli::cmd_theme_set(&config, theme),
        },

        Commands::Init => {
            if Config::create_default_if_missing()? {
                println!("✓ Config file created. Edit config.toml and run again.");
            } else {
                println!("config.toml already exists, leaving it untouched.");
            }
            Ok(())
        }
    }
}
