//! Config command - manage settings and the demo dataset.

use anyhow::Result;
use clap::{Args, Subcommand};
use modelsnest_store::{
    Dataset, SettingsStore, ThemeMode, default_config_dir, default_settings_path,
};
use tracing::info;

use crate::output::JsonFormatter;
use crate::{Cli, OutputFormat};

use super::data_dir;

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: ConfigAction,
}

/// Config subcommands.
#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show current configuration.
    Show,

    /// Show configuration and data paths.
    Path,

    /// Set the theme mode: light, dark, or system.
    Theme {
        /// Theme mode to use.
        mode: String,
    },

    /// Set the rows-per-page for list views.
    PageSize {
        /// Rows per page (at least 1).
        size: usize,
    },

    /// Write a demo dataset into the data directory.
    Seed,

    /// Reset settings to defaults.
    Reset,
}

/// Runs the config command.
pub async fn run(args: &ConfigArgs, cli: &Cli) -> Result<()> {
    match &args.action {
        ConfigAction::Show => show_config(cli).await,
        ConfigAction::Path => show_paths(cli),
        ConfigAction::Theme { mode } => set_theme(mode, cli).await,
        ConfigAction::PageSize { size } => set_page_size(*size, cli).await,
        ConfigAction::Seed => seed_dataset(cli).await,
        ConfigAction::Reset => reset_config(cli).await,
    }
}

async fn show_config(cli: &Cli) -> Result<()> {
    let store = SettingsStore::load_default().await?;
    let settings = store.get().await;

    match cli.format {
        OutputFormat::Text => {
            println!("Modelsnest Configuration");
            println!("{}", "─".repeat(40));
            println!();
            println!("Theme:          {}", settings.theme_mode);
            println!("Page size:      {}", settings.page_size);
            println!("Log level:      {}", settings.log_level);
            println!("Show zero rows: {}", settings.show_zero_rows);
        }
        OutputFormat::Json => {
            let formatter = JsonFormatter::new(cli.pretty);
            println!("{}", formatter.format(&settings)?);
        }
    }

    Ok(())
}

fn show_paths(cli: &Cli) -> Result<()> {
    let config_dir = default_config_dir();
    let settings_path = default_settings_path();
    let data = data_dir(cli);

    match cli.format {
        OutputFormat::Text => {
            println!("Configuration Paths");
            println!("{}", "─".repeat(40));
            println!();
            println!("Config dir:    {}", config_dir.display());
            println!("Settings file: {}", settings_path.display());
            println!("Data dir:      {}", data.display());
        }
        OutputFormat::Json => {
            let paths = serde_json::json!({
                "config_dir": config_dir.display().to_string(),
                "settings_file": settings_path.display().to_string(),
                "data_dir": data.display().to_string(),
            });
            let formatter = JsonFormatter::new(cli.pretty);
            println!("{}", formatter.format(&paths)?);
        }
    }

    Ok(())
}

async fn set_theme(mode: &str, _cli: &Cli) -> Result<()> {
    let mode = ThemeMode::parse_cli_name(mode)
        .ok_or_else(|| anyhow::anyhow!("Unknown theme: {}. Use: light, dark, system", mode))?;

    let store = SettingsStore::load_default().await?;
    store.set_theme_mode(mode).await;
    store.save().await?;

    info!(theme = %mode, "Theme updated");
    println!("Theme set to: {mode}");

    Ok(())
}

async fn set_page_size(size: usize, _cli: &Cli) -> Result<()> {
    let store = SettingsStore::load_default().await?;
    store.set_page_size(size).await?;
    store.save().await?;

    info!(page_size = size, "Page size updated");
    println!("Page size set to: {size}");

    Ok(())
}

async fn seed_dataset(cli: &Cli) -> Result<()> {
    let dir = data_dir(cli);
    let dataset = Dataset::sample();
    dataset.save(&dir).await?;

    info!(dir = %dir.display(), "Demo dataset written");
    println!(
        "Seeded {} transactions and {} users into {}",
        dataset.transactions.len(),
        dataset.users.len(),
        dir.display()
    );

    Ok(())
}

async fn reset_config(_cli: &Cli) -> Result<()> {
    let path = default_settings_path();

    if path.exists() {
        tokio::fs::remove_file(&path).await?;
        info!(path = %path.display(), "Settings reset");
        println!("Configuration reset to defaults");
    } else {
        println!("No configuration file to reset");
    }

    Ok(())
}
