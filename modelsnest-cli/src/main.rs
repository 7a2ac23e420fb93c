// Lint configuration for this crate
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! Modelsnest CLI - admin back-office for the Modelsnest platform.
//!
//! # Examples
//!
//! ```bash
//! # Dashboard KPIs (default if no command specified)
//! modelsnest
//!
//! # Explicit analytics command, JSON output
//! modelsnest analytics --format json --pretty
//!
//! # Browse transactions
//! modelsnest transactions --search ada --type topup --page 2
//!
//! # Browse users
//! modelsnest users --role admin
//!
//! # Render a printable invoice
//! modelsnest invoice txn_1003
//!
//! # Seed a demo dataset and manage settings
//! modelsnest config seed
//! modelsnest config theme dark
//! ```

mod commands;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use commands::{analytics, config, invoice, transactions, users};
use modelsnest_core::CoreError;

// ============================================================================
// CLI Definition
// ============================================================================

/// Modelsnest CLI - admin back-office.
#[derive(Parser)]
#[command(name = "modelsnest")]
#[command(about = "Modelsnest admin back-office CLI")]
#[command(long_about = r#"
Modelsnest admin back-office: analytics, transaction and user browsing,
and invoice rendering over the platform dataset.

The dataset is a pair of JSON files (transactions.json, users.json) in the
data directory. Use `modelsnest config seed` to create a demo dataset, or
point --data at an export.

Examples:
  modelsnest                          # Dashboard KPIs
  modelsnest transactions --type topup
  modelsnest users --suspended true
  modelsnest invoice txn_1003
  modelsnest analytics --format json
"#)]
#[command(version)]
#[command(author = "Modelsnest Contributors")]
pub struct Cli {
    /// Subcommand to run. If none, runs 'analytics' by default.
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Output format (text or json).
    #[arg(long, short = 'f', default_value = "text", global = true)]
    pub format: OutputFormat,

    /// Pretty-print JSON output.
    #[arg(long, global = true)]
    pub pretty: bool,

    /// Data directory holding transactions.json and users.json.
    #[arg(long, global = true)]
    pub data: Option<PathBuf>,

    /// Verbose output (show debug info).
    #[arg(long, short, global = true)]
    pub verbose: bool,

    /// Disable colored output.
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Quiet mode (minimal output).
    #[arg(long, short, global = true)]
    pub quiet: bool,
}

/// CLI commands.
#[derive(Subcommand)]
pub enum Commands {
    /// Show the analytics dashboard (default if no command specified).
    #[command(visible_alias = "a")]
    Analytics,

    /// Browse transactions with search, filters, and pagination.
    #[command(visible_alias = "t")]
    Transactions(transactions::TransactionsArgs),

    /// Browse users with search, filters, and pagination.
    #[command(visible_alias = "u")]
    Users(users::UsersArgs),

    /// Render a printable invoice for a transaction.
    #[command(visible_alias = "i")]
    Invoice(invoice::InvoiceArgs),

    /// Manage configuration and the demo dataset.
    Config(config::ConfigArgs),
}

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Default)]
pub enum OutputFormat {
    /// Human-readable text with colors.
    #[default]
    Text,
    /// JSON output for scripting.
    Json,
}

/// CLI exit codes.
#[repr(i32)]
pub enum ExitCode {
    /// Success.
    Success = 0,
    /// General error.
    Error = 1,
    /// Transaction or record not found.
    NotFound = 2,
    /// Bad filter or argument value.
    ParseError = 3,
}

// ============================================================================
// Logging Setup
// ============================================================================

fn setup_logging(verbose: bool, quiet: bool) {
    if quiet {
        return; // No logging in quiet mode
    }

    let filter = if verbose {
        EnvFilter::new("modelsnest=debug,info")
    } else {
        EnvFilter::new("modelsnest=warn")
    };

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(false)
                .without_time()
                .with_writer(std::io::stderr),
        )
        .with(filter)
        .init();
}

// ============================================================================
// Main Entry Point
// ============================================================================

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let result = match &cli.command {
        Some(Commands::Analytics) | None => analytics::run(&cli).await,
        Some(Commands::Transactions(args)) => transactions::run(args, &cli).await,
        Some(Commands::Users(args)) => users::run(args, &cli).await,
        Some(Commands::Invoice(args)) => invoice::run(args, &cli).await,
        Some(Commands::Config(args)) => config::run(args, &cli).await,
    };

    if let Err(e) = result {
        if !cli.quiet {
            eprintln!("Error: {e}");
        }
        let code = match e.downcast_ref::<CoreError>() {
            Some(CoreError::TransactionNotFound(_)) => ExitCode::NotFound,
            Some(CoreError::InvalidData(_)) => ExitCode::ParseError,
            _ => ExitCode::Error,
        };
        std::process::exit(code as i32);
    }

    Ok(())
}
