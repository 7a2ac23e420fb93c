//! Analytics command - dashboard KPIs, series, and rankings.

use anyhow::Result;
use chrono::Utc;
use modelsnest_analytics::aggregate;
use modelsnest_store::{DashboardStore, SettingsStore};
use tracing::info;

use crate::output::{JsonFormatter, SummaryOutput, TextFormatter};
use crate::{Cli, OutputFormat};

use super::load_dataset;

/// Runs the analytics command.
pub async fn run(cli: &Cli) -> Result<()> {
    info!("Running analytics");

    // Route through the dashboard store so the aggregation reads one
    // consistent snapshot, the same way a long-lived surface would.
    let store = DashboardStore::new();
    store.replace(load_dataset(cli).await?).await;
    let snapshot = store.snapshot().await;

    let summary = aggregate(&snapshot.transactions, &snapshot.users, Utc::now());

    match cli.format {
        OutputFormat::Text => {
            let settings = SettingsStore::load_default().await?.get().await;
            let formatter = TextFormatter::new(!cli.no_color);
            println!("{}", formatter.format_summary(&summary, settings.show_zero_rows));
        }
        OutputFormat::Json => {
            let formatter = JsonFormatter::new(cli.pretty);
            let output = formatter.format(&SummaryOutput::from(&summary))?;
            println!("{output}");
        }
    }

    Ok(())
}
