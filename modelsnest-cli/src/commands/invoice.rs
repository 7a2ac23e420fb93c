//! Invoice command - render a printable invoice for one transaction.

use anyhow::Result;
use clap::Args;
use modelsnest_core::CoreError;
use tracing::info;

use crate::output::{InvoiceOutput, JsonFormatter, TextFormatter};
use crate::{Cli, OutputFormat};

use super::load_dataset;

/// Arguments for the invoice command.
#[derive(Args)]
pub struct InvoiceArgs {
    /// Transaction id or external payment reference.
    pub reference: String,
}

/// Runs the invoice command.
pub async fn run(args: &InvoiceArgs, cli: &Cli) -> Result<()> {
    info!(reference = %args.reference, "Rendering invoice");

    let dataset = load_dataset(cli).await?;
    let tx = dataset
        .find_transaction(&args.reference)
        .ok_or_else(|| CoreError::TransactionNotFound(args.reference.clone()))?;

    match cli.format {
        OutputFormat::Text => {
            let formatter = TextFormatter::new(!cli.no_color);
            println!("{}", formatter.format_invoice(tx));
        }
        OutputFormat::Json => {
            let formatter = JsonFormatter::new(cli.pretty);
            println!("{}", formatter.format(&InvoiceOutput::from(tx))?);
        }
    }

    Ok(())
}
