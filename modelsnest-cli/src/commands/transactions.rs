//! Transactions command - browse the transaction list.

use anyhow::Result;
use clap::Args;
use modelsnest_analytics::{TransactionFilter, clamp_page, page_of, total_pages};
use modelsnest_core::{CoreError, TransactionStatus, TransactionType};
use modelsnest_store::SettingsStore;
use tracing::info;

use crate::output::{JsonFormatter, ListOutput, TransactionOutput, TextFormatter};
use crate::{Cli, OutputFormat};

use super::load_dataset;

/// Arguments for the transactions command.
#[derive(Args)]
pub struct TransactionsArgs {
    /// Free-text search over user name, email, reference id, and id.
    #[arg(long, short)]
    pub search: Option<String>,

    /// Filter by type: topup, usage, refund, or all.
    #[arg(long = "type", value_name = "TYPE")]
    pub tx_type: Option<String>,

    /// Filter by status: completed, pending, failed, cancelled, or all.
    #[arg(long)]
    pub status: Option<String>,

    /// 1-indexed page to show.
    #[arg(long, default_value = "1")]
    pub page: usize,

    /// Rows per page (defaults to the configured page size).
    #[arg(long)]
    pub per_page: Option<usize>,
}

/// Runs the transactions command.
pub async fn run(args: &TransactionsArgs, cli: &Cli) -> Result<()> {
    info!(page = args.page, "Running transactions list");

    let filter = TransactionFilter {
        query: args.search.clone(),
        tx_type: parse_type_filter(args.tx_type.as_deref())?,
        status: parse_status_filter(args.status.as_deref())?,
    };

    let dataset = load_dataset(cli).await?;
    let matched = filter.apply(&dataset.transactions);

    let per_page = match args.per_page {
        Some(n) if n > 0 => n,
        Some(_) => anyhow::bail!(CoreError::InvalidData("--per-page must be at least 1".to_string())),
        None => SettingsStore::load_default().await?.page_size().await,
    };

    let page = clamp_page(args.page, total_pages(matched.len(), per_page));
    let listing = page_of(&matched, page, per_page);

    match cli.format {
        OutputFormat::Text => {
            let formatter = TextFormatter::new(!cli.no_color);
            println!("{}", formatter.format_transactions_page(&listing));
        }
        OutputFormat::Json => {
            let formatter = JsonFormatter::new(cli.pretty);
            let items: Vec<TransactionOutput> =
                listing.items.iter().map(|t| TransactionOutput::from(*t)).collect();
            let output = ListOutput {
                page: listing.page,
                per_page: listing.per_page,
                total_items: listing.total_items,
                total_pages: listing.total_pages,
                items,
            };
            println!("{}", formatter.format(&output)?);
        }
    }

    Ok(())
}

/// Parses the --type filter; "all" and absence mean no constraint.
fn parse_type_filter(arg: Option<&str>) -> Result<Option<TransactionType>> {
    match arg {
        None => Ok(None),
        Some(name) if name.eq_ignore_ascii_case("all") => Ok(None),
        Some(name) => TransactionType::parse_cli_name(name).map(Some).ok_or_else(|| {
            CoreError::InvalidData(format!(
                "unknown type: {name}. Use: topup, usage, refund, all"
            ))
            .into()
        }),
    }
}

/// Parses the --status filter; "all" and absence mean no constraint.
fn parse_status_filter(arg: Option<&str>) -> Result<Option<TransactionStatus>> {
    match arg {
        None => Ok(None),
        Some(name) if name.eq_ignore_ascii_case("all") => Ok(None),
        Some(name) => TransactionStatus::parse_cli_name(name).map(Some).ok_or_else(|| {
            CoreError::InvalidData(format!(
                "unknown status: {name}. Use: completed, pending, failed, cancelled, all"
            ))
            .into()
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_type_filter() {
        assert_eq!(parse_type_filter(None).unwrap(), None);
        assert_eq!(parse_type_filter(Some("all")).unwrap(), None);
        assert_eq!(
            parse_type_filter(Some("topup")).unwrap(),
            Some(TransactionType::Topup)
        );
        assert!(parse_type_filter(Some("chargeback")).is_err());
    }

    #[test]
    fn test_parse_status_filter() {
        assert_eq!(parse_status_filter(Some("ALL")).unwrap(), None);
        assert_eq!(
            parse_status_filter(Some("failed")).unwrap(),
            Some(TransactionStatus::Failed)
        );
        assert!(parse_status_filter(Some("bogus")).is_err());
    }
}
