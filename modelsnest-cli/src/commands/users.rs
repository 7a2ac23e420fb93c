//! Users command - browse the user list.

use anyhow::Result;
use clap::Args;
use modelsnest_analytics::{UserFilter, clamp_page, page_of, total_pages};
use modelsnest_core::{CoreError, UserRole};
use modelsnest_store::SettingsStore;
use tracing::info;

use crate::output::{JsonFormatter, ListOutput, TextFormatter, UserOutput};
use crate::{Cli, OutputFormat};

use super::load_dataset;

/// Arguments for the users command.
#[derive(Args)]
pub struct UsersArgs {
    /// Free-text search over name and email.
    #[arg(long, short)]
    pub search: Option<String>,

    /// Filter by role: admin, user, or all.
    #[arg(long)]
    pub role: Option<String>,

    /// Filter by suspension state (true or false).
    #[arg(long)]
    pub suspended: Option<bool>,

    /// 1-indexed page to show.
    #[arg(long, default_value = "1")]
    pub page: usize,

    /// Rows per page (defaults to the configured page size).
    #[arg(long)]
    pub per_page: Option<usize>,
}

/// Runs the users command.
pub async fn run(args: &UsersArgs, cli: &Cli) -> Result<()> {
    info!(page = args.page, "Running users list");

    let filter = UserFilter {
        query: args.search.clone(),
        role: parse_role_filter(args.role.as_deref())?,
        suspended: args.suspended,
    };

    let dataset = load_dataset(cli).await?;
    let matched = filter.apply(&dataset.users);

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
            println!("{}", formatter.format_users_page(&listing));
        }
        OutputFormat::Json => {
            let formatter = JsonFormatter::new(cli.pretty);
            let items: Vec<UserOutput> = listing.items.iter().map(|u| UserOutput::from(*u)).collect();
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

/// Parses the --role filter; "all" and absence mean no constraint.
fn parse_role_filter(arg: Option<&str>) -> Result<Option<UserRole>> {
    match arg {
        None => Ok(None),
        Some(name) if name.eq_ignore_ascii_case("all") => Ok(None),
        Some(name) => UserRole::parse_cli_name(name).map(Some).ok_or_else(|| {
            CoreError::InvalidData(format!("unknown role: {name}. Use: admin, user, all")).into()
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_role_filter() {
        assert_eq!(parse_role_filter(None).unwrap(), None);
        assert_eq!(parse_role_filter(Some("all")).unwrap(), None);
        assert_eq!(parse_role_filter(Some("admin")).unwrap(), Some(UserRole::Admin));
        assert!(parse_role_filter(Some("owner")).is_err());
    }
}
