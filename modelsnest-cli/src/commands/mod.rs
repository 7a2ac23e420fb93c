//! CLI command implementations.

pub mod analytics;
pub mod config;
pub mod invoice;
pub mod transactions;
pub mod users;

use anyhow::{Context, Result};
use std::path::PathBuf;

use modelsnest_store::{Dataset, default_data_dir};

use crate::Cli;

/// Resolves the data directory from the CLI flag or the platform default.
pub(crate) fn data_dir(cli: &Cli) -> PathBuf {
    cli.data.clone().unwrap_or_else(default_data_dir)
}

/// Loads the dataset for a command.
pub(crate) async fn load_dataset(cli: &Cli) -> Result<Dataset> {
    let dir = data_dir(cli);
    Dataset::load(&dir).await.with_context(|| {
        format!(
            "failed to load dataset from {} (run `modelsnest config seed` to create a demo dataset)",
            dir.display()
        )
    })
}
