// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # Modelsnest Store
//!
//! Data access and app state for the Modelsnest admin back-office.
//!
//! This crate provides:
//!
//! - **Dataset**: the materialized transaction/user snapshot read from disk
//! - **DashboardStore**: holds the current snapshot with watch channels,
//!   handing out consistent immutable views for aggregation
//! - **SettingsStore**: admin preferences (theme, page size) with
//!   persistence and change notification
//! - **Persistence**: atomic JSON file I/O helpers
//!
//! ## Usage
//!
//! ```ignore
//! use modelsnest_store::{DashboardStore, Dataset, default_data_dir};
//!
//! let dataset = Dataset::load(&default_data_dir()).await?;
//! let store = DashboardStore::new();
//! store.replace(dataset).await;
//!
//! // Every computation sees one immutable snapshot.
//! let snapshot = store.snapshot().await;
//! ```

pub mod dashboard_store;
pub mod dataset;
pub mod error;
pub mod persistence;
pub mod settings_store;

pub use dashboard_store::DashboardStore;
pub use dataset::{Dataset, TRANSACTIONS_FILE, USERS_FILE};
pub use error::StoreError;
pub use persistence::{
    default_config_dir, default_data_dir, default_settings_path, ensure_dir, load_json,
    load_json_or_default, save_json,
};
pub use settings_store::{LogLevel, Settings, SettingsStore, ThemeMode};
