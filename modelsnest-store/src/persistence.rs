//! JSON file persistence.
//!
//! The dataset and settings files carry customer emails and balances, so
//! everything written here lands owner-only on Unix, and writes go through
//! a staged sibling file plus rename so a reader never observes a torn
//! file. Permissions are applied to the staged file before the rename,
//! closing the window where a freshly written file is world-readable.

use serde::{Serialize, de::DeserializeOwned};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::error::StoreError;

// ============================================================================
// Default Paths
// ============================================================================

/// Returns the default configuration directory: the platform config dir
/// (`~/.config` on Linux) plus a `modelsnest` segment.
pub fn default_config_dir() -> PathBuf {
    dirs::config_dir()
        .map(|c| c.join("modelsnest"))
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Returns the default dataset directory: the platform data dir
/// (`~/.local/share` on Linux) plus a `modelsnest` segment.
pub fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .map(|d| d.join("modelsnest"))
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Returns the default settings file path.
pub fn default_settings_path() -> PathBuf {
    default_config_dir().join("settings.json")
}

// ============================================================================
// Permissions
// ============================================================================

/// Restricts a path to its owner: 0o700 for directories, 0o600 for files.
#[cfg(unix)]
async fn restrict_to_owner(path: &Path) -> Result<(), StoreError> {
    use std::os::unix::fs::PermissionsExt;

    let meta = tokio::fs::metadata(path).await?;
    let mode = if meta.is_dir() { 0o700 } else { 0o600 };
    let mut perms = meta.permissions();
    perms.set_mode(mode);
    tokio::fs::set_permissions(path, perms).await?;
    Ok(())
}

/// No-op outside Unix.
#[cfg(not(unix))]
async fn restrict_to_owner(_path: &Path) -> Result<(), StoreError> {
    Ok(())
}

// ============================================================================
// File Operations
// ============================================================================

/// Sibling path a write is staged at before the rename, e.g.
/// `settings.json` stages at `.settings.json.partial`.
fn staging_path(path: &Path) -> PathBuf {
    let mut name = std::ffi::OsString::from(".");
    if let Some(file) = path.file_name() {
        name.push(file);
    }
    name.push(".partial");
    path.with_file_name(name)
}

/// Serializes `data` as pretty JSON and writes it atomically.
///
/// The bytes go to a staged sibling file first, get owner-only
/// permissions, and are then renamed over `path`. Parent directories are
/// created on demand.
pub async fn save_json<T: Serialize>(path: &Path, data: &T) -> Result<(), StoreError> {
    if let Some(parent) = path.parent() {
        ensure_dir(parent).await?;
    }

    let staged = staging_path(path);
    tokio::fs::write(&staged, serde_json::to_string_pretty(data)?).await?;
    restrict_to_owner(&staged).await?;
    tokio::fs::rename(&staged, path).await?;

    debug!(path = %path.display(), "Wrote JSON file");
    Ok(())
}

/// Reads and deserializes a JSON file.
///
/// # Errors
///
/// `StoreError::Io` when the file cannot be read, `StoreError::Serialization`
/// when the bytes do not parse.
pub async fn load_json<T: DeserializeOwned>(path: &Path) -> Result<T, StoreError> {
    let bytes = tokio::fs::read(path).await?;
    Ok(serde_json::from_slice(&bytes)?)
}

/// Like [`load_json`], but a missing or unreadable file yields `T::default()`.
pub async fn load_json_or_default<T: DeserializeOwned + Default>(path: &Path) -> T {
    match load_json(path).await {
        Ok(value) => value,
        Err(StoreError::Io(_)) => T::default(),
        Err(e) => {
            warn!(path = %path.display(), error = %e, "Unreadable file, falling back to defaults");
            T::default()
        }
    }
}

/// Creates a directory (and any missing parents) owner-only, if it does
/// not already exist.
pub async fn ensure_dir(path: &Path) -> Result<(), StoreError> {
    if path.is_dir() {
        return Ok(());
    }
    tokio::fs::create_dir_all(path).await?;
    restrict_to_owner(path).await
}

// ============================================================================
// Tests
// ============================================================================
