//! Admin preferences store.
//!
//! Manages settings with persistence and change notification. The theme is
//! deliberately an injected, observable preference here rather than a
//! process-wide global: rendering surfaces subscribe to the store and are
//! handed the current [`Settings`] explicitly.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::{RwLock, watch};
use tracing::{debug, info, warn};

use crate::error::StoreError;
use crate::persistence::{default_settings_path, load_json, save_json};

/// Default rows per page for the list views.
const DEFAULT_PAGE_SIZE: usize = 10;

// ============================================================================
// Settings Types
// ============================================================================

/// Admin preferences.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Theme preference for rendering surfaces.
    pub theme_mode: ThemeMode,

    /// Rows per page in the transactions/users tables.
    pub page_size: usize,

    /// Log level.
    pub log_level: LogLevel,

    /// Show zero-count rows in the breakdown tables.
    pub show_zero_rows: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            theme_mode: ThemeMode::System,
            page_size: DEFAULT_PAGE_SIZE,
            log_level: LogLevel::default(),
            show_zero_rows: true,
        }
    }
}

/// Theme mode preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ThemeMode {
    /// Always use the light theme.
    Light,
    /// Always use the dark theme.
    Dark,
    /// Follow the terminal/system appearance.
    #[default]
    System,
}

impl ThemeMode {
    /// Parses a CLI-style name ("light", "dark", "system").
    pub fn parse_cli_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "light" => Some(Self::Light),
            "dark" => Some(Self::Dark),
            "system" => Some(Self::System),
            _ => None,
        }
    }
}

impl std::fmt::Display for ThemeMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ThemeMode::Light => write!(f, "light"),
            ThemeMode::Dark => write!(f, "dark"),
            ThemeMode::System => write!(f, "system"),
        }
    }
}

/// Log level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum LogLevel {
    /// Error level logging.
    Error,
    /// Warning level logging.
    #[default]
    Warn,
    /// Info level logging.
    Info,
    /// Debug level logging.
    Debug,
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LogLevel::Error => write!(f, "error"),
            LogLevel::Warn => write!(f, "warn"),
            LogLevel::Info => write!(f, "info"),
            LogLevel::Debug => write!(f, "debug"),
        }
    }
}

// ============================================================================
// Settings Store
// ============================================================================

/// Persistent settings store with change notifications.
pub struct SettingsStore {
    settings: Arc<RwLock<Settings>>,
    path: PathBuf,
    notify: watch::Sender<u64>,
    version: Arc<RwLock<u64>>,
}

impl SettingsStore {
    /// Creates a new settings store with defaults.
    pub fn new(path: PathBuf) -> Self {
        let (notify, _) = watch::channel(0);
        Self {
            settings: Arc::new(RwLock::new(Settings::default())),
            path,
            notify,
            version: Arc::new(RwLock::new(0)),
        }
    }

    /// Loads settings from the default path.
    ///
    /// # Errors
    ///
    /// Returns error if settings cannot be loaded from disk.
    pub async fn load_default() -> Result<Self, StoreError> {
        Self::load(default_settings_path()).await
    }

    /// Loads settings from a path, falling back to defaults when the file
    /// is absent or unreadable.
    ///
    /// # Errors
    ///
    /// Currently infallible in practice; kept fallible to match callers.
    pub async fn load(path: PathBuf) -> Result<Self, StoreError> {
        let settings = if path.exists() {
            info!(path = %path.display(), "Loading settings");
            load_json(&path).await.unwrap_or_else(|e| {
                warn!(error = %e, "Failed to load settings, using defaults");
                Settings::default()
            })
        } else {
            debug!(path = %path.display(), "Settings file not found, using defaults");
            Settings::default()
        };

        let (notify, _) = watch::channel(0);
        Ok(Self {
            settings: Arc::new(RwLock::new(settings)),
            path,
            notify,
            version: Arc::new(RwLock::new(0)),
        })
    }

    /// Gets a copy of the current settings.
    pub async fn get(&self) -> Settings {
        self.settings.read().await.clone()
    }

    /// Updates settings and notifies subscribers.
    pub async fn update<F>(&self, f: F)
    where
        F: FnOnce(&mut Settings),
    {
        {
            let mut settings = self.settings.write().await;
            f(&mut settings);
        }
        self.notify_change().await;
    }

    /// Saves settings to disk.
    ///
    /// # Errors
    ///
    /// Returns error if settings cannot be written to disk.
    pub async fn save(&self) -> Result<(), StoreError> {
        let settings = self.settings.read().await;
        save_json(&self.path, &*settings).await?;
        info!(path = %self.path.display(), "Settings saved");
        Ok(())
    }

    /// Subscribes to settings changes.
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.notify.subscribe()
    }

    /// Notifies subscribers of a change.
    async fn notify_change(&self) {
        let mut version = self.version.write().await;
        *version += 1;
        let _ = self.notify.send(*version);
    }

    // ========================================================================
    // Convenience Methods
    // ========================================================================

    /// Gets the theme mode.
    pub async fn theme_mode(&self) -> ThemeMode {
        self.settings.read().await.theme_mode
    }

    /// Sets the theme mode.
    pub async fn set_theme_mode(&self, mode: ThemeMode) {
        self.update(|s| s.theme_mode = mode).await;
    }

    /// Gets the page size for list views.
    pub async fn page_size(&self) -> usize {
        self.settings.read().await.page_size
    }

    /// Sets the page size for list views. Zero is rejected.
    pub async fn set_page_size(&self, size: usize) -> Result<(), StoreError> {
        if size == 0 {
            return Err(StoreError::Config("page size must be at least 1".to_string()));
        }
        self.update(|s| s.page_size = size).await;
        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.theme_mode, ThemeMode::System);
        assert_eq!(settings.page_size, DEFAULT_PAGE_SIZE);
        assert!(settings.show_zero_rows);
    }

    #[tokio::test]
    async fn test_update_notifies() {
        let store = SettingsStore::new(PathBuf::from("/tmp/modelsnest_test_settings.json"));
        let mut rx = store.subscribe();

        store.set_theme_mode(ThemeMode::Dark).await;
        assert!(rx.has_changed().unwrap());
        assert_eq!(store.theme_mode().await, ThemeMode::Dark);
    }

    #[tokio::test]
    async fn test_page_size_rejects_zero() {
        let store = SettingsStore::new(PathBuf::from("/tmp/modelsnest_test_settings.json"));

        assert!(store.set_page_size(0).await.is_err());
        assert!(store.set_page_size(25).await.is_ok());
        assert_eq!(store.page_size().await, 25);
    }

    #[tokio::test]
    async fn test_settings_persistence_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");

        let store = SettingsStore::new(path.clone());
        store.set_theme_mode(ThemeMode::Light).await;
        store.set_page_size(50).await.unwrap();
        store.save().await.unwrap();

        let reloaded = SettingsStore::load(path).await.unwrap();
        let settings = reloaded.get().await;
        assert_eq!(settings.theme_mode, ThemeMode::Light);
        assert_eq!(settings.page_size, 50);
    }

    #[test]
    fn test_theme_mode_parse_and_display() {
        assert_eq!(ThemeMode::parse_cli_name("DARK"), Some(ThemeMode::Dark));
        assert_eq!(ThemeMode::parse_cli_name("sepia"), None);
        assert_eq!(format!("{}", ThemeMode::System), "system");
    }

    #[test]
    fn test_settings_deserialize_partial() {
        // Missing fields fall back to defaults via serde(default).
        let settings: Settings = serde_json::from_str(r#"{"theme_mode":"dark"}"#).unwrap();
        assert_eq!(settings.theme_mode, ThemeMode::Dark);
        assert_eq!(settings.page_size, DEFAULT_PAGE_SIZE);
    }
}
