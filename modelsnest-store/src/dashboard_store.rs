//! Current-dataset store for the dashboard.
//!
//! Holds the most recently loaded [`Dataset`] and hands out cloned
//! snapshots. A computation that calls [`DashboardStore::snapshot`] owns an
//! immutable view for its whole duration, so a concurrent `replace` can
//! never tear the collections an aggregation is reading.

use chrono::{DateTime, Utc};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{RwLock, watch};
use tracing::debug;

use crate::dataset::Dataset;

/// Internal state for the dashboard store.
#[derive(Default)]
struct DashboardInner {
    /// The current dataset.
    dataset: Dataset,
    /// When the dataset was last replaced.
    loaded_at: Option<DateTime<Utc>>,
}

/// State store for the currently loaded dataset.
///
/// Observable via watch channels for refresh-driven surfaces.
pub struct DashboardStore {
    inner: Arc<RwLock<DashboardInner>>,
    notify: watch::Sender<u64>,
    version: Arc<RwLock<u64>>,
}

impl Default for DashboardStore {
    fn default() -> Self {
        Self::new()
    }
}

impl DashboardStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        let (notify, _) = watch::channel(0);
        Self {
            inner: Arc::new(RwLock::new(DashboardInner::default())),
            notify,
            version: Arc::new(RwLock::new(0)),
        }
    }

    /// Replaces the current dataset and notifies subscribers.
    pub async fn replace(&self, dataset: Dataset) {
        {
            let mut inner = self.inner.write().await;
            inner.dataset = dataset;
            inner.loaded_at = Some(Utc::now());
        }
        self.notify_change().await;
        debug!("Dataset replaced");
    }

    /// Returns a cloned snapshot of the current dataset.
    ///
    /// The clone is the consistency boundary: the caller's view cannot be
    /// mutated by a later `replace`.
    pub async fn snapshot(&self) -> Dataset {
        self.inner.read().await.dataset.clone()
    }

    /// Returns when the dataset was last replaced.
    pub async fn loaded_at(&self) -> Option<DateTime<Utc>> {
        self.inner.read().await.loaded_at
    }

    /// Checks if the current dataset is older than `threshold`.
    ///
    /// A store that never loaded anything is always stale.
    pub async fn is_stale(&self, threshold: Duration) -> bool {
        match self.inner.read().await.loaded_at {
            Some(time) => {
                let age = Utc::now().signed_duration_since(time);
                age > chrono::Duration::from_std(threshold).unwrap_or(chrono::Duration::MAX)
            }
            None => true,
        }
    }

    /// Subscribes to dataset changes.
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.notify.subscribe()
    }

    /// Notifies subscribers of a change.
    async fn notify_change(&self) {
        let mut version = self.version.write().await;
        *version += 1;
        let _ = self.notify.send(*version);
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_new_store_is_empty_and_stale() {
        let store = DashboardStore::new();
        assert!(store.snapshot().await.is_empty());
        assert!(store.loaded_at().await.is_none());
        assert!(store.is_stale(Duration::from_secs(60)).await);
    }

    #[tokio::test]
    async fn test_replace_and_snapshot() {
        let store = DashboardStore::new();
        store.replace(Dataset::sample()).await;

        let snapshot = store.snapshot().await;
        assert!(!snapshot.is_empty());
        assert!(store.loaded_at().await.is_some());
        assert!(!store.is_stale(Duration::from_secs(60)).await);
    }

    #[tokio::test]
    async fn test_snapshot_is_isolated_from_replace() {
        let store = DashboardStore::new();
        store.replace(Dataset::sample()).await;

        let before = store.snapshot().await;
        let count = before.transactions.len();

        // Replacing the store's dataset must not alter an existing snapshot.
        store.replace(Dataset::default()).await;
        assert_eq!(before.transactions.len(), count);
        assert!(store.snapshot().await.is_empty());
    }

    #[tokio::test]
    async fn test_subscribers_see_replacements() {
        let store = DashboardStore::new();
        let mut rx = store.subscribe();

        store.replace(Dataset::sample()).await;
        assert!(rx.has_changed().unwrap());
    }
}
