//! The materialized transaction/user snapshot.
//!
//! The data source contract is simple: two JSON files in a data directory,
//! each holding a fully materialized collection. The directory must exist;
//! within it, a missing file loads as an empty collection, which the
//! analytics layer treats as valid input.

use chrono::{Duration, Utc};
use modelsnest_core::{Transaction, TransactionStatus, TransactionType, User, UserRole};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info};

use crate::error::StoreError;
use crate::persistence::{ensure_dir, load_json, save_json};

/// File name of the transactions collection inside the data directory.
pub const TRANSACTIONS_FILE: &str = "transactions.json";
/// File name of the users collection inside the data directory.
pub const USERS_FILE: &str = "users.json";

/// One consistent snapshot of the platform's records.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Dataset {
    /// All transactions, in persistence order.
    pub transactions: Vec<Transaction>,
    /// All users, in persistence order.
    pub users: Vec<User>,
}

impl Dataset {
    /// Returns true if both collections are empty.
    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty() && self.users.is_empty()
    }

    /// Finds a transaction by id or external reference.
    pub fn find_transaction(&self, needle: &str) -> Option<&Transaction> {
        self.transactions
            .iter()
            .find(|t| t.id == needle || t.reference_id.as_deref() == Some(needle))
    }

    /// Loads the dataset from a data directory.
    ///
    /// The directory itself must exist (seed one with [`Dataset::save`] or
    /// the CLI's `config seed`). A missing collection file inside it is
    /// treated as an empty collection.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::DatasetNotFound` when the directory is absent,
    /// and an IO/parse error when a file exists but cannot be read.
    pub async fn load(dir: &Path) -> Result<Self, StoreError> {
        if !dir.is_dir() {
            return Err(StoreError::DatasetNotFound(dir.display().to_string()));
        }

        let transactions = load_collection(&dir.join(TRANSACTIONS_FILE)).await?;
        let users = load_collection(&dir.join(USERS_FILE)).await?;

        info!(
            dir = %dir.display(),
            transactions = transactions.len(),
            users = users.len(),
            "Dataset loaded"
        );
        Ok(Self { transactions, users })
    }

    /// Saves the dataset into a data directory.
    ///
    /// # Errors
    ///
    /// Returns an error when the directory or files cannot be written.
    pub async fn save(&self, dir: &Path) -> Result<(), StoreError> {
        ensure_dir(dir).await?;
        save_json(&dir.join(TRANSACTIONS_FILE), &self.transactions).await?;
        save_json(&dir.join(USERS_FILE), &self.users).await?;

        info!(dir = %dir.display(), "Dataset saved");
        Ok(())
    }

    /// Builds a small demo dataset with activity spread over recent months.
    ///
    /// Used by `modelsnest config seed` so the dashboard has something to
    /// show on a fresh install.
    pub fn sample() -> Self {
        let now = Utc::now();
        let days = |n: i64| now - Duration::days(n);

        let user = |id: &str, email: &str, name: &str, role, suspended, balance, age_days| User {
            id: id.to_string(),
            email: email.to_string(),
            name: name.to_string(),
            role,
            is_suspended: suspended,
            balance,
            created_at: days(age_days),
        };

        let users = vec![
            user("usr_01", "ada@example.com", "Ada Lovelace", UserRole::Admin, false, 82.40, 160),
            user("usr_02", "grace@example.com", "Grace Hopper", UserRole::User, false, 14.75, 120),
            user("usr_03", "edsger@example.com", "Edsger Dijkstra", UserRole::User, false, 250.00, 95),
            user("usr_04", "alan@example.com", "Alan Turing", UserRole::User, true, -4.10, 60),
            user("usr_05", "barbara@example.com", "Barbara Liskov", UserRole::User, false, 31.05, 22),
        ];

        let tx = |id: &str,
                  tx_type,
                  status,
                  amount,
                  email: &str,
                  name: &str,
                  age_days,
                  reference: Option<&str>| Transaction {
            id: id.to_string(),
            tx_type,
            status,
            amount,
            user_email: email.to_string(),
            user_name: name.to_string(),
            created_at: days(age_days),
            reference_id: reference.map(String::from),
            payment_method: reference.map(|_| "card".to_string()),
            description: None,
        };

        use TransactionStatus::{Cancelled, Completed, Failed, Pending};
        use TransactionType::{Refund, Topup, Usage};

        let transactions = vec![
            tx("txn_1001", Topup, Completed, 100.0, "ada@example.com", "Ada Lovelace", 150, Some("ch_9f04b2a1")),
            tx("txn_1002", Usage, Completed, 17.60, "ada@example.com", "Ada Lovelace", 140, None),
            tx("txn_1003", Topup, Completed, 50.0, "grace@example.com", "Grace Hopper", 110, Some("ch_4410cc87")),
            tx("txn_1004", Usage, Completed, 35.25, "grace@example.com", "Grace Hopper", 100, None),
            tx("txn_1005", Topup, Completed, 300.0, "edsger@example.com", "Edsger Dijkstra", 90, Some("ch_77ab01e3")),
            tx("txn_1006", Usage, Completed, 50.0, "edsger@example.com", "Edsger Dijkstra", 75, None),
            tx("txn_1007", Topup, Pending, 500.0, "alan@example.com", "Alan Turing", 58, Some("ch_c3d9e802")),
            tx("txn_1008", Topup, Completed, 20.0, "alan@example.com", "Alan Turing", 55, Some("ch_b8f1d644")),
            tx("txn_1009", Refund, Completed, 20.0, "alan@example.com", "Alan Turing", 40, Some("rf_b8f1d644")),
            tx("txn_1010", Usage, Failed, 9.99, "alan@example.com", "Alan Turing", 39, None),
            tx("txn_1011", Topup, Completed, 40.0, "barbara@example.com", "Barbara Liskov", 20, Some("ch_515e7a90")),
            tx("txn_1012", Usage, Completed, 8.95, "barbara@example.com", "Barbara Liskov", 12, None),
            tx("txn_1013", Topup, Cancelled, 60.0, "barbara@example.com", "Barbara Liskov", 5, Some("ch_0d2c48bb")),
            tx("txn_1014", Usage, Completed, 3.40, "ada@example.com", "Ada Lovelace", 2, None),
        ];

        Self { transactions, users }
    }
}

/// Loads one collection file, treating a missing file as empty.
async fn load_collection<T: serde::de::DeserializeOwned>(path: &Path) -> Result<Vec<T>, StoreError> {
    if !path.exists() {
        debug!(path = %path.display(), "Collection file not found, treating as empty");
        return Ok(Vec::new());
    }
    load_json(path).await
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_load_missing_dir_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let err = Dataset::load(&dir.path().join("nope")).await.unwrap_err();
        assert!(matches!(err, StoreError::DatasetNotFound(_)));
    }

    #[tokio::test]
    async fn test_load_empty_dir_is_empty_dataset() {
        // An existing directory with neither collection file is a valid,
        // empty dataset.
        let dir = tempfile::tempdir().unwrap();
        let dataset = Dataset::load(dir.path()).await.unwrap();
        assert!(dataset.is_empty());
    }

    #[tokio::test]
    async fn test_save_and_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let original = Dataset::sample();

        original.save(dir.path()).await.unwrap();
        let loaded = Dataset::load(dir.path()).await.unwrap();

        assert_eq!(loaded.transactions.len(), original.transactions.len());
        assert_eq!(loaded.users.len(), original.users.len());
        assert_eq!(loaded.transactions[0].id, original.transactions[0].id);
    }

    #[tokio::test]
    async fn test_load_rejects_corrupt_file() {
        let dir = tempfile::tempdir().unwrap();
        tokio::fs::write(dir.path().join(TRANSACTIONS_FILE), "not json")
            .await
            .unwrap();

        let result = Dataset::load(dir.path()).await;
        assert!(result.is_err());
    }

    #[test]
    fn test_find_transaction_by_id_and_reference() {
        let dataset = Dataset::sample();

        assert!(dataset.find_transaction("txn_1001").is_some());
        let by_ref = dataset.find_transaction("ch_4410cc87").unwrap();
        assert_eq!(by_ref.id, "txn_1003");
        assert!(dataset.find_transaction("txn_none").is_none());
    }

    #[test]
    fn test_sample_records_validate() {
        let dataset = Dataset::sample();
        for tx in &dataset.transactions {
            assert!(tx.validate().is_ok());
        }
        for user in &dataset.users {
            assert!(user.validate().is_ok());
        }
    }
}
