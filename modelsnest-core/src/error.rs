//! Core error types for Modelsnest.

use thiserror::Error;

/// Core error type for Modelsnest operations.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Invalid record data.
    #[error("Invalid data: {0}")]
    InvalidData(String),

    /// Transaction not found by id or reference.
    #[error("Transaction not found: {0}")]
    TransactionNotFound(String),

    /// Serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Generic error with message.
    #[error("{0}")]
    Other(String),
}
