//! Transaction-related types.
//!
//! This module contains the billing transaction record and its enums:
//! - [`Transaction`] - A single transaction
//! - [`TransactionType`] - Top-up, usage, or refund
//! - [`TransactionStatus`] - Lifecycle status
//! - [`Direction`] - Credit or debit, derived from the type

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::CoreError;

// Invoice numbers are derived from the tail of the reference, uppercased.
const INVOICE_SUFFIX_LEN: usize = 8;

// ============================================================================
// Transaction Type
// ============================================================================

/// The kind of billing transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionType {
    /// A customer credit purchase.
    Topup,
    /// An API usage charge.
    Usage,
    /// A refund of a previous top-up.
    Refund,
}

impl TransactionType {
    /// Returns a human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Topup => "Top-up",
            Self::Usage => "Usage",
            Self::Refund => "Refund",
        }
    }

    /// Returns whether this type credits or debits the account.
    ///
    /// The stored `amount` is a magnitude only; sign is always derived here.
    pub fn direction(&self) -> Direction {
        match self {
            Self::Topup | Self::Refund => Direction::Credit,
            Self::Usage => Direction::Debit,
        }
    }

    /// Returns all transaction types.
    pub fn all() -> &'static [TransactionType] {
        &[Self::Topup, Self::Usage, Self::Refund]
    }

    /// Parses a CLI-style name ("topup", "usage", "refund").
    pub fn parse_cli_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "topup" | "top-up" => Some(Self::Topup),
            "usage" => Some(Self::Usage),
            "refund" => Some(Self::Refund),
            _ => None,
        }
    }
}

impl std::fmt::Display for TransactionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

// ============================================================================
// Transaction Status
// ============================================================================

/// Lifecycle status of a transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionStatus {
    /// Settled successfully.
    Completed,
    /// Awaiting settlement.
    Pending,
    /// Settlement failed.
    Failed,
    /// Cancelled before settlement.
    Cancelled,
}

impl TransactionStatus {
    /// Returns a human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Completed => "Completed",
            Self::Pending => "Pending",
            Self::Failed => "Failed",
            Self::Cancelled => "Cancelled",
        }
    }

    /// Returns all statuses, in display order.
    pub fn all() -> &'static [TransactionStatus] {
        &[Self::Completed, Self::Pending, Self::Failed, Self::Cancelled]
    }

    /// Parses a CLI-style name ("completed", "pending", ...).
    pub fn parse_cli_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "completed" => Some(Self::Completed),
            "pending" => Some(Self::Pending),
            "failed" => Some(Self::Failed),
            "cancelled" | "canceled" => Some(Self::Cancelled),
            _ => None,
        }
    }
}

impl std::fmt::Display for TransactionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

// ============================================================================
// Direction
// ============================================================================

/// Whether a transaction credits or debits an account balance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    /// Adds to the account balance.
    Credit,
    /// Subtracts from the account balance.
    Debit,
}

impl Direction {
    /// Returns the sign to apply to a magnitude: `+1.0` or `-1.0`.
    pub fn sign(&self) -> f64 {
        match self {
            Self::Credit => 1.0,
            Self::Debit => -1.0,
        }
    }
}

// ============================================================================
// Transaction
// ============================================================================

/// A single billing transaction.
///
/// `amount` is a non-negative magnitude; whether it credits or debits the
/// account follows from [`TransactionType::direction`]. `user_email` and
/// `user_name` are denormalized copies of the owning user's fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    /// Opaque identifier.
    pub id: String,
    /// What kind of transaction this is.
    #[serde(rename = "type")]
    pub tx_type: TransactionType,
    /// Lifecycle status.
    pub status: TransactionStatus,
    /// Non-negative currency magnitude (USD).
    pub amount: f64,
    /// Email of the owning user.
    pub user_email: String,
    /// Display name of the owning user.
    pub user_name: String,
    /// When the transaction was created.
    pub created_at: DateTime<Utc>,
    /// External payment reference, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference_id: Option<String>,
    /// Payment method descriptor ("card", "wire", ...).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_method: Option<String>,
    /// Free-form description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Transaction {
    /// Returns true if the transaction settled successfully.
    pub fn is_completed(&self) -> bool {
        self.status == TransactionStatus::Completed
    }

    /// Returns the credit/debit direction derived from the type.
    pub fn direction(&self) -> Direction {
        self.tx_type.direction()
    }

    /// Returns the signed amount (credits positive, debits negative).
    pub fn signed_amount(&self) -> f64 {
        self.amount * self.direction().sign()
    }

    /// Derives the printable invoice number for this transaction.
    ///
    /// Uses the tail of `reference_id` when present, falling back to the
    /// record id, uppercased with an `INV-` prefix.
    pub fn invoice_number(&self) -> String {
        let source = self.reference_id.as_deref().unwrap_or(&self.id);
        let chars: Vec<char> = source.chars().collect();
        let start = chars.len().saturating_sub(INVOICE_SUFFIX_LEN);
        let suffix: String = chars[start..].iter().collect();
        format!("INV-{}", suffix.to_uppercase())
    }

    /// Validates the record.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidData` if `amount` is negative or not a
    /// finite number.
    pub fn validate(&self) -> Result<(), CoreError> {
        if !self.amount.is_finite() {
            return Err(CoreError::InvalidData(format!(
                "transaction {}: amount is not a finite number",
                self.id
            )));
        }
        if self.amount < 0.0 {
            return Err(CoreError::InvalidData(format!(
                "transaction {}: amount {} is negative",
                self.id, self.amount
            )));
        }
        Ok(())
    }

    /// Sanitizes the record by clamping invalid amounts.
    ///
    /// Unlike `validate()`, this fixes invalid values instead of returning
    /// an error. Non-finite and negative amounts become `0.0`.
    pub fn sanitize(&mut self) {
        if !self.amount.is_finite() || self.amount < 0.0 {
            self.amount = 0.0;
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
