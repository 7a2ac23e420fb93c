//! Categorical breakdowns of the transaction set.
//!
//! - [`TypeBreakdown`] - count and settled volume per transaction type
//! - [`StatusCount`] - count per lifecycle status
//!
//! Both outputs have a fixed shape: every type/status appears exactly once,
//! including the zero-count ones, so the presenter never has to special-case
//! a missing row.

use modelsnest_core::{Transaction, TransactionStatus, TransactionType};
use serde::{Deserialize, Serialize};

/// Count and total settled amount for one transaction type.
///
/// Restricted to completed transactions; a pending top-up contributes to
/// neither the count nor the amount.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeBreakdown {
    /// The transaction type this row covers.
    pub tx_type: TransactionType,
    /// Number of completed transactions of this type.
    pub count: usize,
    /// Sum of amounts over those transactions.
    pub total_amount: f64,
}

/// Number of transactions carrying one status, regardless of type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusCount {
    /// The status this row covers.
    pub status: TransactionStatus,
    /// Number of transactions with this status.
    pub count: usize,
}

/// Breaks completed transactions down by type.
///
/// Returns one row per [`TransactionType`], in declaration order.
pub fn by_type(transactions: &[Transaction]) -> Vec<TypeBreakdown> {
    TransactionType::all()
        .iter()
        .map(|&tx_type| {
            let mut count = 0;
            let mut total_amount = 0.0;
            for tx in transactions {
                if tx.tx_type == tx_type && tx.is_completed() {
                    count += 1;
                    total_amount += tx.amount;
                }
            }
            TypeBreakdown {
                tx_type,
                count,
                total_amount,
            }
        })
        .collect()
}

/// Counts transactions per status, unfiltered by completion.
///
/// Returns one row per [`TransactionStatus`]; every transaction falls into
/// exactly one row, so the counts always sum to `transactions.len()`.
pub fn by_status(transactions: &[Transaction]) -> Vec<StatusCount> {
    TransactionStatus::all()
        .iter()
        .map(|&status| StatusCount {
            status,
            count: transactions.iter().filter(|t| t.status == status).count(),
        })
        .collect()
}

// ============================================================================
// Tests
// ============================================================================
