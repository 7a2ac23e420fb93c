//! Free-text search and categorical filters for the admin list views.
//!
//! The transactions, users, and invoices tables all shape their lists the
//! same way: a case-insensitive substring query over a fixed set of fields,
//! ANDed with exact-match categorical filters where `None` means "all".
//! Resetting to page 1 when a filter changes is the caller's job; these
//! types only answer membership.

use modelsnest_core::{Transaction, TransactionStatus, TransactionType, User, UserRole};

fn query_matches(query: Option<&str>, fields: &[&str]) -> bool {
    let Some(query) = query else {
        return true;
    };
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return true;
    }
    fields
        .iter()
        .any(|field| field.to_lowercase().contains(&needle))
}

// ============================================================================
// Transaction Filter
// ============================================================================

/// Filter criteria for the transactions list.
#[derive(Debug, Clone, Default)]
pub struct TransactionFilter {
    /// Free-text query over user name, user email, reference id, and id.
    pub query: Option<String>,
    /// Restrict to one transaction type (`None` = all).
    pub tx_type: Option<TransactionType>,
    /// Restrict to one status (`None` = all).
    pub status: Option<TransactionStatus>,
}

impl TransactionFilter {
    /// Returns true if the transaction satisfies every active constraint.
    pub fn matches(&self, tx: &Transaction) -> bool {
        if let Some(wanted) = self.tx_type {
            if tx.tx_type != wanted {
                return false;
            }
        }
        if let Some(wanted) = self.status {
            if tx.status != wanted {
                return false;
            }
        }
        query_matches(
            self.query.as_deref(),
            &[
                &tx.user_name,
                &tx.user_email,
                tx.reference_id.as_deref().unwrap_or(""),
                &tx.id,
            ],
        )
    }

    /// Applies the filter, preserving input order.
    pub fn apply<'a>(&self, transactions: &'a [Transaction]) -> Vec<&'a Transaction> {
        transactions.iter().filter(|t| self.matches(t)).collect()
    }

    /// Returns true if no constraint is active.
    pub fn is_unfiltered(&self) -> bool {
        self.tx_type.is_none()
            && self.status.is_none()
            && self
                .query
                .as_deref()
                .is_none_or(|q| q.trim().is_empty())
    }
}

// ============================================================================
// User Filter
// ============================================================================

/// Filter criteria for the users list.
#[derive(Debug, Clone, Default)]
pub struct UserFilter {
    /// Free-text query over name and email.
    pub query: Option<String>,
    /// Restrict to one role (`None` = all).
    pub role: Option<UserRole>,
    /// Restrict by suspension state (`None` = all).
    pub suspended: Option<bool>,
}

impl UserFilter {
    /// Returns true if the user satisfies every active constraint.
    pub fn matches(&self, user: &User) -> bool {
        if let Some(wanted) = self.role {
            if user.role != wanted {
                return false;
            }
        }
        if let Some(wanted) = self.suspended {
            if user.is_suspended != wanted {
                return false;
            }
        }
        query_matches(self.query.as_deref(), &[&user.name, &user.email])
    }

    /// Applies the filter, preserving input order.
    pub fn apply<'a>(&self, users: &'a [User]) -> Vec<&'a User> {
        users.iter().filter(|u| self.matches(u)).collect()
    }
}

// ============================================================================
// Tests
// ============================================================================
