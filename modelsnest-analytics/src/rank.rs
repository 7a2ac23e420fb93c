//! Top-user ranking by top-up volume.

use modelsnest_core::{Transaction, TransactionType, User};
use serde::{Deserialize, Serialize};

/// How many users the dashboard ranking shows.
pub const TOP_USERS_LIMIT: usize = 5;

/// Settled spend and top-up volume for one user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserSpend {
    /// The user's email, as matched against transactions.
    pub email: String,
    /// The user's display name.
    pub name: String,
    /// Sum of completed usage transaction amounts.
    pub spend: f64,
    /// Sum of completed top-up transaction amounts.
    pub topups: f64,
}

/// Ranks users by completed top-up volume, descending, truncated to `limit`.
///
/// Transactions are joined to users by `user_email` equality (the stored
/// records denormalize email, not user id — emails are assumed unique).
/// Users with equal top-up totals keep their input order: the sort is
/// stable and no secondary key is applied.
pub fn top_users(transactions: &[Transaction], users: &[User], limit: usize) -> Vec<UserSpend> {
    let mut ranked: Vec<UserSpend> = users
        .iter()
        .map(|user| {
            let mut spend = 0.0;
            let mut topups = 0.0;
            for tx in transactions {
                if !tx.is_completed() || tx.user_email != user.email {
                    continue;
                }
                match tx.tx_type {
                    TransactionType::Usage => spend += tx.amount,
                    TransactionType::Topup => topups += tx.amount,
                    TransactionType::Refund => {}
                }
            }
            UserSpend {
                email: user.email.clone(),
                name: user.name.clone(),
                spend,
                topups,
            }
        })
        .collect();

    ranked.sort_by(|a, b| b.topups.total_cmp(&a.topups));
    ranked.truncate(limit);
    ranked
}

// ============================================================================
// Tests
// ============================================================================
