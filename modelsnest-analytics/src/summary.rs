//! Dashboard KPI aggregation.
//!
//! [`aggregate`] reduces one snapshot of transactions and users into every
//! number the analytics view shows. It is a pure transform: inputs are
//! borrowed immutably, the reference clock is an explicit argument, and the
//! same snapshot always produces an identical summary.

use chrono::{DateTime, Utc};
use modelsnest_core::{Transaction, TransactionType, User};
use serde::{Deserialize, Serialize};

use crate::breakdown::{self, StatusCount, TypeBreakdown};
use crate::rank::{self, TOP_USERS_LIMIT, UserSpend};
use crate::series::{self, MonthBucket};

/// Everything the analytics dashboard shows, computed in one call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyticsSummary {
    /// Sum of completed top-up amounts.
    pub total_revenue: f64,
    /// Sum of completed usage amounts.
    pub total_usage: f64,
    /// Sum of completed refund amounts.
    pub total_refunds: f64,
    /// `total_revenue - total_refunds`.
    pub net_revenue: f64,
    /// `(net_revenue - total_usage) / total_revenue * 100`, or 0 with no revenue.
    pub gross_margin: f64,
    /// Mean completed top-up amount, or 0 with no top-ups.
    pub avg_topup: f64,
    /// `total_usage / user count`, or 0 with no users.
    pub avg_usage_per_user: f64,
    /// Users not suspended.
    pub active_users: usize,
    /// Users suspended.
    pub suspended_users: usize,
    /// Users with the admin role.
    pub admin_users: usize,
    /// Sum of all user balances.
    pub total_balance: f64,
    /// Mean user balance, or 0 with no users.
    pub avg_balance: f64,
    /// Signups per month, six calendar months ending at the reference time.
    pub users_by_month: Vec<MonthBucket>,
    /// Completed top-up revenue per month, same window.
    pub revenue_by_month: Vec<MonthBucket>,
    /// Completed count and volume per transaction type.
    pub tx_by_type: Vec<TypeBreakdown>,
    /// Transaction count per status, all statuses.
    pub tx_by_status: Vec<StatusCount>,
    /// Top users by completed top-up volume.
    pub top_users: Vec<UserSpend>,
}

/// Computes the full dashboard summary for one snapshot.
///
/// `now` anchors the six-month series; callers pass `Utc::now()` outside
/// of tests. Empty collections are valid input: every total degrades to 0
/// and the series/breakdown vectors keep their fixed shapes.
pub fn aggregate(transactions: &[Transaction], users: &[User], now: DateTime<Utc>) -> AnalyticsSummary {
    let mut total_revenue = 0.0;
    let mut total_usage = 0.0;
    let mut total_refunds = 0.0;
    let mut topup_count = 0_usize;

    for tx in transactions.iter().filter(|t| t.is_completed()) {
        match tx.tx_type {
            TransactionType::Topup => {
                total_revenue += tx.amount;
                topup_count += 1;
            }
            TransactionType::Usage => total_usage += tx.amount,
            TransactionType::Refund => total_refunds += tx.amount,
        }
    }

    let net_revenue = total_revenue - total_refunds;

    // Margin and the averages short-circuit to 0 rather than dividing by
    // zero; the dashboard never renders NaN.
    let gross_margin = if total_revenue > 0.0 {
        ((net_revenue - total_usage) / total_revenue) * 100.0
    } else {
        0.0
    };

    let avg_topup = if topup_count > 0 {
        total_revenue / topup_count as f64
    } else {
        0.0
    };

    let user_count = users.len();
    let avg_usage_per_user = if user_count > 0 {
        total_usage / user_count as f64
    } else {
        0.0
    };

    let active_users = users.iter().filter(|u| u.is_active()).count();
    let suspended_users = user_count - active_users;
    let admin_users = users.iter().filter(|u| u.is_admin()).count();

    let total_balance: f64 = users.iter().map(|u| u.balance).sum();
    let avg_balance = if user_count > 0 {
        total_balance / user_count as f64
    } else {
        0.0
    };

    AnalyticsSummary {
        total_revenue,
        total_usage,
        total_refunds,
        net_revenue,
        gross_margin,
        avg_topup,
        avg_usage_per_user,
        active_users,
        suspended_users,
        admin_users,
        total_balance,
        avg_balance,
        users_by_month: series::users_by_month(users, now),
        revenue_by_month: series::revenue_by_month(transactions, now),
        tx_by_type: breakdown::by_type(transactions),
        tx_by_status: breakdown::by_status(transactions),
        top_users: rank::top_users(transactions, users, TOP_USERS_LIMIT),
    }
}

// ============================================================================
// Tests
// ============================================================================
