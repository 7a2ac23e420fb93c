//! Calendar-month time series.
//!
//! The dashboard charts the last six calendar months of signups and
//! revenue. Bucketing is by month/year equality, not a rolling window: a
//! record belongs to a bucket iff its `created_at` carries that bucket's
//! month and year.

use chrono::{DateTime, Datelike, Utc};
use modelsnest_core::{Transaction, TransactionType, User};
use serde::{Deserialize, Serialize};

/// Number of calendar months charted, ending at the reference month.
pub const MONTH_WINDOW: usize = 6;

const MONTH_LABELS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// One calendar-month slot of a series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthBucket {
    /// Short month name ("Jan" .. "Dec").
    pub label: String,
    /// Count or sum for the month, depending on the series.
    pub value: f64,
}

/// Returns the `MONTH_WINDOW` (year, month) pairs ending at `now`'s month,
/// oldest first.
fn months_ending_at(now: DateTime<Utc>) -> [(i32, u32); MONTH_WINDOW] {
    let mut year = now.year();
    let mut month = now.month();
    let mut out = [(0i32, 0u32); MONTH_WINDOW];
    for slot in out.iter_mut().rev() {
        *slot = (year, month);
        if month == 1 {
            month = 12;
            year -= 1;
        } else {
            month -= 1;
        }
    }
    out
}

fn month_label(month: u32) -> &'static str {
    MONTH_LABELS[(month as usize - 1) % 12]
}

/// Buckets `(created_at, value)` entries into the six months ending at `now`.
///
/// Entries outside the window are dropped. Buckets with no entries keep a
/// value of `0.0`, so the output always has exactly [`MONTH_WINDOW`] slots.
fn bucketize<I>(entries: I, now: DateTime<Utc>) -> Vec<MonthBucket>
where
    I: Iterator<Item = (DateTime<Utc>, f64)>,
{
    let months = months_ending_at(now);
    let mut values = [0.0_f64; MONTH_WINDOW];

    for (created_at, value) in entries {
        let key = (created_at.year(), created_at.month());
        if let Some(idx) = months.iter().position(|m| *m == key) {
            values[idx] += value;
        }
    }

    months
        .iter()
        .zip(values.iter())
        .map(|(&(_, month), &value)| MonthBucket {
            label: month_label(month).to_string(),
            value,
        })
        .collect()
}

/// Signups per calendar month over the six months ending at `now`.
pub fn users_by_month(users: &[User], now: DateTime<Utc>) -> Vec<MonthBucket> {
    bucketize(users.iter().map(|u| (u.created_at, 1.0)), now)
}

/// Completed top-up revenue per calendar month over the six months ending
/// at `now`.
pub fn revenue_by_month(transactions: &[Transaction], now: DateTime<Utc>) -> Vec<MonthBucket> {
    bucketize(
        transactions
            .iter()
            .filter(|t| t.is_completed() && t.tx_type == TransactionType::Topup)
            .map(|t| (t.created_at, t.amount)),
        now,
    )
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use modelsnest_core::TransactionStatus;

    fn topup(amount: f64, created_at: DateTime<Utc>) -> Transaction {
        Transaction {
            id: "txn_series".to_string(),
            tx_type: TransactionType::Topup,
            status: TransactionStatus::Completed,
            amount,
            user_email: "s@example.com".to_string(),
            user_name: "Series".to_string(),
            created_at,
            reference_id: None,
            payment_method: None,
            description: None,
        }
    }

    #[test]
    fn test_window_spans_year_boundary() {
        let now = Utc.with_ymd_and_hms(2026, 2, 10, 0, 0, 0).unwrap();
        let months = months_ending_at(now);
        assert_eq!(months[0], (2025, 9));
        assert_eq!(months[5], (2026, 2));
    }

    #[test]
    fn test_empty_input_keeps_shape() {
        let now = Utc.with_ymd_and_hms(2025, 8, 4, 0, 0, 0).unwrap();
        let buckets = revenue_by_month(&[], now);
        assert_eq!(buckets.len(), MONTH_WINDOW);
        assert!(buckets.iter().all(|b| b.value == 0.0));
        assert_eq!(buckets[5].label, "Aug");
        assert_eq!(buckets[0].label, "Mar");
    }

    #[test]
    fn test_first_of_current_month_lands_in_last_bucket() {
        let now = Utc.with_ymd_and_hms(2025, 8, 20, 0, 0, 0).unwrap();
        let tx = topup(40.0, Utc.with_ymd_and_hms(2025, 8, 1, 0, 0, 0).unwrap());

        let buckets = revenue_by_month(&[tx], now);
        assert_eq!(buckets[5].value, 40.0);
        assert!(buckets[..5].iter().all(|b| b.value == 0.0));
    }

    #[test]
    fn test_seven_months_ago_is_dropped() {
        let now = Utc.with_ymd_and_hms(2025, 8, 20, 0, 0, 0).unwrap();
        let tx = topup(40.0, Utc.with_ymd_and_hms(2025, 1, 31, 23, 59, 59).unwrap());

        let buckets = revenue_by_month(&[tx], now);
        assert!(buckets.iter().all(|b| b.value == 0.0));
    }

    #[test]
    fn test_incomplete_topups_excluded_from_revenue_series() {
        let now = Utc.with_ymd_and_hms(2025, 8, 20, 0, 0, 0).unwrap();
        let mut tx = topup(40.0, now);
        tx.status = TransactionStatus::Pending;

        let buckets = revenue_by_month(&[tx], now);
        assert!(buckets.iter().all(|b| b.value == 0.0));
    }

    #[test]
    fn test_user_signups_counted_per_month() {
        let now = Utc.with_ymd_and_hms(2025, 8, 20, 0, 0, 0).unwrap();
        let user = |created_at| User {
            id: "usr_series".to_string(),
            email: "s@example.com".to_string(),
            name: "Series".to_string(),
            role: modelsnest_core::UserRole::User,
            is_suspended: false,
            balance: 0.0,
            created_at,
        };

        let users = vec![
            user(Utc.with_ymd_and_hms(2025, 7, 3, 0, 0, 0).unwrap()),
            user(Utc.with_ymd_and_hms(2025, 7, 28, 0, 0, 0).unwrap()),
            user(Utc.with_ymd_and_hms(2025, 4, 15, 0, 0, 0).unwrap()),
        ];

        let buckets = users_by_month(&users, now);
        // Mar Apr May Jun Jul Aug
        assert_eq!(buckets[1].value, 1.0);
        assert_eq!(buckets[4].value, 2.0);
        assert_eq!(buckets[5].value, 0.0);
    }
}
