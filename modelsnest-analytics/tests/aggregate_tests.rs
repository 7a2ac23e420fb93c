//! Integration tests for the dashboard aggregation.
//!
//! These exercise the aggregator's contract end to end: degenerate inputs,
//! arithmetic identities, bucket membership, ranking, and determinism.

use chrono::{DateTime, TimeZone, Utc};
use modelsnest_analytics::{MONTH_WINDOW, TOP_USERS_LIMIT, aggregate};
use modelsnest_core::{Transaction, TransactionStatus, TransactionType, User, UserRole};

fn reference_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 8, 4, 12, 0, 0).unwrap()
}

fn tx(
    id: &str,
    email: &str,
    tx_type: TransactionType,
    status: TransactionStatus,
    amount: f64,
    created_at: DateTime<Utc>,
) -> Transaction {
    Transaction {
        id: id.to_string(),
        tx_type,
        status,
        amount,
        user_email: email.to_string(),
        user_name: email.split('@').next().unwrap_or(email).to_string(),
        created_at,
        reference_id: None,
        payment_method: None,
        description: None,
    }
}

fn user(email: &str) -> User {
    User {
        id: format!("usr_{email}"),
        email: email.to_string(),
        name: email.split('@').next().unwrap_or(email).to_string(),
        role: UserRole::User,
        is_suspended: false,
        balance: 0.0,
        created_at: Utc.with_ymd_and_hms(2025, 2, 1, 0, 0, 0).unwrap(),
    }
}

#[test]
fn zero_input_is_safe_and_correctly_shaped() {
    let summary = aggregate(&[], &[], reference_time());

    assert_eq!(summary.total_revenue, 0.0);
    assert_eq!(summary.total_usage, 0.0);
    assert_eq!(summary.total_refunds, 0.0);
    assert_eq!(summary.net_revenue, 0.0);
    assert_eq!(summary.gross_margin, 0.0);
    assert_eq!(summary.avg_topup, 0.0);
    assert_eq!(summary.avg_usage_per_user, 0.0);
    assert_eq!(summary.avg_balance, 0.0);
    assert_eq!(summary.active_users, 0);

    // Fixed shapes survive empty input.
    assert_eq!(summary.users_by_month.len(), MONTH_WINDOW);
    assert_eq!(summary.revenue_by_month.len(), MONTH_WINDOW);
    assert!(summary.revenue_by_month.iter().all(|b| b.value == 0.0));
    assert_eq!(summary.tx_by_status.len(), 4);
    assert!(summary.tx_by_status.iter().all(|s| s.count == 0));
    assert_eq!(summary.tx_by_type.len(), 3);
    assert!(summary.top_users.is_empty());
}

#[test]
fn net_revenue_decomposes_exactly() {
    let transactions = vec![
        tx("t1", "a@x.com", TransactionType::Topup, TransactionStatus::Completed, 120.50, reference_time()),
        tx("t2", "a@x.com", TransactionType::Topup, TransactionStatus::Completed, 80.25, reference_time()),
        tx("t3", "a@x.com", TransactionType::Refund, TransactionStatus::Completed, 30.75, reference_time()),
        tx("t4", "a@x.com", TransactionType::Usage, TransactionStatus::Completed, 55.0, reference_time()),
    ];

    let summary = aggregate(&transactions, &[], reference_time());
    assert!((summary.net_revenue - (summary.total_revenue - summary.total_refunds)).abs() < 1e-9);
}

#[test]
fn margin_guards_division_by_zero() {
    let transactions = vec![tx(
        "t1",
        "a@x.com",
        TransactionType::Usage,
        TransactionStatus::Completed,
        9999.0,
        reference_time(),
    )];

    let summary = aggregate(&transactions, &[], reference_time());
    assert_eq!(summary.gross_margin, 0.0);
}

#[test]
fn status_buckets_partition_the_input() {
    let statuses = [
        TransactionStatus::Completed,
        TransactionStatus::Pending,
        TransactionStatus::Failed,
        TransactionStatus::Cancelled,
        TransactionStatus::Pending,
        TransactionStatus::Completed,
        TransactionStatus::Completed,
    ];
    let transactions: Vec<Transaction> = statuses
        .iter()
        .enumerate()
        .map(|(i, &status)| {
            tx(
                &format!("t{i}"),
                "a@x.com",
                TransactionType::Usage,
                status,
                1.0,
                reference_time(),
            )
        })
        .collect();

    let summary = aggregate(&transactions, &[], reference_time());
    let counted: usize = summary.tx_by_status.iter().map(|s| s.count).sum();
    assert_eq!(counted, transactions.len());
}

#[test]
fn pending_topup_does_not_inflate_revenue() {
    let transactions = vec![
        tx("t1", "a@x.com", TransactionType::Topup, TransactionStatus::Pending, 1000.0, reference_time()),
        tx("t2", "a@x.com", TransactionType::Topup, TransactionStatus::Completed, 10.0, reference_time()),
    ];

    let summary = aggregate(&transactions, &[], reference_time());
    assert_eq!(summary.total_revenue, 10.0);

    let topups = summary
        .tx_by_type
        .iter()
        .find(|b| b.tx_type == TransactionType::Topup)
        .unwrap();
    assert_eq!(topups.count, 1);
    assert_eq!(topups.total_amount, 10.0);
}

#[test]
fn month_bucket_membership_is_calendar_based() {
    let now = reference_time();
    let first_of_month = Utc.with_ymd_and_hms(2025, 8, 1, 0, 0, 0).unwrap();
    let seven_months_ago = Utc.with_ymd_and_hms(2025, 1, 15, 0, 0, 0).unwrap();

    let transactions = vec![
        tx("t1", "a@x.com", TransactionType::Topup, TransactionStatus::Completed, 42.0, first_of_month),
        tx("t2", "a@x.com", TransactionType::Topup, TransactionStatus::Completed, 77.0, seven_months_ago),
    ];

    let summary = aggregate(&transactions, &[], now);
    let series = &summary.revenue_by_month;

    // The first-of-current-month transaction lands in the newest bucket.
    assert_eq!(series[MONTH_WINDOW - 1].value, 42.0);
    // The seven-month-old one appears nowhere.
    let total: f64 = series.iter().map(|b| b.value).sum();
    assert_eq!(total, 42.0);
}

#[test]
fn top_users_truncates_and_orders() {
    let users: Vec<User> = (0..8).map(|i| user(&format!("u{i}@x.com"))).collect();
    let transactions: Vec<Transaction> = (0..8)
        .map(|i| {
            tx(
                &format!("t{i}"),
                &format!("u{i}@x.com"),
                TransactionType::Topup,
                TransactionStatus::Completed,
                f64::from((i + 1) * 11),
                reference_time(),
            )
        })
        .collect();

    let summary = aggregate(&transactions, &users, reference_time());
    assert_eq!(summary.top_users.len(), TOP_USERS_LIMIT);
    for pair in summary.top_users.windows(2) {
        assert!(pair[0].topups >= pair[1].topups);
    }
    assert_eq!(summary.top_users[0].email, "u7@x.com");
    assert_eq!(summary.top_users[0].topups, 88.0);
}

#[test]
fn aggregation_is_idempotent() {
    let transactions = vec![
        tx("t1", "a@x.com", TransactionType::Topup, TransactionStatus::Completed, 100.0, reference_time()),
        tx("t2", "b@x.com", TransactionType::Usage, TransactionStatus::Completed, 33.33, reference_time()),
        tx("t3", "a@x.com", TransactionType::Refund, TransactionStatus::Failed, 5.0, reference_time()),
    ];
    let users = vec![user("a@x.com"), user("b@x.com")];
    let now = reference_time();

    let first = aggregate(&transactions, &users, now);
    let second = aggregate(&transactions, &users, now);

    assert_eq!(first, second);
    // Serialized form is bit-identical too.
    assert_eq!(
        serde_json::to_string(&first).unwrap(),
        serde_json::to_string(&second).unwrap()
    );
}
