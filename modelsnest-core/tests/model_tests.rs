//! Integration tests for core model types.

use chrono::{TimeZone, Utc};
use modelsnest_core::{Transaction, TransactionStatus, TransactionType, User, UserRole};

fn tx(tx_type: TransactionType, status: TransactionStatus, amount: f64) -> Transaction {
    Transaction {
        id: "txn_itest01".to_string(),
        tx_type,
        status,
        amount,
        user_email: "it@example.com".to_string(),
        user_name: "Integration Test".to_string(),
        created_at: Utc.with_ymd_and_hms(2025, 7, 1, 0, 0, 0).unwrap(),
        reference_id: None,
        payment_method: None,
        description: None,
    }
}

#[test]
fn test_transaction_serialization_roundtrip() {
    let original = tx(TransactionType::Refund, TransactionStatus::Pending, 25.0);
    let json = serde_json::to_string(&original).unwrap();
    let parsed: Transaction = serde_json::from_str(&json).unwrap();

    assert_eq!(parsed.tx_type, TransactionType::Refund);
    assert_eq!(parsed.status, TransactionStatus::Pending);
    assert!(!parsed.is_completed());
}

#[test]
fn test_transaction_validation() {
    let mut record = tx(TransactionType::Usage, TransactionStatus::Completed, 1.0);
    assert!(record.validate().is_ok());

    record.amount = f64::NEG_INFINITY;
    assert!(record.validate().is_err());
}

#[test]
fn test_user_serialization_roundtrip() {
    let user = User {
        id: "usr_itest".to_string(),
        email: "it@example.com".to_string(),
        name: "Integration Test".to_string(),
        role: UserRole::User,
        is_suspended: false,
        balance: 100.0,
        created_at: Utc.with_ymd_and_hms(2025, 7, 1, 0, 0, 0).unwrap(),
    };

    let json = serde_json::to_string(&user).unwrap();
    let parsed: User = serde_json::from_str(&json).unwrap();
    assert!(parsed.is_active());
    assert!(!parsed.is_admin());
}

#[test]
fn test_invoice_number_is_stable() {
    let record = tx(TransactionType::Topup, TransactionStatus::Completed, 10.0);
    assert_eq!(record.invoice_number(), record.invoice_number());
}
