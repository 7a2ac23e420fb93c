//! Serde serialization/deserialization tests for core types.
//!
//! These tests verify the JSON wire shape the persistence layer writes:
//! snake_case enum values, the `type` field rename, and optional-field
//! handling on the way back in.

use chrono::{TimeZone, Utc};
use serde_json;

use crate::{Direction, Transaction, TransactionStatus, TransactionType, User, UserRole};

// ============================================================================
// TransactionType Serde Tests
// ============================================================================

#[test]
fn test_transaction_type_roundtrip_all_variants() {
    for tx_type in TransactionType::all() {
        let json = serde_json::to_string(tx_type).unwrap();
        let deserialized: TransactionType = serde_json::from_str(&json).unwrap();
        assert_eq!(*tx_type, deserialized, "Round-trip failed for {:?}", tx_type);
    }
}

#[test]
fn test_transaction_type_snake_case() {
    assert_eq!(
        serde_json::to_string(&TransactionType::Topup).unwrap(),
        r#""topup""#
    );
    let parsed: TransactionType = serde_json::from_str(r#""refund""#).unwrap();
    assert_eq!(parsed, TransactionType::Refund);
}

#[test]
fn test_transaction_type_invalid_deserialize() {
    let result: Result<TransactionType, _> = serde_json::from_str(r#""chargeback""#);
    assert!(result.is_err());
}

// ============================================================================
// TransactionStatus Serde Tests
// ============================================================================

#[test]
fn test_transaction_status_roundtrip_all_variants() {
    for status in TransactionStatus::all() {
        let json = serde_json::to_string(status).unwrap();
        let deserialized: TransactionStatus = serde_json::from_str(&json).unwrap();
        assert_eq!(*status, deserialized);
    }
}

#[test]
fn test_transaction_status_snake_case() {
    assert_eq!(
        serde_json::to_string(&TransactionStatus::Cancelled).unwrap(),
        r#""cancelled""#
    );
}

// ============================================================================
// Transaction Serde Tests
// ============================================================================

fn sample_transaction() -> Transaction {
    Transaction {
        id: "txn_a1b2c3d4".to_string(),
        tx_type: TransactionType::Usage,
        status: TransactionStatus::Completed,
        amount: 4.20,
        user_email: "ada@example.com".to_string(),
        user_name: "Ada Lovelace".to_string(),
        created_at: Utc.with_ymd_and_hms(2025, 5, 2, 8, 15, 0).unwrap(),
        reference_id: Some("ref_778899".to_string()),
        payment_method: None,
        description: Some("gpt-4o usage".to_string()),
    }
}

#[test]
fn test_transaction_full_roundtrip() {
    let tx = sample_transaction();
    let json = serde_json::to_string(&tx).unwrap();
    let deserialized: Transaction = serde_json::from_str(&json).unwrap();

    assert_eq!(deserialized.id, "txn_a1b2c3d4");
    assert_eq!(deserialized.tx_type, TransactionType::Usage);
    assert_eq!(deserialized.status, TransactionStatus::Completed);
    assert!((deserialized.amount - 4.20).abs() < 0.0001);
    assert_eq!(deserialized.reference_id, Some("ref_778899".to_string()));
    assert_eq!(deserialized.payment_method, None);
}

#[test]
fn test_transaction_type_field_rename() {
    // The wire field is `type`, not `tx_type`.
    let json = serde_json::to_string(&sample_transaction()).unwrap();
    assert!(json.contains(r#""type":"usage""#));
    assert!(!json.contains("tx_type"));
}

#[test]
fn test_transaction_optional_fields_omitted() {
    let mut tx = sample_transaction();
    tx.reference_id = None;
    tx.description = None;

    let json = serde_json::to_string(&tx).unwrap();
    assert!(!json.contains("reference_id"));
    assert!(!json.contains("payment_method"));
    assert!(!json.contains("description"));
}

#[test]
fn test_transaction_deserialize_minimal() {
    // Optional metadata can be entirely absent in stored records.
    let json = r#"{
        "id": "txn_min",
        "type": "topup",
        "status": "pending",
        "amount": 100.0,
        "user_email": "x@example.com",
        "user_name": "X",
        "created_at": "2025-03-01T00:00:00Z"
    }"#;

    let tx: Transaction = serde_json::from_str(json).unwrap();
    assert_eq!(tx.tx_type, TransactionType::Topup);
    assert!(tx.reference_id.is_none());
    assert!(tx.description.is_none());
}

#[test]
fn test_transaction_deserialize_with_unknown_fields() {
    // Unknown fields are ignored (forward compatibility).
    let json = r#"{
        "id": "txn_fw",
        "type": "usage",
        "status": "completed",
        "amount": 1.0,
        "user_email": "x@example.com",
        "user_name": "X",
        "created_at": "2025-03-01T00:00:00Z",
        "gateway_payload": {"ignored": true}
    }"#;

    let result: Result<Transaction, _> = serde_json::from_str(json);
    assert!(result.is_ok());
}

// ============================================================================
// User Serde Tests
// ============================================================================

#[test]
fn test_user_roundtrip() {
    let user = User {
        id: "usr_42".to_string(),
        email: "grace@example.com".to_string(),
        name: "Grace Hopper".to_string(),
        role: UserRole::Admin,
        is_suspended: true,
        balance: -2.5,
        created_at: Utc.with_ymd_and_hms(2024, 11, 20, 17, 45, 0).unwrap(),
    };

    let json = serde_json::to_string(&user).unwrap();
    let deserialized: User = serde_json::from_str(&json).unwrap();

    assert_eq!(deserialized.role, UserRole::Admin);
    assert!(deserialized.is_suspended);
    assert!((deserialized.balance - (-2.5)).abs() < 0.0001);
}

#[test]
fn test_user_deserialize_defaults() {
    // role and is_suspended default when missing from older records.
    let json = r#"{
        "id": "usr_old",
        "email": "old@example.com",
        "name": "Old Record",
        "balance": 0.0,
        "created_at": "2024-01-01T00:00:00Z"
    }"#;

    let user: User = serde_json::from_str(json).unwrap();
    assert_eq!(user.role, UserRole::User);
    assert!(!user.is_suspended);
}

// ============================================================================
// Direction Serde Tests
// ============================================================================

#[test]
fn test_direction_snake_case() {
    assert_eq!(serde_json::to_string(&Direction::Credit).unwrap(), r#""credit""#);
    assert_eq!(serde_json::to_string(&Direction::Debit).unwrap(), r#""debit""#);
}
