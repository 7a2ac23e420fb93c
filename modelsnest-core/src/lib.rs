// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # Modelsnest Core
//!
//! Core domain types for the Modelsnest admin back-office.
//!
//! This crate provides the foundational models shared across the other
//! Modelsnest crates:
//!
//! - Transaction records (top-ups, usage charges, refunds)
//! - User accounts (role, suspension state, balance)
//! - Error types
//!
//! ## Key Types
//!
//! ### Transactions
//! - [`Transaction`] - A single billing transaction
//! - [`TransactionType`] - Top-up, usage, or refund
//! - [`TransactionStatus`] - Completed, pending, failed, or cancelled
//! - [`Direction`] - Whether a transaction credits or debits an account
//!
//! ### Users
//! - [`User`] - A platform account
//! - [`UserRole`] - Admin or regular user
//!
//! Records are plain serde types: the data source is expected to hand over
//! already-validated collections, and the analytics layer treats them as an
//! immutable snapshot.

pub mod error;
pub mod models;

// Re-export error types
pub use error::CoreError;

// Re-export all model types
pub use models::{Direction, Transaction, TransactionStatus, TransactionType, User, UserRole};
