//! User account types.
//!
//! - [`User`] - A platform account
//! - [`UserRole`] - Admin or regular user

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::CoreError;

// ============================================================================
// User Role
// ============================================================================

/// Role of a platform account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    /// Back-office administrator.
    Admin,
    /// Regular customer account.
    #[default]
    User,
}

impl UserRole {
    /// Returns a human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Admin => "Admin",
            Self::User => "User",
        }
    }

    /// Returns all roles.
    pub fn all() -> &'static [UserRole] {
        &[Self::Admin, Self::User]
    }

    /// Parses a CLI-style name ("admin", "user").
    pub fn parse_cli_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "admin" => Some(Self::Admin),
            "user" => Some(Self::User),
            _ => None,
        }
    }
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

// ============================================================================
// User
// ============================================================================

/// A platform account.
///
/// `balance` may be transiently negative while usage settles ahead of a
/// top-up; it is never clamped here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Opaque identifier.
    pub id: String,
    /// Unique login email.
    pub email: String,
    /// Display name.
    pub name: String,
    /// Account role.
    #[serde(default)]
    pub role: UserRole,
    /// Whether the account is suspended.
    #[serde(default)]
    pub is_suspended: bool,
    /// Current credit balance (USD).
    pub balance: f64,
    /// When the account was created.
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Returns true if the account is not suspended.
    pub fn is_active(&self) -> bool {
        !self.is_suspended
    }

    /// Returns true if the account has the admin role.
    pub fn is_admin(&self) -> bool {
        self.role == UserRole::Admin
    }

    /// Validates the record.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidData` if `balance` is not a finite number.
    /// Negative balances are valid.
    pub fn validate(&self) -> Result<(), CoreError> {
        if !self.balance.is_finite() {
            return Err(CoreError::InvalidData(format!(
                "user {}: balance is not a finite number",
                self.id
            )));
        }
        Ok(())
    }

    /// Sanitizes the record by replacing a non-finite balance with `0.0`.
    pub fn sanitize(&mut self) {
        if !self.balance.is_finite() {
            self.balance = 0.0;
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
