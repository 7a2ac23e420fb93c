//! JSON output formatting.

use anyhow::Result;
use chrono::{DateTime, Utc};
use modelsnest_analytics::{AnalyticsSummary, MonthBucket, StatusCount, TypeBreakdown, UserSpend};
use modelsnest_core::{Transaction, TransactionStatus, TransactionType, User, UserRole};
use serde::{Serialize, Serializer};

// ============================================================================
// Output Types
// ============================================================================

/// JSON output for the analytics dashboard.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryOutput {
    pub total_revenue: f64,
    pub total_usage: f64,
    pub total_refunds: f64,
    pub net_revenue: f64,
    pub gross_margin: f64,
    pub avg_topup: f64,
    pub avg_usage_per_user: f64,
    pub active_users: usize,
    pub suspended_users: usize,
    pub admin_users: usize,
    pub total_balance: f64,
    pub avg_balance: f64,
    pub users_by_month: Vec<BucketOutput>,
    pub revenue_by_month: Vec<BucketOutput>,
    pub tx_by_type: Vec<TypeRowOutput>,
    pub tx_by_status: Vec<StatusRowOutput>,
    pub top_users: Vec<TopUserOutput>,
}

/// One month of a series.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BucketOutput {
    pub label: String,
    pub value: f64,
}

/// One row of the by-type breakdown.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeRowOutput {
    #[serde(rename = "type")]
    pub tx_type: TransactionType,
    pub count: usize,
    pub total_amount: f64,
}

/// One row of the by-status breakdown.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusRowOutput {
    pub status: TransactionStatus,
    pub count: usize,
}

/// One row of the top-users ranking.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TopUserOutput {
    pub email: String,
    pub name: String,
    pub spend: f64,
    pub topups: f64,
}

impl From<&AnalyticsSummary> for SummaryOutput {
    fn from(summary: &AnalyticsSummary) -> Self {
        let bucket = |b: &MonthBucket| BucketOutput {
            label: b.label.clone(),
            value: b.value,
        };
        let type_row = |b: &TypeBreakdown| TypeRowOutput {
            tx_type: b.tx_type,
            count: b.count,
            total_amount: b.total_amount,
        };
        let status_row = |s: &StatusCount| StatusRowOutput {
            status: s.status,
            count: s.count,
        };
        let top_user = |u: &UserSpend| TopUserOutput {
            email: u.email.clone(),
            name: u.name.clone(),
            spend: u.spend,
            topups: u.topups,
        };

        Self {
            total_revenue: summary.total_revenue,
            total_usage: summary.total_usage,
            total_refunds: summary.total_refunds,
            net_revenue: summary.net_revenue,
            gross_margin: summary.gross_margin,
            avg_topup: summary.avg_topup,
            avg_usage_per_user: summary.avg_usage_per_user,
            active_users: summary.active_users,
            suspended_users: summary.suspended_users,
            admin_users: summary.admin_users,
            total_balance: summary.total_balance,
            avg_balance: summary.avg_balance,
            users_by_month: summary.users_by_month.iter().map(bucket).collect(),
            revenue_by_month: summary.revenue_by_month.iter().map(bucket).collect(),
            tx_by_type: summary.tx_by_type.iter().map(type_row).collect(),
            tx_by_status: summary.tx_by_status.iter().map(status_row).collect(),
            top_users: summary.top_users.iter().map(top_user).collect(),
        }
    }
}

/// JSON output for one transaction row.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionOutput {
    pub id: String,
    #[serde(rename = "type")]
    pub tx_type: TransactionType,
    pub status: TransactionStatus,
    pub amount: f64,
    pub user_email: String,
    pub user_name: String,
    #[serde(serialize_with = "serialize_datetime")]
    pub created_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_method: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl From<&Transaction> for TransactionOutput {
    fn from(tx: &Transaction) -> Self {
        Self {
            id: tx.id.clone(),
            tx_type: tx.tx_type,
            status: tx.status,
            amount: tx.amount,
            user_email: tx.user_email.clone(),
            user_name: tx.user_name.clone(),
            created_at: tx.created_at,
            reference_id: tx.reference_id.clone(),
            payment_method: tx.payment_method.clone(),
            description: tx.description.clone(),
        }
    }
}

/// JSON output for one user row.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserOutput {
    pub id: String,
    pub email: String,
    pub name: String,
    pub role: UserRole,
    pub is_suspended: bool,
    pub balance: f64,
    #[serde(serialize_with = "serialize_datetime")]
    pub created_at: DateTime<Utc>,
}

impl From<&User> for UserOutput {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.clone(),
            email: user.email.clone(),
            name: user.name.clone(),
            role: user.role,
            is_suspended: user.is_suspended,
            balance: user.balance,
            created_at: user.created_at,
        }
    }
}

/// JSON output for one page of a list.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListOutput<T: Serialize> {
    pub page: usize,
    pub per_page: usize,
    pub total_items: usize,
    pub total_pages: usize,
    pub items: Vec<T>,
}

/// JSON output for a rendered invoice.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceOutput {
    pub invoice_number: String,
    pub transaction_id: String,
    #[serde(rename = "type")]
    pub tx_type: TransactionType,
    pub status: TransactionStatus,
    pub amount: f64,
    #[serde(serialize_with = "serialize_datetime")]
    pub issued_at: DateTime<Utc>,
    pub billed_to_name: String,
    pub billed_to_email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_method: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl From<&Transaction> for InvoiceOutput {
    fn from(tx: &Transaction) -> Self {
        Self {
            invoice_number: tx.invoice_number(),
            transaction_id: tx.id.clone(),
            tx_type: tx.tx_type,
            status: tx.status,
            amount: tx.amount,
            issued_at: tx.created_at,
            billed_to_name: tx.user_name.clone(),
            billed_to_email: tx.user_email.clone(),
            reference_id: tx.reference_id.clone(),
            payment_method: tx.payment_method.clone(),
            description: tx.description.clone(),
        }
    }
}

// ============================================================================
// Serialization helpers
// ============================================================================

fn serialize_datetime<S>(dt: &DateTime<Utc>, s: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    s.serialize_str(&dt.to_rfc3339())
}

// ============================================================================
// JSON Formatter
// ============================================================================

/// JSON formatter.
pub struct JsonFormatter {
    pretty: bool,
}

impl JsonFormatter {
    /// Creates a new JSON formatter.
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }

    /// Formats any serializable value.
    pub fn format<T: Serialize>(&self, data: &T) -> Result<String> {
        let json = if self.pretty {
            serde_json::to_string_pretty(data)?
        } else {
            serde_json::to_string(data)?
        };
        Ok(json)
    }
}

// ============================================================================
// Tests
// ============================================================================
