//! Text output formatting with bar charts, tables, and colors.

use chrono::{DateTime, Utc};
use modelsnest_analytics::{AnalyticsSummary, MonthBucket, Page};
use modelsnest_core::{Transaction, User};

// ============================================================================
// ANSI Colors
// ============================================================================

const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const DIM: &str = "\x1b[2m";
const GREEN: &str = "\x1b[32m";
const YELLOW: &str = "\x1b[33m";
const RED: &str = "\x1b[31m";
const CYAN: &str = "\x1b[36m";

// Bar chart characters
const BAR_FULL: char = '█';
const BAR_EMPTY: char = '░';

/// Text formatter with optional colors.
pub struct TextFormatter {
    use_colors: bool,
    bar_width: usize,
}

impl TextFormatter {
    /// Creates a new text formatter.
    pub fn new(use_colors: bool) -> Self {
        Self {
            use_colors,
            bar_width: 12,
        }
    }

    /// Set the bar chart width.
    #[allow(dead_code)]
    pub fn with_bar_width(mut self, width: usize) -> Self {
        self.bar_width = width;
        self
    }

    // ========================================================================
    // Analytics dashboard
    // ========================================================================

    /// Formats the full analytics dashboard.
    pub fn format_summary(&self, summary: &AnalyticsSummary, show_zero_rows: bool) -> String {
        let mut lines = Vec::new();

        lines.push(self.bold("Modelsnest Analytics"));
        lines.push("─".repeat(50));
        lines.push(String::new());

        lines.push(format!("Total revenue:   {}", self.green(&self.format_money(summary.total_revenue))));
        lines.push(format!("Usage cost:      {}", self.format_money(summary.total_usage)));
        lines.push(format!("Refunds:         {}", self.format_money(summary.total_refunds)));
        lines.push(format!("Net revenue:     {}", self.format_money(summary.net_revenue)));
        lines.push(format!(
            "Gross margin:    {}",
            self.color_for_margin(summary.gross_margin, &format!("{:.1}%", summary.gross_margin))
        ));
        lines.push(format!("Avg top-up:      {}", self.format_money(summary.avg_topup)));
        lines.push(format!("Avg usage/user:  {}", self.format_money(summary.avg_usage_per_user)));
        lines.push(String::new());

        let total_users = summary.active_users + summary.suspended_users;
        lines.push(format!(
            "Users:    {} total, {} active, {} suspended, {} admin",
            total_users,
            self.green(&summary.active_users.to_string()),
            self.red_if(summary.suspended_users > 0, &summary.suspended_users.to_string()),
            summary.admin_users
        ));
        lines.push(format!(
            "Balance:  {} total, {} avg",
            self.format_money(summary.total_balance),
            self.format_money(summary.avg_balance)
        ));
        lines.push(String::new());

        lines.extend(self.format_series("Signups (last 6 months)", &summary.users_by_month, false));
        lines.push(String::new());
        lines.extend(self.format_series("Revenue (last 6 months)", &summary.revenue_by_month, true));
        lines.push(String::new());

        lines.push(self.bold("Volume by type"));
        for row in &summary.tx_by_type {
            if row.count == 0 && !show_zero_rows {
                continue;
            }
            lines.push(format!(
                "  {:<8} {:>4}  {:>12}",
                row.tx_type.label(),
                row.count,
                self.format_money(row.total_amount)
            ));
        }
        lines.push(String::new());

        lines.push(self.bold("Transactions by status"));
        for row in &summary.tx_by_status {
            if row.count == 0 && !show_zero_rows {
                continue;
            }
            lines.push(format!("  {:<10} {:>4}", row.status.label(), row.count));
        }

        if !summary.top_users.is_empty() {
            lines.push(String::new());
            lines.push(self.bold("Top users by top-ups"));
            for (i, user) in summary.top_users.iter().enumerate() {
                lines.push(format!(
                    "  {}. {:<22} {:>12} top-ups  {:>12} spend",
                    i + 1,
                    truncate(&user.name, 22),
                    self.format_money(user.topups),
                    self.format_money(user.spend)
                ));
            }
        }

        lines.join("\n")
    }

    /// Formats one six-month series as labeled bars.
    fn format_series(&self, title: &str, buckets: &[MonthBucket], money: bool) -> Vec<String> {
        let mut lines = vec![self.bold(title)];
        let max = buckets.iter().map(|b| b.value).fold(0.0_f64, f64::max);

        for bucket in buckets {
            let value = if money {
                self.format_money(bucket.value)
            } else {
                format!("{}", bucket.value.round() as i64)
            };
            lines.push(format!(
                "  {:<4} {} {}",
                bucket.label,
                self.bar(bucket.value, max),
                self.dim(&value)
            ));
        }
        lines
    }

    /// Formats a bar scaled against the series maximum.
    pub fn bar(&self, value: f64, max: f64) -> String {
        let filled = if max > 0.0 {
            ((value / max) * self.bar_width as f64).round() as usize
        } else {
            0
        };
        let filled = filled.min(self.bar_width);
        let empty = self.bar_width - filled;

        format!(
            "{}{}",
            BAR_FULL.to_string().repeat(filled),
            BAR_EMPTY.to_string().repeat(empty)
        )
    }

    // ========================================================================
    // List views
    // ========================================================================

    /// Formats one page of the transactions table.
    pub fn format_transactions_page(&self, page: &Page<'_, &Transaction>) -> String {
        let mut lines = Vec::new();

        lines.push(self.bold(&format!(
            "{:<14} {:<8} {:<10} {:>12}  {:<20} {}",
            "ID", "TYPE", "STATUS", "AMOUNT", "USER", "DATE"
        )));

        for tx in page.items {
            lines.push(format!(
                "{:<14} {:<8} {:<10} {:>12}  {:<20} {}",
                truncate(&tx.id, 14),
                tx.tx_type.label(),
                self.color_for_status(tx),
                self.format_money(tx.amount),
                truncate(&tx.user_name, 20),
                format_date(tx.created_at)
            ));
        }

        if page.items.is_empty() {
            lines.push(self.dim("No transactions match."));
        }

        lines.push(String::new());
        lines.push(self.pager_line(page.page, page.total_pages, page.total_items, "matches"));

        lines.join("\n")
    }

    /// Formats one page of the users table.
    pub fn format_users_page(&self, page: &Page<'_, &User>) -> String {
        let mut lines = Vec::new();

        lines.push(self.bold(&format!(
            "{:<26} {:<20} {:<6} {:<10} {:>12}  {}",
            "EMAIL", "NAME", "ROLE", "STATUS", "BALANCE", "JOINED"
        )));

        for user in page.items {
            let status = if user.is_suspended {
                self.red("Suspended")
            } else {
                self.green("Active")
            };
            lines.push(format!(
                "{:<26} {:<20} {:<6} {:<10} {:>12}  {}",
                truncate(&user.email, 26),
                truncate(&user.name, 20),
                user.role.label(),
                status,
                self.format_money(user.balance),
                format_date(user.created_at)
            ));
        }

        if page.items.is_empty() {
            lines.push(self.dim("No users match."));
        }

        lines.push(String::new());
        lines.push(self.pager_line(page.page, page.total_pages, page.total_items, "matches"));

        lines.join("\n")
    }

    fn pager_line(&self, page: usize, total_pages: usize, total_items: usize, noun: &str) -> String {
        self.dim(&format!(
            "page {} of {} ({} {})",
            page,
            total_pages.max(1),
            total_items,
            noun
        ))
    }

    // ========================================================================
    // Invoice
    // ========================================================================

    /// Formats a printable invoice for one transaction.
    pub fn format_invoice(&self, tx: &Transaction) -> String {
        let mut lines = Vec::new();

        lines.push(self.bold(&format!("INVOICE {}", tx.invoice_number())));
        lines.push("─".repeat(44));
        lines.push(format!("Issued:      {}", format_date(tx.created_at)));
        lines.push(format!(
            "Billed to:   {} {}",
            tx.user_name,
            self.cyan(&format!("<{}>", tx.user_email))
        ));
        lines.push(format!("Type:        {}", tx.tx_type.label()));
        lines.push(format!("Status:      {}", self.color_for_status(tx)));
        if let Some(method) = &tx.payment_method {
            lines.push(format!("Payment:     {method}"));
        }
        if let Some(reference) = &tx.reference_id {
            lines.push(format!("Reference:   {reference}"));
        }
        if let Some(description) = &tx.description {
            lines.push(format!("Description: {description}"));
        }
        lines.push("─".repeat(44));
        lines.push(format!(
            "Amount:      {}",
            self.bold(&self.format_money(tx.amount))
        ));

        lines.join("\n")
    }

    // ========================================================================
    // Value formatting
    // ========================================================================

    /// Formats a currency amount as `$1,234.56`.
    pub fn format_money(&self, amount: f64) -> String {
        let negative = amount < 0.0 && (amount * 100.0).round() != 0.0;
        let cents = (amount.abs() * 100.0).round() as u64;
        let dollars = cents / 100;
        let rem = cents % 100;

        let sign = if negative { "-" } else { "" };
        format!("{sign}${}.{rem:02}", group_thousands(dollars))
    }

    fn color_for_margin(&self, margin: f64, text: &str) -> String {
        if margin > 0.0 {
            self.green(text)
        } else if margin < 0.0 {
            self.red(text)
        } else {
            self.dim(text)
        }
    }

    fn color_for_status(&self, tx: &Transaction) -> String {
        use modelsnest_core::TransactionStatus;

        let label = tx.status.label();
        match tx.status {
            TransactionStatus::Completed => self.green(label),
            TransactionStatus::Pending => self.yellow(label),
            TransactionStatus::Failed => self.red(label),
            TransactionStatus::Cancelled => self.dim(label),
        }
    }

    // ========================================================================
    // Color/style helpers
    // ========================================================================

    fn red_if(&self, condition: bool, text: &str) -> String {
        if condition {
            self.red(text)
        } else {
            text.to_string()
        }
    }

    fn bold(&self, text: &str) -> String {
        if self.use_colors {
            format!("{BOLD}{text}{RESET}")
        } else {
            text.to_string()
        }
    }

    fn dim(&self, text: &str) -> String {
        if self.use_colors {
            format!("{DIM}{text}{RESET}")
        } else {
            text.to_string()
        }
    }

    fn green(&self, text: &str) -> String {
        if self.use_colors {
            format!("{GREEN}{text}{RESET}")
        } else {
            text.to_string()
        }
    }

    fn yellow(&self, text: &str) -> String {
        if self.use_colors {
            format!("{YELLOW}{text}{RESET}")
        } else {
            text.to_string()
        }
    }

    fn red(&self, text: &str) -> String {
        if self.use_colors {
            format!("{RED}{text}{RESET}")
        } else {
            text.to_string()
        }
    }

    fn cyan(&self, text: &str) -> String {
        if self.use_colors {
            format!("{CYAN}{text}{RESET}")
        } else {
            text.to_string()
        }
    }
}

// ============================================================================
// Free helpers
// ============================================================================

fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

fn format_date(dt: DateTime<Utc>) -> String {
    dt.format("%Y-%m-%d").to_string()
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max.saturating_sub(1)).collect();
        format!("{kept}…")
    }
}

// ============================================================================
// Tests
// ============================================================================
