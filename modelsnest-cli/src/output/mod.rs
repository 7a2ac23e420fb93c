//! Output formatting for CLI.

mod json;
mod text;

pub use json::{
    InvoiceOutput, JsonFormatter, ListOutput, SummaryOutput, TransactionOutput, UserOutput,
};
pub use text::TextFormatter;
