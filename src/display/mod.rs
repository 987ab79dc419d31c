//! Display formatting for terminal output
//!
//! Renders ledger data as `tabled` tables. Every function returns a
//! `String` so the CLI decides where it goes.

pub mod budget;
pub mod report;
pub mod transaction;

pub use budget::format_budget_table;
pub use report::{
    format_bar, format_category_table, format_monthly_table, format_percentage,
    format_statistics, format_summary,
};
pub use transaction::{format_transaction_details, format_transaction_table};
