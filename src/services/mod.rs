//! Service layer for Tally
//!
//! The service layer provides business logic on top of the storage layer,
//! handling validation, derived values and best-effort persistence.

pub mod aggregation;
pub mod budget;
pub mod ledger;

pub use aggregation::{
    category_spending, category_summary, monthly_series, statistics, CategorySummary,
    MonthlyBucket, Statistics, MONTHLY_WINDOW,
};
pub use budget::BudgetService;
pub use ledger::{ImportSummary, LedgerService, TransactionFilter};
