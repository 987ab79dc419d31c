//! Core data models for Tally
//!
//! Transactions, budget goals and the category catalogue.

pub mod budget;
pub mod category;
pub mod ids;
pub mod transaction;

pub use budget::{BudgetGoal, BudgetPeriod, BudgetProgress};
pub use category::{canonical_category, categories_for, category_color, DEFAULT_CATEGORY_COLOR};
pub use ids::{BudgetGoalId, TransactionId};
pub use transaction::{NewTransaction, Transaction, TransactionType, TransactionValidationError};
