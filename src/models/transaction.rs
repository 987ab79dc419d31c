//! Transaction model
//!
//! A transaction is an immutable income or expense event. Its id and date are
//! assigned when the ledger records it and never change afterwards.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::ids::TransactionId;

/// Direction of a transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    Income,
    Expense,
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Income => write!(f, "income"),
            Self::Expense => write!(f, "expense"),
        }
    }
}

impl FromStr for TransactionType {
    type Err = TransactionValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "income" | "in" => Ok(Self::Income),
            "expense" | "out" => Ok(Self::Expense),
            other => Err(TransactionValidationError::UnknownType(other.to_string())),
        }
    }
}

/// A recorded transaction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// Unique identifier
    pub id: TransactionId,

    /// Income or expense
    #[serde(rename = "type")]
    pub kind: TransactionType,

    /// Positive amount in the ledger's (unspecified) currency
    pub amount: f64,

    /// Category label
    pub category: String,

    /// Free text, defaults to the category name
    #[serde(default)]
    pub description: String,

    /// When the transaction was recorded
    pub date: DateTime<Utc>,
}

impl Transaction {
    /// Record a validated entry, assigning a fresh id and the given timestamp
    pub fn record(entry: NewTransaction, date: DateTime<Utc>) -> Self {
        let category = entry.category.trim().to_string();
        let description = match entry.description.trim() {
            "" => category.clone(),
            text => text.to_string(),
        };

        Self {
            id: TransactionId::new(),
            kind: entry.kind,
            amount: entry.amount,
            category,
            description,
            date,
        }
    }

    /// Check if this is an income transaction
    pub fn is_income(&self) -> bool {
        self.kind == TransactionType::Income
    }

    /// Check if this is an expense transaction
    pub fn is_expense(&self) -> bool {
        self.kind == TransactionType::Expense
    }

    /// Amount with its sign applied (expenses negative)
    pub fn signed_amount(&self) -> f64 {
        match self.kind {
            TransactionType::Income => self.amount,
            TransactionType::Expense => -self.amount,
        }
    }
}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {:.2}",
            self.date.format("%Y-%m-%d"),
            self.kind,
            self.category,
            self.amount
        )
    }
}

/// User-entered part of a transaction, before id and date are assigned
///
/// This is also the shape of an imported record: any id or date carried by
/// the source is ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewTransaction {
    #[serde(rename = "type")]
    pub kind: TransactionType,
    pub amount: f64,
    pub category: String,
    #[serde(default)]
    pub description: String,
}

impl NewTransaction {
    /// Create a new entry
    pub fn new(
        kind: TransactionType,
        amount: f64,
        category: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            amount,
            category: category.into(),
            description: description.into(),
        }
    }

    /// Shorthand for an income entry
    pub fn income(amount: f64, category: impl Into<String>) -> Self {
        Self::new(TransactionType::Income, amount, category, "")
    }

    /// Shorthand for an expense entry
    pub fn expense(amount: f64, category: impl Into<String>) -> Self {
        Self::new(TransactionType::Expense, amount, category, "")
    }

    /// Set the description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Validate the entry
    pub fn validate(&self) -> Result<(), TransactionValidationError> {
        if !self.amount.is_finite() || self.amount <= 0.0 {
            return Err(TransactionValidationError::NonPositiveAmount(self.amount));
        }

        if self.category.trim().is_empty() {
            return Err(TransactionValidationError::MissingCategory);
        }

        Ok(())
    }
}

/// Validation errors for transactions
#[derive(Debug, Clone, PartialEq)]
pub enum TransactionValidationError {
    NonPositiveAmount(f64),
    MissingCategory,
    UnknownType(String),
}

impl fmt::Display for TransactionValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonPositiveAmount(amount) => {
                write!(f, "Amount must be greater than zero (got {})", amount)
            }
            Self::MissingCategory => write!(f, "Category is required"),
            Self::UnknownType(kind) => {
                write!(f, "Unknown transaction type '{}' (use income or expense)", kind)
            }
        }
    }
}

impl std::error::Error for TransactionValidationError {}
