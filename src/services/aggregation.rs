//! Ledger aggregation
//!
//! Pure functions turning a flat transaction list into category summaries,
//! a monthly income/expense series and overall statistics. Sums are plain
//! floating point additions; rounding is left to display code.

use std::collections::{BTreeMap, HashMap};

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use crate::models::{category_color, Transaction, TransactionType};

/// Number of most recent months returned by [`monthly_series`]
pub const MONTHLY_WINDOW: usize = 6;

/// Total for one category and transaction type
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategorySummary {
    pub name: String,
    pub value: f64,
    /// Display colour from the category table
    pub color: String,
}

/// Income and expense totals for one calendar month
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlyBucket {
    /// Sortable `YYYY-MM` key
    pub key: String,
    /// Human label such as `Jan 2025`
    pub label: String,
    pub income: f64,
    pub expense: f64,
    /// Number of transactions in the month (always at least one)
    pub transaction_count: usize,
}

/// Overall ledger statistics
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Statistics {
    pub total_transactions: usize,
    pub income_count: usize,
    pub expense_count: usize,
    /// (income + expense) / total_transactions
    pub average_transaction: f64,
    pub average_income: f64,
    pub average_expense: f64,
    /// Category used by the most transactions, with its count
    pub top_category: Option<(String, usize)>,
    pub today_income: f64,
    pub today_expense: f64,
}

/// Sum amounts per category for one transaction type
///
/// Sorted by descending value; ties keep first-seen order.
pub fn category_summary(transactions: &[Transaction], kind: TransactionType) -> Vec<CategorySummary> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut summaries: Vec<CategorySummary> = Vec::new();

    for txn in transactions.iter().filter(|t| t.kind == kind) {
        match index.get(txn.category.as_str()) {
            Some(&i) => summaries[i].value += txn.amount,
            None => {
                index.insert(txn.category.as_str(), summaries.len());
                summaries.push(CategorySummary {
                    name: txn.category.clone(),
                    value: txn.amount,
                    color: category_color(&txn.category).to_string(),
                });
            }
        }
    }

    // Stable sort, so equal values stay in first-seen order
    summaries.sort_by(|a, b| b.value.total_cmp(&a.value));
    summaries
}

/// Bucket transactions by calendar month of their date
///
/// Returns at most [`MONTHLY_WINDOW`] buckets, the most recent months that
/// contain transactions, in ascending order. Empty months are absent.
pub fn monthly_series(transactions: &[Transaction]) -> Vec<MonthlyBucket> {
    let mut months: BTreeMap<(i32, u32), MonthlyBucket> = BTreeMap::new();

    for txn in transactions {
        let (year, month) = (txn.date.year(), txn.date.month());
        let bucket = months.entry((year, month)).or_insert_with(|| MonthlyBucket {
            key: format!("{:04}-{:02}", year, month),
            label: txn.date.format("%b %Y").to_string(),
            income: 0.0,
            expense: 0.0,
            transaction_count: 0,
        });

        match txn.kind {
            TransactionType::Income => bucket.income += txn.amount,
            TransactionType::Expense => bucket.expense += txn.amount,
        }
        bucket.transaction_count += 1;
    }

    let skip = months.len().saturating_sub(MONTHLY_WINDOW);
    months.into_values().skip(skip).collect()
}

/// Expense totals per category, the spend figures fed to budget progress
pub fn category_spending(transactions: &[Transaction]) -> BTreeMap<String, f64> {
    let mut spending = BTreeMap::new();

    for txn in transactions.iter().filter(|t| t.is_expense()) {
        *spending.entry(txn.category.clone()).or_insert(0.0) += txn.amount;
    }

    spending
}

/// Compute ledger statistics; `today` selects the transactions counted as today's
pub fn statistics(transactions: &[Transaction], today: NaiveDate) -> Statistics {
    let mut income = 0.0;
    let mut expense = 0.0;
    let mut income_count = 0;
    let mut expense_count = 0;
    let mut today_income = 0.0;
    let mut today_expense = 0.0;
    let mut category_counts: Vec<(String, usize)> = Vec::new();

    for txn in transactions {
        let is_today = txn.date.date_naive() == today;

        match txn.kind {
            TransactionType::Income => {
                income += txn.amount;
                income_count += 1;
                if is_today {
                    today_income += txn.amount;
                }
            }
            TransactionType::Expense => {
                expense += txn.amount;
                expense_count += 1;
                if is_today {
                    today_expense += txn.amount;
                }
            }
        }

        match category_counts.iter_mut().find(|(name, _)| *name == txn.category) {
            Some((_, count)) => *count += 1,
            None => category_counts.push((txn.category.clone(), 1)),
        }
    }

    category_counts.sort_by(|a, b| b.1.cmp(&a.1));

    let total_transactions = transactions.len();

    Statistics {
        total_transactions,
        income_count,
        expense_count,
        average_transaction: average(income + expense, total_transactions),
        average_income: average(income, income_count),
        average_expense: average(expense, expense_count),
        top_category: category_counts.into_iter().next(),
        today_income,
        today_expense,
    }
}

fn average(total: f64, count: usize) -> f64 {
    if count == 0 {
        0.0
    } else {
        total / count as f64
    }
}
