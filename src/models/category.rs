//! Category catalogue
//!
//! Categories are free-form labels on a transaction. The lists below are the
//! ones offered at entry time, together with the display colour used by
//! category summaries.

use super::transaction::TransactionType;

/// Colour used for any category missing from the colour table
pub const DEFAULT_CATEGORY_COLOR: &str = "#6b7280";

/// Categories offered for income entries
pub const INCOME_CATEGORIES: &[&str] = &["Salary", "Freelance", "Investment", "Gift", "Other Income"];

/// Categories offered for expense entries
pub const EXPENSE_CATEGORIES: &[&str] = &[
    "Food",
    "Transport",
    "Shopping",
    "Entertainment",
    "Bills",
    "Health",
    "Education",
    "Other",
];

const CATEGORY_COLORS: &[(&str, &str)] = &[
    ("Salary", "#22c55e"),
    ("Freelance", "#16a34a"),
    ("Investment", "#15803d"),
    ("Gift", "#86efac"),
    ("Other Income", "#4ade80"),
    ("Food", "#ef4444"),
    ("Transport", "#f97316"),
    ("Shopping", "#eab308"),
    ("Entertainment", "#8b5cf6"),
    ("Bills", "#06b6d4"),
    ("Health", "#ec4899"),
    ("Education", "#3b82f6"),
    ("Other", "#6b7280"),
];

/// Categories offered for the given transaction type
pub fn categories_for(kind: TransactionType) -> &'static [&'static str] {
    match kind {
        TransactionType::Income => INCOME_CATEGORIES,
        TransactionType::Expense => EXPENSE_CATEGORIES,
    }
}

/// Find the catalogue spelling of a category, ignoring case
pub fn canonical_category(kind: TransactionType, name: &str) -> Option<&'static str> {
    let name = name.trim();
    categories_for(kind)
        .iter()
        .copied()
        .find(|c| c.eq_ignore_ascii_case(name))
}

/// Display colour for a category
pub fn category_color(name: &str) -> &'static str {
    CATEGORY_COLORS
        .iter()
        .find(|(category, _)| *category == name)
        .map(|(_, color)| *color)
        .unwrap_or(DEFAULT_CATEGORY_COLOR)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_categories_for_type() {
        assert!(categories_for(TransactionType::Income).contains(&"Salary"));
        assert!(!categories_for(TransactionType::Income).contains(&"Food"));
        assert!(categories_for(TransactionType::Expense).contains(&"Food"));
    }

    #[test]
    fn test_canonical_category() {
        assert_eq!(
            canonical_category(TransactionType::Income, " other income "),
            Some("Other Income")
        );
        assert_eq!(canonical_category(TransactionType::Expense, "Salary"), None);
    }

    #[test]
    fn test_category_color() {
        assert_eq!(category_color("Food"), "#ef4444");
        assert_eq!(category_color("Pets"), DEFAULT_CATEGORY_COLOR);
    }
}
