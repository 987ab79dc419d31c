//! Report formatting for terminal output
//!
//! Tables for the aggregation results plus small formatting helpers.

use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::config::Settings;
use crate::services::{CategorySummary, MonthlyBucket, Statistics};

const BAR_WIDTH: usize = 20;

/// Format a percentage with appropriate precision
pub fn format_percentage(pct: f64) -> String {
    if pct < 0.1 && pct > 0.0 {
        format!("{:.2}%", pct)
    } else if pct < 10.0 {
        format!("{:.1}%", pct)
    } else {
        format!("{:.0}%", pct)
    }
}

/// Create a simple bar chart representation
pub fn format_bar(value: f64, max_value: f64, width: usize) -> String {
    if max_value <= 0.0 || value <= 0.0 {
        return "░".repeat(width);
    }

    let filled = ((value / max_value) * width as f64).round() as usize;
    let filled = filled.min(width);

    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

/// Format the income / expense / balance summary
pub fn format_summary(income: f64, expense: f64, settings: &Settings) -> String {
    let balance = income - expense;
    let mut output = String::new();

    output.push_str(&format!("Income:   {:>14}\n", settings.format_amount(income)));
    output.push_str(&format!("Expenses: {:>14}\n", settings.format_amount(expense)));
    output.push_str(&"─".repeat(24));
    output.push('\n');
    output.push_str(&format!("Balance:  {:>14}\n", settings.format_amount(balance)));

    output
}

#[derive(Tabled)]
struct CategoryRow {
    #[tabled(rename = "Category")]
    name: String,
    #[tabled(rename = "Total")]
    total: String,
    #[tabled(rename = "Share")]
    share: String,
    #[tabled(rename = "")]
    bar: String,
    #[tabled(rename = "Colour")]
    color: String,
}

/// Format per-category totals with each category's share of the whole
pub fn format_category_table(summary: &[CategorySummary], settings: &Settings) -> String {
    if summary.is_empty() {
        return "No transactions to summarise.\n".to_string();
    }

    let total: f64 = summary.iter().map(|s| s.value).sum();
    let rows = summary.iter().map(|s| {
        let share = if total > 0.0 { s.value / total * 100.0 } else { 0.0 };
        CategoryRow {
            name: s.name.clone(),
            total: settings.format_amount(s.value),
            share: format_percentage(share),
            bar: format_bar(share, 100.0, BAR_WIDTH),
            color: s.color.clone(),
        }
    });

    let mut table = Table::new(rows);
    table.with(Style::rounded());
    format!("{}\n", table)
}

#[derive(Tabled)]
struct MonthRow {
    #[tabled(rename = "Month")]
    label: String,
    #[tabled(rename = "Income")]
    income: String,
    #[tabled(rename = "Expenses")]
    expense: String,
    #[tabled(rename = "Net")]
    net: String,
    #[tabled(rename = "Count")]
    count: usize,
}

/// Format the monthly income/expense series
pub fn format_monthly_table(series: &[MonthlyBucket], settings: &Settings) -> String {
    if series.is_empty() {
        return "No transactions to summarise.\n".to_string();
    }

    let rows = series.iter().map(|b| MonthRow {
        label: b.label.clone(),
        income: settings.format_amount(b.income),
        expense: settings.format_amount(b.expense),
        net: settings.format_amount(b.income - b.expense),
        count: b.transaction_count,
    });

    let mut table = Table::new(rows);
    table.with(Style::rounded());
    format!("{}\n", table)
}

/// Format overall statistics
pub fn format_statistics(stats: &Statistics, settings: &Settings) -> String {
    let mut output = String::new();

    output.push_str(&format!(
        "Transactions:        {} ({} income, {} expense)\n",
        stats.total_transactions, stats.income_count, stats.expense_count
    ));
    output.push_str(&format!(
        "Average transaction: {}\n",
        settings.format_amount(stats.average_transaction)
    ));
    output.push_str(&format!(
        "Average income:      {}\n",
        settings.format_amount(stats.average_income)
    ));
    output.push_str(&format!(
        "Average expense:     {}\n",
        settings.format_amount(stats.average_expense)
    ));
    match &stats.top_category {
        Some((name, count)) => output.push_str(&format!(
            "Top category:        {} ({} transactions)\n",
            name, count
        )),
        None => output.push_str("Top category:        -\n"),
    }
    output.push_str(&format!(
        "Today:               +{} / -{}\n",
        settings.format_amount(stats.today_income),
        settings.format_amount(stats.today_expense)
    ));

    output
}
