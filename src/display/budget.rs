//! Budget progress display formatting

use tabled::settings::Style;
use tabled::{Table, Tabled};

use super::report::{format_bar, format_percentage};
use crate::config::Settings;
use crate::models::BudgetProgress;

const BAR_WIDTH: usize = 20;

#[derive(Tabled)]
struct BudgetRow {
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Period")]
    period: String,
    #[tabled(rename = "Budget")]
    budget: String,
    #[tabled(rename = "Spent")]
    spent: String,
    #[tabled(rename = "Remaining")]
    remaining: String,
    #[tabled(rename = "Progress")]
    progress: String,
}

/// Format budget progress rows; over-budget goals are flagged
pub fn format_budget_table(progress: &[BudgetProgress], settings: &Settings) -> String {
    if progress.is_empty() {
        return "No budget goals set.\n".to_string();
    }

    let rows = progress.iter().map(|p| BudgetRow {
        category: p.goal.category.clone(),
        period: p.goal.period.to_string(),
        budget: settings.format_amount(p.goal.amount),
        spent: settings.format_amount(p.spent),
        remaining: settings.format_amount(p.remaining),
        progress: format!(
            "{} {}{}",
            format_bar(p.percentage, 100.0, BAR_WIDTH),
            format_percentage(p.percentage),
            if p.is_over_budget { " OVER" } else { "" }
        ),
    });

    let mut table = Table::new(rows);
    table.with(Style::rounded());
    format!("{}\n", table)
}
