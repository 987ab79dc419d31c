//! Budget CLI commands
//!
//! Implements CLI commands for budget goals: one spending limit per expense
//! category, measured against everything spent in that category.

use clap::Subcommand;

use crate::config::Settings;
use crate::display::format_budget_table;
use crate::error::{TallyError, TallyResult};
use crate::models::{BudgetPeriod, TransactionType};
use crate::services::{category_spending, BudgetService, LedgerService};
use crate::storage::Storage;

use super::transaction::{parse_amount, resolve_category};

/// Budget subcommands
#[derive(Subcommand)]
pub enum BudgetCommands {
    /// Set a spending limit for an expense category
    Add {
        /// Category name
        category: String,
        /// Limit (e.g., "300" or "300.00")
        amount: String,
        /// Budget period (weekly, monthly, yearly)
        #[arg(short, long)]
        period: Option<String>,
    },
    /// Change an existing goal
    Update {
        /// Goal ID or category name
        goal: String,
        /// New limit
        #[arg(short, long)]
        amount: Option<String>,
        /// New period
        #[arg(short, long)]
        period: Option<String>,
    },
    /// Remove a goal
    Delete {
        /// Goal ID or category name
        goal: String,
    },
    /// List goals
    List,
    /// Show spending against each goal
    Status,
}

/// Handle a budget command
pub fn handle_budget_command(
    storage: &Storage,
    settings: &Settings,
    cmd: BudgetCommands,
) -> TallyResult<()> {
    let service = BudgetService::new(storage);

    match cmd {
        BudgetCommands::Add {
            category,
            amount,
            period,
        } => {
            let category = resolve_category(TransactionType::Expense, &category)?;
            let period = match period {
                Some(p) => parse_period(&p)?,
                None => settings.default_budget_period,
            };

            let goal = service.add_goal(category, parse_amount(&amount)?, period)?;
            println!("Created budget goal: {}", goal.id);
            println!(
                "  {}: {} {}",
                goal.category,
                settings.format_amount(goal.amount),
                goal.period
            );
        }

        BudgetCommands::Update {
            goal,
            amount,
            period,
        } => {
            let mut existing = service
                .find(&goal)?
                .ok_or_else(|| TallyError::goal_not_found(&goal))?;

            if amount.is_none() && period.is_none() {
                println!("Nothing to change. Pass --amount and/or --period.");
                return Ok(());
            }
            if let Some(amount) = amount {
                existing.amount = parse_amount(&amount)?;
            }
            if let Some(period) = period {
                existing.period = parse_period(&period)?;
            }

            let updated = service.replace_goal(existing)?;
            println!(
                "Updated budget goal for {}: {} {}",
                updated.category,
                settings.format_amount(updated.amount),
                updated.period
            );
        }

        BudgetCommands::Delete { goal } => match service.find(&goal)? {
            Some(found) => {
                service.delete_goal(found.id)?;
                println!("Deleted budget goal for {}", found.category);
            }
            None => println!("No budget goal matches '{}', nothing deleted", goal),
        },

        BudgetCommands::List => {
            let goals = service.list()?;
            if goals.is_empty() {
                println!("No budget goals set.");
                println!("Create one with: tally budget add <category> <amount>");
                return Ok(());
            }

            for goal in &goals {
                println!(
                    "  {}  {:<16} {:>12} {}",
                    goal.id,
                    goal.category,
                    settings.format_amount(goal.amount),
                    goal.period
                );
            }
            println!();
            println!(
                "Total budgeted: {}",
                settings.format_amount(service.total_budgeted()?)
            );
        }

        BudgetCommands::Status => {
            let transactions = LedgerService::new(storage).all()?;
            let progress = service.overview(&category_spending(&transactions))?;

            print!("{}", format_budget_table(&progress, settings));

            let over: Vec<_> = progress
                .iter()
                .filter(|p| p.is_over_budget)
                .map(|p| p.goal.category.as_str())
                .collect();
            if !over.is_empty() {
                println!("Over budget: {}", over.join(", "));
            }
        }
    }

    Ok(())
}

fn parse_period(period: &str) -> TallyResult<BudgetPeriod> {
    period.parse().map_err(TallyError::Validation)
}
