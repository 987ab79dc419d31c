//! CLI commands for reports
//!
//! Balance summary, per-category totals, the monthly series and overall
//! statistics. Each report can also be printed as JSON.

use chrono::Utc;
use clap::Subcommand;
use serde::Serialize;

use crate::config::Settings;
use crate::display::{
    format_category_table, format_monthly_table, format_statistics, format_summary,
};
use crate::error::TallyResult;
use crate::services::{category_summary, monthly_series, statistics, LedgerService};
use crate::storage::Storage;

use super::transaction::parse_kind;

/// Report subcommands
#[derive(Subcommand, Debug)]
pub enum ReportCommands {
    /// Total income, total expenses and balance
    Summary,

    /// Totals per category, largest first
    Categories {
        /// Transaction type to summarise (income or expense)
        #[arg(short = 't', long = "type", default_value = "expense")]
        kind: String,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Income and expenses for the most recent months with activity
    Monthly {
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Counts, averages and today's totals
    Stats {
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
}

/// Handle report commands
pub fn handle_report_command(
    storage: &Storage,
    settings: &Settings,
    cmd: ReportCommands,
) -> TallyResult<()> {
    let ledger = LedgerService::new(storage);
    let transactions = ledger.all()?;

    match cmd {
        ReportCommands::Summary => {
            print!(
                "{}",
                format_summary(ledger.total_income()?, ledger.total_expense()?, settings)
            );
        }

        ReportCommands::Categories { kind, json } => {
            let summary = category_summary(&transactions, parse_kind(&kind)?);
            if json {
                print_json(&summary)?;
            } else {
                print!("{}", format_category_table(&summary, settings));
            }
        }

        ReportCommands::Monthly { json } => {
            let series = monthly_series(&transactions);
            if json {
                print_json(&series)?;
            } else {
                print!("{}", format_monthly_table(&series, settings));
            }
        }

        ReportCommands::Stats { json } => {
            let stats = statistics(&transactions, Utc::now().date_naive());
            if json {
                print_json(&stats)?;
            } else {
                print!("{}", format_statistics(&stats, settings));
            }
        }
    }

    Ok(())
}

fn print_json<T: Serialize>(value: &T) -> TallyResult<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
