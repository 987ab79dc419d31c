//! Calculator CLI command
//!
//! Runs a key sequence through the calculator and optionally records the
//! result as a ledger entry.

use clap::Args;

use crate::calculator::Calculator;
use crate::config::Settings;
use crate::error::{TallyError, TallyResult};
use crate::models::NewTransaction;
use crate::services::LedgerService;
use crate::storage::Storage;

use super::transaction::{parse_kind, resolve_category};

/// Calculator arguments
#[derive(Args, Debug)]
pub struct CalcArgs {
    /// Keys to press, e.g. "12.5+7.5=" ('C' clears, '<' deletes)
    #[arg(allow_hyphen_values = true)]
    pub keys: String,

    /// Record the result as a transaction of this type (income or expense)
    #[arg(short, long, requires = "category")]
    pub record: Option<String>,

    /// Category for the recorded transaction
    #[arg(short, long)]
    pub category: Option<String>,

    /// Description for the recorded transaction
    #[arg(short, long)]
    pub description: Option<String>,
}

/// Handle the calc command
pub fn handle_calc_command(storage: &Storage, settings: &Settings, args: CalcArgs) -> TallyResult<()> {
    let mut calculator = Calculator::new();
    let value = calculator.run_keys(&args.keys)?;
    println!("{}", calculator.display());

    if let Some(kind) = args.record {
        let kind = parse_kind(&kind)?;
        let category = args
            .category
            .as_deref()
            .ok_or_else(|| TallyError::Validation("--category is required with --record".into()))?;

        let entry = NewTransaction::new(
            kind,
            value,
            resolve_category(kind, category)?,
            args.description.unwrap_or_default(),
        );
        let txn = LedgerService::new(storage).add(entry)?;
        println!(
            "Recorded {} of {} in {}: {}",
            txn.kind,
            settings.format_amount(txn.amount),
            txn.category,
            txn.id
        );
    }

    Ok(())
}
