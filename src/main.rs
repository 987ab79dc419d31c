use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::debug;

use tally::cli::{
    handle_budget_command, handle_calc_command, handle_export_command, handle_report_command,
    handle_transaction_command, BudgetCommands, CalcArgs, ExportArgs, ReportCommands,
    TransactionCommands,
};
use tally::config::{paths::DATA_DIR_ENV_VAR, Settings, TallyPaths};
use tally::logging::{init_tracing, LOG_ENV_VAR};
use tally::services::LedgerService;
use tally::storage::Storage;

#[derive(Parser)]
#[command(
    name = "tally",
    version,
    about = "Personal income and expense ledger",
    long_about = "Tally records income and expenses, summarises them by category \
                  and month, and tracks spending against per-category budget goals."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Transaction management commands
    #[command(subcommand, alias = "txn")]
    Transaction(TransactionCommands),

    /// Budget goal commands
    #[command(subcommand)]
    Budget(BudgetCommands),

    /// Ledger reports
    #[command(subcommand)]
    Report(ReportCommands),

    /// Evaluate a calculator key sequence
    Calc(CalcArgs),

    /// Export the ledger
    Export(ExportArgs),

    /// Show current configuration and paths
    Config,
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    // Initialize paths and settings
    let paths = TallyPaths::new()?;
    let settings = Settings::load_or_create(&paths)?;
    if !paths.settings_file().exists() {
        settings.save(&paths)?;
    }

    // Initialize storage
    let storage = Storage::open(&paths)?;
    storage.load_all()?;
    debug!(data_dir = %paths.data_dir().display(), "Storage loaded");

    match cli.command {
        Some(Commands::Transaction(cmd)) => {
            handle_transaction_command(&storage, &settings, cmd)?;
        }
        Some(Commands::Budget(cmd)) => {
            handle_budget_command(&storage, &settings, cmd)?;
        }
        Some(Commands::Report(cmd)) => {
            handle_report_command(&storage, &settings, cmd)?;
        }
        Some(Commands::Calc(args)) => {
            handle_calc_command(&storage, &settings, args)?;
        }
        Some(Commands::Export(args)) => {
            handle_export_command(&storage, &settings, args)?;
        }
        Some(Commands::Config) => {
            println!("Tally Configuration");
            println!("===================");
            println!("Base directory: {}", paths.base_dir().display());
            println!("Data directory: {}", paths.data_dir().display());
            println!("Settings file:  {}", paths.settings_file().display());
            println!();
            println!("Settings:");
            println!("  Currency symbol:       {}", settings.currency_symbol);
            println!("  Date format:           {}", settings.date_format);
            println!("  Default budget period: {}", settings.default_budget_period);
            println!();
            println!("Environment:");
            println!("  {} overrides the base directory", DATA_DIR_ENV_VAR);
            println!("  {} sets the log filter", LOG_ENV_VAR);
        }
        None => {
            let ledger = LedgerService::new(&storage);
            println!("Tally - personal income and expense ledger");
            println!();
            println!(
                "{} transactions, balance {}",
                ledger.count()?,
                settings.format_amount(ledger.balance()?)
            );
            println!();
            println!("Run 'tally --help' for usage information.");
        }
    }

    Ok(())
}
