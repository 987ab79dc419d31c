//! Transaction CLI commands
//!
//! Implements CLI commands for recording, listing and removing ledger
//! entries, and for importing them from export files.

use std::io::Write;
use std::path::{Path, PathBuf};

use clap::{Subcommand, ValueEnum};

use crate::config::Settings;
use crate::display::{format_transaction_details, format_transaction_table};
use crate::error::{TallyError, TallyResult};
use crate::export::{import_from_csv, import_from_json, import_from_yaml, ParsedImport};
use crate::models::{canonical_category, categories_for, NewTransaction, TransactionType};
use crate::services::{LedgerService, TransactionFilter};
use crate::storage::Storage;

/// Import file formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ImportFormat {
    Json,
    Csv,
    Yaml,
}

impl ImportFormat {
    /// Guess the format from a file extension
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_lowercase();
        match ext.as_str() {
            "json" => Some(Self::Json),
            "csv" => Some(Self::Csv),
            "yaml" | "yml" => Some(Self::Yaml),
            _ => None,
        }
    }
}

/// Transaction subcommands
#[derive(Subcommand)]
pub enum TransactionCommands {
    /// Record a new transaction dated now
    Add {
        /// Transaction type (income or expense)
        kind: String,
        /// Amount (e.g., "12.50")
        amount: String,
        /// Category name
        #[arg(short, long)]
        category: String,
        /// Description, defaults to the category
        #[arg(short, long)]
        description: Option<String>,
    },
    /// List transactions, most recent first
    List {
        /// Only show this type (income or expense)
        #[arg(short = 't', long = "type")]
        kind: Option<String>,
        /// Search description and category
        #[arg(short, long)]
        search: Option<String>,
        /// Number of transactions to show
        #[arg(short, long, default_value = "20")]
        limit: usize,
    },
    /// Show transaction details
    Show {
        /// Transaction ID
        id: String,
    },
    /// Delete a transaction
    Delete {
        /// Transaction ID
        id: String,
    },
    /// Delete every transaction
    Clear {
        /// Skip confirmation
        #[arg(short, long)]
        force: bool,
    },
    /// Import transactions from an export file
    Import {
        /// Path to the file
        file: PathBuf,
        /// File format, guessed from the extension when omitted
        #[arg(short, long, value_enum)]
        format: Option<ImportFormat>,
    },
}

/// Handle a transaction command
pub fn handle_transaction_command(
    storage: &Storage,
    settings: &Settings,
    cmd: TransactionCommands,
) -> TallyResult<()> {
    let service = LedgerService::new(storage);

    match cmd {
        TransactionCommands::Add {
            kind,
            amount,
            category,
            description,
        } => {
            let kind = parse_kind(&kind)?;
            let entry = NewTransaction::new(
                kind,
                parse_amount(&amount)?,
                resolve_category(kind, &category)?,
                description.unwrap_or_default(),
            );

            let txn = service.add(entry)?;
            println!("Recorded {}: {}", txn.kind, txn.id);
            println!("  Category: {}", txn.category);
            println!("  Amount:   {}", settings.format_amount(txn.amount));
            println!("  Balance:  {}", settings.format_amount(service.balance()?));
        }

        TransactionCommands::List {
            kind,
            search,
            limit,
        } => {
            let mut filter = TransactionFilter::new().limit(limit);
            if let Some(kind) = kind {
                filter = filter.kind(parse_kind(&kind)?);
            }
            if let Some(search) = search {
                filter = filter.search(search);
            }

            let transactions = service.list(&filter)?;
            print!("{}", format_transaction_table(&transactions, settings));

            let total = service.count()?;
            if transactions.len() < total {
                println!("Showing {} of {} transactions", transactions.len(), total);
            }
        }

        TransactionCommands::Show { id } => {
            let txn = service
                .find(&id)?
                .ok_or_else(|| TallyError::transaction_not_found(&id))?;
            print!("{}", format_transaction_details(&txn, settings));
        }

        TransactionCommands::Delete { id } => match service.find(&id)? {
            Some(txn) => {
                service.delete(txn.id)?;
                println!(
                    "Deleted transaction: {} ({} {})",
                    txn.id,
                    txn.category,
                    settings.format_amount(txn.amount)
                );
            }
            None => println!("No transaction matches '{}', nothing deleted", id),
        },

        TransactionCommands::Clear { force } => {
            let count = service.count()?;
            if count == 0 {
                println!("No transactions to clear.");
                return Ok(());
            }

            let confirmed = force || confirm(&format!(
                "Delete all {} transactions? This cannot be undone. (yes/no): ",
                count
            ))?;

            let removed = service.clear(confirmed)?;
            if confirmed {
                println!("Cleared {} transactions.", removed);
            } else {
                println!("Aborted.");
            }
        }

        TransactionCommands::Import { file, format } => {
            let format = format
                .or_else(|| ImportFormat::from_path(&file))
                .ok_or_else(|| {
                    TallyError::Import(format!(
                        "Cannot tell the format of {}; pass --format",
                        file.display()
                    ))
                })?;

            let parsed = read_import(&file, format)?;
            if parsed.total() == 0 {
                println!("No transactions found in {}.", file.display());
                return Ok(());
            }

            let summary = service.import(parsed.records)?;
            println!("Imported {} transactions.", summary.imported);
            let skipped = summary.skipped + parsed.malformed;
            if skipped > 0 {
                println!("Skipped {} invalid records.", skipped);
            }
        }
    }

    Ok(())
}

fn read_import(path: &Path, format: ImportFormat) -> TallyResult<ParsedImport> {
    if !path.exists() {
        return Err(TallyError::Import(format!(
            "File not found: {}",
            path.display()
        )));
    }

    match format {
        ImportFormat::Csv => {
            let file = std::fs::File::open(path)
                .map_err(|e| TallyError::Import(format!("Failed to read file: {}", e)))?;
            import_from_csv(file)
        }
        ImportFormat::Json | ImportFormat::Yaml => {
            let content = std::fs::read_to_string(path)
                .map_err(|e| TallyError::Import(format!("Failed to read file: {}", e)))?;
            if format == ImportFormat::Json {
                import_from_json(&content)
            } else {
                import_from_yaml(&content)
            }
        }
    }
}

/// Parse a transaction type argument
pub(crate) fn parse_kind(kind: &str) -> TallyResult<TransactionType> {
    kind.parse()
        .map_err(|e: crate::models::TransactionValidationError| TallyError::Validation(e.to_string()))
}

/// Parse an amount argument
pub(crate) fn parse_amount(amount: &str) -> TallyResult<f64> {
    amount
        .trim()
        .trim_start_matches('$')
        .parse()
        .map_err(|_| TallyError::Validation(format!("Invalid amount: '{}'", amount)))
}

/// Map a category argument onto the catalogue for `kind`
pub(crate) fn resolve_category(kind: TransactionType, name: &str) -> TallyResult<&'static str> {
    canonical_category(kind, name).ok_or_else(|| {
        TallyError::Validation(format!(
            "Unknown {} category '{}' (choose from: {})",
            kind,
            name,
            categories_for(kind).join(", ")
        ))
    })
}

fn confirm(prompt: &str) -> TallyResult<bool> {
    print!("{}", prompt);
    std::io::stdout().flush()?;

    let mut answer = String::new();
    std::io::stdin().read_line(&mut answer)?;
    Ok(answer.trim().eq_ignore_ascii_case("yes"))
}
