//! CLI command for data export
//!
//! Writes the ledger to a file, or to stdout when no path is given.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

use clap::{Args, ValueEnum};

use crate::config::Settings;
use crate::error::{TallyError, TallyResult};
use crate::export::{export_json, export_transactions_csv, export_yaml};
use crate::storage::Storage;

/// Export format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    /// JSON snapshot (can be imported back)
    Json,
    /// CSV, one row per transaction
    Csv,
    /// YAML snapshot, human-readable
    Yaml,
}

/// Export arguments
#[derive(Args, Debug)]
pub struct ExportArgs {
    /// Export format
    #[arg(value_enum)]
    pub format: ExportFormat,

    /// Output file path (stdout when omitted)
    pub output: Option<PathBuf>,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,
}

/// Handle the export command
pub fn handle_export_command(
    storage: &Storage,
    settings: &Settings,
    args: ExportArgs,
) -> TallyResult<()> {
    match &args.output {
        Some(path) => {
            let file = File::create(path).map_err(|e| {
                TallyError::Export(format!("Failed to create file {}: {}", path.display(), e))
            })?;
            let mut writer = BufWriter::new(file);
            write_export(storage, settings, &args, &mut writer)?;
            writer.flush()?;

            let count = storage.transactions.count()?;
            println!("Exported {} transactions to: {}", count, path.display());
        }
        None => {
            let stdout = std::io::stdout();
            let mut writer = stdout.lock();
            write_export(storage, settings, &args, &mut writer)?;
            writeln!(writer)?;
        }
    }

    Ok(())
}

fn write_export<W: Write>(
    storage: &Storage,
    settings: &Settings,
    args: &ExportArgs,
    writer: &mut W,
) -> TallyResult<()> {
    match args.format {
        ExportFormat::Json => export_json(storage, writer, args.pretty),
        ExportFormat::Csv => export_transactions_csv(storage, writer, &settings.date_format),
        ExportFormat::Yaml => export_yaml(storage, writer),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::import_from_json;
    use crate::models::NewTransaction;
    use crate::services::LedgerService;
    use tempfile::TempDir;

    #[test]
    fn test_export_to_file() {
        let dir = TempDir::new().unwrap();
        let output = dir.path().join("ledger.json");
        let storage = Storage::in_memory();
        LedgerService::new(&storage)
            .add(NewTransaction::expense(9.99, "Shopping"))
            .unwrap();

        handle_export_command(
            &storage,
            &Settings::default(),
            ExportArgs {
                format: ExportFormat::Json,
                output: Some(output.clone()),
                pretty: true,
            },
        )
        .unwrap();

        let parsed = import_from_json(&std::fs::read_to_string(output).unwrap()).unwrap();
        assert_eq!(parsed.records, vec![NewTransaction::expense(9.99, "Shopping").with_description("Shopping")]);
    }
}
