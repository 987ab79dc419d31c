//! CSV export and import
//!
//! One row per transaction under the header
//! `Date,Type,Category,Description,Amount`. Amounts are written at full
//! precision so an export reads back unchanged; the date column is
//! informational and ignored on import.

use std::io::{Read, Write};

use serde::Deserialize;

use super::json::collect_records;
use super::ParsedImport;
use crate::config::settings::format_date;
use crate::error::{TallyError, TallyResult};
use crate::models::{NewTransaction, TransactionType};
use crate::storage::Storage;

/// Column headers, in order
pub const CSV_HEADERS: [&str; 5] = ["Date", "Type", "Category", "Description", "Amount"];

/// Export all transactions to CSV, most recent first
pub fn export_transactions_csv<W: Write>(
    storage: &Storage,
    writer: W,
    date_format: &str,
) -> TallyResult<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer
        .write_record(CSV_HEADERS)
        .map_err(|e| TallyError::Export(e.to_string()))?;

    for txn in storage.transactions.get_all()? {
        csv_writer
            .write_record([
                format_date(&txn.date, date_format),
                txn.kind.to_string(),
                txn.category.clone(),
                txn.description.clone(),
                txn.amount.to_string(),
            ])
            .map_err(|e| TallyError::Export(e.to_string()))?;
    }

    csv_writer
        .flush()
        .map_err(|e| TallyError::Export(e.to_string()))?;
    Ok(())
}

#[derive(Debug, Deserialize)]
struct CsvRow {
    #[serde(rename = "Type")]
    kind: TransactionType,
    #[serde(rename = "Category")]
    category: String,
    #[serde(rename = "Description", default)]
    description: String,
    #[serde(rename = "Amount")]
    amount: f64,
}

impl From<CsvRow> for NewTransaction {
    fn from(row: CsvRow) -> Self {
        NewTransaction::new(row.kind, row.amount, row.category, row.description)
    }
}

/// Read transaction records from CSV with the export header
pub fn import_from_csv<R: Read>(reader: R) -> TallyResult<ParsedImport> {
    let mut csv_reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);

    let headers = csv_reader
        .headers()
        .map_err(|e| TallyError::Import(e.to_string()))?;
    let missing: Vec<_> = CSV_HEADERS[1..]
        .iter()
        .filter(|h| !headers.iter().any(|c| c == **h))
        .collect();
    if !missing.is_empty() {
        return Err(TallyError::Import(format!(
            "Invalid file format: missing column(s) {:?}",
            missing
        )));
    }

    Ok(collect_records(
        csv_reader
            .deserialize::<CsvRow>()
            .map(|row| row.map(NewTransaction::from)),
    ))
}
