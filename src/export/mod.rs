//! Export and import for Tally
//!
//! Provides ledger export in multiple formats:
//! - JSON: snapshot with timestamp and count, also accepted back as import
//! - CSV: one row per transaction (spreadsheet-compatible)
//! - YAML: the JSON snapshot in human-readable form
//!
//! Import parsers only extract the user-entered part of each record. IDs and
//! dates found in a file are ignored; the ledger assigns fresh ones.

pub mod csv;
pub mod json;
pub mod yaml;

use crate::models::NewTransaction;

pub use self::csv::{export_transactions_csv, import_from_csv, CSV_HEADERS};
pub use json::{export_json, import_from_json, LedgerExport};
pub use yaml::{export_yaml, import_from_yaml};

/// Records extracted from an import file
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedImport {
    /// Records that had the expected shape
    pub records: Vec<NewTransaction>,
    /// Records that could not be read at all
    pub malformed: usize,
}

impl ParsedImport {
    /// Total records found in the file
    pub fn total(&self) -> usize {
        self.records.len() + self.malformed
    }
}
