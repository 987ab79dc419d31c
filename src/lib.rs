//! Tally - personal finance ledger
//!
//! This library provides the core of the Tally command-line ledger: a store
//! of income and expense transactions, aggregations over it, per-category
//! budget goals and a small chained-arithmetic calculator.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Data directory and user settings
//! - `error`: Custom error types
//! - `logging`: Tracing subscriber setup
//! - `models`: Transactions, budget goals and the category catalogue
//! - `storage`: Persistence port and repositories
//! - `services`: Ledger, aggregation and budget logic
//! - `calculator`: Keypad calculator state machine
//! - `export`: JSON, CSV and YAML export and import
//! - `display`: Terminal tables
//! - `cli`: Command handlers
//!
//! # Example
//!
//! ```rust
//! use tally::models::NewTransaction;
//! use tally::services::LedgerService;
//! use tally::storage::Storage;
//!
//! let storage = Storage::in_memory();
//! let ledger = LedgerService::new(&storage);
//! ledger.add(NewTransaction::income(100.0, "Salary")).unwrap();
//! ledger.add(NewTransaction::expense(30.0, "Food")).unwrap();
//! assert_eq!(ledger.balance().unwrap(), 70.0);
//! ```

pub mod calculator;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod logging;
pub mod models;
pub mod services;
pub mod storage;

pub use error::{TallyError, TallyResult};
