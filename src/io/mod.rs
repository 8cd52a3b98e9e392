//! I/O module
//!
//! Handles CSV output.
//!
//! # Components
//!
//! - `csv_format` - CSV serialization of account snapshots and completed transactions

pub mod csv_format;

pub use csv_format::{write_accounts_csv, write_transactions_csv, TransactionRow};
