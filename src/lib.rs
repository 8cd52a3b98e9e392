//! Rust Bank Engine Library
//! # Overview
//!
//! This library provides an in-memory banking engine that applies deposits,
//! withdrawals, freezes and transfers to accounts under concurrent access.
//! Balances never go negative, frozen accounts reject mutation, and transfers
//! are atomic with respect to every other operation on either account.
//!
//! # Architecture
//!
//! The system is organized into several key components:
//!
//! - [`types`] - Core data types (Account, Transaction, statuses, errors)
//! - [`strategy`] - One execution algorithm per operation kind
//! - [`core`] - Concurrent execution components:
//!   - [`core::account_store`] - Concurrent account store
//!   - [`core::locking`] - Ordered acquisition of two account locks
//!   - [`core::processor`] - Asynchronous dispatch to a worker pool
//!   - [`core::notification`] - Completion fan-out to observers
//!   - [`core::summary`] - Aggregate report over completed transactions
//! - [`io`] - CSV export of accounts and completed transactions
//! - [`cli`] - CLI arguments parsing
//! - [`driver`] - Built-in workloads run by the binary
//!
//! # Transaction Types
//!
//! - **Deposit**: Credit funds to an unfrozen account
//! - **Withdrawal**: Debit funds from an unfrozen account (requires sufficient balance)
//! - **Freeze**: Permanently block further balance changes on an account
//! - **Transfer**: Move funds between two distinct unfrozen accounts atomically
//!
//! # Completion
//!
//! Every submitted transaction ends with exactly one terminal status beginning
//! with `SUCCESS:`, `FAILED:` or `ERROR:`, delivered once to every registered
//! listener.

// Module declarations
pub mod cli;
pub mod core;
pub mod driver;
pub mod io;
pub mod strategy;
pub mod types;

pub use core::{
    AccountRepository, AccountStore, ProcessorConfig, StatusNotifier, TransactionJournal,
    TransactionListener, TransactionProcessor, TransactionSummary,
};
pub use io::{write_accounts_csv, write_transactions_csv};
pub use strategy::Strategy;
pub use types::{
    Account, AccountId, AccountSnapshot, EngineError, Operation, Transaction, TransactionError,
    TransactionId, TransactionKind, TransactionStatus,
};
