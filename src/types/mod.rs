//! Types module
//!
//! Contains core data structures used throughout the engine.
//! - `account`: accounts, identifiers and snapshots
//! - `transaction`: transactions, operations and statuses
//! - `error`: error types for the engine

pub mod account;
pub mod error;
pub mod transaction;

pub use account::{Account, AccountId, AccountSnapshot, AccountState};
pub use error::{EngineError, TransactionError};
pub use transaction::{
    Operation, Transaction, TransactionId, TransactionKind, TransactionStatus,
};
