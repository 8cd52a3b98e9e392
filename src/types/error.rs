//! Error types for the bank engine
//!
//! # Error Categories
//!
//! - **Transaction Errors** ([`TransactionError`]): frozen accounts, non-positive
//!   amounts, missing or self-referential transfer targets, insufficient funds.
//!   These never escape the engine; their message becomes the `FAILED:` status.
//! - **Engine Errors** ([`EngineError`]): processor shutdown, runtime construction,
//!   status misuse, output I/O.

use rust_decimal::Decimal;
use thiserror::Error;

use super::account::AccountId;
use super::transaction::{TransactionId, TransactionStatus};

/// Validation and lookup failures for a single transaction
///
/// The `Display` text is the human-readable part of the terminal status.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransactionError {
    /// Target account is frozen
    #[error("Account is frozen and cannot be modified.")]
    AccountFrozen { account: AccountId },

    /// Transfer source is frozen
    #[error("Source account is frozen.")]
    SourceFrozen { account: AccountId },

    /// Transfer destination is frozen
    #[error("Target account is frozen.")]
    DestinationFrozen { account: AccountId },

    /// Amount is zero or negative
    #[error("{operation} amount must be positive.")]
    NonPositiveAmount { operation: String, amount: Decimal },

    /// Balance would go negative
    #[error("Insufficient funds. Current Balance: {balance}")]
    InsufficientFunds {
        account: AccountId,
        balance: Decimal,
        requested: Decimal,
    },

    /// Addressed account absent at submission time
    #[error("Target account not found in repository.")]
    AccountNotFound { account: AccountId },

    /// Transfer destination cannot be resolved
    #[error("Target account not found.")]
    DestinationNotFound { account: AccountId },

    /// Transfer source and destination are the same account
    #[error("Source and target accounts must be different.")]
    SelfTransfer { account: AccountId },

    /// Balance arithmetic would overflow the decimal range
    #[error("Arithmetic overflow in {operation}.")]
    ArithmeticOverflow { operation: String, account: AccountId },
}

impl TransactionError {
    pub fn account_frozen(account: AccountId) -> Self {
        TransactionError::AccountFrozen { account }
    }

    pub fn source_frozen(account: AccountId) -> Self {
        TransactionError::SourceFrozen { account }
    }

    pub fn destination_frozen(account: AccountId) -> Self {
        TransactionError::DestinationFrozen { account }
    }

    pub fn non_positive_amount(operation: &str, amount: Decimal) -> Self {
        TransactionError::NonPositiveAmount {
            operation: operation.to_string(),
            amount,
        }
    }

    pub fn insufficient_funds(account: AccountId, balance: Decimal, requested: Decimal) -> Self {
        TransactionError::InsufficientFunds {
            account,
            balance,
            requested,
        }
    }

    pub fn account_not_found(account: AccountId) -> Self {
        TransactionError::AccountNotFound { account }
    }

    pub fn destination_not_found(account: AccountId) -> Self {
        TransactionError::DestinationNotFound { account }
    }

    pub fn self_transfer(account: AccountId) -> Self {
        TransactionError::SelfTransfer { account }
    }

    pub fn arithmetic_overflow(operation: &str, account: AccountId) -> Self {
        TransactionError::ArithmeticOverflow {
            operation: operation.to_string(),
            account,
        }
    }
}

/// Faults outside the per-transaction outcome
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    /// Submission after `shutdown()`; the transaction was not accepted
    #[error("Processor is shut down; transaction {transaction} was not accepted")]
    ProcessorShutDown { transaction: TransactionId },

    /// A terminal status was already recorded
    #[error("Transaction {transaction} already finalized with status '{status}'")]
    StatusAlreadyFinal {
        transaction: TransactionId,
        status: String,
    },

    /// Attempt to finalize with `Pending`
    #[error("Transaction {transaction} cannot be finalized with a non-terminal status")]
    StatusNotTerminal { transaction: TransactionId },

    #[error("Opening balance {balance} is negative")]
    NegativeOpeningBalance { balance: Decimal },

    /// Worker runtime could not be created
    #[error("Failed to start worker pool: {message}")]
    RuntimeBuild { message: String },

    /// Not every submitted transaction completed before the deadline
    #[error("Timed out with {completed} of {expected} transactions completed")]
    Timeout { expected: usize, completed: usize },

    #[error("I/O error: {message}")]
    Io { message: String },

    #[error("CSV write error: {message}")]
    Csv { message: String },
}

impl From<std::io::Error> for EngineError {
    fn from(error: std::io::Error) -> Self {
        EngineError::Io {
            message: error.to_string(),
        }
    }
}

impl From<csv::Error> for EngineError {
    fn from(error: csv::Error) -> Self {
        EngineError::Csv {
            message: error.to_string(),
        }
    }
}

impl EngineError {
    pub fn processor_shut_down(transaction: TransactionId) -> Self {
        EngineError::ProcessorShutDown { transaction }
    }

    pub fn status_already_final(transaction: TransactionId, status: &TransactionStatus) -> Self {
        EngineError::StatusAlreadyFinal {
            transaction,
            status: status.to_string(),
        }
    }

    pub fn negative_opening_balance(balance: Decimal) -> Self {
        EngineError::NegativeOpeningBalance { balance }
    }

    pub fn runtime_build(error: std::io::Error) -> Self {
        EngineError::RuntimeBuild {
            message: error.to_string(),
        }
    }
}
