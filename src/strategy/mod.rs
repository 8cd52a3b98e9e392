//! Operation strategies
//!
//! One algorithm per [`TransactionKind`], each in its own module. Every
//! strategy validates its preconditions, takes the account lock(s) it needs,
//! mutates state and reports either a success message or a
//! [`TransactionError`](crate::types::TransactionError).
//!
//! [`Strategy`] is the closed dispatch over the four kinds. It is chosen once
//! per transaction by the processor and carried in the work item handed to a
//! worker.

use crate::core::traits::AccountRepository;
use crate::types::{Account, Operation, Transaction, TransactionKind, TransactionStatus};

pub mod deposit;
pub mod freeze;
pub mod transfer;
pub mod withdrawal;

/// Strategy selected for a transaction kind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    Deposit,
    Withdrawal,
    Freeze,
    Transfer,
}

impl Strategy {
    /// Select the strategy bound to `kind`
    pub fn for_kind(kind: TransactionKind) -> Self {
        match kind {
            TransactionKind::Deposit => Strategy::Deposit,
            TransactionKind::Withdrawal => Strategy::Withdrawal,
            TransactionKind::Freeze => Strategy::Freeze,
            TransactionKind::Transfer => Strategy::Transfer,
        }
    }

    pub fn kind(&self) -> TransactionKind {
        match self {
            Strategy::Deposit => TransactionKind::Deposit,
            Strategy::Withdrawal => TransactionKind::Withdrawal,
            Strategy::Freeze => TransactionKind::Freeze,
            Strategy::Transfer => TransactionKind::Transfer,
        }
    }

    /// Run this strategy against `account` and finalize `transaction`
    ///
    /// Returns `true` on success. The transaction's status is terminal on every
    /// return path; a strategy paired with an operation of another kind is a
    /// wiring fault and is recorded as an `ERROR:` status.
    pub fn execute<R>(self, account: &Account, transaction: &mut Transaction, store: &R) -> bool
    where
        R: AccountRepository + ?Sized,
    {
        let operation = transaction.operation().clone();
        let outcome = match (self, &operation) {
            (Strategy::Deposit, Operation::Deposit { amount }) => deposit::apply(account, *amount),
            (Strategy::Withdrawal, Operation::Withdrawal { amount }) => {
                withdrawal::apply(account, *amount)
            }
            (Strategy::Freeze, Operation::Freeze) => freeze::apply(account),
            (
                Strategy::Transfer,
                Operation::Transfer {
                    amount,
                    destination,
                },
            ) => transfer::apply(account, *destination, *amount, store),
            (strategy, operation) => {
                tracing::error!(
                    transaction = %transaction.id(),
                    strategy = %strategy.kind(),
                    operation = %operation.kind(),
                    "strategy does not match operation kind"
                );
                let status = TransactionStatus::Errored(format!(
                    "No strategy configured for {} with {} strategy.",
                    operation.kind(),
                    strategy.kind()
                ));
                finalize(transaction, status);
                return false;
            }
        };

        let status = match outcome {
            Ok(message) => TransactionStatus::Succeeded(message),
            Err(error) => TransactionStatus::from(error),
        };
        let succeeded = status.is_success();
        finalize(transaction, status);
        succeeded
    }
}

fn finalize(transaction: &mut Transaction, status: TransactionStatus) {
    if let Err(error) = transaction.finalize(status) {
        tracing::warn!(%error, "ignoring second terminal status");
    }
}
