//! Transaction-related types for the bank engine
//!
//! A [`Transaction`] is an immutable request (who, what, how much) plus a
//! status that moves from [`TransactionStatus::Pending`] to a terminal
//! outcome exactly once.

use std::fmt;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

use super::account::AccountId;
use super::error::{EngineError, TransactionError};

/// Transaction identifier, assigned at creation
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TransactionId(Uuid);

impl TransactionId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    /// First four characters, as shown in the completion log
    pub fn short(&self) -> String {
        self.0.to_string().chars().take(4).collect()
    }
}

impl fmt::Display for TransactionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// The four operation kinds the engine supports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransactionKind {
    /// Credit funds to an account
    Deposit,

    /// Debit funds from an account; requires a sufficient balance
    Withdrawal,

    /// Irreversibly block further balance changes on an account
    Freeze,

    /// Move funds from one account to another atomically
    Transfer,
}

impl TransactionKind {
    /// Human-readable label used inside status messages
    pub fn label(&self) -> &'static str {
        match self {
            TransactionKind::Deposit => "Deposit",
            TransactionKind::Withdrawal => "Withdrawal",
            TransactionKind::Freeze => "Freeze",
            TransactionKind::Transfer => "Transfer",
        }
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            TransactionKind::Deposit => "DEPOSIT",
            TransactionKind::Withdrawal => "WITHDRAWAL",
            TransactionKind::Freeze => "FREEZE",
            TransactionKind::Transfer => "TRANSFER",
        })
    }
}

/// Requested operation together with its payload
///
/// Transfers carry their destination in a typed field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    Deposit { amount: Decimal },
    Withdrawal { amount: Decimal },
    Freeze,
    Transfer { amount: Decimal, destination: AccountId },
}

impl Operation {
    pub fn kind(&self) -> TransactionKind {
        match self {
            Operation::Deposit { .. } => TransactionKind::Deposit,
            Operation::Withdrawal { .. } => TransactionKind::Withdrawal,
            Operation::Freeze => TransactionKind::Freeze,
            Operation::Transfer { .. } => TransactionKind::Transfer,
        }
    }

    /// Requested amount; zero for freezes
    pub fn amount(&self) -> Decimal {
        match self {
            Operation::Deposit { amount }
            | Operation::Withdrawal { amount }
            | Operation::Transfer { amount, .. } => *amount,
            Operation::Freeze => Decimal::ZERO,
        }
    }

    pub fn destination(&self) -> Option<AccountId> {
        match self {
            Operation::Transfer { destination, .. } => Some(*destination),
            _ => None,
        }
    }
}

/// Lifecycle status of a transaction
///
/// Rendered with a fixed outcome marker: `SUCCESS:`, `FAILED:` or `ERROR:`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum TransactionStatus {
    #[default]
    Pending,
    Succeeded(String),
    /// Validation or lookup failure
    Failed(String),
    /// Unexpected fault caught at the worker boundary
    Errored(String),
}

impl TransactionStatus {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, TransactionStatus::Pending)
    }

    pub fn is_success(&self) -> bool {
        matches!(self, TransactionStatus::Succeeded(_))
    }

    /// True for both validation failures and system errors
    pub fn is_failure(&self) -> bool {
        matches!(
            self,
            TransactionStatus::Failed(_) | TransactionStatus::Errored(_)
        )
    }
}

impl fmt::Display for TransactionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransactionStatus::Pending => f.write_str("Pending"),
            TransactionStatus::Succeeded(message) => write!(f, "SUCCESS: {}", message),
            TransactionStatus::Failed(message) => write!(f, "FAILED: {}", message),
            TransactionStatus::Errored(message) => write!(f, "ERROR: {}", message),
        }
    }
}

impl From<TransactionError> for TransactionStatus {
    fn from(error: TransactionError) -> Self {
        TransactionStatus::Failed(error.to_string())
    }
}

/// A single request against the engine and, once finished, its record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transaction {
    id: TransactionId,
    timestamp: DateTime<Utc>,
    account: AccountId,
    operation: Operation,
    status: TransactionStatus,
}

impl Transaction {
    /// Create a pending transaction addressed to `account`
    pub fn new(account: AccountId, operation: Operation) -> Self {
        Self {
            id: TransactionId::generate(),
            timestamp: Utc::now(),
            account,
            operation,
            status: TransactionStatus::Pending,
        }
    }

    pub fn deposit(account: AccountId, amount: Decimal) -> Self {
        Self::new(account, Operation::Deposit { amount })
    }

    pub fn withdrawal(account: AccountId, amount: Decimal) -> Self {
        Self::new(account, Operation::Withdrawal { amount })
    }

    pub fn freeze(account: AccountId) -> Self {
        Self::new(account, Operation::Freeze)
    }

    pub fn transfer(source: AccountId, destination: AccountId, amount: Decimal) -> Self {
        Self::new(
            source,
            Operation::Transfer {
                amount,
                destination,
            },
        )
    }

    pub fn id(&self) -> TransactionId {
        self.id
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    /// The account the operation is addressed to (the source, for transfers)
    pub fn account(&self) -> AccountId {
        self.account
    }

    pub fn operation(&self) -> &Operation {
        &self.operation
    }

    pub fn kind(&self) -> TransactionKind {
        self.operation.kind()
    }

    pub fn amount(&self) -> Decimal {
        self.operation.amount()
    }

    pub fn status(&self) -> &TransactionStatus {
        &self.status
    }

    /// Set the terminal status
    ///
    /// # Errors
    ///
    /// * [`EngineError::StatusNotTerminal`] if `status` is `Pending`
    /// * [`EngineError::StatusAlreadyFinal`] if a terminal status is already set;
    ///   the existing status is kept
    pub fn finalize(&mut self, status: TransactionStatus) -> Result<(), EngineError> {
        if !status.is_terminal() {
            return Err(EngineError::StatusNotTerminal {
                transaction: self.id,
            });
        }
        if self.status.is_terminal() {
            return Err(EngineError::status_already_final(self.id, &self.status));
        }
        self.status = status;
        Ok(())
    }
}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} - {} | Action: {} | Amount: {} | Status: {}",
            self.id.short(),
            self.timestamp.format("%H:%M:%S"),
            self.kind(),
            self.amount(),
            self.status
        )
    }
}
