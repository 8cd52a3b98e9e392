//! Account-related types for the bank engine
//!
//! An [`Account`] owns its mutable state behind a dedicated mutex. The balance
//! and frozen flag can only be reached through [`Account::lock`], so every
//! read-then-write on an account happens while its lock is held.

use std::fmt;
use std::str::FromStr;

use parking_lot::{Mutex, MutexGuard};
use rust_decimal::Decimal;
use uuid::Uuid;

use super::error::EngineError;

/// Account identifier
///
/// Opaque and globally unique. The derived `Ord` is the total order used to
/// decide lock acquisition order whenever two accounts are locked together.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AccountId(Uuid);

impl AccountId {
    /// Generate a fresh random identifier
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// First eight characters of the hyphenated form, used in status messages
    pub fn short(&self) -> String {
        self.0.to_string().chars().take(8).collect()
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl FromStr for AccountId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

/// Mutable part of an account, reachable only through the account lock
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountState {
    /// Current balance. Never negative after a completed operation.
    pub balance: Decimal,

    /// Once set, deposits, withdrawals and transfers are rejected.
    pub frozen: bool,
}

/// A bank account: immutable identity plus lock-protected state
#[derive(Debug)]
pub struct Account {
    id: AccountId,
    state: Mutex<AccountState>,
}

impl Account {
    /// Create an account with a fresh identifier and a zero balance
    pub fn new() -> Self {
        Self::with_id(AccountId::generate())
    }

    /// Create an account with a known identifier and a zero balance
    pub fn with_id(id: AccountId) -> Self {
        Self {
            id,
            state: Mutex::new(AccountState {
                balance: Decimal::ZERO,
                frozen: false,
            }),
        }
    }

    /// Create a seeded account
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::NegativeOpeningBalance`] if `balance` is below zero.
    pub fn with_balance(balance: Decimal) -> Result<Self, EngineError> {
        if balance < Decimal::ZERO {
            return Err(EngineError::negative_opening_balance(balance));
        }
        let account = Self::new();
        account.lock().balance = balance;
        Ok(account)
    }

    pub fn id(&self) -> AccountId {
        self.id
    }

    /// Acquire this account's lock
    ///
    /// The guard must not be held while locking a second account directly;
    /// use [`crate::core::locking::lock_pair`] for that.
    pub fn lock(&self) -> MutexGuard<'_, AccountState> {
        self.state.lock()
    }

    /// Point-in-time copy of the committed state, for display
    pub fn snapshot(&self) -> AccountSnapshot {
        let state = self.lock();
        AccountSnapshot {
            id: self.id,
            balance: state.balance,
            frozen: state.frozen,
        }
    }
}

impl Default for Account {
    fn default() -> Self {
        Self::new()
    }
}

/// Read-only copy of an account, possibly stale relative to in-flight work
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountSnapshot {
    pub id: AccountId,
    pub balance: Decimal,
    pub frozen: bool,
}

impl fmt::Display for AccountSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "AccountIdentifier: {}, Balance: {}, Frozen: {}",
            self.id.short(),
            self.balance,
            self.frozen
        )
    }
}
