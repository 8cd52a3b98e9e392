//! Thread-safe account storage
//!
//! This module provides the `AccountStore` struct, the in-memory source of truth
//! mapping account identifiers to shared account records.
//!
//! # Design
//!
//! The `AccountStore` uses `DashMap` (a concurrent HashMap) so that lookups and
//! upserts for unrelated accounts never serialize on a global lock. Values are
//! `Arc<Account>`: the store hands out shared records and each account's own
//! mutex protects its balance and frozen flag. The store never touches those
//! per-account locks except through [`AccountStore::snapshot`], which is a
//! read-only display query.

use std::sync::Arc;

use dashmap::DashMap;
use rust_decimal::Decimal;

use super::traits::AccountRepository;
use crate::types::{Account, AccountId, AccountSnapshot, EngineError};

/// Concurrent in-memory account store
///
/// # Thread Safety
///
/// All methods are safe to call from multiple threads concurrently. The internal
/// `DashMap` shards its locking so that:
/// - Concurrent lookups of different accounts don't block each other
/// - Concurrent upserts of different accounts don't block each other
#[derive(Debug, Default)]
pub struct AccountStore {
    accounts: DashMap<AccountId, Arc<Account>>,
}

impl AccountStore {
    /// Create a new empty AccountStore
    pub fn new() -> Self {
        Self {
            accounts: DashMap::new(),
        }
    }

    /// Create a store pre-populated with `accounts`
    pub fn with_accounts<I>(accounts: I) -> Self
    where
        I: IntoIterator<Item = Account>,
    {
        let store = Self::new();
        for account in accounts {
            store.save(Arc::new(account));
        }
        store
    }

    /// Create and register a seeded account
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::NegativeOpeningBalance`] for a negative balance.
    pub fn open_account(&self, initial_balance: Decimal) -> Result<Arc<Account>, EngineError> {
        let account = Arc::new(Account::with_balance(initial_balance)?);
        self.save(Arc::clone(&account));
        Ok(account)
    }

    /// Current committed state of one account
    ///
    /// May be stale relative to transactions still in flight.
    pub fn snapshot(&self, id: AccountId) -> Option<AccountSnapshot> {
        self.find(id).map(|account| account.snapshot())
    }

    /// Snapshots of every account, sorted by identifier
    pub fn snapshots(&self) -> Vec<AccountSnapshot> {
        // Collect the Arcs first so no shard lock is held while taking account locks
        let accounts: Vec<Arc<Account>> = self
            .accounts
            .iter()
            .map(|entry| Arc::clone(entry.value()))
            .collect();

        let mut snapshots: Vec<AccountSnapshot> =
            accounts.iter().map(|account| account.snapshot()).collect();
        snapshots.sort_by_key(|snapshot| snapshot.id);
        snapshots
    }

    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }
}

impl AccountRepository for AccountStore {
    fn find(&self, id: AccountId) -> Option<Arc<Account>> {
        self.accounts.get(&id).map(|entry| Arc::clone(entry.value()))
    }

    fn save(&self, account: Arc<Account>) {
        self.accounts.insert(account.id(), account);
    }
}
