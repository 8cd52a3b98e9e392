//! Core traits for account storage
//!
//! The processor and strategies only talk to accounts through
//! [`AccountRepository`], so a different backing store can be plugged in
//! without touching the execution rules.

use std::sync::Arc;

use crate::types::{Account, AccountId};

/// Concurrent lookup and upsert of accounts by identifier
///
/// Implementations must be safe under unbounded concurrent reads and writes
/// and must never block on an account's own lock.
pub trait AccountRepository: Send + Sync + 'static {
    /// Look up an account by identifier
    fn find(&self, id: AccountId) -> Option<Arc<Account>>;

    /// Insert or replace the account stored under its identifier
    ///
    /// For stores holding shared records this re-inserts the same `Arc`; stores
    /// that keep copies rely on it to persist a mutation.
    fn save(&self, account: Arc<Account>);
}
