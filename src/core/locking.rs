//! Deadlock-free acquisition of two account locks
//!
//! Every operation that holds two account locks at once must go through
//! [`lock_pair`]. Locks are taken in ascending [`AccountId`] order and released
//! in the reverse order, so two operations touching the same pair of accounts
//! from opposite directions can never wait on each other.

use parking_lot::MutexGuard;

use crate::types::{Account, AccountId, AccountState, TransactionError};

/// Both account locks of a two-account operation
///
/// Fields drop in declaration order, so the lock acquired second is released first.
pub struct LockedPair<'a> {
    later: MutexGuard<'a, AccountState>,
    earlier: MutexGuard<'a, AccountState>,
    source_first: bool,
}

impl LockedPair<'_> {
    pub fn source(&self) -> &AccountState {
        if self.source_first {
            &*self.earlier
        } else {
            &*self.later
        }
    }

    pub fn destination(&self) -> &AccountState {
        if self.source_first {
            &*self.later
        } else {
            &*self.earlier
        }
    }

    /// Mutable access to `(source, destination)`
    pub fn both_mut(&mut self) -> (&mut AccountState, &mut AccountState) {
        if self.source_first {
            (&mut *self.earlier, &mut *self.later)
        } else {
            (&mut *self.later, &mut *self.earlier)
        }
    }
}

/// Order in which the locks of two distinct accounts are acquired
pub fn lock_order(a: AccountId, b: AccountId) -> (AccountId, AccountId) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

/// Lock `source` and `destination` in identifier order
///
/// # Errors
///
/// Returns [`TransactionError::SelfTransfer`] without locking anything if both
/// references name the same account; the account mutex is not reentrant.
pub fn lock_pair<'a>(
    source: &'a Account,
    destination: &'a Account,
) -> Result<LockedPair<'a>, TransactionError> {
    if source.id() == destination.id() {
        return Err(TransactionError::self_transfer(source.id()));
    }

    let source_first = lock_order(source.id(), destination.id()).0 == source.id();
    let (first, second) = if source_first {
        (source, destination)
    } else {
        (destination, source)
    };

    let earlier = first.lock();
    let later = second.lock();

    Ok(LockedPair {
        later,
        earlier,
        source_first,
    })
}
