//! Completion log of finalized transactions
//!
//! The journal is a [`TransactionListener`] that keeps every transaction it is
//! notified about, in completion order. Drivers register it with the processor
//! and block on [`TransactionJournal::wait_for`] until a known number of
//! completions has arrived.

use std::time::{Duration, Instant};

use parking_lot::{Condvar, Mutex};

use super::notification::TransactionListener;
use super::summary::TransactionSummary;
use crate::types::Transaction;

#[derive(Debug, Default)]
pub struct TransactionJournal {
    entries: Mutex<Vec<Transaction>>,
    appended: Condvar,
}

impl TransactionJournal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&self, transaction: Transaction) {
        self.entries.lock().push(transaction);
        self.appended.notify_all();
    }

    /// Copy of all entries in completion order
    pub fn snapshot(&self) -> Vec<Transaction> {
        self.entries.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }

    /// Block until at least `count` entries exist or `timeout` elapses
    ///
    /// Returns `true` if the count was reached. A timeout too large to express
    /// as a deadline waits without one.
    pub fn wait_for(&self, count: usize, timeout: Duration) -> bool {
        let deadline = Instant::now().checked_add(timeout);
        let mut entries = self.entries.lock();
        while entries.len() < count {
            match deadline {
                Some(deadline) => {
                    if self.appended.wait_until(&mut entries, deadline).timed_out() {
                        return entries.len() >= count;
                    }
                }
                None => self.appended.wait(&mut entries),
            }
        }
        true
    }

    /// Summary over the entries recorded so far
    pub fn summary(&self) -> TransactionSummary {
        TransactionSummary::from_transactions(self.entries.lock().iter())
    }
}

impl TransactionListener for TransactionJournal {
    fn on_completion(&self, transaction: &Transaction) {
        self.record(transaction.clone());
    }
}
