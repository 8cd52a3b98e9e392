//! Completion fan-out to registered observers
//!
//! # Design
//!
//! Two delivery paths are offered for every finalized transaction:
//!
//! - **Listeners**: synchronous callbacks registered with
//!   [`StatusNotifier::register`]. They run on the worker thread that completed
//!   the transaction, so a slow listener delays that worker.
//! - **Subscribers**: `tokio::sync::broadcast` receivers handed out by
//!   [`StatusNotifier::subscribe`]. A receiver that falls behind loses the oldest
//!   events and observes `RecvError::Lagged`.
//!
//! # Thread Safety
//!
//! The listener list is append-only behind a `parking_lot::RwLock`. Notification
//! clones the list under the read lock and calls listeners after releasing it, so
//! registration never waits on a listener. A listener that panics is logged and
//! skipped; the remaining listeners still receive the event.

use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use parking_lot::RwLock;
use tokio::sync::broadcast;

use super::processor::panic_message;
use crate::types::Transaction;

/// Observer of completed transactions
pub trait TransactionListener: Send + Sync {
    /// Called exactly once per completed transaction
    fn on_completion(&self, transaction: &Transaction);
}

impl<F> TransactionListener for F
where
    F: Fn(&Transaction) + Send + Sync,
{
    fn on_completion(&self, transaction: &Transaction) {
        self(transaction)
    }
}

/// Registry of listeners plus a broadcast channel of completions
pub struct StatusNotifier {
    listeners: RwLock<Vec<Arc<dyn TransactionListener>>>,
    sender: broadcast::Sender<Arc<Transaction>>,
}

impl StatusNotifier {
    /// Create a notifier whose broadcast channel buffers `capacity` events
    ///
    /// A capacity of zero is raised to one.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self {
            listeners: RwLock::new(Vec::new()),
            sender,
        }
    }

    /// Add a listener for all future completions
    pub fn register(&self, listener: Arc<dyn TransactionListener>) {
        self.listeners.write().push(listener);
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.read().len()
    }

    /// Receive every completion published after this call
    pub fn subscribe(&self) -> broadcast::Receiver<Arc<Transaction>> {
        self.sender.subscribe()
    }

    /// Deliver `transaction` to every listener, then to every subscriber
    pub fn notify(&self, transaction: Transaction) {
        let listeners: Vec<Arc<dyn TransactionListener>> = self.listeners.read().clone();

        for listener in &listeners {
            let delivered = panic::catch_unwind(AssertUnwindSafe(|| {
                listener.on_completion(&transaction)
            }));
            if let Err(payload) = delivered {
                tracing::error!(
                    transaction = %transaction.id(),
                    panic = %panic_message(payload.as_ref()),
                    "listener panicked during notification"
                );
            }
        }

        // No subscribers is not an error
        let _ = self.sender.send(Arc::new(transaction));
    }
}

impl Default for StatusNotifier {
    fn default() -> Self {
        Self::new(1024)
    }
}

impl fmt::Debug for StatusNotifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StatusNotifier")
            .field("listeners", &self.listener_count())
            .field("subscribers", &self.sender.receiver_count())
            .finish()
    }
}
