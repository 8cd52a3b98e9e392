//! Asynchronous transaction processor
//!
//! # Design
//!
//! `submit` resolves the addressed account on the caller thread, selects the
//! [`Strategy`] for the transaction's kind and hands a [`WorkItem`] to a worker
//! pool. Each transaction then moves through
//! `Submitted -> Dispatched -> Executing -> Completed` and reaches `Completed`
//! exactly once:
//!
//! - Unknown account: finalized as `FAILED:` on the caller thread and completed
//!   without reaching a worker.
//! - Strategy outcome: the strategy finalizes the status itself.
//! - Panic inside a strategy: caught at the worker boundary and finalized as
//!   `ERROR: System failure during execution: ...`.
//!
//! Completion re-reads the account, saves it back to the repository, logs the
//! outcome and notifies every observer.
//!
//! # Architecture
//!
//! ```text
//! TransactionProcessor<R>
//!     ├── Arc<Shared<R>>
//!     │   ├── Arc<R>          (account repository)
//!     │   └── StatusNotifier  (listeners + broadcast)
//!     ├── Runtime             (worker pool, `workers` threads)
//!     └── TaskTracker         (in-flight work)
//! ```
//!
//! # Thread Safety
//!
//! The processor is `Send + Sync` and may be shared across submitting threads.
//! It owns its runtime, so it must not be dropped, and `wait_idle` must not be
//! called, from inside an async context.

use std::any::Any;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::time::Duration;

use futures::FutureExt;
use parking_lot::Mutex;
use tokio::runtime::{Builder, Runtime};
use tokio::sync::broadcast;
use tokio_util::task::TaskTracker;

use super::account_store::AccountStore;
use super::notification::{StatusNotifier, TransactionListener};
use super::traits::AccountRepository;
use crate::strategy::Strategy;
use crate::types::{Account, EngineError, Transaction, TransactionError, TransactionStatus};

/// Configuration for the worker pool
#[derive(Clone, Debug)]
pub struct ProcessorConfig {
    /// Number of worker threads
    pub workers: usize,
    /// Events buffered per broadcast subscriber before it starts lagging
    pub broadcast_capacity: usize,
}

impl Default for ProcessorConfig {
    fn default() -> Self {
        Self {
            workers: num_cpus::get() * 4,
            broadcast_capacity: 1024,
        }
    }
}

impl ProcessorConfig {
    /// Create a config; zero values fall back to the defaults
    pub fn new(workers: usize, broadcast_capacity: usize) -> Self {
        let default = Self::default();

        let workers = if workers == 0 {
            tracing::warn!(
                requested = workers,
                fallback = default.workers,
                "invalid worker count, using default"
            );
            default.workers
        } else {
            workers
        };

        let broadcast_capacity = if broadcast_capacity == 0 {
            tracing::warn!(
                requested = broadcast_capacity,
                fallback = default.broadcast_capacity,
                "invalid broadcast capacity, using default"
            );
            default.broadcast_capacity
        } else {
            broadcast_capacity
        };

        Self {
            workers,
            broadcast_capacity,
        }
    }
}

/// Unit of work handed to a worker
#[derive(Debug)]
struct WorkItem {
    transaction: Transaction,
    account: Arc<Account>,
    strategy: Strategy,
}

struct Shared<R> {
    store: Arc<R>,
    notifier: StatusNotifier,
}

impl<R: AccountRepository> Shared<R> {
    /// Completion hook, called exactly once per accepted transaction
    fn complete(&self, transaction: Transaction) {
        let stored = panic::catch_unwind(AssertUnwindSafe(|| {
            if let Some(account) = self.store.find(transaction.account()) {
                self.store.save(account);
            }
        }));
        if let Err(payload) = stored {
            tracing::error!(
                transaction = %transaction.id(),
                panic = %panic_message(payload.as_ref()),
                "failed to store account on completion"
            );
        }

        tracing::debug!(
            transaction = %transaction.id(),
            kind = %transaction.kind(),
            account = %transaction.account(),
            status = %transaction.status(),
            "transaction completed"
        );
        self.notifier.notify(transaction);
    }
}

/// Dispatches transactions to a worker pool and reports each completion once
pub struct TransactionProcessor<R: AccountRepository = AccountStore> {
    shared: Arc<Shared<R>>,
    runtime: Runtime,
    tracker: TaskTracker,
    /// Cleared by `shutdown`; held while the tracker is closed or reopened
    accepting: Mutex<bool>,
}

impl<R: AccountRepository> TransactionProcessor<R> {
    /// Start a processor over `store` with `config.workers` worker threads
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::RuntimeBuild`] if the worker pool cannot start.
    pub fn new(store: Arc<R>, config: ProcessorConfig) -> Result<Self, EngineError> {
        let runtime = Builder::new_multi_thread()
            .worker_threads(config.workers.max(1))
            .thread_name("bank-worker")
            .enable_all()
            .build()
            .map_err(EngineError::runtime_build)?;

        tracing::debug!(workers = config.workers, "transaction processor started");

        Ok(Self {
            shared: Arc::new(Shared {
                store,
                notifier: StatusNotifier::new(config.broadcast_capacity),
            }),
            runtime,
            tracker: TaskTracker::new(),
            accepting: Mutex::new(true),
        })
    }

    /// Add an observer for all future completions
    pub fn register_listener(&self, listener: Arc<dyn TransactionListener>) {
        self.shared.notifier.register(listener);
    }

    /// Broadcast receiver of all completions published after this call
    pub fn subscribe(&self) -> broadcast::Receiver<Arc<Transaction>> {
        self.shared.notifier.subscribe()
    }

    /// Accept `transaction` for asynchronous execution
    ///
    /// Returns as soon as the work is queued. The outcome is delivered only
    /// through registered listeners and subscribers.
    ///
    /// # Errors
    ///
    /// * [`EngineError::ProcessorShutDown`] after [`shutdown`](Self::shutdown)
    /// * [`EngineError::StatusAlreadyFinal`] if `transaction` was already completed
    pub fn submit(&self, mut transaction: Transaction) -> Result<(), EngineError> {
        if !*self.accepting.lock() {
            tracing::warn!(
                transaction = %transaction.id(),
                "submission rejected, processor is shut down"
            );
            return Err(EngineError::processor_shut_down(transaction.id()));
        }
        if transaction.status().is_terminal() {
            return Err(EngineError::status_already_final(
                transaction.id(),
                transaction.status(),
            ));
        }

        let Some(account) = self.shared.store.find(transaction.account()) else {
            let error = TransactionError::account_not_found(transaction.account());
            transaction.finalize(TransactionStatus::from(error))?;
            self.shared.complete(transaction);
            return Ok(());
        };

        let item = WorkItem {
            strategy: Strategy::for_kind(transaction.kind()),
            transaction,
            account,
        };
        self.tracker
            .spawn_on(run(Arc::clone(&self.shared), item), self.runtime.handle());
        Ok(())
    }

    /// Stop accepting new work; in-flight work keeps running
    pub fn shutdown(&self) {
        let mut accepting = self.accepting.lock();
        if *accepting {
            *accepting = false;
            self.tracker.close();
            tracing::debug!(in_flight = self.tracker.len(), "transaction processor shutting down");
        }
    }

    pub fn is_shut_down(&self) -> bool {
        !*self.accepting.lock()
    }

    /// Number of dispatched transactions not yet completed
    pub fn in_flight(&self) -> usize {
        self.tracker.len()
    }

    /// Block until every accepted transaction has completed or `timeout` elapses
    ///
    /// Returns `true` if the processor went idle in time. A concurrent
    /// [`shutdown`](Self::shutdown) leaves the processor shut down.
    pub fn wait_idle(&self, timeout: Duration) -> bool {
        self.tracker.close();
        let idle = self.runtime.block_on(async {
            tokio::time::timeout(timeout, self.tracker.wait())
                .await
                .is_ok()
        });
        let accepting = self.accepting.lock();
        if *accepting {
            self.tracker.reopen();
        }
        idle
    }
}

impl<R: AccountRepository> fmt::Debug for TransactionProcessor<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransactionProcessor")
            .field("notifier", &self.shared.notifier)
            .field("in_flight", &self.tracker.len())
            .field("accepting", &*self.accepting.lock())
            .finish()
    }
}

/// Worker body: execute, contain faults, complete
async fn run<R: AccountRepository>(shared: Arc<Shared<R>>, item: WorkItem) {
    let WorkItem {
        mut transaction,
        account,
        strategy,
    } = item;

    let executed = AssertUnwindSafe(async {
        strategy.execute(&account, &mut transaction, shared.store.as_ref())
    })
    .catch_unwind()
    .await;

    if let Err(payload) = executed {
        let message = panic_message(payload.as_ref());
        tracing::error!(
            transaction = %transaction.id(),
            panic = %message,
            "strategy panicked"
        );
        if !transaction.status().is_terminal() {
            let status = TransactionStatus::Errored(format!(
                "System failure during execution: {}",
                message
            ));
            let _ = transaction.finalize(status);
        }
    }

    if !transaction.status().is_terminal() {
        let status = TransactionStatus::Failed("Execution could not be completed.".to_string());
        let _ = transaction.finalize(status);
    }

    shared.complete(transaction);
}

/// Best-effort text of a panic payload
pub(crate) fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic".to_string()
    }
}
