//! Core business logic module
//!
//! This module contains the concurrent execution components:
//! - `traits` - Repository abstraction used by the processor and strategies
//! - `account_store` - Concurrent in-memory account store
//! - `locking` - Deadlock-free acquisition of two account locks
//! - `processor` - Asynchronous dispatch to the worker pool
//! - `notification` - Completion fan-out to observers
//! - `journal` - Completion log for drivers and reports
//! - `summary` - Aggregate counts and sums over completed transactions

pub mod account_store;
pub mod journal;
pub mod locking;
pub mod notification;
pub mod processor;
pub mod summary;
pub mod traits;

pub use account_store::AccountStore;
pub use journal::TransactionJournal;
pub use locking::{lock_order, lock_pair, LockedPair};
pub use notification::{StatusNotifier, TransactionListener};
pub use processor::{ProcessorConfig, TransactionProcessor};
pub use summary::TransactionSummary;
pub use traits::AccountRepository;
