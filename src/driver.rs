//! Built-in workloads for the command-line driver
//!
//! A scenario seeds an [`AccountStore`], starts a [`TransactionProcessor`],
//! submits a fixed batch of transactions and waits on a
//! [`TransactionJournal`] until every one of them has completed (or the
//! timeout elapses). The resulting [`ScenarioReport`] carries the final
//! account table, the journal and its summary.

use std::sync::Arc;
use std::time::Duration;

use rust_decimal::Decimal;

use crate::cli::Scenario;
use crate::core::{
    AccountStore, ProcessorConfig, TransactionJournal, TransactionListener, TransactionProcessor,
    TransactionSummary,
};
use crate::types::{AccountSnapshot, EngineError, Transaction};

/// Outcome of one scenario run
#[derive(Debug, Clone)]
pub struct ScenarioReport {
    /// Final account table, sorted by identifier
    pub accounts: Vec<AccountSnapshot>,
    /// Completed transactions in completion order
    pub journal: Vec<Transaction>,
    pub summary: TransactionSummary,
    /// Number of transactions accepted by the processor
    pub submitted: usize,
    /// `false` if the timeout elapsed before every transaction completed
    pub completed: bool,
}

/// Run `scenario` on a fresh store and processor
///
/// # Errors
///
/// Returns an [`EngineError`] if the worker pool cannot start, an opening
/// balance is negative, or a submission is refused.
pub fn run_scenario(
    scenario: &Scenario,
    config: ProcessorConfig,
    timeout: Duration,
) -> Result<ScenarioReport, EngineError> {
    let store = Arc::new(AccountStore::new());
    let transactions = match scenario {
        Scenario::Stress {
            initial_balance,
            iterations,
            amount,
        } => stress_workload(&store, *initial_balance, *iterations, *amount)?,
        Scenario::Transfers {
            accounts,
            initial_balance,
            rounds,
            amount,
        } => transfer_workload(&store, *accounts, *initial_balance, *rounds, *amount)?,
    };

    let processor = TransactionProcessor::new(Arc::clone(&store), config)?;
    let journal = Arc::new(TransactionJournal::new());
    processor.register_listener(Arc::clone(&journal) as Arc<dyn TransactionListener>);

    let expected = transactions.len();
    tracing::info!(transactions = expected, "submitting workload");
    for transaction in transactions {
        processor.submit(transaction)?;
    }

    let completed = journal.wait_for(expected, timeout);
    if !completed {
        tracing::warn!(
            expected,
            completed = journal.len(),
            "timed out waiting for completions"
        );
    }
    processor.shutdown();

    let entries = journal.snapshot();
    let summary = TransactionSummary::from_transactions(&entries);
    tracing::info!(
        processed = summary.total_processed,
        failed = summary.failed,
        "workload finished"
    );

    Ok(ScenarioReport {
        accounts: store.snapshots(),
        journal: entries,
        summary,
        submitted: expected,
        completed,
    })
}

/// One account, `iterations` deposit/withdrawal pairs
fn stress_workload(
    store: &AccountStore,
    initial_balance: Decimal,
    iterations: usize,
    amount: Decimal,
) -> Result<Vec<Transaction>, EngineError> {
    let account = store.open_account(initial_balance)?;

    let mut transactions = Vec::with_capacity(iterations * 2);
    for _ in 0..iterations {
        transactions.push(Transaction::deposit(account.id(), amount));
        transactions.push(Transaction::withdrawal(account.id(), amount));
    }
    Ok(transactions)
}

/// `accounts` accounts, each ordered pair transferring once per round
fn transfer_workload(
    store: &AccountStore,
    accounts: usize,
    initial_balance: Decimal,
    rounds: usize,
    amount: Decimal,
) -> Result<Vec<Transaction>, EngineError> {
    let ids = (0..accounts)
        .map(|_| store.open_account(initial_balance).map(|account| account.id()))
        .collect::<Result<Vec<_>, _>>()?;

    let mut transactions = Vec::new();
    for _ in 0..rounds {
        for source in &ids {
            for destination in ids.iter().filter(|id| *id != source) {
                transactions.push(Transaction::transfer(*source, *destination, amount));
            }
        }
    }
    Ok(transactions)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    const WAIT: Duration = Duration::from_secs(60);

    fn config() -> ProcessorConfig {
        ProcessorConfig::new(4, 1024)
    }

    #[test]
    fn test_stress_scenario_preserves_balance() {
        let scenario = Scenario::Stress {
            initial_balance: dec!(1000.00),
            iterations: 100,
            amount: dec!(1.00),
        };

        let report = run_scenario(&scenario, config(), WAIT).unwrap();

        assert!(report.completed);
        assert_eq!(report.submitted, 200);
        assert_eq!(report.accounts.len(), 1);
        assert_eq!(report.accounts[0].balance, dec!(1000.00));
        assert_eq!(report.summary.total_processed, 200);
        assert_eq!(report.summary.failed, 0);
        assert_eq!(report.summary.total_deposits, dec!(100.00));
        assert_eq!(report.summary.total_withdrawals, dec!(100.00));
    }

    #[test]
    fn test_transfer_scenario_conserves_total() {
        let scenario = Scenario::Transfers {
            accounts: 3,
            initial_balance: dec!(100.00),
            rounds: 20,
            amount: dec!(1.00),
        };

        let report = run_scenario(&scenario, config(), WAIT).unwrap();

        assert!(report.completed);
        assert_eq!(report.journal.len(), 3 * 2 * 20);
        let total: Decimal = report.accounts.iter().map(|account| account.balance).sum();
        assert_eq!(total, dec!(300.00));
        assert!(report
            .accounts
            .iter()
            .all(|account| account.balance >= Decimal::ZERO));
    }

    #[test]
    fn test_single_account_transfer_scenario_is_empty() {
        let scenario = Scenario::Transfers {
            accounts: 1,
            initial_balance: dec!(5.00),
            rounds: 10,
            amount: dec!(1.00),
        };

        let report = run_scenario(&scenario, config(), WAIT).unwrap();

        assert!(report.completed);
        assert!(report.journal.is_empty());
        assert_eq!(report.summary, TransactionSummary::default());
    }

    #[test]
    fn test_largest_timeout_waits_for_completion() {
        let scenario = Scenario::Stress {
            initial_balance: dec!(10.00),
            iterations: 5,
            amount: dec!(1.00),
        };

        let report = run_scenario(&scenario, config(), Duration::from_secs(u64::MAX)).unwrap();

        assert!(report.completed);
        assert_eq!(report.journal.len(), 10);
    }

    #[test]
    fn test_negative_opening_balance_is_rejected() {
        let scenario = Scenario::Stress {
            initial_balance: dec!(-1.00),
            iterations: 1,
            amount: dec!(1.00),
        };

        let result = run_scenario(&scenario, config(), WAIT);

        assert_eq!(
            result.unwrap_err(),
            EngineError::negative_opening_balance(dec!(-1.00))
        );
    }
}
