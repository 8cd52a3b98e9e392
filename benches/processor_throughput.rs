//! Benchmark suite for processor throughput
//!
//! Measures end-to-end completion of a batch of transactions through the
//! worker pool using the divan benchmarking framework.
//!
//! # Running Benchmarks
//!
//! ```bash
//! # Run all benchmarks
//! cargo bench
//! ```
//!
//! # Workloads
//!
//! - Same-account deposits and withdrawals (contention on one lock)
//! - Transfers across a ring of accounts (two-lock acquisition)
//!
//! Each workload is measured at several batch sizes.

use rust_bank_engine::cli::Scenario;
use rust_bank_engine::driver::run_scenario;
use rust_bank_engine::ProcessorConfig;
use rust_decimal::Decimal;
use std::time::Duration;

fn main() {
    divan::main();
}

const TIMEOUT: Duration = Duration::from_secs(120);

/// One account, `iterations` deposit/withdrawal pairs
#[divan::bench(args = [100, 1_000, 10_000])]
fn stress_single_account(iterations: usize) {
    let scenario = Scenario::Stress {
        initial_balance: Decimal::new(100_000, 2),
        iterations,
        amount: Decimal::ONE,
    };

    let report =
        run_scenario(&scenario, ProcessorConfig::default(), TIMEOUT).expect("Processing failed");
    assert!(report.completed);
}

/// Eight accounts, every ordered pair transferring `rounds` times
#[divan::bench(args = [1, 10, 100])]
fn transfers_between_accounts(rounds: usize) {
    let scenario = Scenario::Transfers {
        accounts: 8,
        initial_balance: Decimal::new(100_000, 2),
        rounds,
        amount: Decimal::ONE,
    };

    let report =
        run_scenario(&scenario, ProcessorConfig::default(), TIMEOUT).expect("Processing failed");
    assert!(report.completed);
}

/// Same single-account workload with a fixed number of workers
#[divan::bench(args = [1, 4, 16])]
fn stress_by_worker_count(workers: usize) {
    let scenario = Scenario::Stress {
        initial_balance: Decimal::new(100_000, 2),
        iterations: 1_000,
        amount: Decimal::ONE,
    };

    let report = run_scenario(&scenario, ProcessorConfig::new(workers, 1024), TIMEOUT)
        .expect("Processing failed");
    assert!(report.completed);
}
