//! Rust Bank Engine CLI
//!
//! Command-line driver that runs a built-in concurrent workload against the
//! engine and reports the result.
//!
//! # Usage
//!
//! ```bash
//! cargo run -- stress > accounts.csv
//! cargo run -- stress --iterations 500 --amount 2.50 > accounts.csv
//! cargo run -- --workers 8 transfers --accounts 6 --rounds 100 > accounts.csv
//! cargo run -- --log-level debug --journal journal.csv transfers > accounts.csv
//! ```
//!
//! The final account table is written to stdout as CSV. The transaction
//! summary and all logging go to stderr.
//!
//! # Scenarios
//!
//! - **stress**: one account, interleaved deposits and withdrawals
//! - **transfers**: every ordered pair of accounts transferring concurrently
//!
//! # Exit Codes
//!
//! - 0: Success
//! - 1: Error (worker pool failure, output failure, timeout, etc.)

use rust_bank_engine::cli;
use rust_bank_engine::driver;
use rust_bank_engine::io::{write_accounts_csv, write_transactions_csv};
use rust_bank_engine::EngineError;
use std::fs::File;
use std::process;

fn main() {
    let args = cli::parse_args();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(args.log_level)
        .init();

    if let Err(e) = run(&args) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run(args: &cli::CliArgs) -> Result<(), EngineError> {
    let report = driver::run_scenario(&args.scenario, args.to_processor_config(), args.timeout())?;

    let mut output = std::io::stdout();
    write_accounts_csv(&report.accounts, &mut output)?;

    if let Some(path) = &args.journal {
        let mut file = File::create(path)?;
        write_transactions_csv(&report.journal, &mut file)?;
    }

    eprintln!("{}", report.summary);

    if !report.completed {
        return Err(EngineError::Timeout {
            expected: report.submitted,
            completed: report.journal.len(),
        });
    }
    Ok(())
}
