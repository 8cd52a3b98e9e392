use crate::core::ProcessorConfig;
use clap::{Parser, Subcommand};
use rust_decimal::Decimal;
use std::path::PathBuf;
use std::time::Duration;

/// Drive the concurrent bank engine with a built-in workload
#[derive(Parser, Debug)]
#[command(name = "bank-engine")]
#[command(about = "Run concurrent banking workloads against the in-memory engine", long_about = None)]
pub struct CliArgs {
    /// Number of worker threads
    #[arg(
        long = "workers",
        value_name = "COUNT",
        help = "Number of worker threads (default: CPU cores x 4)"
    )]
    pub workers: Option<usize>,

    /// Log verbosity for the stderr subscriber
    #[arg(
        long = "log-level",
        value_name = "LEVEL",
        default_value = "warn",
        help = "Log level: trace, debug, info, warn or error"
    )]
    pub log_level: tracing::Level,

    /// Optional CSV export of every completed transaction
    #[arg(
        long = "journal",
        value_name = "PATH",
        help = "Write the completed transactions as CSV to PATH"
    )]
    pub journal: Option<PathBuf>,

    /// Upper bound on waiting for all completions
    #[arg(
        long = "timeout-secs",
        value_name = "SECONDS",
        default_value_t = 30,
        help = "Seconds to wait for all transactions to complete"
    )]
    pub timeout_secs: u64,

    #[command(subcommand)]
    pub scenario: Scenario,
}

/// Built-in workloads
#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Scenario {
    /// One account receiving interleaved deposits and withdrawals
    Stress {
        #[arg(long = "initial-balance", value_name = "AMOUNT", default_value = "1000.00")]
        initial_balance: Decimal,

        /// Number of deposit/withdrawal pairs
        #[arg(long = "iterations", value_name = "COUNT", default_value_t = 100)]
        iterations: usize,

        #[arg(long = "amount", value_name = "AMOUNT", default_value = "1.00")]
        amount: Decimal,
    },

    /// Every ordered pair of accounts transferring to each other
    Transfers {
        #[arg(long = "accounts", value_name = "COUNT", default_value_t = 4)]
        accounts: usize,

        #[arg(long = "initial-balance", value_name = "AMOUNT", default_value = "100.00")]
        initial_balance: Decimal,

        /// Number of passes over all account pairs
        #[arg(long = "rounds", value_name = "COUNT", default_value_t = 50)]
        rounds: usize,

        #[arg(long = "amount", value_name = "AMOUNT", default_value = "1.00")]
        amount: Decimal,
    },
}

impl CliArgs {
    /// Create a ProcessorConfig from CLI arguments
    ///
    /// Falls back to the defaults when `--workers` is absent; a zero value is
    /// replaced by the default with a warning.
    pub fn to_processor_config(&self) -> ProcessorConfig {
        match self.workers {
            Some(workers) => {
                ProcessorConfig::new(workers, ProcessorConfig::default().broadcast_capacity)
            }
            None => ProcessorConfig::default(),
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use rust_decimal_macros::dec;

    #[rstest]
    #[case::stress_defaults(
        &["program", "stress"],
        Scenario::Stress { initial_balance: dec!(1000.00), iterations: 100, amount: dec!(1.00) }
    )]
    #[case::stress_custom(
        &["program", "stress", "--iterations", "10", "--amount", "2.5"],
        Scenario::Stress { initial_balance: dec!(1000.00), iterations: 10, amount: dec!(2.5) }
    )]
    #[case::transfers_defaults(
        &["program", "transfers"],
        Scenario::Transfers { accounts: 4, initial_balance: dec!(100.00), rounds: 50, amount: dec!(1.00) }
    )]
    #[case::transfers_custom(
        &["program", "transfers", "--accounts", "2", "--rounds", "5", "--initial-balance", "10"],
        Scenario::Transfers { accounts: 2, initial_balance: dec!(10), rounds: 5, amount: dec!(1.00) }
    )]
    fn test_scenario_parsing(#[case] args: &[&str], #[case] expected: Scenario) {
        let parsed = CliArgs::try_parse_from(args).unwrap();
        assert_eq!(parsed.scenario, expected);
    }

    #[rstest]
    #[case::defaults(&["program", "stress"], None, tracing::Level::WARN, None, 30)]
    #[case::all_options(
        &["program", "--workers", "8", "--log-level", "debug", "--journal", "out.csv", "--timeout-secs", "5", "stress"],
        Some(8),
        tracing::Level::DEBUG,
        Some("out.csv"),
        5
    )]
    fn test_global_options(
        #[case] args: &[&str],
        #[case] workers: Option<usize>,
        #[case] log_level: tracing::Level,
        #[case] journal: Option<&str>,
        #[case] timeout_secs: u64,
    ) {
        let parsed = CliArgs::try_parse_from(args).unwrap();
        assert_eq!(parsed.workers, workers);
        assert_eq!(parsed.log_level, log_level);
        assert_eq!(parsed.journal, journal.map(PathBuf::from));
        assert_eq!(parsed.timeout(), Duration::from_secs(timeout_secs));
    }

    #[rstest]
    #[case::default_workers(&["program", "stress"], num_cpus::get() * 4)]
    #[case::custom_workers(&["program", "--workers", "3", "stress"], 3)]
    #[case::zero_workers_fallback(&["program", "--workers", "0", "stress"], num_cpus::get() * 4)]
    fn test_processor_config_conversion(#[case] args: &[&str], #[case] expected_workers: usize) {
        let parsed = CliArgs::try_parse_from(args).unwrap();
        let config = parsed.to_processor_config();

        assert_eq!(config.workers, expected_workers);
        assert_eq!(config.broadcast_capacity, 1024);
    }

    #[rstest]
    #[case::missing_scenario(&["program"])]
    #[case::unknown_scenario(&["program", "replay"])]
    #[case::invalid_amount(&["program", "stress", "--amount", "lots"])]
    #[case::invalid_log_level(&["program", "--log-level", "loud", "stress"])]
    fn test_parsing_errors(#[case] args: &[&str]) {
        let result = CliArgs::try_parse_from(args);
        assert!(result.is_err());
    }
}
