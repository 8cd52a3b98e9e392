//! Aggregate report over completed transactions

use std::fmt;

use rust_decimal::Decimal;

use crate::types::{Transaction, TransactionKind};

/// Counts and sums over a set of completed transactions
///
/// Both `FAILED:` and `ERROR:` outcomes count as failures. Deposit and
/// withdrawal totals include successful transactions only. Pending
/// transactions are ignored. A total that would overflow the decimal range is
/// left unchanged and the skipped amount is logged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TransactionSummary {
    pub total_processed: u64,
    pub failed: u64,
    pub total_deposits: Decimal,
    pub total_withdrawals: Decimal,
}

impl TransactionSummary {
    /// Fold `transactions` into a summary
    pub fn from_transactions<'a, I>(transactions: I) -> Self
    where
        I: IntoIterator<Item = &'a Transaction>,
    {
        let mut summary = Self::default();
        for transaction in transactions {
            summary.record(transaction);
        }
        summary
    }

    pub fn record(&mut self, transaction: &Transaction) {
        let status = transaction.status();
        if !status.is_terminal() {
            return;
        }

        self.total_processed = self.total_processed.saturating_add(1);
        if status.is_failure() {
            self.failed = self.failed.saturating_add(1);
            return;
        }

        let total = match transaction.kind() {
            TransactionKind::Deposit => &mut self.total_deposits,
            TransactionKind::Withdrawal => &mut self.total_withdrawals,
            TransactionKind::Freeze | TransactionKind::Transfer => return,
        };
        match total.checked_add(transaction.amount()) {
            Some(sum) => *total = sum,
            None => tracing::warn!(
                transaction = %transaction.id(),
                kind = %transaction.kind(),
                amount = %transaction.amount(),
                "summary total overflow, amount not counted"
            ),
        }
    }

    pub fn succeeded(&self) -> u64 {
        self.total_processed - self.failed
    }
}

impl fmt::Display for TransactionSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== Transaction Summary ===")?;
        writeln!(f, "Total Transactions Processed: {}", self.total_processed)?;
        writeln!(f, "Successful Deposits: {:.2}", self.total_deposits)?;
        writeln!(f, "Successful Withdrawals: {:.2}", self.total_withdrawals)?;
        write!(f, "Failed Transactions Count: {}", self.failed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{AccountId, TransactionStatus};
    use rust_decimal_macros::dec;

    fn finished(mut tx: Transaction, status: TransactionStatus) -> Transaction {
        tx.finalize(status).unwrap();
        tx
    }

    fn ok() -> TransactionStatus {
        TransactionStatus::Succeeded("ok".to_string())
    }

    fn sample() -> Vec<Transaction> {
        let account = AccountId::generate();
        vec![
            finished(Transaction::deposit(account, dec!(10.00)), ok()),
            finished(Transaction::deposit(account, dec!(2.50)), ok()),
            finished(Transaction::withdrawal(account, dec!(4.00)), ok()),
            finished(
                Transaction::withdrawal(account, dec!(99.00)),
                TransactionStatus::Failed("Insufficient funds.".to_string()),
            ),
            finished(
                Transaction::deposit(account, dec!(7.00)),
                TransactionStatus::Errored("System failure".to_string()),
            ),
            finished(
                Transaction::transfer(account, AccountId::generate(), dec!(1.00)),
                ok(),
            ),
            finished(Transaction::freeze(account), ok()),
        ]
    }

    #[test]
    fn test_empty_sequence_is_all_zero() {
        let empty: Vec<Transaction> = Vec::new();
        let summary = TransactionSummary::from_transactions(&empty);
        assert_eq!(summary, TransactionSummary::default());
        assert_eq!(summary.total_deposits, Decimal::ZERO);
    }

    #[test]
    fn test_fold_counts_and_sums() {
        let summary = TransactionSummary::from_transactions(&sample());

        assert_eq!(summary.total_processed, 7);
        assert_eq!(summary.failed, 2);
        assert_eq!(summary.succeeded(), 5);
        assert_eq!(summary.total_deposits, dec!(12.50));
        assert_eq!(summary.total_withdrawals, dec!(4.00));
    }

    #[test]
    fn test_fold_is_idempotent() {
        let transactions = sample();

        let first = TransactionSummary::from_transactions(&transactions);
        let second = TransactionSummary::from_transactions(&transactions);

        assert_eq!(first, second);
    }

    #[test]
    fn test_pending_transactions_are_skipped() {
        let pending = vec![Transaction::deposit(AccountId::generate(), dec!(5.00))];
        let summary = TransactionSummary::from_transactions(&pending);
        assert_eq!(summary.total_processed, 0);
    }

    #[test]
    fn test_overflowing_total_skips_amount() {
        let account = AccountId::generate();
        let transactions = vec![
            finished(Transaction::deposit(account, Decimal::MAX), ok()),
            finished(Transaction::deposit(account, dec!(1.00)), ok()),
            finished(Transaction::withdrawal(account, dec!(2.00)), ok()),
        ];

        let summary = TransactionSummary::from_transactions(&transactions);

        assert_eq!(summary.total_processed, 3);
        assert_eq!(summary.failed, 0);
        assert_eq!(summary.total_deposits, Decimal::MAX);
        assert_eq!(summary.total_withdrawals, dec!(2.00));
    }

    #[test]
    fn test_display_report_block() {
        let summary = TransactionSummary::from_transactions(&sample());

        assert_eq!(
            summary.to_string(),
            "=== Transaction Summary ===\n\
             Total Transactions Processed: 7\n\
             Successful Deposits: 12.50\n\
             Successful Withdrawals: 4.00\n\
             Failed Transactions Count: 2"
        );
    }
}
