//! CSV export of account snapshots and completed transactions
//!
//! This module centralizes all CSV format concerns:
//! - Account table serialization (`account,balance,frozen`)
//! - Transaction journal serialization via a serde row type
//!
//! Both writers produce deterministic output: accounts are sorted by
//! identifier, transactions keep the order they are given in.

use std::io::Write;

use serde::Serialize;

use crate::types::{AccountSnapshot, EngineError, Transaction};

/// One line of the transaction export
#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct TransactionRow {
    pub id: String,
    pub timestamp: String,
    pub kind: String,
    pub account: String,
    pub destination: Option<String>,
    pub amount: String,
    pub status: String,
}

impl From<&Transaction> for TransactionRow {
    fn from(transaction: &Transaction) -> Self {
        Self {
            id: transaction.id().to_string(),
            timestamp: transaction.timestamp().to_rfc3339(),
            kind: transaction.kind().to_string(),
            account: transaction.account().to_string(),
            destination: transaction
                .operation()
                .destination()
                .map(|destination| destination.to_string()),
            amount: format!("{:.2}", transaction.amount()),
            status: transaction.status().to_string(),
        }
    }
}

/// Write account snapshots to CSV format
///
/// Writes accounts with columns: account, balance, frozen. Balances are shown
/// with two decimal places and rows are sorted by account identifier.
///
/// # Errors
///
/// Returns [`EngineError::Csv`] or [`EngineError::Io`] if writing fails.
pub fn write_accounts_csv(
    accounts: &[AccountSnapshot],
    output: &mut dyn Write,
) -> Result<(), EngineError> {
    let mut writer = csv::Writer::from_writer(output);

    writer.write_record(["account", "balance", "frozen"])?;

    let mut sorted_accounts = accounts.to_vec();
    sorted_accounts.sort_by_key(|account| account.id);

    for account in sorted_accounts {
        writer.write_record(&[
            account.id.to_string(),
            format!("{:.2}", account.balance),
            account.frozen.to_string(),
        ])?;
    }

    writer.flush()?;
    Ok(())
}

/// Write completed transactions to CSV format, one row per transaction
///
/// # Errors
///
/// Returns [`EngineError::Csv`] or [`EngineError::Io`] if writing fails.
pub fn write_transactions_csv(
    transactions: &[Transaction],
    output: &mut dyn Write,
) -> Result<(), EngineError> {
    let mut writer = csv::Writer::from_writer(output);

    if transactions.is_empty() {
        writer.write_record([
            "id",
            "timestamp",
            "kind",
            "account",
            "destination",
            "amount",
            "status",
        ])?;
    }

    for transaction in transactions {
        writer.serialize(TransactionRow::from(transaction))?;
    }

    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{AccountId, TransactionStatus};
    use rstest::rstest;
    use rust_decimal_macros::dec;
    use std::io::Read;
    use tempfile::NamedTempFile;
    use uuid::Uuid;

    fn id(n: u128) -> AccountId {
        AccountId::from_uuid(Uuid::from_u128(n))
    }

    fn snapshot(n: u128, balance: rust_decimal::Decimal, frozen: bool) -> AccountSnapshot {
        AccountSnapshot {
            id: id(n),
            balance,
            frozen,
        }
    }

    #[rstest]
    #[case::empty_accounts(vec![], "account,balance,frozen\n")]
    #[case::single_account(
        vec![snapshot(1, dec!(1000), false)],
        "account,balance,frozen\n00000000-0000-0000-0000-000000000001,1000.00,false\n"
    )]
    #[case::sorted_by_account_id(
        vec![snapshot(3, dec!(0), true), snapshot(1, dec!(7.5), false)],
        "account,balance,frozen\n\
         00000000-0000-0000-0000-000000000001,7.50,false\n\
         00000000-0000-0000-0000-000000000003,0.00,true\n"
    )]
    #[case::two_decimal_precision(
        vec![snapshot(2, dec!(70.004), false)],
        "account,balance,frozen\n00000000-0000-0000-0000-000000000002,70.00,false\n"
    )]
    fn test_write_accounts_csv(
        #[case] accounts: Vec<AccountSnapshot>,
        #[case] expected_output: &str,
    ) {
        let mut output = Vec::new();
        write_accounts_csv(&accounts, &mut output).unwrap();

        assert_eq!(String::from_utf8(output).unwrap(), expected_output);
    }

    #[test]
    fn test_transaction_row_carries_typed_destination() {
        let mut tx = Transaction::transfer(id(1), id(2), dec!(30));
        tx.finalize(TransactionStatus::Succeeded("moved".to_string()))
            .unwrap();

        let row = TransactionRow::from(&tx);

        assert_eq!(row.kind, "TRANSFER");
        assert_eq!(row.account, id(1).to_string());
        assert_eq!(row.destination, Some(id(2).to_string()));
        assert_eq!(row.amount, "30.00");
        assert_eq!(row.status, "SUCCESS: moved");
    }

    #[test]
    fn test_write_transactions_csv_to_file() {
        let mut deposit = Transaction::deposit(id(1), dec!(5));
        deposit
            .finalize(TransactionStatus::Succeeded("ok".to_string()))
            .unwrap();
        let mut freeze = Transaction::freeze(id(1));
        freeze
            .finalize(TransactionStatus::Failed("nope".to_string()))
            .unwrap();

        let mut file = NamedTempFile::new().unwrap();
        write_transactions_csv(&[deposit.clone(), freeze], file.as_file_mut()).unwrap();

        let mut contents = String::new();
        file.reopen().unwrap().read_to_string(&mut contents).unwrap();
        let lines: Vec<&str> = contents.lines().collect();

        assert_eq!(lines.len(), 3);
        assert_eq!(
            lines[0],
            "id,timestamp,kind,account,destination,amount,status"
        );
        assert!(lines[1].starts_with(&deposit.id().to_string()));
        assert!(lines[1].ends_with(",DEPOSIT,00000000-0000-0000-0000-000000000001,,5.00,SUCCESS: ok"));
        assert!(lines[2].ends_with(",0.00,FAILED: nope"));
    }

    #[test]
    fn test_write_transactions_csv_empty_has_header() {
        let mut output = Vec::new();
        write_transactions_csv(&[], &mut output).unwrap();

        assert_eq!(
            String::from_utf8(output).unwrap(),
            "id,timestamp,kind,account,destination,amount,status\n"
        );
    }
}
