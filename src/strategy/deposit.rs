//! Deposit strategy: credit funds to an unfrozen account

use rust_decimal::Decimal;

use crate::types::{Account, TransactionError, TransactionKind};

/// Credit `amount` to `account`
///
/// Frozen state, amount and balance update are checked and applied under one
/// hold of the account lock.
///
/// # Errors
///
/// * [`TransactionError::AccountFrozen`] if the account is frozen
/// * [`TransactionError::NonPositiveAmount`] if `amount <= 0`
/// * [`TransactionError::ArithmeticOverflow`] if the balance would overflow
pub fn apply(account: &Account, amount: Decimal) -> Result<String, TransactionError> {
    let mut state = account.lock();

    if state.frozen {
        return Err(TransactionError::account_frozen(account.id()));
    }
    if amount <= Decimal::ZERO {
        return Err(TransactionError::non_positive_amount(
            TransactionKind::Deposit.label(),
            amount,
        ));
    }

    state.balance = state
        .balance
        .checked_add(amount)
        .ok_or_else(|| TransactionError::arithmetic_overflow("deposit", account.id()))?;

    Ok(format!("Funds deposited. New Balance: {}", state.balance))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use rust_decimal_macros::dec;

    #[test]
    fn test_deposit_credits_balance() {
        let account = Account::with_balance(dec!(100.00)).unwrap();

        let message = apply(&account, dec!(25.50)).unwrap();

        assert_eq!(message, "Funds deposited. New Balance: 125.50");
        assert_eq!(account.snapshot().balance, dec!(125.50));
    }

    #[rstest]
    #[case::zero(dec!(0))]
    #[case::negative(dec!(-1.00))]
    fn test_deposit_rejects_non_positive_amount(#[case] amount: Decimal) {
        let account = Account::with_balance(dec!(10.00)).unwrap();

        let result = apply(&account, amount);

        assert_eq!(
            result,
            Err(TransactionError::non_positive_amount("Deposit", amount))
        );
        assert_eq!(account.snapshot().balance, dec!(10.00));
    }

    #[test]
    fn test_deposit_rejects_frozen_account() {
        let account = Account::with_balance(dec!(10.00)).unwrap();
        account.lock().frozen = true;

        let result = apply(&account, dec!(5.00));

        assert_eq!(result, Err(TransactionError::account_frozen(account.id())));
        assert_eq!(account.snapshot().balance, dec!(10.00));
    }

    #[test]
    fn test_deposit_rejects_overflow() {
        let account = Account::with_balance(Decimal::MAX).unwrap();

        let result = apply(&account, dec!(1));

        assert!(matches!(
            result,
            Err(TransactionError::ArithmeticOverflow { .. })
        ));
        assert_eq!(account.snapshot().balance, Decimal::MAX);
    }
}
