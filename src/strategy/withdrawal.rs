//! Withdrawal strategy: debit funds without letting the balance go negative

use rust_decimal::Decimal;

use crate::types::{Account, TransactionError, TransactionKind};

/// Debit `amount` from `account`
///
/// # Errors
///
/// * [`TransactionError::AccountFrozen`] if the account is frozen
/// * [`TransactionError::NonPositiveAmount`] if `amount <= 0`
/// * [`TransactionError::InsufficientFunds`] if the balance would go negative
pub fn apply(account: &Account, amount: Decimal) -> Result<String, TransactionError> {
    let mut state = account.lock();

    if state.frozen {
        return Err(TransactionError::account_frozen(account.id()));
    }
    if amount <= Decimal::ZERO {
        return Err(TransactionError::non_positive_amount(
            TransactionKind::Withdrawal.label(),
            amount,
        ));
    }

    let remaining = state
        .balance
        .checked_sub(amount)
        .ok_or_else(|| TransactionError::arithmetic_overflow("withdrawal", account.id()))?;
    if remaining < Decimal::ZERO {
        return Err(TransactionError::insufficient_funds(
            account.id(),
            state.balance,
            amount,
        ));
    }

    state.balance = remaining;
    Ok(format!("Funds withdrawn. New Balance: {}", state.balance))
}
