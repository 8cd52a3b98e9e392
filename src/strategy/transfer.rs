//! Transfer strategy: atomic debit/credit across two accounts
//!
//! Preconditions fail fast in a fixed order: source frozen, amount, destination
//! lookup, destination frozen, self-transfer. The frozen flags are only peeked
//! at there; they are checked again together with the balance while both locks
//! are held via [`lock_pair`], so no observer can see the debit without the
//! credit.

use std::sync::Arc;

use rust_decimal::Decimal;

use crate::core::locking::lock_pair;
use crate::core::traits::AccountRepository;
use crate::types::{Account, AccountId, TransactionError, TransactionKind};

/// Move `amount` from `source` to the account identified by `destination_id`
///
/// On success the destination is saved back to `store` before the locks are
/// released.
///
/// # Errors
///
/// * [`TransactionError::SourceFrozen`] if the source is frozen
/// * [`TransactionError::NonPositiveAmount`] if `amount <= 0`
/// * [`TransactionError::DestinationNotFound`] if the destination is unknown
/// * [`TransactionError::DestinationFrozen`] if the destination is frozen
/// * [`TransactionError::SelfTransfer`] if source and destination coincide
/// * [`TransactionError::InsufficientFunds`] if the source would go negative
pub fn apply<R>(
    source: &Account,
    destination_id: AccountId,
    amount: Decimal,
    store: &R,
) -> Result<String, TransactionError>
where
    R: AccountRepository + ?Sized,
{
    if source.lock().frozen {
        return Err(TransactionError::source_frozen(source.id()));
    }
    if amount <= Decimal::ZERO {
        return Err(TransactionError::non_positive_amount(
            TransactionKind::Transfer.label(),
            amount,
        ));
    }

    let destination = store
        .find(destination_id)
        .ok_or_else(|| TransactionError::destination_not_found(destination_id))?;
    if destination.id() != source.id() && destination.lock().frozen {
        return Err(TransactionError::destination_frozen(destination_id));
    }

    let mut pair = lock_pair(source, &destination)?;

    let source_balance = {
        let (from, to) = pair.both_mut();

        if from.frozen {
            return Err(TransactionError::source_frozen(source.id()));
        }
        if to.frozen {
            return Err(TransactionError::destination_frozen(destination_id));
        }

        let remaining = from
            .balance
            .checked_sub(amount)
            .ok_or_else(|| TransactionError::arithmetic_overflow("transfer", source.id()))?;
        if remaining < Decimal::ZERO {
            return Err(TransactionError::insufficient_funds(
                source.id(),
                from.balance,
                amount,
            ));
        }
        let credited = to
            .balance
            .checked_add(amount)
            .ok_or_else(|| TransactionError::arithmetic_overflow("transfer", destination_id))?;

        from.balance = remaining;
        to.balance = credited;
        from.balance
    };

    store.save(Arc::clone(&destination));
    drop(pair);

    Ok(format!(
        "Funds transferred to {}. Source New Balance: {}",
        destination_id.short(),
        source_balance
    ))
}
