//! Freeze strategy: one-way block on further balance changes

use crate::types::{Account, TransactionError};

/// Mark `account` frozen; idempotent
pub fn apply(account: &Account) -> Result<String, TransactionError> {
    account.lock().frozen = true;
    Ok("Account has been FROZEN.".to_string())
}
