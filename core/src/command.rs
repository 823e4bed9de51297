//! Incoming commands for the transfer use case.

use crate::account::AccountId;
use crate::money::Money;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Validation errors raised when constructing a command.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    /// The transfer amount must be strictly positive.
    #[error("transfer amount must be positive, got {0}")]
    NonPositiveAmount(Money),

    /// Source and target accounts must differ. A self-transfer would acquire
    /// the same account lock twice.
    #[error("source and target account are the same: {0}")]
    SameAccount(AccountId),
}

/// A validated request to move money from one account to another.
///
/// Construction is the validation boundary: a `SendMoneyCommand` that exists
/// is well-formed, so the service does not re-check the amount or the
/// account pair.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SendMoneyCommand {
    source_account_id: AccountId,
    target_account_id: AccountId,
    money: Money,
}

impl SendMoneyCommand {
    /// Creates a validated command.
    ///
    /// # Errors
    ///
    /// - [`CommandError::NonPositiveAmount`] if `money` is zero or negative.
    /// - [`CommandError::SameAccount`] if source and target are equal.
    pub fn new(
        source_account_id: AccountId,
        target_account_id: AccountId,
        money: Money,
    ) -> Result<Self, CommandError> {
        if !money.is_positive() {
            return Err(CommandError::NonPositiveAmount(money));
        }
        if source_account_id == target_account_id {
            return Err(CommandError::SameAccount(source_account_id));
        }
        Ok(Self {
            source_account_id,
            target_account_id,
            money,
        })
    }

    /// The account the money is withdrawn from.
    #[must_use]
    pub const fn source_account_id(&self) -> AccountId {
        self.source_account_id
    }

    /// The account the money is deposited to.
    #[must_use]
    pub const fn target_account_id(&self) -> AccountId {
        self.target_account_id
    }

    /// The amount to transfer.
    #[must_use]
    pub const fn money(&self) -> &Money {
        &self.money
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)] // Test code can use unwrap/expect/panic

    use super::*;

    #[test]
    fn valid_command_is_constructed() {
        let command = SendMoneyCommand::new(AccountId::new(41), AccountId::new(42), Money::of(500))
            .expect("valid command");

        assert_eq!(command.source_account_id(), AccountId::new(41));
        assert_eq!(command.target_account_id(), AccountId::new(42));
        assert_eq!(*command.money(), Money::of(500));
    }

    #[test]
    fn zero_amount_is_rejected() {
        let result = SendMoneyCommand::new(AccountId::new(41), AccountId::new(42), Money::zero());
        assert_eq!(result, Err(CommandError::NonPositiveAmount(Money::zero())));
    }

    #[test]
    fn negative_amount_is_rejected() {
        let result = SendMoneyCommand::new(AccountId::new(41), AccountId::new(42), Money::of(-1));
        assert!(matches!(result, Err(CommandError::NonPositiveAmount(_))));
    }

    #[test]
    fn self_transfer_is_rejected() {
        let id = AccountId::new(42);
        let result = SendMoneyCommand::new(id, id, Money::of(500));
        assert_eq!(result, Err(CommandError::SameAccount(id)));
    }
}
