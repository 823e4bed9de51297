//! The account aggregate.
//!
//! An [`Account`] holds a baseline balance plus the window of recent
//! activity. The current balance is always re-derived from the window on top
//! of the baseline; there is no cached running balance, so correctness
//! depends only on the window's contents.

use crate::activity::Activity;
use crate::money::Money;
use crate::window::ActivityWindow;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Opaque account identifier. Two ids are equal iff their underlying values
/// are equal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct AccountId(i64);

impl AccountId {
    /// Creates an `AccountId` from its raw value.
    #[must_use]
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    /// Returns the raw value.
    #[must_use]
    pub const fn value(self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for AccountId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An account holding some amount of money.
///
/// The aggregate combines the balance the account had before the start of
/// its activity window (the baseline) with that window. It is the sole owner
/// of its window: all mutation goes through [`Account::withdraw`] and
/// [`Account::deposit`], and a loaded account is exclusively held by the one
/// orchestration call that loaded it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    id: Option<AccountId>,
    baseline_balance: Money,
    activity_window: ActivityWindow,
}

impl Account {
    /// Creates an account loaded from storage, with an assigned id.
    #[must_use]
    pub const fn with_id(
        id: AccountId,
        baseline_balance: Money,
        activity_window: ActivityWindow,
    ) -> Self {
        Self {
            id: Some(id),
            baseline_balance,
            activity_window,
        }
    }

    /// Creates a new account that has not been persisted yet and therefore
    /// has no id.
    #[must_use]
    pub const fn unsaved(baseline_balance: Money, activity_window: ActivityWindow) -> Self {
        Self {
            id: None,
            baseline_balance,
            activity_window,
        }
    }

    /// The account's id, if it has been persisted.
    #[must_use]
    pub const fn id(&self) -> Option<AccountId> {
        self.id
    }

    /// The balance the account had before the start of the activity window.
    #[must_use]
    pub const fn baseline_balance(&self) -> &Money {
        &self.baseline_balance
    }

    /// Read access to the activity window.
    #[must_use]
    pub const fn activity_window(&self) -> &ActivityWindow {
        &self.activity_window
    }

    /// Current total balance: the baseline plus the net of the activity
    /// window. Re-derived from the full window on every call.
    #[must_use]
    pub fn calculate_balance(&self) -> Money {
        match self.id {
            Some(id) => self
                .baseline_balance
                .add(&self.activity_window.calculate_balance(id)),
            // An unsaved account cannot own window entries yet.
            None => self.baseline_balance.clone(),
        }
    }

    /// Tries to withdraw `money` from this account toward
    /// `target_account_id`.
    ///
    /// Succeeds only if the balance covers the amount; on rejection the
    /// window is left untouched. An account without an id cannot be a
    /// withdrawal source and is rejected the same way.
    pub fn withdraw(
        &mut self,
        money: &Money,
        target_account_id: AccountId,
        timestamp: DateTime<Utc>,
    ) -> bool {
        let Some(id) = self.id else {
            return false;
        };

        if !self.may_withdraw(money) {
            return false;
        }

        let withdrawal = Activity::new(id, id, target_account_id, timestamp, money.clone());
        self.activity_window.add_activity(withdrawal);
        true
    }

    fn may_withdraw(&self, money: &Money) -> bool {
        self.calculate_balance().add(&money.negate()).is_positive_or_zero()
    }

    /// Deposits `money` into this account from `source_account_id`.
    ///
    /// Deposits never fail by business rule; there is no upper-balance cap
    /// at this layer. Only an account without an id rejects the deposit,
    /// since the movement could not be attributed to it.
    pub fn deposit(
        &mut self,
        money: &Money,
        source_account_id: AccountId,
        timestamp: DateTime<Utc>,
    ) -> bool {
        let Some(id) = self.id else {
            return false;
        };

        let deposit = Activity::new(id, source_account_id, id, timestamp, money.clone());
        self.activity_window.add_activity(deposit);
        true
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)] // Test code can use unwrap/expect/panic

    use super::*;
    use chrono::TimeZone;

    fn at(day: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2019, 8, day, 0, 0, 0).unwrap()
    }

    fn account_with_deposits(id: AccountId) -> Account {
        let other = AccountId::new(99);
        Account::with_id(
            id,
            Money::of(555),
            ActivityWindow::new(vec![
                Activity::new(id, other, id, at(3), Money::of(999)),
                Activity::new(id, other, id, at(4), Money::of(1)),
            ]),
        )
    }

    #[test]
    fn calculates_balance_from_baseline_and_window() {
        let id = AccountId::new(1);
        let account = account_with_deposits(id);

        assert_eq!(account.calculate_balance(), Money::of(1555));
    }

    #[test]
    fn withdrawal_succeeds_within_balance() {
        let id = AccountId::new(1);
        let mut account = account_with_deposits(id);

        let success = account.withdraw(&Money::of(555), AccountId::new(99), at(5));

        assert!(success);
        assert_eq!(account.activity_window().len(), 3);
        assert_eq!(account.calculate_balance(), Money::of(1000));
    }

    #[test]
    fn withdrawal_failure_leaves_no_side_effect() {
        let id = AccountId::new(1);
        let mut account = account_with_deposits(id);

        let success = account.withdraw(&Money::of(1556), AccountId::new(99), at(5));

        assert!(!success);
        assert_eq!(account.activity_window().len(), 2);
        assert_eq!(account.calculate_balance(), Money::of(1555));
    }

    #[test]
    fn withdrawal_down_to_exactly_zero_succeeds() {
        let id = AccountId::new(1);
        let mut account = account_with_deposits(id);

        assert!(account.withdraw(&Money::of(1555), AccountId::new(99), at(5)));
        assert_eq!(account.calculate_balance(), Money::zero());
    }

    #[test]
    fn deposit_always_succeeds() {
        let id = AccountId::new(1);
        let mut account = account_with_deposits(id);

        let success = account.deposit(&Money::of(445), AccountId::new(99), at(5));

        assert!(success);
        assert_eq!(account.activity_window().len(), 3);
        assert_eq!(account.calculate_balance(), Money::of(2000));
    }

    #[test]
    fn unsaved_account_balance_is_the_baseline() {
        let account = Account::unsaved(Money::of(100), ActivityWindow::empty());
        assert!(account.id().is_none());
        assert_eq!(account.calculate_balance(), Money::of(100));
    }

    #[test]
    fn unsaved_account_rejects_mutations() {
        let mut account = Account::unsaved(Money::of(100), ActivityWindow::empty());

        assert!(!account.withdraw(&Money::of(10), AccountId::new(2), at(5)));
        assert!(!account.deposit(&Money::of(10), AccountId::new(2), at(5)));
        assert!(account.activity_window().is_empty());
    }
}
