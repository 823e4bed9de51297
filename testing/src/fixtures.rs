//! Builder-style test data.
//!
//! Defaults give a persisted account (id 42, baseline 999) with two default
//! activities in its window; override only what a test cares about.

use chrono::{DateTime, TimeZone, Utc};
use moneta_core::account::{Account, AccountId};
use moneta_core::activity::{Activity, ActivityId};
use moneta_core::money::Money;
use moneta_core::window::ActivityWindow;

/// A default account builder: id 42, baseline 999, two default activities.
#[must_use]
pub fn default_account() -> AccountBuilder {
    AccountBuilder::default()
        .with_account_id(AccountId::new(42))
        .with_baseline_balance(Money::of(999))
        .with_activity_window(ActivityWindow::new(vec![
            default_activity().build(),
            default_activity().build(),
        ]))
}

/// A default activity builder: account 42 receives 999 from account 41.
#[must_use]
pub fn default_activity() -> ActivityBuilder {
    ActivityBuilder::default()
        .with_owner_account(AccountId::new(42))
        .with_source_account(AccountId::new(41))
        .with_target_account(AccountId::new(42))
        .with_money(Money::of(999))
}

/// Builder for [`Account`] test instances.
#[derive(Default)]
pub struct AccountBuilder {
    account_id: Option<AccountId>,
    baseline_balance: Option<Money>,
    activity_window: Option<ActivityWindow>,
}

impl AccountBuilder {
    /// Sets the account id. Without one, `build` produces an unsaved
    /// account.
    #[must_use]
    pub const fn with_account_id(mut self, account_id: AccountId) -> Self {
        self.account_id = Some(account_id);
        self
    }

    /// Sets the baseline balance.
    #[must_use]
    pub fn with_baseline_balance(mut self, baseline_balance: Money) -> Self {
        self.baseline_balance = Some(baseline_balance);
        self
    }

    /// Sets the activity window.
    #[must_use]
    pub fn with_activity_window(mut self, activity_window: ActivityWindow) -> Self {
        self.activity_window = Some(activity_window);
        self
    }

    /// Builds the account.
    #[must_use]
    pub fn build(self) -> Account {
        let baseline = self.baseline_balance.unwrap_or_else(Money::zero);
        let window = self.activity_window.unwrap_or_else(ActivityWindow::empty);
        match self.account_id {
            Some(id) => Account::with_id(id, baseline, window),
            None => Account::unsaved(baseline, window),
        }
    }
}

/// Builder for [`Activity`] test instances.
pub struct ActivityBuilder {
    id: Option<ActivityId>,
    owner_account_id: AccountId,
    source_account_id: AccountId,
    target_account_id: AccountId,
    timestamp: DateTime<Utc>,
    money: Money,
}

impl Default for ActivityBuilder {
    fn default() -> Self {
        Self {
            id: None,
            owner_account_id: AccountId::new(42),
            source_account_id: AccountId::new(42),
            target_account_id: AccountId::new(41),
            timestamp: default_timestamp(),
            money: Money::of(999),
        }
    }
}

fn default_timestamp() -> DateTime<Utc> {
    // Any fixed instant; tests override when ordering matters.
    Utc.with_ymd_and_hms(2019, 8, 8, 8, 0, 0)
        .single()
        .unwrap_or_else(Utc::now)
}

impl ActivityBuilder {
    /// Sets a persistence id.
    #[must_use]
    pub const fn with_id(mut self, id: ActivityId) -> Self {
        self.id = Some(id);
        self
    }

    /// Sets the owning account.
    #[must_use]
    pub const fn with_owner_account(mut self, account_id: AccountId) -> Self {
        self.owner_account_id = account_id;
        self
    }

    /// Sets the source account.
    #[must_use]
    pub const fn with_source_account(mut self, account_id: AccountId) -> Self {
        self.source_account_id = account_id;
        self
    }

    /// Sets the target account.
    #[must_use]
    pub const fn with_target_account(mut self, account_id: AccountId) -> Self {
        self.target_account_id = account_id;
        self
    }

    /// Sets the timestamp.
    #[must_use]
    pub const fn with_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = timestamp;
        self
    }

    /// Sets the amount.
    #[must_use]
    pub fn with_money(mut self, money: Money) -> Self {
        self.money = money;
        self
    }

    /// Builds the activity.
    #[must_use]
    pub fn build(self) -> Activity {
        let activity = Activity::new(
            self.owner_account_id,
            self.source_account_id,
            self.target_account_id,
            self.timestamp,
            self.money,
        );
        match self.id {
            Some(id) => activity.with_id(id),
            None => activity,
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)] // Test code can use unwrap/expect/panic

    use super::*;

    #[test]
    fn default_account_matches_reference_data() {
        let account = default_account().build();

        assert_eq!(account.id(), Some(AccountId::new(42)));
        assert_eq!(*account.baseline_balance(), Money::of(999));
        assert_eq!(account.activity_window().len(), 2);
        // Two deposits of 999 on top of the baseline.
        assert_eq!(account.calculate_balance(), Money::of(999 + 999 + 999));
    }

    #[test]
    fn builder_without_id_gives_an_unsaved_account() {
        let account = AccountBuilder::default()
            .with_baseline_balance(Money::of(5))
            .build();

        assert!(account.id().is_none());
    }
}
