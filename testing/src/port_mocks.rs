//! Mock port implementations.
//!
//! In-memory stand-ins for the storage and lock ports, instrumented so tests
//! can assert not just outcomes but the interactions that produced them:
//! which accounts were locked, in what order, and what was persisted.

use chrono::{DateTime, Utc};
use moneta_core::account::{Account, AccountId};
use moneta_core::activity::{Activity, ActivityId};
use moneta_core::money::Money;
use moneta_core::ports::{
    AccountLoader, AccountLock, AccountStateUpdater, BoxFuture, LoadAccountError,
    UpdateAccountError,
};
use moneta_core::window::ActivityWindow;
use std::collections::{HashMap, HashSet};
use std::sync::{Mutex, PoisonError};

#[derive(Default)]
struct Store {
    baselines: HashMap<AccountId, Money>,
    activities: Vec<Activity>,
    // Accounts that load without an id, simulating a broken mapping.
    id_less: HashSet<AccountId>,
    next_activity_id: i64,
    load_count: usize,
    updated: Vec<AccountId>,
    fail_updates: bool,
}

/// In-memory account store implementing [`AccountLoader`] and
/// [`AccountStateUpdater`].
///
/// `load_account` rebuilds an [`Account`] the way a persistence adapter
/// would: the baseline balance is the stored opening balance plus the net of
/// all activities strictly before the baseline date, and the window holds
/// the account's own activities from that date onward.
#[derive(Default)]
pub struct InMemoryAccounts {
    store: Mutex<Store>,
}

impl InMemoryAccounts {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn locked(&self) -> std::sync::MutexGuard<'_, Store> {
        self.store.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Registers an account with its opening balance.
    pub fn add_account(&self, account_id: AccountId, opening_balance: Money) {
        self.locked().baselines.insert(account_id, opening_balance);
    }

    /// Registers an account that will load without an id, violating the
    /// loader contract on purpose.
    pub fn add_id_less_account(&self, account_id: AccountId, opening_balance: Money) {
        let mut store = self.locked();
        store.baselines.insert(account_id, opening_balance);
        store.id_less.insert(account_id);
    }

    /// Records a persisted activity directly, bypassing the domain.
    pub fn add_activity(&self, activity: Activity) {
        let mut store = self.locked();
        store.next_activity_id += 1;
        let id = ActivityId::new(store.next_activity_id);
        store.activities.push(activity.with_id(id));
    }

    /// Makes every subsequent `update_activities` call fail.
    pub fn fail_updates(&self) {
        self.locked().fail_updates = true;
    }

    /// How many times `load_account` has been called.
    #[must_use]
    pub fn load_count(&self) -> usize {
        self.locked().load_count
    }

    /// Account ids passed to `update_activities`, in call order.
    #[must_use]
    pub fn updated_accounts(&self) -> Vec<AccountId> {
        self.locked().updated.clone()
    }

    /// Current balance of an account as the store sees it.
    #[must_use]
    pub fn stored_balance(&self, account_id: AccountId) -> Option<Money> {
        let store = self.locked();
        let opening = store.baselines.get(&account_id)?;
        let balance = store
            .activities
            .iter()
            .fold(opening.clone(), |sum, activity| {
                if activity.owner_account_id != account_id {
                    sum
                } else if activity.target_account_id == account_id {
                    sum.add(&activity.money)
                } else {
                    sum.add(&activity.money.negate())
                }
            });
        Some(balance)
    }
}

impl AccountLoader for InMemoryAccounts {
    fn load_account(
        &self,
        account_id: AccountId,
        baseline_date: DateTime<Utc>,
    ) -> BoxFuture<'_, Result<Account, LoadAccountError>> {
        Box::pin(async move {
            let mut store = self.locked();
            store.load_count += 1;

            let Some(opening) = store.baselines.get(&account_id).cloned() else {
                return Err(LoadAccountError::NotFound(account_id));
            };

            let baseline = store
                .activities
                .iter()
                .filter(|activity| {
                    activity.owner_account_id == account_id && activity.timestamp < baseline_date
                })
                .fold(opening, |sum, activity| {
                    if activity.target_account_id == account_id {
                        sum.add(&activity.money)
                    } else {
                        sum.add(&activity.money.negate())
                    }
                });

            let window = ActivityWindow::new(
                store
                    .activities
                    .iter()
                    .filter(|activity| {
                        activity.owner_account_id == account_id
                            && activity.timestamp >= baseline_date
                    })
                    .cloned()
                    .collect(),
            );

            if store.id_less.contains(&account_id) {
                Ok(Account::unsaved(baseline, window))
            } else {
                Ok(Account::with_id(account_id, baseline, window))
            }
        })
    }
}

impl AccountStateUpdater for InMemoryAccounts {
    fn update_activities(&self, account: &Account) -> BoxFuture<'_, Result<(), UpdateAccountError>> {
        let new_activities: Vec<Activity> = account
            .activity_window()
            .activities()
            .iter()
            .filter(|activity| activity.id.is_none())
            .cloned()
            .collect();
        let account_id = account.id();

        Box::pin(async move {
            let mut store = self.locked();
            if store.fail_updates {
                return Err(UpdateAccountError::Storage(
                    "simulated storage failure".to_string(),
                ));
            }
            if let Some(id) = account_id {
                store.updated.push(id);
            }
            for activity in new_activities {
                store.next_activity_id += 1;
                let id = ActivityId::new(store.next_activity_id);
                store.activities.push(activity.with_id(id));
            }
            Ok(())
        })
    }
}

/// One recorded lock interaction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LockEvent {
    /// `lock_account` was called for the account.
    Lock(AccountId),
    /// `release_account` was called for the account.
    Release(AccountId),
}

/// [`AccountLock`] that records every interaction and never blocks.
#[derive(Default)]
pub struct RecordingAccountLock {
    events: Mutex<Vec<LockEvent>>,
}

impl RecordingAccountLock {
    /// Creates a recording lock with no history.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything that happened, in order.
    #[must_use]
    pub fn events(&self) -> Vec<LockEvent> {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Number of `lock_account` calls for the account.
    #[must_use]
    pub fn lock_count(&self, account_id: AccountId) -> usize {
        self.events()
            .iter()
            .filter(|event| **event == LockEvent::Lock(account_id))
            .count()
    }

    /// Number of `release_account` calls for the account.
    #[must_use]
    pub fn release_count(&self, account_id: AccountId) -> usize {
        self.events()
            .iter()
            .filter(|event| **event == LockEvent::Release(account_id))
            .count()
    }

    /// Whether every lock taken has been released again.
    #[must_use]
    pub fn all_released(&self) -> bool {
        let mut held: HashSet<AccountId> = HashSet::new();
        for event in self.events() {
            match event {
                LockEvent::Lock(id) => {
                    held.insert(id);
                }
                LockEvent::Release(id) => {
                    held.remove(&id);
                }
            }
        }
        held.is_empty()
    }

    fn record(&self, event: LockEvent) {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(event);
    }
}

impl AccountLock for RecordingAccountLock {
    fn lock_account(&self, account_id: AccountId) -> BoxFuture<'_, ()> {
        self.record(LockEvent::Lock(account_id));
        Box::pin(async {})
    }

    fn release_account(&self, account_id: AccountId) {
        self.record(LockEvent::Release(account_id));
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)] // Test code can use unwrap/expect/panic

    use super::*;
    use chrono::TimeZone;

    #[tokio::test]
    async fn loader_splits_baseline_and_window_at_the_baseline_date() {
        let accounts = InMemoryAccounts::new();
        let me = AccountId::new(1);
        let other = AccountId::new(2);
        accounts.add_account(me, Money::of(100));

        let before = Utc.with_ymd_and_hms(2019, 8, 1, 0, 0, 0).unwrap();
        let after = Utc.with_ymd_and_hms(2019, 8, 10, 0, 0, 0).unwrap();
        let cut = Utc.with_ymd_and_hms(2019, 8, 5, 0, 0, 0).unwrap();

        accounts.add_activity(Activity::new(me, other, me, before, Money::of(50)));
        accounts.add_activity(Activity::new(me, me, other, after, Money::of(30)));

        let account = accounts.load_account(me, cut).await.unwrap();

        assert_eq!(*account.baseline_balance(), Money::of(150));
        assert_eq!(account.activity_window().len(), 1);
        assert_eq!(account.calculate_balance(), Money::of(120));
    }

    #[tokio::test]
    async fn loader_reports_unknown_accounts() {
        let accounts = InMemoryAccounts::new();
        let missing = AccountId::new(404);

        let result = accounts.load_account(missing, Utc::now()).await;

        assert_eq!(result, Err(LoadAccountError::NotFound(missing)));
    }

    #[tokio::test]
    async fn updater_persists_only_new_activities() {
        let accounts = InMemoryAccounts::new();
        let me = AccountId::new(1);
        let other = AccountId::new(2);
        accounts.add_account(me, Money::of(0));

        let now = Utc.with_ymd_and_hms(2019, 8, 5, 0, 0, 0).unwrap();
        let mut account = accounts.load_account(me, now).await.unwrap();
        assert!(account.deposit(&Money::of(25), other, now));

        accounts.update_activities(&account).await.unwrap();

        assert_eq!(accounts.updated_accounts(), vec![me]);
        assert_eq!(accounts.stored_balance(me), Some(Money::of(25)));

        // The stored copy carries an id now; reloading and persisting again
        // adds nothing.
        let reloaded = accounts.load_account(me, now).await.unwrap();
        accounts.update_activities(&reloaded).await.unwrap();
        assert_eq!(accounts.stored_balance(me), Some(Money::of(25)));
    }

    #[test]
    fn recording_lock_tracks_outstanding_locks() {
        let lock = RecordingAccountLock::new();
        let id = AccountId::new(1);

        lock.record(LockEvent::Lock(id));
        assert!(!lock.all_released());
        lock.record(LockEvent::Release(id));
        assert!(lock.all_released());
    }
}
