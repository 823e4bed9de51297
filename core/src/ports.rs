//! Ports: the abstract capabilities the transfer orchestration consumes.
//!
//! The core never talks to storage or synchronization primitives directly.
//! It consumes three ports, selected at composition time:
//!
//! - [`AccountLoader`] — reconstructs an [`Account`] bounded by a baseline
//!   date.
//! - [`AccountLock`] — per-account mutual exclusion.
//! - [`AccountStateUpdater`] — persists the activities appended during an
//!   orchestration call.
//!
//! # Dyn Compatibility
//!
//! The traits use explicit `Pin<Box<dyn Future>>` returns instead of
//! `async fn` to enable trait object usage (`Arc<dyn AccountLoader>` etc.),
//! which is how the services hold their collaborators.

use crate::account::{Account, AccountId};
use chrono::{DateTime, Utc};
use std::future::Future;
use std::pin::Pin;
use thiserror::Error;

/// Boxed future alias used by all port methods.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Errors raised while loading an account.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LoadAccountError {
    /// No account exists under the given id.
    #[error("account not found: {0}")]
    NotFound(AccountId),

    /// The underlying store failed.
    #[error("account storage error: {0}")]
    Storage(String),
}

/// Errors raised while persisting account activities.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UpdateAccountError {
    /// The underlying store failed.
    #[error("account storage error: {0}")]
    Storage(String),
}

/// Loads accounts from the underlying store.
///
/// The returned aggregate carries the baseline balance as of
/// `baseline_date` plus the window of activities from that date onward.
/// Loading is per request; accounts are never cached across calls.
pub trait AccountLoader: Send + Sync {
    /// Loads the account with the given id, bounded by `baseline_date`.
    ///
    /// # Errors
    ///
    /// - [`LoadAccountError::NotFound`] if no such account exists.
    /// - [`LoadAccountError::Storage`] if the store fails.
    fn load_account(
        &self,
        account_id: AccountId,
        baseline_date: DateTime<Utc>,
    ) -> BoxFuture<'_, Result<Account, LoadAccountError>>;
}

/// Per-account mutual exclusion.
///
/// `lock_account` is the only suspension point in the transfer flow: it may
/// park the caller until the lock becomes available. `release_account` must
/// return promptly and must be safe to call for an account that is not
/// currently held (a no-op in that case).
pub trait AccountLock: Send + Sync {
    /// Acquires the lock for the given account, suspending until available.
    fn lock_account(&self, account_id: AccountId) -> BoxFuture<'_, ()>;

    /// Releases the lock for the given account. No-op when not held.
    fn release_account(&self, account_id: AccountId);
}

/// Persists the state changes an orchestration call made to an account.
///
/// Implementations persist only the newly appended activities (those without
/// an [`crate::activity::ActivityId`]) and are expected to be idempotent
/// when called twice with an unchanged account.
pub trait AccountStateUpdater: Send + Sync {
    /// Persists the account's new activities.
    ///
    /// # Errors
    ///
    /// [`UpdateAccountError::Storage`] if the store fails. The caller treats
    /// this as fatal; there is no compensation across the two legs of a
    /// transfer.
    fn update_activities(&self, account: &Account) -> BoxFuture<'_, Result<(), UpdateAccountError>>;
}
