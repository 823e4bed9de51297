//! Shipped [`AccountLock`] implementations.
//!
//! Which one a deployment uses is a composition-time decision:
//! [`InProcessAccountLock`] for real mutual exclusion inside one process,
//! [`NoOpAccountLock`] where serialization is provided elsewhere (or not
//! needed, as in single-threaded tests).

use moneta_core::account::AccountId;
use moneta_core::ports::{AccountLock, BoxFuture};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};
use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};

/// Per-account mutual exclusion backed by a keyed map of async mutexes.
///
/// `lock_account` parks the calling task until the account's mutex is free;
/// the acquired guard is retained in a held-guard table so that
/// `release_account` can drop it from any task. Releasing an account that is
/// not held is a no-op.
///
/// Locking the same account twice without releasing it in between suspends
/// forever; the command layer rejects self-transfers for exactly this
/// reason.
#[derive(Default)]
pub struct InProcessAccountLock {
    mutexes: Mutex<HashMap<AccountId, Arc<AsyncMutex<()>>>>,
    held: Mutex<HashMap<AccountId, OwnedMutexGuard<()>>>,
}

impl InProcessAccountLock {
    /// Creates an empty lock registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn mutex_for(&self, account_id: AccountId) -> Arc<AsyncMutex<()>> {
        let mut mutexes = self
            .mutexes
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        Arc::clone(
            mutexes
                .entry(account_id)
                .or_insert_with(|| Arc::new(AsyncMutex::new(()))),
        )
    }
}

impl AccountLock for InProcessAccountLock {
    fn lock_account(&self, account_id: AccountId) -> BoxFuture<'_, ()> {
        Box::pin(async move {
            // The registry lock is dropped before suspending on the
            // per-account mutex.
            let mutex = self.mutex_for(account_id);
            let guard = mutex.lock_owned().await;
            tracing::trace!(%account_id, "account locked");
            self.held
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .insert(account_id, guard);
        })
    }

    fn release_account(&self, account_id: AccountId) {
        let released = self
            .held
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&account_id);
        if released.is_some() {
            tracing::trace!(%account_id, "account released");
        }
        drop(released);

        // Evict the registry entry once nobody holds or awaits it, so the
        // map does not grow with every account id ever locked. Cloning out
        // of the registry happens under this same lock, so the count cannot
        // change underneath the check.
        let mut mutexes = self
            .mutexes
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        if mutexes
            .get(&account_id)
            .is_some_and(|mutex| Arc::strong_count(mutex) == 1)
        {
            mutexes.remove(&account_id);
        }
    }
}

/// Lock that does nothing.
///
/// Mirrors the reference no-op implementation: every acquire succeeds
/// immediately and release is ignored. Only sound where concurrent access to
/// an account cannot happen.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoOpAccountLock;

impl AccountLock for NoOpAccountLock {
    fn lock_account(&self, _account_id: AccountId) -> BoxFuture<'_, ()> {
        Box::pin(async {})
    }

    fn release_account(&self, _account_id: AccountId) {}
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)] // Test code can use unwrap/expect/panic

    use super::*;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::time::Duration;

    #[tokio::test]
    async fn lock_and_release_round_trip() {
        let lock = InProcessAccountLock::new();
        let id = AccountId::new(1);

        lock.lock_account(id).await;
        lock.release_account(id);
        // Re-acquirable after release.
        lock.lock_account(id).await;
        lock.release_account(id);
    }

    #[tokio::test]
    async fn idle_registry_entries_are_evicted_on_release() {
        let lock = InProcessAccountLock::new();
        let id = AccountId::new(1);

        lock.lock_account(id).await;
        assert_eq!(lock.mutexes.lock().unwrap().len(), 1);

        lock.release_account(id);
        assert!(
            lock.mutexes.lock().unwrap().is_empty(),
            "registry should not retain entries for unheld accounts"
        );
    }

    #[tokio::test]
    async fn releasing_unheld_account_is_a_noop() {
        let lock = InProcessAccountLock::new();
        lock.release_account(AccountId::new(7));
    }

    #[tokio::test]
    async fn second_acquire_waits_for_release() {
        let lock = Arc::new(InProcessAccountLock::new());
        let id = AccountId::new(1);
        let acquired = Arc::new(AtomicBool::new(false));

        lock.lock_account(id).await;

        let contender = {
            let lock = Arc::clone(&lock);
            let acquired = Arc::clone(&acquired);
            tokio::spawn(async move {
                lock.lock_account(id).await;
                acquired.store(true, Ordering::SeqCst);
                lock.release_account(id);
            })
        };

        tokio::time::sleep(Duration::from_millis(20)).await;
        assert!(!acquired.load(Ordering::SeqCst), "lock should still be held");

        lock.release_account(id);
        contender.await.unwrap();
        assert!(acquired.load(Ordering::SeqCst));
        // The contender held a registry clone across the first release, so
        // eviction only happens on its own release.
        assert!(lock.mutexes.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn distinct_accounts_do_not_contend() {
        let lock = InProcessAccountLock::new();

        lock.lock_account(AccountId::new(1)).await;
        lock.lock_account(AccountId::new(2)).await;

        lock.release_account(AccountId::new(1));
        lock.release_account(AccountId::new(2));
    }

    #[tokio::test]
    async fn noop_lock_never_blocks() {
        let lock = NoOpAccountLock;
        let id = AccountId::new(1);

        lock.lock_account(id).await;
        lock.lock_account(id).await;
        lock.release_account(id);
        lock.release_account(id);
    }
}
