//! Tests for the account balance query service.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)] // Test code can use unwrap/expect/panic

use chrono::{Duration, TimeZone, Utc};
use moneta_core::account::AccountId;
use moneta_core::activity::Activity;
use moneta_core::money::Money;
use moneta_core::ports::LoadAccountError;
use moneta_runtime::GetAccountBalanceService;
use moneta_testing::{FixedClock, InMemoryAccounts};
use std::sync::Arc;

#[tokio::test]
async fn balance_reflects_all_persisted_activity() {
    let accounts = Arc::new(InMemoryAccounts::new());
    let me = AccountId::new(1);
    let other = AccountId::new(2);
    accounts.add_account(me, Money::of(555));

    let now = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
    let earlier = now - Duration::days(3);
    accounts.add_activity(Activity::new(me, other, me, earlier, Money::of(999)));
    accounts.add_activity(Activity::new(me, other, me, earlier, Money::of(1)));

    let service = GetAccountBalanceService::new(
        Arc::clone(&accounts) as Arc<dyn moneta_core::ports::AccountLoader>,
        Arc::new(FixedClock::new(now)),
    );

    // Balance as of now: every past activity is folded into the baseline.
    assert_eq!(service.account_balance(me).await, Ok(Money::of(1555)));
}

#[tokio::test]
async fn unknown_account_is_reported() {
    let accounts = Arc::new(InMemoryAccounts::new());
    let missing = AccountId::new(404);
    let service = GetAccountBalanceService::new(
        Arc::clone(&accounts) as Arc<dyn moneta_core::ports::AccountLoader>,
        Arc::new(FixedClock::new(Utc::now())),
    );

    assert_eq!(
        service.account_balance(missing).await,
        Err(LoadAccountError::NotFound(missing))
    );
}
