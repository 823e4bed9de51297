//! # Moneta Runtime
//!
//! Orchestration services for the Moneta account ledger.
//!
//! This crate wires the domain model from `moneta-core` to the ports it
//! consumes:
//!
//! - **`SendMoneyService`**: the transfer orchestration — load both
//!   accounts, check the threshold, lock, withdraw, lock, deposit, persist,
//!   unlock, with the partial-failure discipline each step requires
//! - **`GetAccountBalanceService`**: the balance query
//! - **Lock implementations**: an in-process keyed lock and a no-op lock,
//!   selected at composition time
//!
//! ## Example
//!
//! ```ignore
//! use moneta_runtime::SendMoneyService;
//!
//! let service = SendMoneyService::new(
//!     loader,
//!     lock,
//!     updater,
//!     clock,
//!     TransferProperties::default(),
//! );
//!
//! let command = SendMoneyCommand::new(source, target, Money::of(500))?;
//! let sent = service.send_money(command).await?;
//! ```

use moneta_core::account::{Account, AccountId};
use moneta_core::command::SendMoneyCommand;
use moneta_core::config::TransferProperties;
use moneta_core::environment::Clock;
use moneta_core::money::Money;
use moneta_core::ports::{AccountLoader, AccountLock, AccountStateUpdater, LoadAccountError};
use std::sync::Arc;

/// Shipped `AccountLock` implementations
pub mod lock;

/// Error types for the orchestration services
pub mod error {
    use moneta_core::money::Money;
    use moneta_core::ports::{LoadAccountError, UpdateAccountError};
    use thiserror::Error;

    /// Which side of a transfer an error refers to.
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub enum AccountSide {
        /// The account money is withdrawn from.
        Source,
        /// The account money is deposited to.
        Target,
    }

    impl std::fmt::Display for AccountSide {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            match self {
                Self::Source => write!(f, "source account"),
                Self::Target => write!(f, "target account"),
            }
        }
    }

    /// Fatal conditions aborting a transfer.
    ///
    /// Business rejection (insufficient funds) is not an error: it surfaces
    /// as `Ok(false)` from `send_money` so that a normal rejection is cheap
    /// and does not unwind the call path.
    #[derive(Error, Debug, Clone, PartialEq, Eq)]
    pub enum SendMoneyError {
        /// The requested amount exceeds the configured per-transfer maximum.
        /// Raised before any account is loaded or locked.
        #[error("maximum transfer threshold exceeded: tried to transfer {actual} but threshold is {threshold}")]
        ThresholdExceeded {
            /// The configured maximum.
            threshold: Money,
            /// The requested amount.
            actual: Money,
        },

        /// The configured history lookback is not a positive number of days.
        /// Surfaced at call time, not at startup.
        #[error("history lookback days must be positive, but was: {0}")]
        InvalidHistoryLookback(i64),

        /// A loaded account came back without an assigned id, violating the
        /// loader's contract.
        #[error("{0} id is missing after load")]
        MissingAccountId(AccountSide),

        /// Loading one of the accounts failed.
        #[error(transparent)]
        Load(#[from] LoadAccountError),

        /// Persisting the mutated accounts failed. Both locks have been
        /// released; the two legs are not compensated.
        #[error(transparent)]
        Update(#[from] UpdateAccountError),
    }
}

use error::{AccountSide, SendMoneyError};

/// Orchestrates a money transfer between two accounts.
///
/// One `send_money` call runs the whole flow synchronously on the calling
/// task: threshold check, load, lock source, withdraw, lock target, deposit,
/// persist, unlock. Lock acquisition is the only suspension point.
///
/// # Lock ordering
///
/// Locks are taken in caller-supplied order, source then target; they are
/// not canonicalized by account id. Two concurrent opposite-direction
/// transfers over the same pair of accounts can therefore deadlock under a
/// blocking lock implementation. Withdrawing before touching the target lock
/// is deliberate: a rejected withdrawal never contends on the target.
pub struct SendMoneyService {
    loader: Arc<dyn AccountLoader>,
    lock: Arc<dyn AccountLock>,
    updater: Arc<dyn AccountStateUpdater>,
    clock: Arc<dyn Clock>,
    properties: TransferProperties,
}

impl SendMoneyService {
    /// Creates a service from its collaborators and configuration.
    #[must_use]
    pub fn new(
        loader: Arc<dyn AccountLoader>,
        lock: Arc<dyn AccountLock>,
        updater: Arc<dyn AccountStateUpdater>,
        clock: Arc<dyn Clock>,
        properties: TransferProperties,
    ) -> Self {
        Self {
            loader,
            lock,
            updater,
            clock,
            properties,
        }
    }

    /// Runs one transfer.
    ///
    /// Returns `Ok(true)` on success and `Ok(false)` when a business rule
    /// rejected the transfer (insufficient funds); in the rejection case all
    /// locks taken so far have been released and no state was persisted.
    ///
    /// # Errors
    ///
    /// See [`SendMoneyError`] for the fatal conditions. None of them leave a
    /// lock held.
    #[tracing::instrument(
        skip(self, command),
        fields(
            source = %command.source_account_id(),
            target = %command.target_account_id(),
        ),
        name = "send_money"
    )]
    pub async fn send_money(&self, command: SendMoneyCommand) -> Result<bool, SendMoneyError> {
        self.check_threshold(&command)?;
        let baseline_date = self.baseline_date()?;

        let mut source_account = self
            .loader
            .load_account(command.source_account_id(), baseline_date)
            .await?;
        let mut target_account = self
            .loader
            .load_account(command.target_account_id(), baseline_date)
            .await?;

        let source_account_id = required_id(&source_account, AccountSide::Source)?;
        let target_account_id = required_id(&target_account, AccountSide::Target)?;

        tracing::debug!(%baseline_date, "accounts loaded");

        self.lock.lock_account(source_account_id).await;
        if !source_account.withdraw(command.money(), target_account_id, self.clock.now()) {
            self.lock.release_account(source_account_id);
            tracing::debug!("withdrawal rejected, insufficient funds");
            return Ok(false);
        }

        self.lock.lock_account(target_account_id).await;
        if !target_account.deposit(command.money(), source_account_id, self.clock.now()) {
            self.lock.release_account(source_account_id);
            self.lock.release_account(target_account_id);
            tracing::warn!("deposit rejected");
            return Ok(false);
        }

        let persisted = self.update_account_states(&source_account, &target_account).await;

        self.lock.release_account(source_account_id);
        self.lock.release_account(target_account_id);

        persisted?;
        tracing::debug!(amount = %command.money(), "transfer completed");
        Ok(true)
    }

    fn check_threshold(&self, command: &SendMoneyCommand) -> Result<(), SendMoneyError> {
        let threshold = &self.properties.maximum_transfer_threshold;
        if command.money().is_greater_than(threshold) {
            return Err(SendMoneyError::ThresholdExceeded {
                threshold: threshold.clone(),
                actual: command.money().clone(),
            });
        }
        Ok(())
    }

    fn baseline_date(&self) -> Result<chrono::DateTime<chrono::Utc>, SendMoneyError> {
        let days = self.properties.history_lookback_days;
        if days <= 0 {
            return Err(SendMoneyError::InvalidHistoryLookback(days));
        }
        Ok(self.clock.now() - chrono::Duration::days(days))
    }

    async fn update_account_states(
        &self,
        source_account: &Account,
        target_account: &Account,
    ) -> Result<(), SendMoneyError> {
        self.updater.update_activities(source_account).await?;
        self.updater.update_activities(target_account).await?;
        Ok(())
    }
}

fn required_id(account: &Account, side: AccountSide) -> Result<AccountId, SendMoneyError> {
    account
        .id()
        .ok_or(SendMoneyError::MissingAccountId(side))
}

/// Answers the current balance of an account.
///
/// Loads the account with a baseline at the present moment, so the balance
/// is exactly the stored baseline; the window is empty or irrelevant.
pub struct GetAccountBalanceService {
    loader: Arc<dyn AccountLoader>,
    clock: Arc<dyn Clock>,
}

impl GetAccountBalanceService {
    /// Creates the query service.
    #[must_use]
    pub fn new(loader: Arc<dyn AccountLoader>, clock: Arc<dyn Clock>) -> Self {
        Self { loader, clock }
    }

    /// Current balance of the given account.
    ///
    /// # Errors
    ///
    /// Propagates [`LoadAccountError`] from the loader.
    #[tracing::instrument(skip(self), name = "account_balance")]
    pub async fn account_balance(&self, account_id: AccountId) -> Result<Money, LoadAccountError> {
        let account = self.loader.load_account(account_id, self.clock.now()).await?;
        Ok(account.calculate_balance())
    }
}

pub use lock::{InProcessAccountLock, NoOpAccountLock};
