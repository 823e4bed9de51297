//! # Moneta Testing
//!
//! Testing utilities and helpers for the Moneta account ledger.
//!
//! This crate provides:
//! - Mock implementations of the storage and lock ports, instrumented for
//!   interaction assertions
//! - Builder-style test data for accounts and activities
//! - A deterministic clock
//!
//! ## Example
//!
//! ```ignore
//! use moneta_testing::{InMemoryAccounts, RecordingAccountLock, test_clock};
//!
//! #[tokio::test]
//! async fn transfer_locks_both_accounts() {
//!     let accounts = Arc::new(InMemoryAccounts::new());
//!     let lock = Arc::new(RecordingAccountLock::new());
//!     let service = SendMoneyService::new(
//!         accounts.clone(), lock.clone(), accounts.clone(),
//!         Arc::new(test_clock()), TransferProperties::default(),
//!     );
//!     // ...
//!     assert!(lock.all_released());
//! }
//! ```

use chrono::{DateTime, Utc};
use moneta_core::environment::Clock;

/// Mock port implementations
pub mod port_mocks;

/// Builder-style test data
pub mod fixtures;

/// Mock implementations of Environment traits.
pub mod mocks {
    use super::{Clock, DateTime, Utc};

    /// Fixed clock for deterministic tests
    ///
    /// Always returns the same time, making tests reproducible.
    ///
    /// # Example
    ///
    /// ```
    /// use moneta_testing::mocks::FixedClock;
    /// use moneta_core::environment::Clock;
    /// use chrono::Utc;
    ///
    /// let clock = FixedClock::new(Utc::now());
    /// let time1 = clock.now();
    /// let time2 = clock.now();
    /// assert_eq!(time1, time2); // Always the same!
    /// ```
    #[derive(Debug, Clone)]
    pub struct FixedClock {
        time: DateTime<Utc>,
    }

    impl FixedClock {
        /// Create a new fixed clock with the given time
        #[must_use]
        pub const fn new(time: DateTime<Utc>) -> Self {
            Self { time }
        }
    }

    impl Clock for FixedClock {
        fn now(&self) -> DateTime<Utc> {
            self.time
        }
    }

    /// Create a default fixed clock for tests (2025-01-01 00:00:00 UTC)
    ///
    /// # Panics
    ///
    /// This function will panic if the hardcoded timestamp fails to parse,
    /// which should never happen in practice.
    #[must_use]
    #[allow(clippy::expect_used)]
    pub fn test_clock() -> FixedClock {
        FixedClock::new(
            DateTime::parse_from_rfc3339("2025-01-01T00:00:00Z")
                .expect("hardcoded timestamp should always parse")
                .with_timezone(&Utc),
        )
    }
}

/// Initializes a tracing subscriber for test output.
///
/// Safe to call from every test; only the first call installs a subscriber.
pub fn init_test_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("debug")),
        )
        .with_test_writer()
        .try_init();
}

// Re-export commonly used items
pub use fixtures::{AccountBuilder, ActivityBuilder, default_account, default_activity};
pub use mocks::{FixedClock, test_clock};
pub use port_mocks::{InMemoryAccounts, LockEvent, RecordingAccountLock};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_clock() {
        let clock = test_clock();
        let time1 = clock.now();
        let time2 = clock.now();
        assert_eq!(time1, time2);
    }
}
