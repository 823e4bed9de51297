//! Ledger activities: recorded movements of money between accounts.

use crate::account::AccountId;
use crate::money::Money;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Identifier assigned to an [`Activity`] by the persistence collaborator.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ActivityId(i64);

impl ActivityId {
    /// Creates an `ActivityId` from its raw value.
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

impl std::fmt::Display for ActivityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One recorded movement of money between two accounts.
///
/// An activity belongs to exactly one account's window, marked by
/// `owner_account_id`. When both parties of a transfer are loaded, the same
/// movement appears once per window, each copy tagged with its own owner.
///
/// The amount is stored non-negative; whether it counts for or against an
/// account is derived at read time from the source/target position.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Activity {
    /// Persistence identifier; `None` until the activity has been stored.
    pub id: Option<ActivityId>,
    /// The account whose window this entry belongs to.
    pub owner_account_id: AccountId,
    /// The account the money was withdrawn from.
    pub source_account_id: AccountId,
    /// The account the money was deposited to.
    pub target_account_id: AccountId,
    /// When the movement happened.
    pub timestamp: DateTime<Utc>,
    /// The amount moved (non-negative).
    pub money: Money,
}

impl Activity {
    /// Creates a new, not yet persisted activity.
    #[must_use]
    pub const fn new(
        owner_account_id: AccountId,
        source_account_id: AccountId,
        target_account_id: AccountId,
        timestamp: DateTime<Utc>,
        money: Money,
    ) -> Self {
        Self {
            id: None,
            owner_account_id,
            source_account_id,
            target_account_id,
            timestamp,
            money,
        }
    }

    /// Same activity with a persistence identifier attached.
    #[must_use]
    pub fn with_id(mut self, id: ActivityId) -> Self {
        self.id = Some(id);
        self
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)] // Test code can use unwrap/expect/panic

    use super::*;
    use chrono::TimeZone;

    #[test]
    fn new_activity_has_no_id() {
        let activity = Activity::new(
            AccountId::new(1),
            AccountId::new(1),
            AccountId::new(2),
            Utc.with_ymd_and_hms(2019, 8, 3, 0, 0, 0).unwrap(),
            Money::of(500),
        );

        assert!(activity.id.is_none());
        assert_eq!(activity.with_id(ActivityId::new(7)).id, Some(ActivityId::new(7)));
    }
}
