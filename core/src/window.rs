//! The activity window: the bounded slice of recent account activity used to
//! derive a balance on top of a baseline.

use crate::account::AccountId;
use crate::activity::Activity;
use crate::money::Money;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error returned by timestamp queries on a window with no activities.
///
/// An empty window is legitimate for balance computation (it contributes
/// zero), but asking for its start or end timestamp is a contract violation.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("activity window contains no activities")]
pub struct EmptyWindowError;

/// Append-only, ordered collection of [`Activity`] entries covering a bounded
/// lookback period.
///
/// Insertion order carries no meaning for balance derivation; order matters
/// only for the start/end timestamp queries, which scan by timestamp.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityWindow {
    activities: Vec<Activity>,
}

impl ActivityWindow {
    /// Creates a window over the given activities.
    #[must_use]
    pub const fn new(activities: Vec<Activity>) -> Self {
        Self { activities }
    }

    /// Creates a window with no activities.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            activities: Vec::new(),
        }
    }

    /// Net balance the window contributes to `account_id`: deposits into the
    /// account minus withdrawals out of it. Zero over an empty window.
    #[must_use]
    pub fn calculate_balance(&self, account_id: AccountId) -> Money {
        let deposits = self
            .activities
            .iter()
            .filter(|activity| activity.target_account_id == account_id)
            .fold(Money::zero(), |sum, activity| sum.add(&activity.money));
        let withdrawals = self
            .activities
            .iter()
            .filter(|activity| activity.source_account_id == account_id)
            .fold(Money::zero(), |sum, activity| sum.add(&activity.money));
        deposits.add(&withdrawals.negate())
    }

    /// Appends an activity. Business validation is the account's job, not
    /// the window's.
    pub fn add_activity(&mut self, activity: Activity) {
        self.activities.push(activity);
    }

    /// Timestamp of the earliest activity in the window.
    ///
    /// # Errors
    ///
    /// Returns [`EmptyWindowError`] when the window holds no activities.
    pub fn start_timestamp(&self) -> Result<DateTime<Utc>, EmptyWindowError> {
        self.activities
            .iter()
            .map(|activity| activity.timestamp)
            .min()
            .ok_or(EmptyWindowError)
    }

    /// Timestamp of the latest activity in the window.
    ///
    /// # Errors
    ///
    /// Returns [`EmptyWindowError`] when the window holds no activities.
    pub fn end_timestamp(&self) -> Result<DateTime<Utc>, EmptyWindowError> {
        self.activities
            .iter()
            .map(|activity| activity.timestamp)
            .max()
            .ok_or(EmptyWindowError)
    }

    /// Read access to the activities.
    #[must_use]
    pub fn activities(&self) -> &[Activity] {
        &self.activities
    }

    /// Number of activities in the window.
    #[must_use]
    pub fn len(&self) -> usize {
        self.activities.len()
    }

    /// Whether the window holds no activities.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.activities.is_empty()
    }
}
