//! Configuration value objects, resolved once at composition time and passed
//! into the services explicitly.

use crate::money::Money;
use serde::{Deserialize, Serialize};

/// Tuning knobs for the money transfer use case.
///
/// `history_lookback_days` must be positive; a non-positive value is a fatal
/// configuration error surfaced when a transfer runs, not at construction.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferProperties {
    /// The maximum amount permitted in a single transfer.
    pub maximum_transfer_threshold: Money,
    /// How many days of activity history are loaded to build the window for
    /// a balance computation.
    pub history_lookback_days: i64,
}

impl TransferProperties {
    /// Creates transfer properties with explicit values.
    #[must_use]
    pub const fn new(maximum_transfer_threshold: Money, history_lookback_days: i64) -> Self {
        Self {
            maximum_transfer_threshold,
            history_lookback_days,
        }
    }
}

impl Default for TransferProperties {
    fn default() -> Self {
        Self {
            maximum_transfer_threshold: Money::of(1_000_000),
            history_lookback_days: 10,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_threshold_is_one_million() {
        let properties = TransferProperties::default();
        assert_eq!(properties.maximum_transfer_threshold, Money::of(1_000_000));
        assert_eq!(properties.history_lookback_days, 10);
    }
}
