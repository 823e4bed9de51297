//! Monetary amounts in the smallest currency unit.
//!
//! `Money` wraps an arbitrary-precision signed integer, so arithmetic is
//! closed: adding or negating amounts can never overflow and never fails.
//! There is deliberately no currency dimension here; the ledger operates in a
//! single unit.

use num_bigint::{BigInt, Sign};
use serde::{Deserialize, Serialize};
use std::ops::{Add, Neg};

/// A signed monetary amount in the smallest currency unit.
///
/// Immutable value type with a total order over the underlying integer.
/// Construct with [`Money::of`] or [`Money::zero`].
///
/// # Example
///
/// ```
/// use moneta_core::money::Money;
///
/// let balance = Money::of(555) + Money::of(1000);
/// assert_eq!(balance, Money::of(1555));
/// assert!(balance.is_positive());
/// assert_eq!(-Money::of(500), Money::of(-500));
/// ```
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Money(BigInt);

impl Money {
    /// The additive identity.
    #[must_use]
    pub fn zero() -> Self {
        Self(BigInt::from(0))
    }

    /// Creates an amount from a machine integer.
    #[must_use]
    pub fn of(amount: i64) -> Self {
        Self(BigInt::from(amount))
    }

    /// Sum of two amounts.
    #[must_use]
    pub fn add(&self, other: &Self) -> Self {
        Self(&self.0 + &other.0)
    }

    /// Additive inverse of this amount.
    #[must_use]
    pub fn negate(&self) -> Self {
        Self(-&self.0)
    }

    /// `self >= 0`
    #[must_use]
    pub fn is_positive_or_zero(&self) -> bool {
        self.0.sign() != Sign::Minus
    }

    /// `self > 0`
    #[must_use]
    pub fn is_positive(&self) -> bool {
        self.0.sign() == Sign::Plus
    }

    /// `self < 0`
    #[must_use]
    pub fn is_negative(&self) -> bool {
        self.0.sign() == Sign::Minus
    }

    /// `self <= 0`
    #[must_use]
    pub fn is_negative_or_zero(&self) -> bool {
        self.0.sign() != Sign::Plus
    }

    /// `self > other`
    #[must_use]
    pub fn is_greater_than(&self, other: &Self) -> bool {
        self.0 > other.0
    }

    /// `self >= other`
    #[must_use]
    pub fn is_greater_than_or_equal_to(&self, other: &Self) -> bool {
        self.0 >= other.0
    }
}

impl Add for Money {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self(self.0 + rhs.0)
    }
}

impl Add for &Money {
    type Output = Money;

    fn add(self, rhs: Self) -> Money {
        Money(&self.0 + &rhs.0)
    }
}

impl Neg for Money {
    type Output = Self;

    fn neg(self) -> Self {
        Self(-self.0)
    }
}

impl Neg for &Money {
    type Output = Money;

    fn neg(self) -> Money {
        Money(-&self.0)
    }
}

impl Default for Money {
    fn default() -> Self {
        Self::zero()
    }
}

impl std::fmt::Display for Money {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
