//! Amount - Overflow-checked token amount in base units
//!
//! All balances, allowances and the total supply in Mintgate are
//! non-negative integers of base units. Negative values are
//! unrepresentable; overflow and underflow are detected by the checked
//! operations and must abort the whole operation at the call site.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A non-negative token amount in base units.
///
/// # Invariant
/// The inner value is an unsigned integer, so non-negativity holds by
/// construction. Arithmetic never wraps: `checked_add`/`checked_sub`
/// return `None` on overflow or underflow.
///
/// # Example
/// ```
/// use mintgate_core::Amount;
///
/// let a = Amount::new(100);
/// let b = Amount::new(30);
/// assert_eq!(a.checked_sub(&b), Some(Amount::new(70)));
///
/// // Underflow is detected, not wrapped
/// assert!(b.checked_sub(&a).is_none());
/// ```
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Amount(u128);

impl Amount {
    /// Zero amount constant
    pub const ZERO: Self = Self(0);

    /// Largest representable amount
    pub const MAX: Self = Self(u128::MAX);

    /// Create a new Amount from base units
    #[inline]
    pub const fn new(value: u128) -> Self {
        Self(value)
    }

    /// Get the inner base-unit value
    #[inline]
    pub const fn value(&self) -> u128 {
        self.0
    }

    /// Check if the amount is zero
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checked addition - returns None on overflow
    pub fn checked_add(&self, other: &Amount) -> Option<Amount> {
        self.0.checked_add(other.0).map(Amount)
    }

    /// Checked subtraction - returns None if the result would be negative
    pub fn checked_sub(&self, other: &Amount) -> Option<Amount> {
        self.0.checked_sub(other.0).map(Amount)
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u128> for Amount {
    fn from(value: u128) -> Self {
        Self(value)
    }
}

impl From<Amount> for u128 {
    fn from(amount: Amount) -> Self {
        amount.0
    }
}
