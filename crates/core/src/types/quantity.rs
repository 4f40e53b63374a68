//! Line-item quantities.

use std::fmt;
use std::num::NonZeroU32;

use serde::{Deserialize, Serialize};

/// A positive item count.
///
/// A line item can never hold zero units: any change that would take the
/// count to zero or below yields `None`, which the cart treats as removal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Quantity(NonZeroU32);

impl Quantity {
    /// A single unit.
    pub const ONE: Self = Self(NonZeroU32::MIN);

    /// Create a quantity, returning `None` for zero.
    #[must_use]
    pub const fn new(count: u32) -> Option<Self> {
        match NonZeroU32::new(count) {
            Some(count) => Some(Self(count)),
            None => None,
        }
    }

    /// Get the count.
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0.get()
    }

    /// Add units, saturating at `u32::MAX`.
    #[must_use]
    pub const fn saturating_add(self, other: Self) -> Self {
        Self(self.0.saturating_add(other.get()))
    }

    /// Apply a signed change.
    ///
    /// Returns `None` when the result is zero or negative. Results above
    /// `u32::MAX` saturate.
    #[must_use]
    pub fn apply_delta(self, delta: i64) -> Option<Self> {
        let next = i64::from(self.get()).saturating_add(delta);
        if next <= 0 {
            return None;
        }
        let clamped = u32::try_from(next).unwrap_or(u32::MAX);
        Self::new(clamped)
    }

    /// One more unit, saturating.
    #[must_use]
    pub const fn increment(self) -> Self {
        self.saturating_add(Self::ONE)
    }

    /// One fewer unit, floored at one.
    #[must_use]
    pub fn decrement_floored(self) -> Self {
        self.apply_delta(-1).unwrap_or(Self::ONE)
    }
}

impl Default for Quantity {
    fn default() -> Self {
        Self::ONE
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<u32> for Quantity {
    type Error = u32;

    fn try_from(count: u32) -> Result<Self, Self::Error> {
        Self::new(count).ok_or(count)
    }
}

impl From<Quantity> for u32 {
    fn from(quantity: Quantity) -> Self {
        quantity.get()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_is_not_a_quantity() {
        assert!(Quantity::new(0).is_none());
        assert_eq!(Quantity::new(2).unwrap().get(), 2);
    }

    #[test]
    fn test_apply_delta() {
        let two = Quantity::new(2).unwrap();
        assert_eq!(two.apply_delta(1), Quantity::new(3));
        assert_eq!(two.apply_delta(-1), Some(Quantity::ONE));
        assert_eq!(two.apply_delta(-2), None);
        assert_eq!(two.apply_delta(-10), None);
    }

    #[test]
    fn test_saturates_at_max() {
        let max = Quantity::new(u32::MAX).unwrap();
        assert_eq!(max.increment(), max);
        assert_eq!(max.apply_delta(i64::MAX), Some(max));
    }

    #[test]
    fn test_decrement_floored_at_one() {
        assert_eq!(Quantity::ONE.decrement_floored(), Quantity::ONE);
        assert_eq!(Quantity::new(5).unwrap().decrement_floored().get(), 4);
    }

    #[test]
    fn test_deserialize_rejects_zero() {
        let result: Result<Quantity, _> = serde_json::from_str("0");
        assert!(result.is_err());
        let ok: Quantity = serde_json::from_str("7").unwrap();
        assert_eq!(ok.get(), 7);
    }
}
