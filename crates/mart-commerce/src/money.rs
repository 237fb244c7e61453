//! Money type for cart arithmetic.
//!
//! Prices travel as JSON numbers, but totals are computed in integer cents
//! so that sums of many lines don't pick up floating-point error.

use std::fmt;

/// Cents per currency unit.
const CENTS_PER_UNIT: i64 = 100;

/// An amount in cents.
///
/// All arithmetic is checked; an overflowing total is `None` rather than a
/// wrapped or saturated number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Money {
    /// Amount in cents.
    pub amount_cents: i64,
}

impl Money {
    /// Create a Money value from cents.
    pub fn new(amount_cents: i64) -> Self {
        Self { amount_cents }
    }

    /// Zero.
    pub fn zero() -> Self {
        Self::new(0)
    }

    /// Convert a decimal price, rounding to the nearest cent.
    ///
    /// Returns `None` for NaN, infinities, and amounts outside the `i64`
    /// cent range.
    ///
    /// ```
    /// use mart_commerce::money::Money;
    /// assert_eq!(Money::from_decimal(49.99).unwrap().amount_cents, 4999);
    /// assert!(Money::from_decimal(f64::NAN).is_none());
    /// ```
    pub fn from_decimal(amount: f64) -> Option<Self> {
        if !amount.is_finite() {
            return None;
        }
        let cents = (amount * CENTS_PER_UNIT as f64).round();
        // i64::MIN is exactly representable; i64::MAX rounds up to 2^63.
        if cents < i64::MIN as f64 || cents >= i64::MAX as f64 {
            return None;
        }
        Some(Self::new(cents as i64))
    }

    /// Convert back to a decimal value.
    pub fn to_decimal(&self) -> f64 {
        self.amount_cents as f64 / CENTS_PER_UNIT as f64
    }

    /// Add another amount.
    pub fn try_add(&self, other: &Money) -> Option<Money> {
        self.amount_cents.checked_add(other.amount_cents).map(Money::new)
    }

    /// Multiply by a unit count.
    pub fn try_multiply(&self, factor: u32) -> Option<Money> {
        self.amount_cents
            .checked_mul(i64::from(factor))
            .map(Money::new)
    }

    /// Sum amounts, or `None` on overflow.
    pub fn try_sum(amounts: impl IntoIterator<Item = Money>) -> Option<Money> {
        amounts
            .into_iter()
            .try_fold(Money::zero(), |acc, m| acc.try_add(&m))
    }

    /// Format as a plain amount with two decimals (e.g., "49.99").
    pub fn display_amount(&self) -> String {
        let sign = if self.amount_cents < 0 { "-" } else { "" };
        let abs = self.amount_cents.unsigned_abs();
        let per_unit = CENTS_PER_UNIT as u64;
        format!("{}{}.{:02}", sign, abs / per_unit, abs % per_unit)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_amount())
    }
}
