//! Naira money type backed by decimal arithmetic.
//!
//! All amounts in the system (prices, delivery fees, discounts) are Nigerian
//! Naira. The Commerce API transmits amounts as plain decimal numbers, so the
//! wrapper is `#[serde(transparent)]`.

use std::ops::{Add, AddAssign, Sub};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// An amount of Nigerian Naira.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Naira(Decimal);

impl Naira {
    /// Zero Naira.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Create an amount from a decimal value.
    #[must_use]
    pub const fn new(amount: Decimal) -> Self {
        Self(amount)
    }

    /// Create an amount from kobo (1/100 Naira).
    #[must_use]
    pub fn from_kobo(kobo: i64) -> Self {
        Self(Decimal::new(kobo, 2))
    }

    /// Get the underlying decimal value.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Multiply by an integer quantity (line totals).
    #[must_use]
    pub fn times(&self, quantity: u32) -> Self {
        Self(self.0 * Decimal::from(quantity))
    }

    /// Scale by a decimal factor, clamping the result at zero.
    ///
    /// Money amounts never go negative; the clamp is the last line of
    /// defense for discount arithmetic.
    #[must_use]
    pub fn scaled(&self, factor: Decimal) -> Self {
        let scaled = self.0 * factor;
        if scaled < Decimal::ZERO {
            Self::ZERO
        } else {
            Self(scaled)
        }
    }

    /// Subtract, clamping at zero.
    #[must_use]
    pub fn saturating_sub(&self, other: Self) -> Self {
        if other.0 >= self.0 {
            Self::ZERO
        } else {
            Self(self.0 - other.0)
        }
    }
}

impl From<i64> for Naira {
    fn from(whole: i64) -> Self {
        Self(Decimal::from(whole))
    }
}

impl Add for Naira {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self(self.0 + rhs.0)
    }
}

impl AddAssign for Naira {
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0;
    }
}

impl Sub for Naira {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self(self.0 - rhs.0)
    }
}

impl std::fmt::Display for Naira {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "\u{20a6}{:.2}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(Naira::from(5000).to_string(), "\u{20a6}5000.00");
        assert_eq!(Naira::from_kobo(125_050).to_string(), "\u{20a6}1250.50");
    }

    #[test]
    fn test_times() {
        assert_eq!(Naira::from(1500).times(3), Naira::from(4500));
        assert_eq!(Naira::from(1500).times(0), Naira::ZERO);
    }

    #[test]
    fn test_scaled_clamps_at_zero() {
        let fee = Naira::from(2000);
        assert_eq!(fee.scaled(Decimal::new(5, 1)), Naira::from(1000));
        // A negative factor can only come from invalid input; clamp anyway.
        assert_eq!(fee.scaled(Decimal::from(-1)), Naira::ZERO);
    }

    #[test]
    fn test_saturating_sub() {
        assert_eq!(
            Naira::from(100).saturating_sub(Naira::from(30)),
            Naira::from(70)
        );
        assert_eq!(
            Naira::from(30).saturating_sub(Naira::from(100)),
            Naira::ZERO
        );
    }

    #[test]
    fn test_serde_transparent() {
        let amount = Naira::from(4000);
        let json = serde_json::to_string(&amount).expect("serialize");
        let back: Naira = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, amount);
    }
}
