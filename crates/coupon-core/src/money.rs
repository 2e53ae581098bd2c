//! # Money Module
//!
//! Provides the `Money` type for coupon discounts and basket values.
//!
//! ## Exact Decimals End to End
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  JSON body           "discount": 0.12345678901234567891                │
//! │       │              (serde_json arbitrary_precision: kept as text)    │
//! │       ▼                                                                 │
//! │  Money(Decimal)      96-bit mantissa, base-10 scale, no f64 step       │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  SQLite TEXT         "0.12345678901234567891"                          │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  JSON response       0.12345678901234567891 (same digits, same scale)  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Values outside `Decimal`'s range (more than 28 fractional digits, or
//! beyond ~7.9e28) are rejected when the body is decoded.
//!
//! ## Usage
//! ```rust
//! use coupon_core::money::Money;
//!
//! let discount = Money::from_minor(1099);
//! assert_eq!(discount.to_string(), "10.99");
//! assert!(!discount.is_negative());
//! ```

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// =============================================================================
// Money Type
// =============================================================================

/// Represents a monetary value as an exact decimal.
///
/// ## Design Decisions
/// - **Signed**: a basket value can arrive negative and must be representable
///   so the apply rule can reject it
/// - **Single field tuple struct**: Zero-cost abstraction over `Decimal`
/// - **Transparent serde**: travels as a bare JSON number
///
/// ## Where Money is Used
/// ```text
/// NewCoupon.discount ──────► Coupon.discount ──────► Basket.applied_discount
/// NewCoupon.min_basket_value ► Coupon.min_basket_value
/// Basket.value (caller supplied)
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(#[serde(with = "rust_decimal::serde::arbitrary_precision")] Decimal);

impl Money {
    /// Wraps a decimal amount.
    #[inline]
    pub const fn new(amount: Decimal) -> Self {
        Money(amount)
    }

    /// Creates a Money value from whole currency units.
    ///
    /// ## Example
    /// ```rust
    /// use coupon_core::money::Money;
    ///
    /// assert_eq!(Money::from_major(10).to_string(), "10");
    /// ```
    #[inline]
    pub fn from_major(major: i64) -> Self {
        Money(Decimal::new(major, 0))
    }

    /// Creates a Money value from minor units (cents), keeping two decimals.
    ///
    /// ## Example
    /// ```rust
    /// use coupon_core::money::Money;
    ///
    /// assert_eq!(Money::from_minor(1099).to_string(), "10.99");
    /// assert_eq!(Money::from_minor(-550).to_string(), "-5.50");
    /// ```
    #[inline]
    pub fn from_minor(minor: i64) -> Self {
        Money(Decimal::new(minor, 2))
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(Decimal::ZERO)
    }

    /// Checks if the value is zero (any scale, either sign).
    #[inline]
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Checks if the value is strictly less than zero.
    ///
    /// A negative zero (`-0.00`) is not negative.
    #[inline]
    pub fn is_negative(&self) -> bool {
        self.0 < Decimal::ZERO
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display uses the decimal's canonical text (scale preserved).
///
/// This is also the storage format in SQLite.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Parses the canonical text form written by `Display`.
impl FromStr for Money {
    type Err = rust_decimal::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Decimal::from_str(s.trim()).map(Money)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_constructors() {
        assert_eq!(Money::from_major(10), Money::new(dec!(10)));
        assert_eq!(Money::from_minor(1099), Money::new(dec!(10.99)));
        assert_eq!(Money::zero(), Money::default());
    }

    #[test]
    fn test_display() {
        assert_eq!(Money::from_minor(1099).to_string(), "10.99");
        assert_eq!(Money::from_minor(500).to_string(), "5.00");
        assert_eq!(Money::from_minor(-550).to_string(), "-5.50");
        assert_eq!(Money::from_major(0).to_string(), "0");
    }

    #[test]
    fn test_parse_round_trips_display() {
        let original = Money::new(dec!(12.340));
        let parsed: Money = original.to_string().parse().unwrap();
        assert_eq!(parsed, original);
        assert_eq!(parsed.to_string(), "12.340");

        assert!("ten".parse::<Money>().is_err());
    }

    #[test]
    fn test_sign_checks() {
        let zero = Money::zero();
        assert!(zero.is_zero());
        assert!(!zero.is_negative());

        let positive = Money::from_minor(1);
        assert!(!positive.is_zero());
        assert!(!positive.is_negative());

        let negative = Money::from_minor(-1);
        assert!(!negative.is_zero());
        assert!(negative.is_negative());
    }

    #[test]
    fn test_negative_zero_is_zero() {
        let negative_zero: Money = "-0.00".parse().unwrap();
        assert!(negative_zero.is_zero());
        assert!(!negative_zero.is_negative());
    }

    #[test]
    fn test_json_is_a_number_with_scale_kept() {
        let json = serde_json::to_string(&Money::from_minor(1050)).unwrap();
        assert_eq!(json, "10.50");

        let from_int: Money = serde_json::from_str("10").unwrap();
        assert_eq!(from_int, Money::from_major(10));
        let from_fraction: Money = serde_json::from_str("10.5").unwrap();
        assert_eq!(from_fraction, Money::new(dec!(10.5)));
    }

    #[test]
    fn test_json_keeps_digits_beyond_f64() {
        let text = "0.12345678901234567891";
        let money: Money = serde_json::from_str(text).unwrap();
        assert_eq!(money.to_string(), text);
        assert_eq!(serde_json::to_string(&money).unwrap(), text);

        let large: Money = serde_json::from_str("12345678901234567.89").unwrap();
        assert_eq!(serde_json::to_string(&large).unwrap(), "12345678901234567.89");
    }

    #[test]
    fn test_json_tiny_negative_stays_negative() {
        let money: Money = serde_json::from_str("-1e-20").unwrap();
        assert!(money.is_negative());
        assert!(!money.is_zero());
    }

    #[test]
    fn test_json_out_of_range_is_rejected() {
        // 29 fractional digits exceed Decimal's scale
        assert!(serde_json::from_str::<Money>("-1e-29").is_err());
        assert!(serde_json::from_str::<Money>("\"abc\"").is_err());
    }
}
