//! # Validation Module
//!
//! Input validation for coupon creation and apply requests.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: HTTP boundary (axum)                                         │
//! │  ├── JSON shape (deserialization, JsonRejection → 400)                 │
//! │  └── Apply request: code non-blank, basket present                     │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                  │
//! │  └── NewCoupon: discount → code → minBasketValue, first failure wins   │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Database (SQLite)                                            │
//! │  ├── NOT NULL constraints                                              │
//! │  └── UNIQUE(code)                                                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use coupon_core::validation::validate_new_coupon;
//! use coupon_core::{Money, NewCoupon};
//!
//! let request = NewCoupon::new("SPRING10", Money::from_major(10), Money::from_major(50));
//! let valid = validate_new_coupon(&request).unwrap();
//! assert_eq!(valid.code, "spring10");
//! ```

use crate::error::ValidationError;
use crate::money::Money;
use crate::types::{Coupon, NewCoupon};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Validated Output
// =============================================================================

/// A creation request that passed every check.
///
/// The code is lowercased; surrounding whitespace is kept.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedCoupon {
    pub code: String,
    pub discount: Money,
    pub min_basket_value: Money,
}

impl ValidatedCoupon {
    /// Builds the coupon record to persist (fresh ID and timestamp).
    pub fn into_coupon(self) -> Coupon {
        Coupon::new(self.code, self.discount, self.min_basket_value)
    }
}

// =============================================================================
// Field Validators
// =============================================================================

/// Validates a coupon discount.
///
/// ## Rules
/// - Must be present
/// - Must not be negative (zero is allowed)
pub fn validate_discount(discount: Option<Money>) -> ValidationResult<Money> {
    match discount {
        Some(d) if !d.is_negative() => Ok(d),
        _ => Err(ValidationError::InvalidDiscount),
    }
}

/// Validates a coupon code.
///
/// Whitespace only counts for the blank check; the code is returned as given.
///
/// ## Example
/// ```rust
/// use coupon_core::validation::validate_code;
///
/// assert_eq!(validate_code(Some(" abc ")).unwrap(), " abc ");
/// assert!(validate_code(Some("   ")).is_err());
/// assert!(validate_code(None).is_err());
/// ```
pub fn validate_code(code: Option<&str>) -> ValidationResult<&str> {
    match code {
        Some(c) if !c.trim().is_empty() => Ok(c),
        _ => Err(ValidationError::InvalidCode),
    }
}

/// Validates a coupon's minimum basket value.
pub fn validate_min_basket_value(min: Option<Money>) -> ValidationResult<Money> {
    match min {
        Some(m) if !m.is_negative() => Ok(m),
        _ => Err(ValidationError::InvalidMinBasketValue),
    }
}

// =============================================================================
// Request Validators
// =============================================================================

/// Validates a coupon creation request.
///
/// Checks run in a fixed order and stop at the first failure:
/// ```text
/// discount ──ok──► code ──ok──► minBasketValue ──ok──► ValidatedCoupon
///    │               │                │
///    ▼               ▼                ▼
/// InvalidDiscount  InvalidCode   InvalidMinBasketValue
/// ```
pub fn validate_new_coupon(request: &NewCoupon) -> ValidationResult<ValidatedCoupon> {
    let discount = validate_discount(request.discount)?;
    let code = validate_code(request.code.as_deref())?;
    let min_basket_value = validate_min_basket_value(request.min_basket_value)?;

    Ok(ValidatedCoupon {
        code: code.to_lowercase(),
        discount,
        min_basket_value,
    })
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn request() -> NewCoupon {
        NewCoupon::new("SPRING10", Money::from_major(10), Money::from_major(50))
    }

    #[test]
    fn test_valid_request_lowercases_code() {
        let valid = validate_new_coupon(&request()).unwrap();
        assert_eq!(valid.code, "spring10");
        assert_eq!(valid.discount, Money::from_major(10));
        assert_eq!(valid.min_basket_value, Money::from_major(50));
    }

    #[test]
    fn test_zero_values_are_allowed() {
        let req = NewCoupon::new("free", Money::zero(), Money::zero());
        assert!(validate_new_coupon(&req).is_ok());
    }

    #[test]
    fn test_validate_discount() {
        let mut req = request();
        req.discount = Some(Money::new(dec!(-0.01)));
        assert_eq!(validate_new_coupon(&req), Err(ValidationError::InvalidDiscount));

        req.discount = None;
        assert_eq!(validate_new_coupon(&req), Err(ValidationError::InvalidDiscount));
    }

    #[test]
    fn test_validate_code() {
        let mut req = request();
        req.code = Some("   ".to_string());
        assert_eq!(validate_new_coupon(&req), Err(ValidationError::InvalidCode));

        req.code = None;
        assert_eq!(validate_new_coupon(&req), Err(ValidationError::InvalidCode));
    }

    #[test]
    fn test_code_is_lowercased_but_not_trimmed() {
        let mut req = request();
        req.code = Some(" ABC ".to_string());

        let valid = validate_new_coupon(&req).unwrap();
        assert_eq!(valid.code, " abc ");
    }

    #[test]
    fn test_validate_min_basket_value() {
        let mut req = request();
        req.min_basket_value = Some(Money::from_major(-1));
        assert_eq!(
            validate_new_coupon(&req),
            Err(ValidationError::InvalidMinBasketValue)
        );

        req.min_basket_value = None;
        assert_eq!(
            validate_new_coupon(&req),
            Err(ValidationError::InvalidMinBasketValue)
        );
    }

    #[test]
    fn test_first_failure_wins() {
        // Everything invalid: discount is reported
        let req = NewCoupon::default();
        assert_eq!(validate_new_coupon(&req), Err(ValidationError::InvalidDiscount));

        // Code and min invalid: code is reported
        let req = NewCoupon {
            discount: Some(Money::from_major(5)),
            code: Some(String::new()),
            min_basket_value: Some(Money::from_major(-5)),
        };
        assert_eq!(validate_new_coupon(&req), Err(ValidationError::InvalidCode));
    }

    #[test]
    fn test_into_coupon() {
        let coupon = validate_new_coupon(&request()).unwrap().into_coupon();
        assert_eq!(coupon.code, "spring10");
        assert!(!coupon.id.is_empty());
    }
}
