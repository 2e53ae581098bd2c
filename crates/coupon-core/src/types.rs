//! # Domain Types
//!
//! Core domain types used throughout the coupon service.
//!
//! ## Type Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌──────────────────────┐  │
//! │  │   NewCoupon     │   │     Coupon      │   │     CouponDto        │  │
//! │  │  ─────────────  │   │  ─────────────  │   │  ──────────────────  │  │
//! │  │  discount?      │──►│  id (UUID)      │──►│  discount            │  │
//! │  │  code?          │   │  code (lower)   │   │  code                │  │
//! │  │  minBasketValue?│   │  discount       │   │  minBasketValue      │  │
//! │  └─────────────────┘   │  min_basket_val │   └──────────────────────┘  │
//! │   (request, unchecked) │  created_at     │    (output, no internals)   │
//! │                        └─────────────────┘                              │
//! │                                                                         │
//! │  ┌───────────────────────────────┐                                     │
//! │  │           Basket              │  transient, caller supplied,        │
//! │  │  ───────────────────────────  │  mutated in place by apply          │
//! │  │  value                        │                                     │
//! │  │  appliedDiscount?             │                                     │
//! │  │  applicationSuccessful        │                                     │
//! │  └───────────────────────────────┘                                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Dual-Key Identity
//! A coupon has:
//! - `id`: UUID v4, internal, never leaves the service
//! - `code`: the business key clients use

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::money::Money;

// =============================================================================
// Coupon
// =============================================================================

/// A persisted discount coupon.
///
/// Immutable once saved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Coupon {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Business identifier, stored lowercase.
    pub code: String,

    /// Amount taken off a basket when the coupon applies.
    pub discount: Money,

    /// Minimum basket value the coupon is meant for.
    ///
    /// Recorded only. The apply rule does not read it.
    pub min_basket_value: Money,

    /// When the coupon was created.
    pub created_at: DateTime<Utc>,
}

impl Coupon {
    /// Builds a new coupon record with a fresh ID and timestamp.
    ///
    /// The code is taken as given. Creation requests go through
    /// [`crate::validation::validate_new_coupon`], which lowercases it.
    pub fn new(code: impl Into<String>, discount: Money, min_basket_value: Money) -> Self {
        Coupon {
            id: Uuid::new_v4().to_string(),
            code: code.into(),
            discount,
            min_basket_value,
            created_at: Utc::now(),
        }
    }
}

// =============================================================================
// Coupon Creation Request
// =============================================================================

/// Unchecked request to create a coupon.
///
/// Every field is optional so that a missing value surfaces as the
/// field-specific validation message rather than a JSON decoding error.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCoupon {
    pub discount: Option<Money>,
    pub code: Option<String>,
    pub min_basket_value: Option<Money>,
}

impl NewCoupon {
    /// Convenience constructor with every field present.
    pub fn new(code: impl Into<String>, discount: Money, min_basket_value: Money) -> Self {
        NewCoupon {
            discount: Some(discount),
            code: Some(code.into()),
            min_basket_value: Some(min_basket_value),
        }
    }
}

// =============================================================================
// Coupon Output Representation
// =============================================================================

/// Coupon as returned to clients.
///
/// Carries no internal identifiers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CouponDto {
    pub discount: Money,
    pub code: String,
    pub min_basket_value: Money,
}

impl From<Coupon> for CouponDto {
    fn from(c: Coupon) -> Self {
        CouponDto {
            discount: c.discount,
            code: c.code,
            min_basket_value: c.min_basket_value,
        }
    }
}

impl From<&Coupon> for CouponDto {
    fn from(c: &Coupon) -> Self {
        CouponDto {
            discount: c.discount,
            code: c.code.clone(),
            min_basket_value: c.min_basket_value,
        }
    }
}

// =============================================================================
// Basket
// =============================================================================

/// A caller's basket total plus the outcome of applying a coupon.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Basket {
    /// Basket total as supplied by the caller.
    pub value: Money,

    /// Discount set by a successful apply.
    #[serde(default)]
    pub applied_discount: Option<Money>,

    /// True only when a discount was actually applied.
    #[serde(default)]
    pub application_successful: bool,
}

impl Basket {
    /// Creates a basket with the given value and no discount.
    pub fn with_value(value: Money) -> Self {
        Basket {
            value,
            applied_discount: None,
            application_successful: false,
        }
    }

    /// Records a discount and marks the application successful.
    pub fn apply_discount(&mut self, discount: Money) {
        self.applied_discount = Some(discount);
        self.application_successful = true;
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coupon_new_generates_identity() {
        let a = Coupon::new("spring10", Money::from_major(10), Money::from_major(50));
        let b = Coupon::new("spring10", Money::from_major(10), Money::from_major(50));

        assert_ne!(a.id, b.id);
        assert!(Uuid::parse_str(&a.id).is_ok());
        assert_eq!(a.code, "spring10");
    }

    #[test]
    fn test_dto_hides_internal_fields() {
        let coupon = Coupon::new("spring10", Money::from_major(10), Money::from_major(50));
        let dto = CouponDto::from(&coupon);

        let json = serde_json::to_value(&dto).unwrap();
        let obj = json.as_object().unwrap();
        assert_eq!(obj.len(), 3);
        assert_eq!(obj["code"], "spring10");
        assert!(obj.contains_key("minBasketValue"));
        assert!(!obj.contains_key("id"));
        assert!(!obj.contains_key("createdAt"));
    }

    #[test]
    fn test_new_coupon_tolerates_missing_fields() {
        let req: NewCoupon = serde_json::from_str(r#"{"code":"ABC"}"#).unwrap();
        assert_eq!(req.code.as_deref(), Some("ABC"));
        assert!(req.discount.is_none());
        assert!(req.min_basket_value.is_none());
    }

    #[test]
    fn test_basket_wire_format() {
        let basket: Basket = serde_json::from_str(r#"{"value":100}"#).unwrap();
        assert_eq!(basket, Basket::with_value(Money::from_major(100)));

        let mut applied = basket.clone();
        applied.apply_discount(Money::from_major(10));
        let json = serde_json::to_value(&applied).unwrap();
        assert_eq!(json["applicationSuccessful"], true);
        assert_eq!(json["appliedDiscount"], 10.0);
    }

    #[test]
    fn test_basket_echoes_caller_digits() {
        let body = r#"{"value":12345678901234567.89,"appliedDiscount":0.12345678901234567891}"#;
        let basket: Basket = serde_json::from_str(body).unwrap();
        assert_eq!(basket.value.to_string(), "12345678901234567.89");

        let json = serde_json::to_string(&basket).unwrap();
        assert_eq!(
            json,
            r#"{"value":12345678901234567.89,"appliedDiscount":0.12345678901234567891,"applicationSuccessful":false}"#
        );
    }

    #[test]
    fn test_new_coupon_keeps_discount_digits() {
        let req: NewCoupon =
            serde_json::from_str(r#"{"discount":0.12345678901234567891,"code":"x","minBasketValue":0}"#)
                .unwrap();
        assert_eq!(
            req.discount.map(|d| d.to_string()).as_deref(),
            Some("0.12345678901234567891")
        );
    }
}
