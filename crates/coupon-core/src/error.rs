//! # Error Types
//!
//! Domain-specific error types for coupon-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  coupon-core errors (this file)                                        │
//! │  ├── CoreError        - Business rule failures                         │
//! │  └── ValidationError  - Input validation failures (one field each)     │
//! │                                                                         │
//! │  coupon-db errors (separate crate)                                     │
//! │  └── DbError          - Store operation failures                       │
//! │                                                                         │
//! │  coupon-api errors (in app)                                            │
//! │  └── ApiError         - What HTTP clients see (serialized)             │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → ApiError → HTTP response          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

use crate::{INVALID_BASKET_VALUE, INVALID_COUPON_CODE, INVALID_DISCOUNT_VALUE, INVALID_MIN_BASKET_VALUE};

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Creation or request input failed validation.
    ///
    /// The message is the field-specific message of the wrapped error.
    #[error("{0}")]
    InvalidInput(#[from] ValidationError),

    /// Basket value is negative.
    ///
    /// ## When This Occurs
    /// ```text
    /// apply(basket { value: -1 }, "spring10")
    ///      │
    ///      ▼
    /// coupon found, value < 0
    ///      │
    ///      ▼
    /// InvalidBasket (basket untouched)
    /// ```
    #[error("{}", INVALID_BASKET_VALUE)]
    InvalidBasket,

    /// No coupon exists for the requested code (single lookup only).
    #[error("Coupon not found: {0}")]
    CouponNotFound(String),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Each variant names exactly one offending field. Validation stops at the
/// first failing check, so there is never more than one of these per request.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Discount is missing or negative.
    #[error("{}", INVALID_DISCOUNT_VALUE)]
    InvalidDiscount,

    /// Code is missing or blank.
    #[error("{}", INVALID_COUPON_CODE)]
    InvalidCode,

    /// Minimum basket value is missing or negative.
    #[error("{}", INVALID_MIN_BASKET_VALUE)]
    InvalidMinBasketValue,

    /// A required field is missing.
    #[error("{field} is required")]
    Required { field: String },
}

impl ValidationError {
    /// Returns the wire name of the field that failed.
    pub fn field(&self) -> &str {
        match self {
            ValidationError::InvalidDiscount => "discount",
            ValidationError::InvalidCode => "code",
            ValidationError::InvalidMinBasketValue => "minBasketValue",
            ValidationError::Required { field } => field,
        }
    }

    /// Creates a Required error for the given field.
    pub fn required(field: impl Into<String>) -> Self {
        ValidationError::Required {
            field: field.into(),
        }
    }
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
