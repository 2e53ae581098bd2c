//! # coupon-core: Pure Business Logic for the Coupon Service
//!
//! This crate contains the coupon domain as pure functions with zero I/O
//! dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Coupon Service Architecture                         │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 coupon-api (axum HTTP server)                   │   │
//! │  │      POST /api/apply   POST /api/create   GET /api/coupons      │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ coupon-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │ discount  │  │ validation│  │   │
//! │  │   │  Coupon   │  │   Money   │  │  apply to │  │ NewCoupon │  │   │
//! │  │   │  Basket   │  │ (Decimal) │  │  basket   │  │  checks   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                 coupon-db (Coupon Store)                        │   │
//! │  │              SQLite repository, in-memory store                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Coupon, Basket, NewCoupon, CouponDto)
//! - [`money`] - Money type over an exact decimal
//! - [`discount`] - The basket discount rule
//! - [`error`] - Domain error types
//! - [`validation`] - Coupon creation validation
//!
//! ## Example Usage
//!
//! ```rust
//! use coupon_core::discount::apply_to_basket;
//! use coupon_core::{Basket, Coupon, Money};
//!
//! let coupon = Coupon::new("spring10", Money::from_major(10), Money::from_major(50));
//! let mut basket = Basket::with_value(Money::from_major(100));
//!
//! apply_to_basket(&mut basket, &coupon).unwrap();
//!
//! assert!(basket.application_successful);
//! assert_eq!(basket.applied_discount, Some(Money::from_major(10)));
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod discount;
pub mod error;
pub mod money;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Fixed message for a basket whose value is negative.
pub const INVALID_BASKET_VALUE: &str = "Basket Value cannot be null or negative.";

/// Message for a missing or negative coupon discount.
pub const INVALID_DISCOUNT_VALUE: &str = "Discount Value cannot be null or negative.";

/// Message for a missing or blank coupon code.
pub const INVALID_COUPON_CODE: &str = "Coupon code cannot be null or blank.";

/// Message for a missing or negative minimum basket value.
pub const INVALID_MIN_BASKET_VALUE: &str = "Minimum basket value cannot be null or negative.";
