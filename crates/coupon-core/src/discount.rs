//! # Discount Application
//!
//! The rule that decides whether a coupon's discount lands on a basket.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       apply_to_basket(basket, coupon)                   │
//! │                                                                         │
//! │   basket.value < 0  ──► Err(InvalidBasket)      basket untouched       │
//! │   basket.value == 0 ──► Ok(NotApplied)          basket untouched       │
//! │   basket.value > 0  ──► Ok(Applied)             appliedDiscount = D    │
//! │                                                 applicationSuccessful  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The coupon's `min_basket_value` is not consulted.

use crate::error::{CoreError, CoreResult};
use crate::types::{Basket, Coupon};

/// Outcome of a non-failing apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplyOutcome {
    /// Discount set on the basket.
    Applied,
    /// Basket value was zero; nothing changed.
    NotApplied,
}

/// Applies a coupon's discount to a basket in place.
///
/// The basket is only mutated on [`ApplyOutcome::Applied`].
pub fn apply_to_basket(basket: &mut Basket, coupon: &Coupon) -> CoreResult<ApplyOutcome> {
    if basket.value.is_negative() {
        return Err(CoreError::InvalidBasket);
    }

    if basket.value.is_zero() {
        return Ok(ApplyOutcome::NotApplied);
    }

    basket.apply_discount(coupon.discount);
    Ok(ApplyOutcome::Applied)
}
