//! Coupon service: application, creation and query logic over a store.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  CouponService { store: Arc<dyn CouponStore> }                          │
//! │                                                                         │
//! │  apply(basket, code)                                                   │
//! │    store.find_by_code ──None──► Ok(None)            basket untouched   │
//! │         │ Some                                                          │
//! │         ▼                                                               │
//! │    discount::apply_to_basket ──► Applied / NotApplied / InvalidBasket  │
//! │                                                                         │
//! │  create_coupon(request)                                                │
//! │    validate_new_coupon ──► into_coupon ──► store.save                  │
//! │                                                                         │
//! │  get_coupons(codes)       each code in order, misses skipped           │
//! │  find_coupon_by_code      miss ──► CouponNotFound                      │
//! │  get_all_coupons          oldest first                                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::Arc;

use tracing::{debug, info, warn};

use coupon_core::discount::{apply_to_basket, ApplyOutcome};
use coupon_core::validation::validate_new_coupon;
use coupon_core::{Basket, CoreError, Coupon, CouponDto, NewCoupon};
use coupon_db::CouponStore;

use super::ServiceResult;

/// Coupon operations. Cheap to clone.
#[derive(Clone)]
pub struct CouponService {
    store: Arc<dyn CouponStore>,
}

impl CouponService {
    /// Creates a service over the given store.
    pub fn new(store: Arc<dyn CouponStore>) -> Self {
        CouponService { store }
    }

    /// Applies the coupon identified by `code` to `basket` in place.
    ///
    /// ## Returns
    /// * `Ok(None)` - No coupon with that code; basket untouched
    /// * `Ok(Some(Applied))` - Discount set on the basket
    /// * `Ok(Some(NotApplied))` - Basket value was zero; basket untouched
    /// * `Err(InvalidBasket)` - Basket value was negative; basket untouched
    ///
    /// The coupon's minimum basket value is not checked.
    pub async fn apply(&self, basket: &mut Basket, code: &str) -> ServiceResult<Option<ApplyOutcome>> {
        let Some(coupon) = self.store.find_by_code(code).await? else {
            info!(code = %code, "Coupon not found, nothing applied");
            return Ok(None);
        };

        if basket.value < coupon.min_basket_value {
            debug!(
                code = %code,
                value = %basket.value,
                min_basket_value = %coupon.min_basket_value,
                "Basket below coupon minimum, applying anyway"
            );
        }

        match apply_to_basket(basket, &coupon) {
            Ok(outcome) => {
                match outcome {
                    ApplyOutcome::Applied => {
                        info!(code = %code, discount = %coupon.discount, "Coupon applied")
                    }
                    ApplyOutcome::NotApplied => {
                        info!(code = %code, "Basket value is zero, coupon not applied")
                    }
                }
                Ok(Some(outcome))
            }
            Err(e) => {
                warn!(code = %code, value = %basket.value, "Rejected basket");
                Err(e.into())
            }
        }
    }

    /// Validates and persists a new coupon.
    ///
    /// The stored code is lowercased.
    pub async fn create_coupon(&self, request: &NewCoupon) -> ServiceResult<Coupon> {
        let validated = validate_new_coupon(request).map_err(|e| {
            warn!(field = e.field(), error = %e, "Coupon validation failed");
            e
        })?;

        let saved = self.store.save(&validated.into_coupon()).await?;

        info!(id = %saved.id, code = %saved.code, "Coupon created");
        Ok(saved)
    }

    /// Looks up each code in order, skipping codes with no coupon.
    pub async fn get_coupons(&self, codes: &[String]) -> ServiceResult<Vec<CouponDto>> {
        let mut found = Vec::with_capacity(codes.len());

        for code in codes {
            match self.store.find_by_code(code).await? {
                Some(coupon) => found.push(CouponDto::from(coupon)),
                None => debug!(code = %code, "Skipping unknown coupon code"),
            }
        }

        debug!(requested = codes.len(), found = found.len(), "Batch coupon lookup");
        Ok(found)
    }

    /// Looks up a single coupon.
    pub async fn find_coupon_by_code(&self, code: &str) -> ServiceResult<CouponDto> {
        self.store
            .find_by_code(code)
            .await?
            .map(CouponDto::from)
            .ok_or_else(|| CoreError::CouponNotFound(code.to_string()).into())
    }

    /// Returns every coupon, oldest first.
    pub async fn get_all_coupons(&self) -> ServiceResult<Vec<CouponDto>> {
        let coupons = self.store.find_all().await?;
        Ok(coupons.iter().map(CouponDto::from).collect())
    }

    /// True when the store can serve requests.
    pub async fn is_healthy(&self) -> bool {
        self.store.health_check().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::ServiceError;
    use coupon_core::{Money, ValidationError};
    use coupon_db::{DbError, MemoryCouponStore};
    use rust_decimal_macros::dec;

    fn service_with(coupons: Vec<Coupon>) -> CouponService {
        CouponService::new(Arc::new(MemoryCouponStore::with_coupons(coupons)))
    }

    fn seeded() -> CouponService {
        service_with(vec![
            Coupon::new("1111", Money::from_major(10), Money::from_major(50)),
            Coupon::new("1234", Money::from_major(5), Money::from_major(20)),
        ])
    }

    // =========================================================================
    // apply
    // =========================================================================

    #[tokio::test]
    async fn test_apply_positive_basket() {
        let service = seeded();
        let mut basket = Basket::with_value(Money::from_major(100));

        let outcome = service.apply(&mut basket, "1111").await.unwrap();

        assert_eq!(outcome, Some(ApplyOutcome::Applied));
        assert!(basket.application_successful);
        assert_eq!(basket.applied_discount, Some(Money::from_major(10)));
    }

    #[tokio::test]
    async fn test_apply_zero_basket() {
        let service = seeded();
        let mut basket = Basket::with_value(Money::zero());

        let outcome = service.apply(&mut basket, "1111").await.unwrap();

        assert_eq!(outcome, Some(ApplyOutcome::NotApplied));
        assert_eq!(basket, Basket::with_value(Money::zero()));
    }

    #[tokio::test]
    async fn test_apply_negative_basket() {
        let service = seeded();
        let mut basket = Basket::with_value(Money::new(dec!(-1.50)));

        let err = service.apply(&mut basket, "1111").await.unwrap_err();

        assert!(matches!(err, ServiceError::Core(CoreError::InvalidBasket)));
        assert!(!basket.application_successful);
        assert!(basket.applied_discount.is_none());
    }

    #[tokio::test]
    async fn test_apply_unknown_code() {
        let service = seeded();
        let mut basket = Basket::with_value(Money::from_major(100));

        let outcome = service.apply(&mut basket, "9999").await.unwrap();

        assert!(outcome.is_none());
        assert_eq!(basket, Basket::with_value(Money::from_major(100)));
    }

    #[tokio::test]
    async fn test_apply_ignores_min_basket_value() {
        let service = seeded();
        let mut basket = Basket::with_value(Money::from_major(1));

        let outcome = service.apply(&mut basket, "1111").await.unwrap();
        assert_eq!(outcome, Some(ApplyOutcome::Applied));
    }

    // =========================================================================
    // create_coupon
    // =========================================================================

    #[tokio::test]
    async fn test_create_lowercases_and_persists() {
        let service = service_with(vec![]);
        let request = NewCoupon::new("ABC", Money::from_major(10), Money::from_major(50));

        let coupon = service.create_coupon(&request).await.unwrap();
        assert_eq!(coupon.code, "abc");

        let found = service.find_coupon_by_code("abc").await.unwrap();
        assert_eq!(found.code, "abc");
        assert_eq!(found.discount, Money::from_major(10));
    }

    #[tokio::test]
    async fn test_create_reports_first_invalid_field() {
        let service = service_with(vec![]);

        let request = NewCoupon {
            discount: Some(Money::from_major(-1)),
            code: None,
            min_basket_value: None,
        };
        let err = service.create_coupon(&request).await.unwrap_err();
        assert!(matches!(
            err,
            ServiceError::Core(CoreError::InvalidInput(ValidationError::InvalidDiscount))
        ));

        let request = NewCoupon {
            discount: Some(Money::from_major(1)),
            code: Some("  ".into()),
            min_basket_value: None,
        };
        let err = service.create_coupon(&request).await.unwrap_err();
        assert_eq!(err.to_string(), "Coupon code cannot be null or blank.");

        let request = NewCoupon {
            discount: Some(Money::from_major(1)),
            code: Some("ok".into()),
            min_basket_value: Some(Money::from_major(-1)),
        };
        let err = service.create_coupon(&request).await.unwrap_err();
        assert_eq!(err.to_string(), "Minimum basket value cannot be null or negative.");
    }

    #[tokio::test]
    async fn test_create_duplicate_code() {
        let service = seeded();
        let request = NewCoupon::new("1111", Money::from_major(1), Money::zero());

        let err = service.create_coupon(&request).await.unwrap_err();
        assert!(matches!(err, ServiceError::Db(DbError::UniqueViolation { .. })));
    }

    // =========================================================================
    // queries
    // =========================================================================

    #[tokio::test]
    async fn test_get_coupons_keeps_input_order() {
        let service = seeded();

        let found = service
            .get_coupons(&["1234".to_string(), "1111".to_string()])
            .await
            .unwrap();

        assert_eq!(found.len(), 2);
        assert_eq!(found[0].code, "1234");
        assert_eq!(found[1].code, "1111");
    }

    #[tokio::test]
    async fn test_get_coupons_skips_misses() {
        let service = seeded();

        let found = service
            .get_coupons(&["999".to_string(), "1111".to_string()])
            .await
            .unwrap();
        assert_eq!(found.len(), 1);

        let none = service.get_coupons(&["999".to_string()]).await.unwrap();
        assert!(none.is_empty());
    }

    #[tokio::test]
    async fn test_find_coupon_by_code() {
        let service = seeded();

        let dto = service.find_coupon_by_code("1234").await.unwrap();
        assert_eq!(dto.discount, Money::from_major(5));
        assert_eq!(dto.min_basket_value, Money::from_major(20));

        let err = service.find_coupon_by_code("nope").await.unwrap_err();
        assert!(matches!(err, ServiceError::Core(CoreError::CouponNotFound(ref c)) if c == "nope"));
    }

    #[tokio::test]
    async fn test_get_all_coupons() {
        let service = seeded();
        let all = service.get_all_coupons().await.unwrap();
        assert_eq!(all.len(), 2);

        assert!(service_with(vec![]).get_all_coupons().await.unwrap().is_empty());
        assert!(service.is_healthy().await);
    }
}
