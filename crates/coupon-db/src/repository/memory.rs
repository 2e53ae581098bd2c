//! # In-Memory Coupon Store
//!
//! Process-local store for tests and ephemeral runs. Keeps insertion order
//! and enforces code uniqueness the way the SQLite table does.

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;

use crate::error::{DbError, DbResult};
use crate::repository::CouponStore;
use coupon_core::Coupon;

/// Coupon store backed by a `RwLock<Vec<Coupon>>`.
#[derive(Debug, Default)]
pub struct MemoryCouponStore {
    coupons: RwLock<Vec<Coupon>>,
}

impl MemoryCouponStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-populated with the given coupons.
    pub fn with_coupons(coupons: Vec<Coupon>) -> Self {
        MemoryCouponStore {
            coupons: RwLock::new(coupons),
        }
    }

    /// Number of stored coupons.
    pub async fn len(&self) -> usize {
        self.coupons.read().await.len()
    }

    /// Returns true when nothing is stored.
    pub async fn is_empty(&self) -> bool {
        self.coupons.read().await.is_empty()
    }
}

#[async_trait]
impl CouponStore for MemoryCouponStore {
    async fn find_by_code(&self, code: &str) -> DbResult<Option<Coupon>> {
        let coupons = self.coupons.read().await;
        Ok(coupons.iter().find(|c| c.code == code).cloned())
    }

    async fn find_all(&self) -> DbResult<Vec<Coupon>> {
        Ok(self.coupons.read().await.clone())
    }

    async fn save(&self, coupon: &Coupon) -> DbResult<Coupon> {
        let mut coupons = self.coupons.write().await;

        if coupons.iter().any(|c| c.code == coupon.code) {
            return Err(DbError::duplicate("code", coupon.code.clone()));
        }

        debug!(id = %coupon.id, code = %coupon.code, "Stored coupon in memory");
        coupons.push(coupon.clone());
        Ok(coupon.clone())
    }

    async fn health_check(&self) -> bool {
        true
    }
}
