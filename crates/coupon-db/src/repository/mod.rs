//! # Repository Module
//!
//! The coupon store seam and its implementations.
//!
//! ## Store Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    CouponStore                                          │
//! │                                                                         │
//! │  CouponService (coupon-api)                                            │
//! │       │                                                                 │
//! │       │  store.find_by_code("spring10")                                │
//! │       ▼                                                                 │
//! │  Arc<dyn CouponStore>                                                  │
//! │  ├── find_by_code(&self, code)                                         │
//! │  ├── find_all(&self)                                                   │
//! │  ├── save(&self, coupon)                                               │
//! │  └── health_check(&self)                                               │
//! │       │                                   │                             │
//! │       ▼                                   ▼                             │
//! │  CouponRepository (SQLite)          MemoryCouponStore (RwLock<Vec>)    │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Stores
//!
//! - [`CouponRepository`](coupon::CouponRepository) - SQLite-backed
//! - [`MemoryCouponStore`](memory::MemoryCouponStore) - process-local

use async_trait::async_trait;
use coupon_core::Coupon;

use crate::error::DbResult;

pub mod coupon;
pub mod memory;

/// Persistence operations the coupon service needs.
///
/// Implementations are internally synchronized and shared as
/// `Arc<dyn CouponStore>`.
#[async_trait]
pub trait CouponStore: Send + Sync {
    /// Finds a coupon by exact code match.
    async fn find_by_code(&self, code: &str) -> DbResult<Option<Coupon>>;

    /// Returns every coupon, oldest first.
    async fn find_all(&self) -> DbResult<Vec<Coupon>>;

    /// Persists a new coupon and returns it.
    ///
    /// Fails with `DbError::UniqueViolation` when the code is taken.
    async fn save(&self, coupon: &Coupon) -> DbResult<Coupon>;

    /// Returns true when the store can serve requests.
    async fn health_check(&self) -> bool;
}
