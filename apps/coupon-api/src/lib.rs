//! # Coupon API
//!
//! HTTP server for creating, querying and applying discount coupons.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Coupon API Server                                │
//! │                                                                         │
//! │  Client ──► axum Router (routes.rs) ──► CouponService ──► CouponStore   │
//! │                  │                          │                 │         │
//! │                  │ ApiError (error.rs)      │ coupon-core     ├ SQLite  │
//! │                  ▼                          │ rules           └ memory  │
//! │             JSON error body                                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration
//! See [`config`]: TOML file plus `COUPON_*` environment overrides.

pub mod config;
pub mod error;
pub mod routes;
pub mod services;

use std::sync::Arc;

use tracing::info;

use coupon_db::{CouponStore, Database, DbConfig, DbResult, MemoryCouponStore};

// Re-exports
pub use config::{ApiConfig, StorageBackend};
pub use error::ApiError;
pub use routes::{router, AppState};
pub use services::{CouponService, ServiceError, ServiceResult};

/// Opens the coupon store selected by the configuration.
pub async fn build_store(config: &config::StorageConfig) -> DbResult<Arc<dyn CouponStore>> {
    match config.backend {
        StorageBackend::Memory => {
            info!("Using in-memory coupon store");
            Ok(Arc::new(MemoryCouponStore::new()))
        }
        StorageBackend::Sqlite => {
            let db_config =
                DbConfig::new(&config.database_path).max_connections(config.max_connections);
            let db = Database::new(db_config).await?;
            Ok(Arc::new(db.coupons()))
        }
    }
}

/// Builds the full application over a store.
pub fn app(store: Arc<dyn CouponStore>) -> axum::Router {
    router(AppState::new(CouponService::new(store)))
}
