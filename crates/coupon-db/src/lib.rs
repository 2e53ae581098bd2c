//! # coupon-db: Coupon Store for the Coupon Service
//!
//! This crate persists and retrieves coupons. It offers a SQLite backend
//! (sqlx) and an in-memory backend behind one `CouponStore` trait.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Coupon Service Data Flow                         │
//! │                                                                         │
//! │  CouponService (coupon-api)                                            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     coupon-db (THIS CRATE)                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌────────────────┐    ┌──────────────┐  │   │
//! │  │   │   Database    │    │  CouponStore   │    │  Migrations  │  │   │
//! │  │   │   (pool.rs)   │    │                │    │  (embedded)  │  │   │
//! │  │   │               │    │ CouponRepo     │    │ 001_create_  │  │   │
//! │  │   │ SqlitePool    │◄───│ MemoryStore    │    │   coupons    │  │   │
//! │  │   └───────────────┘    └────────────────┘    └──────────────┘  │   │
//! │  │                                                                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  SQLite file (storage.database_path)                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Database error types
//! - [`repository`] - `CouponStore` and its implementations
//!
//! ## Usage
//!
//! ```rust,ignore
//! use coupon_db::{CouponStore, Database, DbConfig};
//!
//! let db = Database::new(DbConfig::new("coupons.db")).await?;
//! let coupon = db.coupons().find_by_code("spring10").await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};

pub use repository::coupon::CouponRepository;
pub use repository::memory::MemoryCouponStore;
pub use repository::CouponStore;
