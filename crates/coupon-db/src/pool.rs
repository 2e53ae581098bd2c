//! # Database Pool Management
//!
//! Opens the SQLite pool behind [`CouponRepository`].
//!
//! ```text
//! StorageConfig ──► DbConfig { path, max_connections }
//!                        │
//!                        ▼
//!                Database::new ── WAL, create file, migrate
//!                        │
//!                        ▼
//!                db.coupons() ──► CouponRepository (CouponStore)
//! ```
//!
//! The coupon store reads far more than it writes; WAL keeps lookups from
//! waiting on an insert.

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};
use sqlx::SqlitePool;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;
use tracing::info;

use crate::error::{DbError, DbResult};
use crate::migrations;
use crate::repository::coupon::CouponRepository;

const ACQUIRE_TIMEOUT: Duration = Duration::from_secs(30);

// =============================================================================
// Configuration
// =============================================================================

/// Where the coupon database lives and how many connections it may use.
///
/// ## Example
/// ```rust
/// use coupon_db::DbConfig;
///
/// let config = DbConfig::new("coupons.db").max_connections(8);
/// assert_eq!(config.max_connections, 8);
/// ```
#[derive(Debug, Clone)]
pub struct DbConfig {
    pub database_path: PathBuf,
    pub max_connections: u32,
}

impl DbConfig {
    /// File-backed database, created on first connect. Five connections.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        DbConfig {
            database_path: path.into(),
            max_connections: 5,
        }
    }

    pub fn max_connections(mut self, max: u32) -> Self {
        self.max_connections = max;
        self
    }

    /// Private in-memory database, used by tests.
    ///
    /// Single connection: the database lives only as long as it does.
    pub fn in_memory() -> Self {
        DbConfig {
            database_path: PathBuf::from(":memory:"),
            max_connections: 1,
        }
    }
}

// =============================================================================
// Database
// =============================================================================

/// Migrated SQLite pool for the coupon store.
#[derive(Debug, Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Connects, creating the file if missing, and applies pending migrations.
    pub async fn new(config: DbConfig) -> DbResult<Self> {
        info!(path = %config.database_path.display(), "Opening coupon database");

        let options =
            SqliteConnectOptions::from_str(&format!("sqlite://{}", config.database_path.display()))
                .map_err(|e| DbError::ConnectionFailed(e.to_string()))?
                .journal_mode(SqliteJournalMode::Wal)
                .synchronous(SqliteSynchronous::Normal)
                .foreign_keys(true)
                .create_if_missing(true);

        // One connection is always kept open so an in-memory database survives
        let pool = SqlitePoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(1)
            .acquire_timeout(ACQUIRE_TIMEOUT)
            .connect_with(options)
            .await
            .map_err(|e| DbError::ConnectionFailed(e.to_string()))?;

        migrations::run_migrations(&pool).await?;

        info!(max_connections = config.max_connections, "Coupon database ready");
        Ok(Database { pool })
    }

    /// Coupon store over this pool.
    pub fn coupons(&self) -> CouponRepository {
        CouponRepository::new(self.pool.clone())
    }

    /// Closes the pool; every repository sharing it starts failing.
    pub async fn close(&self) {
        info!("Closing coupon database");
        self.pool.close().await;
    }
}
