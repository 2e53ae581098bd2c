//! # Database Error Types
//!
//! Failures of a [`crate::CouponStore`]. A missing coupon is not an error:
//! lookups return `Ok(None)`.
//!
//! ```text
//! sqlx::Error / memory-store duplicate
//!        │
//!        ▼
//!     DbError ──► coupon-api: UniqueViolation → 400, rest → 500 (logged)
//! ```

use thiserror::Error;

/// Coupon store errors.
#[derive(Debug, Error)]
pub enum DbError {
    /// A coupon with this (lowercased) code already exists.
    #[error("Duplicate {field}: '{value}' already exists")]
    UniqueViolation { field: String, value: String },

    /// Could not open the database, or the pool was closed.
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    #[error("Migration failed: {0}")]
    MigrationFailed(String),

    /// SQLite rejected a statement for a reason other than uniqueness.
    #[error("Query failed: {0}")]
    QueryFailed(String),

    /// Timed out waiting for a free connection.
    #[error("Connection pool exhausted")]
    PoolExhausted,

    /// A stored decimal column holds text that does not parse.
    #[error("Invalid data in {column}: {message}")]
    InvalidData { column: String, message: String },

    #[error("Internal database error: {0}")]
    Internal(String),
}

impl DbError {
    pub fn duplicate(field: impl Into<String>, value: impl Into<String>) -> Self {
        DbError::UniqueViolation {
            field: field.into(),
            value: value.into(),
        }
    }

    pub fn invalid_data(column: impl Into<String>, message: impl Into<String>) -> Self {
        DbError::InvalidData {
            column: column.into(),
            message: message.into(),
        }
    }
}

/// ```text
/// Database("UNIQUE constraint failed: coupons.code") → UniqueViolation
/// Database(other)                                    → QueryFailed
/// PoolTimedOut                                       → PoolExhausted
/// PoolClosed                                         → ConnectionFailed
/// ColumnDecode                                       → InvalidData
/// anything else                                      → Internal
/// ```
///
/// The SQLite message does not carry the offending value; callers that know
/// it (see `CouponRepository::save`) replace the placeholder.
impl From<sqlx::Error> for DbError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::Database(db_err) => {
                let msg = db_err.message();
                match msg.strip_prefix("UNIQUE constraint failed: ") {
                    Some(column) => DbError::duplicate(column, "unknown"),
                    None => DbError::QueryFailed(msg.to_string()),
                }
            }
            sqlx::Error::PoolTimedOut => DbError::PoolExhausted,
            sqlx::Error::PoolClosed => DbError::ConnectionFailed("Pool is closed".to_string()),
            sqlx::Error::ColumnDecode { index, source } => DbError::invalid_data(index, source.to_string()),
            other => DbError::Internal(other.to_string()),
        }
    }
}

impl From<sqlx::migrate::MigrateError> for DbError {
    fn from(err: sqlx::migrate::MigrateError) -> Self {
        DbError::MigrationFailed(err.to_string())
    }
}

/// Result type for coupon store operations.
pub type DbResult<T> = Result<T, DbError>;
