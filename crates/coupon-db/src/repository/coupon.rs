//! # Coupon Repository
//!
//! SQLite operations for coupons.
//!
//! ## Storage Format
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  coupons                                                                │
//! │  ──────────────────────────────────────────────────────────────────     │
//! │  id        │ code     │ discount │ min_basket_value │ created_at        │
//! │  uuid-...  │ spring10 │ "10.00"  │ "50"             │ 2026-...+00:00    │
//! │                                                                         │
//! │  Decimals are TEXT so the exact value and scale survive a round trip.   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};
use crate::repository::CouponStore;
use coupon_core::{Coupon, Money};

/// Raw row as stored in SQLite.
#[derive(Debug, sqlx::FromRow)]
struct CouponRow {
    id: String,
    code: String,
    discount: String,
    min_basket_value: String,
    created_at: DateTime<Utc>,
}

impl TryFrom<CouponRow> for Coupon {
    type Error = DbError;

    fn try_from(row: CouponRow) -> DbResult<Self> {
        Ok(Coupon {
            discount: parse_money("discount", &row.discount)?,
            min_basket_value: parse_money("min_basket_value", &row.min_basket_value)?,
            id: row.id,
            code: row.code,
            created_at: row.created_at,
        })
    }
}

fn parse_money(column: &str, raw: &str) -> DbResult<Money> {
    raw.parse::<Money>()
        .map_err(|e| DbError::invalid_data(column, format!("'{}': {}", raw, e)))
}

/// Repository for coupon database operations.
///
/// ## Usage
/// ```rust,ignore
/// let repo = db.coupons();
///
/// let saved = repo.save(&coupon).await?;
/// let found = repo.find_by_code("spring10").await?;
/// ```
#[derive(Debug, Clone)]
pub struct CouponRepository {
    pool: SqlitePool,
}

impl CouponRepository {
    /// Creates a new CouponRepository.
    pub fn new(pool: SqlitePool) -> Self {
        CouponRepository { pool }
    }

    /// Counts stored coupons.
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM coupons")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}

#[async_trait]
impl CouponStore for CouponRepository {
    async fn find_by_code(&self, code: &str) -> DbResult<Option<Coupon>> {
        debug!(code = %code, "Looking up coupon");

        let row = sqlx::query_as::<_, CouponRow>(
            r#"
            SELECT id, code, discount, min_basket_value, created_at
            FROM coupons
            WHERE code = ?1
            "#,
        )
        .bind(code)
        .fetch_optional(&self.pool)
        .await?;

        row.map(Coupon::try_from).transpose()
    }

    async fn find_all(&self) -> DbResult<Vec<Coupon>> {
        let rows = sqlx::query_as::<_, CouponRow>(
            r#"
            SELECT id, code, discount, min_basket_value, created_at
            FROM coupons
            ORDER BY created_at, rowid
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        debug!(count = rows.len(), "Loaded all coupons");
        rows.into_iter().map(Coupon::try_from).collect()
    }

    async fn save(&self, coupon: &Coupon) -> DbResult<Coupon> {
        debug!(id = %coupon.id, code = %coupon.code, "Inserting coupon");

        sqlx::query(
            r#"
            INSERT INTO coupons (id, code, discount, min_basket_value, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
        )
        .bind(&coupon.id)
        .bind(&coupon.code)
        .bind(coupon.discount.to_string())
        .bind(coupon.min_basket_value.to_string())
        .bind(coupon.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| match DbError::from(e) {
            DbError::UniqueViolation { .. } => DbError::duplicate("code", coupon.code.clone()),
            other => other,
        })?;

        Ok(coupon.clone())
    }

    async fn health_check(&self) -> bool {
        sqlx::query("SELECT 1").execute(&self.pool).await.is_ok()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
