//! # Database Migrations
//!
//! SQL files under the workspace `migrations/sqlite` directory are compiled
//! into the binary and applied by [`crate::Database::new`]. Applied versions
//! are tracked in `_sqlx_migrations`, so reopening a database is a no-op.
//!
//! New schema changes go in a new `NNN_description.sql` file; applied files
//! are never edited.

use sqlx::SqlitePool;
use tracing::info;

use crate::error::DbResult;

static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("../../migrations/sqlite");

/// Applies every pending migration in order.
pub async fn run_migrations(pool: &SqlitePool) -> DbResult<()> {
    MIGRATOR.run(pool).await?;
    info!(known = MIGRATOR.migrations.len(), "Coupon schema up to date");
    Ok(())
}

