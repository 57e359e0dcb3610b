//! Inventory Repository
//!
//! Adjustment log plus the aggregate queries the stock snapshot is
//! derived from.

use super::{RepoError, RepoResult};
use shared::models::InventoryLog;
use sqlx::SqlitePool;

const COLUMNS: &str = "id, quantity, reason, recorded_by, created_at";

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<InventoryLog>> {
    let log = sqlx::query_as::<_, InventoryLog>(&format!(
        "SELECT {COLUMNS} FROM inventory_logs WHERE id = ?"
    ))
    .bind(id)
    .fetch_optional(pool)
    .await?;
    Ok(log)
}

pub async fn find_all(pool: &SqlitePool) -> RepoResult<Vec<InventoryLog>> {
    let logs = sqlx::query_as::<_, InventoryLog>(&format!(
        "SELECT {COLUMNS} FROM inventory_logs ORDER BY created_at DESC, id DESC"
    ))
    .fetch_all(pool)
    .await?;
    Ok(logs)
}

pub async fn create(
    pool: &SqlitePool,
    quantity: i64,
    reason: &str,
    recorded_by: i64,
) -> RepoResult<InventoryLog> {
    let id = sqlx::query_scalar::<_, i64>(
        "INSERT INTO inventory_logs (quantity, reason, recorded_by, created_at) VALUES (?, ?, ?, ?) RETURNING id",
    )
    .bind(quantity)
    .bind(reason)
    .bind(recorded_by)
    .bind(shared::util::now_millis())
    .fetch_one(pool)
    .await?;

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create inventory log".into()))
}

pub async fn sum_adjustments(pool: &SqlitePool) -> RepoResult<i64> {
    let total = sqlx::query_scalar::<_, i64>("SELECT COALESCE(SUM(quantity), 0) FROM inventory_logs")
        .fetch_one(pool)
        .await?;
    Ok(total)
}

pub async fn sum_bags_received(pool: &SqlitePool) -> RepoResult<i64> {
    let total = sqlx::query_scalar::<_, i64>("SELECT COALESCE(SUM(bags_received), 0) FROM batches")
        .fetch_one(pool)
        .await?;
    Ok(total)
}

/// Σ bags_assigned over approved assignments
pub async fn sum_bags_allocated(pool: &SqlitePool) -> RepoResult<i64> {
    let total = sqlx::query_scalar::<_, i64>(
        "SELECT COALESCE(SUM(bags_assigned), 0) FROM assignments WHERE status = 'approved'",
    )
    .fetch_one(pool)
    .await?;
    Ok(total)
}
