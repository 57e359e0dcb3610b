//! Work Log Repository

use super::{RepoError, RepoResult};
use shared::models::{WorkLog, WorkLogStatus};
use sqlx::SqlitePool;

const COLUMNS: &str = "id, assignment_id, packer_id, bags_assigned, bags_packed, status, modification_comment, reviewed_by, created_at, updated_at";

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<WorkLog>> {
    let log = sqlx::query_as::<_, WorkLog>(&format!("SELECT {COLUMNS} FROM work_logs WHERE id = ?"))
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(log)
}

pub async fn find_all(
    pool: &SqlitePool,
    status: Option<WorkLogStatus>,
    packer_id: Option<i64>,
) -> RepoResult<Vec<WorkLog>> {
    let logs = sqlx::query_as::<_, WorkLog>(&format!(
        "SELECT {COLUMNS} FROM work_logs WHERE (?1 IS NULL OR status = ?1) AND (?2 IS NULL OR packer_id = ?2) ORDER BY created_at DESC, id DESC"
    ))
    .bind(status)
    .bind(packer_id)
    .fetch_all(pool)
    .await?;
    Ok(logs)
}

pub async fn create(
    pool: &SqlitePool,
    assignment_id: i64,
    packer_id: i64,
    bags_assigned: i64,
    bags_packed: i64,
) -> RepoResult<WorkLog> {
    let now = shared::util::now_millis();
    let id = sqlx::query_scalar::<_, i64>(
        "INSERT INTO work_logs (assignment_id, packer_id, bags_assigned, bags_packed, status, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, 'pending', ?5, ?5) RETURNING id",
    )
    .bind(assignment_id)
    .bind(packer_id)
    .bind(bags_assigned)
    .bind(bags_packed)
    .bind(now)
    .fetch_one(pool)
    .await?;

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create work log".into()))
}

/// `pending → approved | rejected`; returns rows changed
pub async fn review(
    pool: &SqlitePool,
    id: i64,
    to: WorkLogStatus,
    reviewer_id: i64,
    comment: Option<&str>,
) -> RepoResult<u64> {
    let now = shared::util::now_millis();
    let rows = sqlx::query(
        "UPDATE work_logs SET status = ?1, modification_comment = ?2, reviewed_by = ?3, updated_at = ?4 WHERE id = ?5 AND status = 'pending'",
    )
    .bind(to)
    .bind(comment)
    .bind(reviewer_id)
    .bind(now)
    .bind(id)
    .execute(pool)
    .await?;
    Ok(rows.rows_affected())
}
