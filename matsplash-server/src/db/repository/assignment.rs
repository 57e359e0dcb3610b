//! Assignment Repository
//!
//! Capacity (`bags_received − Σ bags_assigned` over non-rejected
//! assignments of the batch) is checked inside the same statement that
//! inserts or transitions the row.

use super::RepoResult;
use shared::models::{Assignment, AssignmentStatus};
use sqlx::SqlitePool;

const COLUMNS: &str = "id, batch_id, packer_id, storekeeper_id, bags_assigned, status, notes, rejection_comment, review_comment, reviewed_by, created_at, updated_at";

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Assignment>> {
    let assignment = sqlx::query_as::<_, Assignment>(&format!(
        "SELECT {COLUMNS} FROM assignments WHERE id = ?"
    ))
    .bind(id)
    .fetch_optional(pool)
    .await?;
    Ok(assignment)
}

pub async fn find_by_status(
    pool: &SqlitePool,
    status: Option<AssignmentStatus>,
) -> RepoResult<Vec<Assignment>> {
    let assignments = sqlx::query_as::<_, Assignment>(&format!(
        "SELECT {COLUMNS} FROM assignments WHERE (?1 IS NULL OR status = ?1) ORDER BY created_at DESC, id DESC"
    ))
    .bind(status)
    .fetch_all(pool)
    .await?;
    Ok(assignments)
}

pub async fn find_by_batch(pool: &SqlitePool, batch_id: i64) -> RepoResult<Vec<Assignment>> {
    let assignments = sqlx::query_as::<_, Assignment>(&format!(
        "SELECT {COLUMNS} FROM assignments WHERE batch_id = ? ORDER BY created_at, id"
    ))
    .bind(batch_id)
    .fetch_all(pool)
    .await?;
    Ok(assignments)
}

/// Insert a pending assignment if the batch has room for `bags_assigned`
///
/// Returns `None` when the capacity check fails.
pub async fn create_within_capacity(
    pool: &SqlitePool,
    batch_id: i64,
    packer_id: i64,
    storekeeper_id: i64,
    bags_assigned: i64,
    notes: Option<&str>,
) -> RepoResult<Option<Assignment>> {
    let now = shared::util::now_millis();
    let id = sqlx::query_scalar::<_, i64>(
        "INSERT INTO assignments (batch_id, packer_id, storekeeper_id, bags_assigned, status, notes, created_at, updated_at) \
         SELECT ?1, ?2, ?3, ?4, 'pending_review', ?5, ?6, ?6 \
         WHERE (SELECT bags_received FROM batches WHERE id = ?1) \
             - (SELECT COALESCE(SUM(bags_assigned), 0) FROM assignments WHERE batch_id = ?1 AND status != 'rejected') >= ?4 \
         RETURNING id",
    )
    .bind(batch_id)
    .bind(packer_id)
    .bind(storekeeper_id)
    .bind(bags_assigned)
    .bind(notes)
    .bind(now)
    .fetch_optional(pool)
    .await?;

    match id {
        Some(id) => find_by_id(pool, id).await,
        None => Ok(None),
    }
}

/// `pending_review → approved`, re-checking batch capacity
///
/// Returns the number of rows changed (0 or 1).
pub async fn approve(
    pool: &SqlitePool,
    id: i64,
    reviewer_id: i64,
    comment: Option<&str>,
) -> RepoResult<u64> {
    let now = shared::util::now_millis();
    let rows = sqlx::query(
        "UPDATE assignments SET status = 'approved', review_comment = ?1, reviewed_by = ?2, updated_at = ?3 \
         WHERE id = ?4 AND status = 'pending_review' \
           AND (SELECT bags_received FROM batches WHERE id = assignments.batch_id) \
               >= (SELECT COALESCE(SUM(a.bags_assigned), 0) FROM assignments a \
                   WHERE a.batch_id = assignments.batch_id AND a.status != 'rejected')",
    )
    .bind(comment)
    .bind(reviewer_id)
    .bind(now)
    .bind(id)
    .execute(pool)
    .await?;
    Ok(rows.rows_affected())
}

/// `pending_review → rejected`
pub async fn reject(
    pool: &SqlitePool,
    id: i64,
    reviewer_id: i64,
    comment: Option<&str>,
) -> RepoResult<u64> {
    let now = shared::util::now_millis();
    let rows = sqlx::query(
        "UPDATE assignments SET status = 'rejected', rejection_comment = ?1, reviewed_by = ?2, updated_at = ?3 \
         WHERE id = ?4 AND status = 'pending_review'",
    )
    .bind(comment)
    .bind(reviewer_id)
    .bind(now)
    .bind(id)
    .execute(pool)
    .await?;
    Ok(rows.rows_affected())
}

/// `rejected → pending_review` with new bag count, if the batch has room
pub async fn resubmit_within_capacity(
    pool: &SqlitePool,
    id: i64,
    bags_assigned: i64,
    notes: Option<&str>,
) -> RepoResult<u64> {
    let now = shared::util::now_millis();
    let rows = sqlx::query(
        "UPDATE assignments SET status = 'pending_review', bags_assigned = ?1, notes = ?2, \
             rejection_comment = NULL, review_comment = NULL, reviewed_by = NULL, updated_at = ?3 \
         WHERE id = ?4 AND status = 'rejected' \
           AND (SELECT bags_received FROM batches WHERE id = assignments.batch_id) \
               - (SELECT COALESCE(SUM(a.bags_assigned), 0) FROM assignments a \
                  WHERE a.batch_id = assignments.batch_id AND a.status != 'rejected') >= ?1",
    )
    .bind(bags_assigned)
    .bind(notes)
    .bind(now)
    .bind(id)
    .execute(pool)
    .await?;
    Ok(rows.rows_affected())
}
