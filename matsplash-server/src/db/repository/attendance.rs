//! Attendance Repository

use super::{RepoError, RepoResult};
use shared::models::Attendance;
use sqlx::SqlitePool;

const COLUMNS: &str = "id, employee_id, status, clock_in_at, clock_out_at, worked_minutes, note, created_at, updated_at";

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Attendance>> {
    let record = sqlx::query_as::<_, Attendance>(&format!(
        "SELECT {COLUMNS} FROM attendance WHERE id = ?"
    ))
    .bind(id)
    .fetch_optional(pool)
    .await?;
    Ok(record)
}

pub async fn find_open(pool: &SqlitePool, employee_id: i64) -> RepoResult<Option<Attendance>> {
    let record = sqlx::query_as::<_, Attendance>(&format!(
        "SELECT {COLUMNS} FROM attendance WHERE employee_id = ? AND status = 'open'"
    ))
    .bind(employee_id)
    .fetch_optional(pool)
    .await?;
    Ok(record)
}

/// Records clocked in within `[from, to)`, newest first
pub async fn find_all(
    pool: &SqlitePool,
    employee_id: Option<i64>,
    from: Option<i64>,
    to: Option<i64>,
) -> RepoResult<Vec<Attendance>> {
    let records = sqlx::query_as::<_, Attendance>(&format!(
        "SELECT {COLUMNS} FROM attendance WHERE (?1 IS NULL OR employee_id = ?1) AND (?2 IS NULL OR clock_in_at >= ?2) AND (?3 IS NULL OR clock_in_at < ?3) ORDER BY clock_in_at DESC, id DESC"
    ))
    .bind(employee_id)
    .bind(from)
    .bind(to)
    .fetch_all(pool)
    .await?;
    Ok(records)
}

/// Open a record; a second open record for the same employee is a
/// [`RepoError::Duplicate`]
pub async fn clock_in(
    pool: &SqlitePool,
    employee_id: i64,
    at: i64,
    note: Option<&str>,
) -> RepoResult<Attendance> {
    let id = sqlx::query_scalar::<_, i64>(
        "INSERT INTO attendance (employee_id, status, clock_in_at, note, created_at, updated_at) VALUES (?1, 'open', ?2, ?3, ?2, ?2) RETURNING id",
    )
    .bind(employee_id)
    .bind(at)
    .bind(note)
    .fetch_one(pool)
    .await?;

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create attendance record".into()))
}

/// `open → closed`; a note given at clock-out replaces the clock-in note
pub async fn clock_out(
    pool: &SqlitePool,
    id: i64,
    at: i64,
    worked_minutes: i64,
    note: Option<&str>,
) -> RepoResult<u64> {
    let rows = sqlx::query(
        "UPDATE attendance SET status = 'closed', clock_out_at = ?1, worked_minutes = ?2, note = COALESCE(?3, note), updated_at = ?1 WHERE id = ?4 AND status = 'open'",
    )
    .bind(at)
    .bind(worked_minutes)
    .bind(note)
    .bind(id)
    .execute(pool)
    .await?;
    Ok(rows.rows_affected())
}
