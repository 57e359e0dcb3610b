//! Driver Sales Repository

use super::{RepoError, RepoResult};
use shared::models::{DriverSalesLog, DriverSalesStatus};
use sqlx::SqlitePool;

const COLUMNS: &str = "id, driver_id, driver_assistant_id, bags_dispatched, bags_sold_270, bags_sold_250, bags_returned, total_revenue, expected_revenue, delivery_date, status, receptionist_id, driver_notes, receptionist_notes, dispatched_at, accounted_at";

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<DriverSalesLog>> {
    let log = sqlx::query_as::<_, DriverSalesLog>(&format!(
        "SELECT {COLUMNS} FROM driver_sales_logs WHERE id = ?"
    ))
    .bind(id)
    .fetch_optional(pool)
    .await?;
    Ok(log)
}

/// List runs, optionally filtered by status and by a crew member
/// (matching either the driver or the assistant)
pub async fn find_all(
    pool: &SqlitePool,
    status: Option<DriverSalesStatus>,
    crew_member_id: Option<i64>,
) -> RepoResult<Vec<DriverSalesLog>> {
    let logs = sqlx::query_as::<_, DriverSalesLog>(&format!(
        "SELECT {COLUMNS} FROM driver_sales_logs WHERE (?1 IS NULL OR status = ?1) AND (?2 IS NULL OR driver_id = ?2 OR driver_assistant_id = ?2) ORDER BY delivery_date DESC, dispatched_at DESC, id DESC"
    ))
    .bind(status)
    .bind(crew_member_id)
    .fetch_all(pool)
    .await?;
    Ok(logs)
}

pub struct NewDispatch<'a> {
    pub driver_id: i64,
    pub driver_assistant_id: Option<i64>,
    pub bags_dispatched: i64,
    pub expected_revenue: f64,
    pub delivery_date: &'a str,
    pub receptionist_id: i64,
    pub driver_notes: Option<&'a str>,
}

pub async fn create(pool: &SqlitePool, data: NewDispatch<'_>) -> RepoResult<DriverSalesLog> {
    let now = shared::util::now_millis();
    let id = sqlx::query_scalar::<_, i64>(
        "INSERT INTO driver_sales_logs (driver_id, driver_assistant_id, bags_dispatched, expected_revenue, delivery_date, status, receptionist_id, driver_notes, dispatched_at) VALUES (?1, ?2, ?3, ?4, ?5, 'dispatched', ?6, ?7, ?8) RETURNING id",
    )
    .bind(data.driver_id)
    .bind(data.driver_assistant_id)
    .bind(data.bags_dispatched)
    .bind(data.expected_revenue)
    .bind(data.delivery_date)
    .bind(data.receptionist_id)
    .bind(data.driver_notes)
    .bind(now)
    .fetch_one(pool)
    .await?;

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create driver sales log".into()))
}

pub struct Settlement<'a> {
    pub bags_sold_270: i64,
    pub bags_sold_250: i64,
    pub bags_returned: i64,
    pub total_revenue: f64,
    pub receptionist_id: i64,
    pub receptionist_notes: Option<&'a str>,
}

/// `dispatched → accounted`; returns rows changed
pub async fn account(pool: &SqlitePool, id: i64, data: Settlement<'_>) -> RepoResult<u64> {
    let now = shared::util::now_millis();
    let rows = sqlx::query(
        "UPDATE driver_sales_logs SET status = 'accounted', bags_sold_270 = ?1, bags_sold_250 = ?2, bags_returned = ?3, total_revenue = ?4, receptionist_id = ?5, receptionist_notes = ?6, accounted_at = ?7 \
         WHERE id = ?8 AND status = 'dispatched' AND ?1 + ?2 + ?3 <= bags_dispatched",
    )
    .bind(data.bags_sold_270)
    .bind(data.bags_sold_250)
    .bind(data.bags_returned)
    .bind(data.total_revenue)
    .bind(data.receptionist_id)
    .bind(data.receptionist_notes)
    .bind(now)
    .bind(id)
    .execute(pool)
    .await?;
    Ok(rows.rows_affected())
}

/// Σ(sold_270 + sold_250) over accounted runs where the employee was
/// driver or assistant, `start <= delivery_date < end`
pub async fn sum_sold_bags(
    pool: &SqlitePool,
    employee_id: i64,
    start_date: &str,
    end_date: &str,
) -> RepoResult<i64> {
    let total = sqlx::query_scalar::<_, i64>(
        "SELECT COALESCE(SUM(bags_sold_270 + bags_sold_250), 0) FROM driver_sales_logs WHERE status = 'accounted' AND (driver_id = ?1 OR driver_assistant_id = ?1) AND delivery_date >= ?2 AND delivery_date < ?3",
    )
    .bind(employee_id)
    .bind(start_date)
    .bind(end_date)
    .fetch_one(pool)
    .await?;
    Ok(total)
}

/// (Σ bags_dispatched over every run, Σ bags_returned over accounted runs)
pub async fn dispatch_totals(pool: &SqlitePool) -> RepoResult<(i64, i64)> {
    let totals = sqlx::query_as::<_, (i64, i64)>(
        "SELECT COALESCE(SUM(bags_dispatched), 0), COALESCE(SUM(CASE WHEN status = 'accounted' THEN bags_returned ELSE 0 END), 0) FROM driver_sales_logs",
    )
    .fetch_one(pool)
    .await?;
    Ok(totals)
}
