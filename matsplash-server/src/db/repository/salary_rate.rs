//! Salary Rate Repository

use super::{RepoError, RepoResult};
use shared::models::SalaryRate;
use sqlx::SqlitePool;

const COLUMNS: &str = "id, employee_id, rate_type, rate_amount, is_active, created_at, updated_at";

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<SalaryRate>> {
    let rate = sqlx::query_as::<_, SalaryRate>(&format!(
        "SELECT {COLUMNS} FROM salary_rates WHERE id = ?"
    ))
    .bind(id)
    .fetch_optional(pool)
    .await?;
    Ok(rate)
}

pub async fn find_active(
    pool: &SqlitePool,
    employee_id: i64,
    rate_type: &str,
) -> RepoResult<Option<SalaryRate>> {
    let rate = sqlx::query_as::<_, SalaryRate>(&format!(
        "SELECT {COLUMNS} FROM salary_rates WHERE employee_id = ? AND rate_type = ? AND is_active = 1"
    ))
    .bind(employee_id)
    .bind(rate_type)
    .fetch_optional(pool)
    .await?;
    Ok(rate)
}

/// Every active rate, one per employee and type
pub async fn find_all_active(pool: &SqlitePool) -> RepoResult<Vec<SalaryRate>> {
    let rates = sqlx::query_as::<_, SalaryRate>(&format!(
        "SELECT {COLUMNS} FROM salary_rates WHERE is_active = 1 ORDER BY employee_id, rate_type"
    ))
    .fetch_all(pool)
    .await?;
    Ok(rates)
}

/// Rate history for an employee, newest first
pub async fn find_by_employee(pool: &SqlitePool, employee_id: i64) -> RepoResult<Vec<SalaryRate>> {
    let rates = sqlx::query_as::<_, SalaryRate>(&format!(
        "SELECT {COLUMNS} FROM salary_rates WHERE employee_id = ? ORDER BY created_at DESC, id DESC"
    ))
    .bind(employee_id)
    .fetch_all(pool)
    .await?;
    Ok(rates)
}

/// Deactivate the current rate and insert the new one in one transaction
pub async fn replace_active(
    pool: &SqlitePool,
    employee_id: i64,
    rate_type: &str,
    rate_amount: f64,
) -> RepoResult<SalaryRate> {
    let now = shared::util::now_millis();
    let mut tx = pool.begin().await?;

    sqlx::query(
        "UPDATE salary_rates SET is_active = 0, updated_at = ?1 WHERE employee_id = ?2 AND rate_type = ?3 AND is_active = 1",
    )
    .bind(now)
    .bind(employee_id)
    .bind(rate_type)
    .execute(&mut *tx)
    .await?;

    let id = sqlx::query_scalar::<_, i64>(
        "INSERT INTO salary_rates (employee_id, rate_type, rate_amount, is_active, created_at, updated_at) VALUES (?1, ?2, ?3, 1, ?4, ?4) RETURNING id",
    )
    .bind(employee_id)
    .bind(rate_type)
    .bind(rate_amount)
    .bind(now)
    .fetch_one(&mut *tx)
    .await?;

    tx.commit().await?;

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create salary rate".into()))
}
