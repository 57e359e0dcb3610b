//! Repository Module
//!
//! Free functions over `&SqlitePool`, one module per table. State
//! transitions are conditional updates keyed on the expected current
//! status; callers inspect the returned row count.

pub mod assignment;
pub mod attendance;
pub mod batch;
pub mod driver_sales;
pub mod employee;
pub mod inventory;
pub mod packing_log;
pub mod salary_rate;
pub mod work_log;

use shared::error::{AppError, ErrorCode};
use thiserror::Error;

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Duplicate: {0}")]
    Duplicate(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl From<sqlx::Error> for RepoError {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &err {
            match db_err.kind() {
                sqlx::error::ErrorKind::UniqueViolation => {
                    return RepoError::Duplicate(db_err.message().to_string());
                }
                sqlx::error::ErrorKind::CheckViolation
                | sqlx::error::ErrorKind::ForeignKeyViolation
                | sqlx::error::ErrorKind::NotNullViolation => {
                    return RepoError::Validation(db_err.message().to_string());
                }
                _ => {}
            }
        }
        if matches!(err, sqlx::Error::RowNotFound) {
            return RepoError::NotFound("Row not found".into());
        }
        RepoError::Database(err.to_string())
    }
}

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::NotFound(msg) => AppError::with_message(ErrorCode::NotFound, msg),
            RepoError::Duplicate(msg) => AppError::with_message(ErrorCode::AlreadyExists, msg),
            RepoError::Validation(msg) => AppError::validation(msg),
            RepoError::Database(msg) => {
                tracing::error!(error = %msg, "Repository database error");
                AppError::database("Database error")
            }
        }
    }
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;

#[cfg(test)]
pub(crate) mod test_support {
    //! Seed helpers shared by repository and workflow tests

    use shared::models::Role;
    use sqlx::SqlitePool;

    pub async fn test_pool() -> SqlitePool {
        crate::db::DbService::in_memory()
            .await
            .expect("in-memory database")
            .pool
    }

    /// Insert an active employee and return its id
    pub async fn seed_employee(pool: &SqlitePool, username: &str, role: Role) -> i64 {
        sqlx::query_scalar::<_, i64>(
            "INSERT INTO employees (username, display_name, password_hash, role, is_active, created_at, updated_at) VALUES (?1, ?1, 'x', ?2, 1, 0, 0) RETURNING id",
        )
        .bind(username)
        .bind(role)
        .fetch_one(pool)
        .await
        .expect("seed employee")
    }
}
