//! Database Module
//!
//! Handles the SQLite connection pool, migrations and the admin bootstrap

pub mod repository;

use shared::AppError;
use shared::models::{EmployeeCreate, Role};
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};
use std::str::FromStr;
use std::time::Duration;

use crate::auth::password;
use repository::employee;

/// Database service - owns a SQLite connection pool
#[derive(Clone)]
pub struct DbService {
    pub pool: SqlitePool,
}

impl DbService {
    /// Open (or create) the database file with WAL mode and apply migrations
    pub async fn new(db_path: &str) -> Result<Self, AppError> {
        let options = SqliteConnectOptions::from_str(&format!("sqlite:{db_path}"))
            .map_err(|e| AppError::database(format!("Invalid database path: {e}")))?
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal)
            .foreign_keys(true)
            // Writers wait for the lock instead of failing immediately
            .busy_timeout(Duration::from_millis(5000))
            .optimize_on_close(true, None);

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await
            .map_err(|e| AppError::database(format!("Failed to open database: {e}")))?;

        tracing::info!("Database connection established (SQLite WAL, busy_timeout=5000ms)");

        Self::migrate(&pool).await?;
        Ok(Self { pool })
    }

    /// Private in-memory database with migrations applied
    ///
    /// Every SQLite `:memory:` connection is its own database, so the pool
    /// is pinned to one connection that never expires.
    pub async fn in_memory() -> Result<Self, AppError> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")
            .map_err(|e| AppError::database(format!("Invalid database path: {e}")))?
            .foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await
            .map_err(|e| AppError::database(format!("Failed to open database: {e}")))?;

        Self::migrate(&pool).await?;
        Ok(Self { pool })
    }

    async fn migrate(pool: &SqlitePool) -> Result<(), AppError> {
        sqlx::migrate!("./migrations")
            .run(pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to apply migrations: {e}")))?;
        tracing::info!("Database migrations applied");
        Ok(())
    }

    /// Seed an Admin when the employees table is empty
    ///
    /// Returns `true` when an account was created. Without a password the
    /// bootstrap is skipped and logged, leaving the server unusable until
    /// `ADMIN_PASSWORD` is provided.
    pub async fn bootstrap_admin(
        &self,
        username: &str,
        password: Option<&str>,
    ) -> Result<bool, AppError> {
        if employee::count(&self.pool).await? > 0 {
            return Ok(false);
        }

        let Some(password) = password else {
            tracing::warn!("No employees exist and ADMIN_PASSWORD is not set; skipping admin bootstrap");
            return Ok(false);
        };

        let hash = password::hash_password(password)
            .map_err(|e| AppError::internal(format!("Failed to hash password: {e}")))?;
        let data = EmployeeCreate {
            username: username.to_string(),
            password: String::new(),
            display_name: Some("Administrator".to_string()),
            role: Role::Admin,
        };
        let admin = employee::create(&self.pool, &data, &hash).await?;

        crate::security_log!("INFO", "admin_bootstrap", username = admin.username.as_str());
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_bootstrap_admin_only_when_empty() {
        let db = DbService::in_memory().await.unwrap();

        assert!(!db.bootstrap_admin("admin", None).await.unwrap());
        assert!(db.bootstrap_admin("admin", Some("s3cret-pass")).await.unwrap());
        assert!(!db.bootstrap_admin("admin2", Some("other")).await.unwrap());

        let admin = employee::find_by_username(&db.pool, "admin")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(admin.role, Role::Admin);
        let hash = employee::find_password_hash(&db.pool, admin.id)
            .await
            .unwrap()
            .unwrap();
        assert!(password::verify_password("s3cret-pass", &hash));
    }

    #[tokio::test]
    async fn test_file_database_uses_migrations() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("matsplash.db");
        let db = DbService::new(&path.to_string_lossy()).await.unwrap();

        assert_eq!(employee::count(&db.pool).await.unwrap(), 0);
        assert!(path.exists());
    }
}
