use std::path::PathBuf;

use crate::auth::JwtConfig;
use crate::core::{Result, ServerError};

/// Server configuration
///
/// # Environment variables
///
/// Every field can be overridden from the environment (a `.env` file is
/// loaded first):
///
/// | Variable | Default | Meaning |
/// |----------|---------|---------|
/// | WORK_DIR | ./data | Working directory (database, logs) |
/// | HTTP_PORT | 3000 | HTTP API port |
/// | DATABASE_PATH | WORK_DIR/database/matsplash.db | SQLite file |
/// | ENVIRONMENT | development | development, staging or production |
/// | REQUEST_TIMEOUT_MS | 30000 | Per-request timeout |
/// | LOG_LEVEL | info | Log filter |
/// | LOG_DIR | WORK_DIR/logs | Rolling log file directory |
/// | ADMIN_USERNAME | admin | Bootstrap admin username |
/// | ADMIN_PASSWORD | (unset) | Bootstrap admin password |
/// | JWT_SECRET | (generated in development) | HS256 signing secret |
/// | JWT_EXPIRATION_MINUTES | 1440 | Token lifetime |
///
/// # Example
///
/// ```ignore
/// WORK_DIR=/srv/matsplash HTTP_PORT=8080 cargo run
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// Working directory holding the database and log files
    pub work_dir: String,
    pub http_port: u16,
    /// Explicit database file; `None` means `work_dir/database/matsplash.db`
    pub database_path: Option<String>,
    pub jwt: JwtConfig,
    /// development | staging | production
    pub environment: String,
    pub request_timeout_ms: u64,
    pub log_level: String,
    pub log_dir: Option<String>,
    pub admin_username: String,
    /// Only used when the employees table is empty
    pub admin_password: Option<String>,
}

fn env_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

impl Config {
    /// Load configuration from environment variables, using defaults for
    /// anything unset
    pub fn from_env() -> Result<Self> {
        let jwt = JwtConfig::from_env().map_err(|e| ServerError::Config(e.to_string()))?;

        Ok(Self {
            work_dir: std::env::var("WORK_DIR").unwrap_or_else(|_| "./data".into()),
            http_port: env_or("HTTP_PORT", 3000),
            database_path: std::env::var("DATABASE_PATH").ok(),
            jwt,
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
            request_timeout_ms: env_or("REQUEST_TIMEOUT_MS", 30_000),
            log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".into()),
            log_dir: std::env::var("LOG_DIR").ok(),
            admin_username: std::env::var("ADMIN_USERNAME").unwrap_or_else(|_| "admin".into()),
            admin_password: std::env::var("ADMIN_PASSWORD").ok(),
        })
    }

    /// Override the working directory and port; used by tests
    pub fn with_overrides(work_dir: impl Into<String>, http_port: u16) -> Result<Self> {
        let mut config = Self::from_env()?;
        config.work_dir = work_dir.into();
        config.http_port = http_port;
        config.database_path = None;
        Ok(config)
    }

    /// Reject settings that are only acceptable outside production
    pub fn validate(&self) -> Result<()> {
        if self.is_production() && self.jwt.ephemeral {
            return Err(ServerError::Config(
                "JWT_SECRET (at least 32 characters) must be set in production".into(),
            ));
        }
        if self.request_timeout_ms == 0 {
            return Err(ServerError::Config("REQUEST_TIMEOUT_MS must be > 0".into()));
        }
        Ok(())
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }

    pub fn database_dir(&self) -> PathBuf {
        PathBuf::from(&self.work_dir).join("database")
    }

    pub fn database_file(&self) -> PathBuf {
        match &self.database_path {
            Some(path) => PathBuf::from(path),
            None => self.database_dir().join("matsplash.db"),
        }
    }

    pub fn logs_dir(&self) -> PathBuf {
        match &self.log_dir {
            Some(dir) => PathBuf::from(dir),
            None => PathBuf::from(&self.work_dir).join("logs"),
        }
    }

    /// Create the working directory layout if it does not exist
    pub fn ensure_work_dir_structure(&self) -> std::io::Result<()> {
        std::fs::create_dir_all(self.database_dir())?;
        std::fs::create_dir_all(self.logs_dir())?;
        if let Some(parent) = self.database_file().parent() {
            std::fs::create_dir_all(parent)?;
        }
        Ok(())
    }
}
