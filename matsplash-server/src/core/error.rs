use thiserror::Error;

/// Process-level errors: startup, configuration and serving
///
/// Request handlers never return this; they use [`shared::AppError`].
#[derive(Error, Debug)]
pub enum ServerError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Internal server error")]
    Internal(#[from] anyhow::Error),
}

impl From<shared::AppError> for ServerError {
    fn from(err: shared::AppError) -> Self {
        ServerError::Database(err.message)
    }
}

/// Result alias for startup code
pub type Result<T> = std::result::Result<T, ServerError>;
