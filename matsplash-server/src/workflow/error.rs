//! Workflow error taxonomy
//!
//! Core operations return [`WorkflowError`]; the HTTP boundary converts it
//! into the shared [`AppError`] whose code selects the status.

use shared::error::{AppError, ErrorCode};
use thiserror::Error;

use crate::db::repository::RepoError;

#[derive(Debug, Error)]
pub enum WorkflowError {
    #[error("{message}")]
    Validation { code: ErrorCode, message: String },

    #[error("{message}")]
    NotFound { code: ErrorCode, message: String },

    /// Transition not allowed from the record's current status
    #[error("{0}")]
    InvalidState(String),

    #[error("{message}")]
    Forbidden { code: ErrorCode, message: String },

    /// Conditional write matched zero rows after the state was verified
    #[error("{0}")]
    Conflict(String),

    /// Uniqueness rule hit (clocked in twice, username taken)
    #[error("{message}")]
    Duplicate { code: ErrorCode, message: String },

    /// Login refused (unknown user, wrong password, disabled account)
    #[error("{message}")]
    Unauthenticated { code: ErrorCode, message: String },

    #[error("{0}")]
    Internal(String),

    #[error(transparent)]
    Repo(#[from] RepoError),
}

impl WorkflowError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            code: ErrorCode::ValidationFailed,
            message: message.into(),
        }
    }

    pub fn validation_code(code: ErrorCode, message: impl Into<String>) -> Self {
        Self::Validation {
            code,
            message: message.into(),
        }
    }

    pub fn not_found(code: ErrorCode, message: impl Into<String>) -> Self {
        Self::NotFound {
            code,
            message: message.into(),
        }
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::Forbidden {
            code: ErrorCode::PermissionDenied,
            message: message.into(),
        }
    }

    pub fn forbidden_code(code: ErrorCode, message: impl Into<String>) -> Self {
        Self::Forbidden {
            code,
            message: message.into(),
        }
    }

    pub fn invalid_state(message: impl Into<String>) -> Self {
        Self::InvalidState(message.into())
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict(message.into())
    }

    pub fn duplicate(code: ErrorCode, message: impl Into<String>) -> Self {
        Self::Duplicate {
            code,
            message: message.into(),
        }
    }

    pub fn unauthenticated(code: ErrorCode) -> Self {
        Self::Unauthenticated {
            code,
            message: code.message().to_string(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// Error code this error surfaces as
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::Validation { code, .. }
            | Self::NotFound { code, .. }
            | Self::Forbidden { code, .. }
            | Self::Duplicate { code, .. }
            | Self::Unauthenticated { code, .. } => *code,
            Self::Internal(_) => ErrorCode::InternalError,
            Self::InvalidState(_) => ErrorCode::InvalidState,
            Self::Conflict(_) => ErrorCode::ConcurrentModification,
            Self::Repo(RepoError::NotFound(_)) => ErrorCode::NotFound,
            Self::Repo(RepoError::Duplicate(_)) => ErrorCode::AlreadyExists,
            Self::Repo(RepoError::Validation(_)) => ErrorCode::ValidationFailed,
            Self::Repo(RepoError::Database(_)) => ErrorCode::DatabaseError,
        }
    }
}

impl From<WorkflowError> for AppError {
    fn from(err: WorkflowError) -> Self {
        match err {
            WorkflowError::Repo(repo) => repo.into(),
            WorkflowError::Internal(msg) => {
                tracing::error!(error = %msg, "Internal workflow error");
                AppError::internal("Internal error")
            }
            other => AppError::with_message(other.code(), other.to_string()),
        }
    }
}

pub type WorkflowResult<T> = Result<T, WorkflowError>;

#[cfg(test)]
mod tests {
    use super::*;
    use http::StatusCode;

    #[test]
    fn test_status_mapping() {
        let cases = [
            (WorkflowError::validation("bad"), StatusCode::BAD_REQUEST),
            (
                WorkflowError::not_found(ErrorCode::BatchNotFound, "Batch 1 not found"),
                StatusCode::NOT_FOUND,
            ),
            (WorkflowError::invalid_state("approved"), StatusCode::CONFLICT),
            (WorkflowError::forbidden("no"), StatusCode::FORBIDDEN),
            (WorkflowError::conflict("changed"), StatusCode::CONFLICT),
            (
                WorkflowError::unauthenticated(ErrorCode::InvalidCredentials),
                StatusCode::UNAUTHORIZED,
            ),
            (
                WorkflowError::Repo(RepoError::Database("disk".into())),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];
        for (err, status) in cases {
            assert_eq!(AppError::from(err).http_status(), status);
        }
    }

    #[test]
    fn test_message_is_kept_verbatim() {
        let err: AppError = WorkflowError::invalid_state("Assignment 3 is approved").into();
        assert_eq!(err.code, ErrorCode::InvalidState);
        assert_eq!(err.message, "Assignment 3 is approved");

        let err: AppError = WorkflowError::Repo(RepoError::Database("secret".into())).into();
        assert_eq!(err.message, "Database error");
    }
}
