//! Error code to HTTP status mapping

use super::codes::ErrorCode;
use http::StatusCode;

impl ErrorCode {
    /// Status sent with a failure envelope carrying this code
    pub fn http_status(&self) -> StatusCode {
        match self {
            Self::Success => StatusCode::OK,

            Self::NotFound
            | Self::BatchNotFound
            | Self::AssignmentNotFound
            | Self::WorkLogNotFound
            | Self::PackingLogNotFound
            | Self::DriverSalesNotFound
            | Self::SalaryRateNotFound
            | Self::AttendanceNotFound
            | Self::EmployeeNotFound => StatusCode::NOT_FOUND,

            Self::AlreadyExists
            | Self::InvalidState
            | Self::ConcurrentModification
            | Self::BatchNumberExists
            | Self::AlreadyClockedIn
            | Self::NotClockedIn
            | Self::EmployeeUsernameExists => StatusCode::CONFLICT,

            Self::NotAuthenticated
            | Self::InvalidCredentials
            | Self::TokenExpired
            | Self::TokenInvalid
            | Self::AccountDisabled => StatusCode::UNAUTHORIZED,

            Self::PermissionDenied
            | Self::RoleRequired
            | Self::AdminRequired
            | Self::NotSubmitter
            | Self::NotNamedPacker => StatusCode::FORBIDDEN,

            // Retryable
            Self::TimeoutError => StatusCode::SERVICE_UNAVAILABLE,

            Self::InternalError | Self::DatabaseError | Self::ConfigError => {
                StatusCode::INTERNAL_SERVER_ERROR
            }

            // Validation and business-rule failures
            _ => StatusCode::BAD_REQUEST,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_status() {
        assert_eq!(ErrorCode::Success.http_status(), StatusCode::OK);
    }

    #[test]
    fn test_not_found_status() {
        assert_eq!(ErrorCode::NotFound.http_status(), StatusCode::NOT_FOUND);
        assert_eq!(
            ErrorCode::AssignmentNotFound.http_status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ErrorCode::EmployeeNotFound.http_status(),
            StatusCode::NOT_FOUND
        );
    }

    #[test]
    fn test_state_and_race_map_to_conflict() {
        assert_eq!(ErrorCode::InvalidState.http_status(), StatusCode::CONFLICT);
        assert_eq!(
            ErrorCode::ConcurrentModification.http_status(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            ErrorCode::AlreadyClockedIn.http_status(),
            StatusCode::CONFLICT
        );
    }

    #[test]
    fn test_permission_status() {
        assert_eq!(
            ErrorCode::PermissionDenied.http_status(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(ErrorCode::NotSubmitter.http_status(), StatusCode::FORBIDDEN);
        assert_eq!(
            ErrorCode::NotNamedPacker.http_status(),
            StatusCode::FORBIDDEN
        );
    }

    #[test]
    fn test_validation_defaults_to_bad_request() {
        assert_eq!(
            ErrorCode::ValidationFailed.http_status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ErrorCode::BagsExceedAssigned.http_status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ErrorCode::RejectionCommentRequired.http_status(),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn test_system_status() {
        assert_eq!(
            ErrorCode::DatabaseError.http_status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            ErrorCode::TimeoutError.http_status(),
            StatusCode::SERVICE_UNAVAILABLE
        );
    }
}
