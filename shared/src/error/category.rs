//! Grouping of error codes by range

use super::codes::ErrorCode;
use serde::{Deserialize, Serialize};

/// Domain an [`ErrorCode`] belongs to, taken from its thousands digit
///
/// `System` failures are logged by the response layer; the rest are
/// ordinary client-facing outcomes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    General,
    Auth,
    Permission,
    Intake,
    Packing,
    Dispatch,
    /// Salary rates and inventory adjustments
    Payroll,
    Attendance,
    Employee,
    System,
}

impl ErrorCategory {
    pub fn from_code(code: u16) -> Self {
        match code / 1000 {
            0 => Self::General,
            1 => Self::Auth,
            2 => Self::Permission,
            3 => Self::Intake,
            4 => Self::Packing,
            5 => Self::Dispatch,
            6 => Self::Payroll,
            7 => Self::Attendance,
            8 => Self::Employee,
            _ => Self::System,
        }
    }
}

impl ErrorCode {
    pub fn category(&self) -> ErrorCategory {
        ErrorCategory::from_code(self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_from_code() {
        assert_eq!(ErrorCategory::from_code(0), ErrorCategory::General);
        assert_eq!(ErrorCategory::from_code(10), ErrorCategory::General);
        assert_eq!(ErrorCategory::from_code(1001), ErrorCategory::Auth);
        assert_eq!(ErrorCategory::from_code(2001), ErrorCategory::Permission);
        assert_eq!(ErrorCategory::from_code(3001), ErrorCategory::Intake);
        assert_eq!(ErrorCategory::from_code(4001), ErrorCategory::Packing);
        assert_eq!(ErrorCategory::from_code(5001), ErrorCategory::Dispatch);
        assert_eq!(ErrorCategory::from_code(6001), ErrorCategory::Payroll);
        assert_eq!(ErrorCategory::from_code(7001), ErrorCategory::Attendance);
        assert_eq!(ErrorCategory::from_code(8001), ErrorCategory::Employee);
        assert_eq!(ErrorCategory::from_code(9001), ErrorCategory::System);
        assert_eq!(ErrorCategory::from_code(10000), ErrorCategory::System);
    }

    #[test]
    fn test_error_code_category() {
        assert_eq!(ErrorCode::InvalidState.category(), ErrorCategory::General);
        assert_eq!(ErrorCode::NotSubmitter.category(), ErrorCategory::Permission);
        assert_eq!(
            ErrorCode::BatchCapacityExceeded.category(),
            ErrorCategory::Intake
        );
        assert_eq!(
            ErrorCode::PackingLogNotFound.category(),
            ErrorCategory::Packing
        );
        assert_eq!(ErrorCode::DatabaseError.category(), ErrorCategory::System);
    }

    #[test]
    fn test_category_serialize() {
        let json = serde_json::to_string(&ErrorCategory::Payroll).unwrap();
        assert_eq!(json, "\"payroll\"");
        let category: ErrorCategory = serde_json::from_str("\"intake\"").unwrap();
        assert_eq!(category, ErrorCategory::Intake);
    }
}
