//! Unified error codes for MatSplash Suite
//!
//! Error codes are organized by category:
//! - 0xxx: General errors
//! - 1xxx: Authentication errors
//! - 2xxx: Permission errors
//! - 3xxx: Intake errors (batches, assignments, work logs)
//! - 4xxx: Packing log errors
//! - 5xxx: Dispatch errors (driver sales)
//! - 6xxx: Payroll & inventory errors
//! - 7xxx: Attendance errors
//! - 8xxx: Employee errors
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// All error codes are represented as u16 values for efficient serialization
/// and cross-language compatibility (Rust, TypeScript, etc.)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Operation completed successfully
    Success = 0,
    /// Unknown error
    Unknown = 1,
    /// Validation failed
    ValidationFailed = 2,
    /// Resource not found
    NotFound = 3,
    /// Resource already exists
    AlreadyExists = 4,
    /// Invalid request
    InvalidRequest = 5,
    /// Invalid format
    InvalidFormat = 6,
    /// Required field missing
    RequiredField = 7,
    /// Value out of range
    ValueOutOfRange = 8,
    /// Transition not allowed from the current state
    InvalidState = 9,
    /// Record changed between read and conditional write
    ConcurrentModification = 10,

    // ==================== 1xxx: Auth ====================
    /// User is not authenticated
    NotAuthenticated = 1001,
    /// Invalid credentials (username/password)
    InvalidCredentials = 1002,
    /// Token has expired
    TokenExpired = 1003,
    /// Token is invalid
    TokenInvalid = 1004,
    /// Account is disabled
    AccountDisabled = 1007,

    // ==================== 2xxx: Permission ====================
    /// Permission denied
    PermissionDenied = 2001,
    /// Specific role required
    RoleRequired = 2002,
    /// Admin role required
    AdminRequired = 2003,
    /// Actor is not the original submitter
    NotSubmitter = 2004,
    /// Actor is not the packer named on the record
    NotNamedPacker = 2005,

    // ==================== 3xxx: Intake ====================
    /// Batch not found
    BatchNotFound = 3001,
    /// Assignment not found
    AssignmentNotFound = 3002,
    /// Assigned bags exceed the batch's remaining capacity
    BatchCapacityExceeded = 3003,
    /// Work log not found
    WorkLogNotFound = 3004,
    /// Packed bags exceed assigned bags
    BagsExceedAssigned = 3005,
    /// Bag count must be positive
    InvalidBagCount = 3006,
    /// Batch number collision
    BatchNumberExists = 3007,

    // ==================== 4xxx: Packing ====================
    /// Packing log not found
    PackingLogNotFound = 4001,
    /// Rejection requires a modification comment
    RejectionCommentRequired = 4002,
    /// Dispute requires a reason
    DisputeReasonRequired = 4003,

    // ==================== 5xxx: Dispatch ====================
    /// Driver sales log not found
    DriverSalesNotFound = 5001,
    /// Sold plus returned bags exceed dispatched bags
    SalesExceedDispatched = 5002,
    /// Revenue must be a non-negative finite amount
    InvalidRevenue = 5003,

    // ==================== 6xxx: Payroll & Inventory ====================
    /// Salary rate not found
    SalaryRateNotFound = 6001,
    /// Invalid salary rate amount
    InvalidRateAmount = 6002,
    /// Invalid salary period
    InvalidPeriod = 6003,
    /// Inventory adjustment must be non-zero
    InvalidAdjustment = 6101,

    // ==================== 7xxx: Attendance ====================
    /// Attendance record not found
    AttendanceNotFound = 7001,
    /// Employee is already clocked in
    AlreadyClockedIn = 7002,
    /// Employee is not clocked in
    NotClockedIn = 7003,

    // ==================== 8xxx: Employee ====================
    /// Employee not found
    EmployeeNotFound = 8001,
    /// Employee username already exists
    EmployeeUsernameExists = 8002,
    /// Employee is inactive
    EmployeeInactive = 8003,
    /// Referenced employee does not hold the expected role
    EmployeeRoleMismatch = 8004,
    /// Unknown role name
    UnknownRole = 8101,

    // ==================== 9xxx: System ====================
    /// Internal server error
    InternalError = 9001,
    /// Database error
    DatabaseError = 9002,
    /// Operation timeout
    TimeoutError = 9004,
    /// Configuration error
    ConfigError = 9005,
}

impl ErrorCode {
    /// Get the numeric code value
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// Get the developer-facing English message for this error code
    pub const fn message(&self) -> &'static str {
        match self {
            // General
            ErrorCode::Success => "Operation completed successfully",
            ErrorCode::Unknown => "An unknown error occurred",
            ErrorCode::ValidationFailed => "Validation failed",
            ErrorCode::NotFound => "Resource not found",
            ErrorCode::AlreadyExists => "Resource already exists",
            ErrorCode::InvalidRequest => "Invalid request",
            ErrorCode::InvalidFormat => "Invalid format",
            ErrorCode::RequiredField => "Required field is missing",
            ErrorCode::ValueOutOfRange => "Value is out of range",
            ErrorCode::InvalidState => "Operation not allowed in the current state",
            ErrorCode::ConcurrentModification => "Record was modified concurrently",

            // Auth
            ErrorCode::NotAuthenticated => "User is not authenticated",
            ErrorCode::InvalidCredentials => "Invalid username or password",
            ErrorCode::TokenExpired => "Authentication token has expired",
            ErrorCode::TokenInvalid => "Authentication token is invalid",
            ErrorCode::AccountDisabled => "Account is disabled",

            // Permission
            ErrorCode::PermissionDenied => "Permission denied",
            ErrorCode::RoleRequired => "Specific role is required",
            ErrorCode::AdminRequired => "Administrator role is required",
            ErrorCode::NotSubmitter => "Only the original submitter may do this",
            ErrorCode::NotNamedPacker => "Only the named packer may do this",

            // Intake
            ErrorCode::BatchNotFound => "Batch not found",
            ErrorCode::AssignmentNotFound => "Assignment not found",
            ErrorCode::BatchCapacityExceeded => "Assigned bags exceed the batch's remaining bags",
            ErrorCode::WorkLogNotFound => "Work log not found",
            ErrorCode::BagsExceedAssigned => "Packed bags exceed assigned bags",
            ErrorCode::InvalidBagCount => "Bag count must be positive",
            ErrorCode::BatchNumberExists => "Batch number already exists",

            // Packing
            ErrorCode::PackingLogNotFound => "Packing log not found",
            ErrorCode::RejectionCommentRequired => "A modification comment is required to reject",
            ErrorCode::DisputeReasonRequired => "A dispute reason is required",

            // Dispatch
            ErrorCode::DriverSalesNotFound => "Driver sales log not found",
            ErrorCode::SalesExceedDispatched => "Sold and returned bags exceed dispatched bags",
            ErrorCode::InvalidRevenue => "Revenue must be a non-negative amount",

            // Payroll & Inventory
            ErrorCode::SalaryRateNotFound => "Salary rate not found",
            ErrorCode::InvalidRateAmount => "Rate amount must be a non-negative amount",
            ErrorCode::InvalidPeriod => "Invalid salary period",
            ErrorCode::InvalidAdjustment => "Inventory adjustment must be non-zero",

            // Attendance
            ErrorCode::AttendanceNotFound => "Attendance record not found",
            ErrorCode::AlreadyClockedIn => "Employee is already clocked in",
            ErrorCode::NotClockedIn => "Employee is not clocked in",

            // Employee
            ErrorCode::EmployeeNotFound => "Employee not found",
            ErrorCode::EmployeeUsernameExists => "Employee username already exists",
            ErrorCode::EmployeeInactive => "Employee is inactive",
            ErrorCode::EmployeeRoleMismatch => "Employee does not hold the required role",
            ErrorCode::UnknownRole => "Unknown role",

            // System
            ErrorCode::InternalError => "Internal server error",
            ErrorCode::DatabaseError => "Database error",
            ErrorCode::TimeoutError => "Operation timed out",
            ErrorCode::ConfigError => "Configuration error",
        }
    }
}

impl From<ErrorCode> for u16 {
    #[inline]
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// Error when converting from an invalid u16 to ErrorCode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            // General
            0 => Ok(ErrorCode::Success),
            1 => Ok(ErrorCode::Unknown),
            2 => Ok(ErrorCode::ValidationFailed),
            3 => Ok(ErrorCode::NotFound),
            4 => Ok(ErrorCode::AlreadyExists),
            5 => Ok(ErrorCode::InvalidRequest),
            6 => Ok(ErrorCode::InvalidFormat),
            7 => Ok(ErrorCode::RequiredField),
            8 => Ok(ErrorCode::ValueOutOfRange),
            9 => Ok(ErrorCode::InvalidState),
            10 => Ok(ErrorCode::ConcurrentModification),

            // Auth
            1001 => Ok(ErrorCode::NotAuthenticated),
            1002 => Ok(ErrorCode::InvalidCredentials),
            1003 => Ok(ErrorCode::TokenExpired),
            1004 => Ok(ErrorCode::TokenInvalid),
            1007 => Ok(ErrorCode::AccountDisabled),

            // Permission
            2001 => Ok(ErrorCode::PermissionDenied),
            2002 => Ok(ErrorCode::RoleRequired),
            2003 => Ok(ErrorCode::AdminRequired),
            2004 => Ok(ErrorCode::NotSubmitter),
            2005 => Ok(ErrorCode::NotNamedPacker),

            // Intake
            3001 => Ok(ErrorCode::BatchNotFound),
            3002 => Ok(ErrorCode::AssignmentNotFound),
            3003 => Ok(ErrorCode::BatchCapacityExceeded),
            3004 => Ok(ErrorCode::WorkLogNotFound),
            3005 => Ok(ErrorCode::BagsExceedAssigned),
            3006 => Ok(ErrorCode::InvalidBagCount),
            3007 => Ok(ErrorCode::BatchNumberExists),

            // Packing
            4001 => Ok(ErrorCode::PackingLogNotFound),
            4002 => Ok(ErrorCode::RejectionCommentRequired),
            4003 => Ok(ErrorCode::DisputeReasonRequired),

            // Dispatch
            5001 => Ok(ErrorCode::DriverSalesNotFound),
            5002 => Ok(ErrorCode::SalesExceedDispatched),
            5003 => Ok(ErrorCode::InvalidRevenue),

            // Payroll & Inventory
            6001 => Ok(ErrorCode::SalaryRateNotFound),
            6002 => Ok(ErrorCode::InvalidRateAmount),
            6003 => Ok(ErrorCode::InvalidPeriod),
            6101 => Ok(ErrorCode::InvalidAdjustment),

            // Attendance
            7001 => Ok(ErrorCode::AttendanceNotFound),
            7002 => Ok(ErrorCode::AlreadyClockedIn),
            7003 => Ok(ErrorCode::NotClockedIn),

            // Employee
            8001 => Ok(ErrorCode::EmployeeNotFound),
            8002 => Ok(ErrorCode::EmployeeUsernameExists),
            8003 => Ok(ErrorCode::EmployeeInactive),
            8004 => Ok(ErrorCode::EmployeeRoleMismatch),
            8101 => Ok(ErrorCode::UnknownRole),

            // System
            9001 => Ok(ErrorCode::InternalError),
            9002 => Ok(ErrorCode::DatabaseError),
            9004 => Ok(ErrorCode::TimeoutError),
            9005 => Ok(ErrorCode::ConfigError),

            _ => Err(InvalidErrorCode(value)),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}
