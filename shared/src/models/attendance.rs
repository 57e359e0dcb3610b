//! Attendance Model

use serde::{Deserialize, Serialize};

/// Attendance status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[serde(rename_all = "snake_case")]
#[cfg_attr(feature = "db", sqlx(rename_all = "snake_case"))]
pub enum AttendanceStatus {
    #[default]
    Open,
    Closed,
}

/// Clock-in record, closed by clock-out
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Attendance {
    pub id: i64,
    pub employee_id: i64,
    pub status: AttendanceStatus,
    pub clock_in_at: i64,
    pub clock_out_at: Option<i64>,
    pub worked_minutes: Option<i64>,
    pub note: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Clock-in / clock-out payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClockRequest {
    pub note: Option<String>,
}

/// Query for `GET /api/attendance`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AttendanceQuery {
    pub employee_id: Option<i64>,
    /// Unix millis, inclusive
    pub from: Option<i64>,
    /// Unix millis, exclusive
    pub to: Option<i64>,
}
