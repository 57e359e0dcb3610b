//! Work Log Model

use serde::{Deserialize, Serialize};

/// Work log status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[serde(rename_all = "snake_case")]
#[cfg_attr(feature = "db", sqlx(rename_all = "snake_case"))]
pub enum WorkLogStatus {
    Pending,
    Approved,
    Rejected,
}

impl WorkLogStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }
}

/// Packer's report of bags packed against an approved assignment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct WorkLog {
    pub id: i64,
    pub assignment_id: i64,
    pub packer_id: i64,
    /// Copied from the assignment at submission time
    pub bags_assigned: i64,
    pub bags_packed: i64,
    pub status: WorkLogStatus,
    pub modification_comment: Option<String>,
    pub reviewed_by: Option<i64>,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Submit work log payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkLogCreate {
    pub assignment_id: i64,
    pub bags_packed: i64,
}

/// Query for `GET /api/work-logs`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WorkLogQuery {
    pub status: Option<WorkLogStatus>,
    pub packer_id: Option<i64>,
}
