//! Packing Log Model

use serde::{Deserialize, Serialize};

/// Packing log status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[serde(rename_all = "snake_case")]
#[cfg_attr(feature = "db", sqlx(rename_all = "snake_case"))]
pub enum PackingLogStatus {
    Pending,
    Confirmed,
    Disputed,
    Approved,
    Rejected,
}

impl PackingLogStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Confirmed => "confirmed",
            Self::Disputed => "disputed",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }

    /// Packer has answered and the log awaits a manager
    pub fn awaits_manager(&self) -> bool {
        matches!(self, Self::Confirmed | Self::Disputed)
    }
}

/// Daily packing record: storekeeper records, packer confirms or disputes,
/// manager approves or rejects
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct PackingLog {
    pub id: i64,
    pub packer_id: i64,
    pub storekeeper_id: i64,
    pub manager_id: Option<i64>,
    pub assignment_id: Option<i64>,
    pub bags_packed: i64,
    /// ISO date
    pub packing_date: String,
    pub status: PackingLogStatus,
    pub disputed_bags: Option<i64>,
    pub dispute_reason: Option<String>,
    pub packer_notes: Option<String>,
    pub storekeeper_notes: Option<String>,
    pub manager_notes: Option<String>,
    pub modification_comment: Option<String>,
    pub created_at: i64,
    pub confirmed_at: Option<i64>,
    pub approved_at: Option<i64>,
    pub updated_at: i64,
}

/// Create packing log payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PackingLogCreate {
    pub packer_id: i64,
    pub bags_packed: i64,
    pub packing_date: String,
    pub storekeeper_notes: Option<String>,
    pub assignment_id: Option<i64>,
}

/// Packer confirmation payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PackingLogConfirm {
    pub packer_notes: Option<String>,
}

/// Packer dispute payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PackingLogDispute {
    pub disputed_bags: i64,
    pub dispute_reason: String,
    pub packer_notes: Option<String>,
}

/// Manager approval payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PackingLogApprove {
    pub manager_notes: Option<String>,
    /// Overwrites `bags_packed` when present
    pub final_bags: Option<i64>,
}

/// Manager rejection payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PackingLogReject {
    pub modification_comment: Option<String>,
}

/// Storekeeper resubmission payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PackingLogResubmit {
    pub bags_packed: i64,
    pub storekeeper_notes: Option<String>,
}
