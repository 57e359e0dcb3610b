//! Assignment Model

use serde::{Deserialize, Serialize};

/// Assignment status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[serde(rename_all = "snake_case")]
#[cfg_attr(feature = "db", sqlx(rename_all = "snake_case"))]
pub enum AssignmentStatus {
    PendingReview,
    Approved,
    Rejected,
}

impl AssignmentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PendingReview => "pending_review",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }
}

/// Bags of a batch allotted to one packer, awaiting manager review
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Assignment {
    pub id: i64,
    pub batch_id: i64,
    pub packer_id: i64,
    /// Storekeeper who submitted the assignment
    pub storekeeper_id: i64,
    pub bags_assigned: i64,
    pub status: AssignmentStatus,
    pub notes: Option<String>,
    pub rejection_comment: Option<String>,
    pub review_comment: Option<String>,
    pub reviewed_by: Option<i64>,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Create assignment payload (`POST /api/batches/{id}/assignments`)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssignmentCreate {
    pub packer_id: i64,
    pub bags_assigned: i64,
    pub notes: Option<String>,
}

/// Resubmit payload for a rejected assignment
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssignmentResubmit {
    pub bags_assigned: i64,
    pub notes: Option<String>,
}

/// Query for `GET /api/assignments`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AssignmentQuery {
    pub status: Option<AssignmentStatus>,
}
