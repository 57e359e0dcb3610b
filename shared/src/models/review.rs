//! Review payloads shared by reviewable submissions

use serde::{Deserialize, Serialize};

/// Manager decision on a submission
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReviewAction {
    Approve,
    Reject,
}

/// Review payload (`PUT /api/assignments/{id}/review`, `/api/work-logs/{id}/review`)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewRequest {
    pub action: ReviewAction,
    pub comment: Option<String>,
}
