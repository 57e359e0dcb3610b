//! Batch Model

use serde::{Deserialize, Serialize};

use super::Assignment;

/// Batch status
///
/// A batch is immutable once received; the status exists so the table
/// carries an explicit lifecycle column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[serde(rename_all = "snake_case")]
#[cfg_attr(feature = "db", sqlx(rename_all = "snake_case"))]
pub enum BatchStatus {
    #[default]
    Received,
}

/// Batch of bags received from a loader
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Batch {
    pub id: i64,
    /// Unique number, `BATCH-YYYYMMDD-NNNN`
    pub batch_number: String,
    pub loader_id: i64,
    /// Ceiling assignments are validated against
    pub bags_received: i64,
    pub status: BatchStatus,
    pub notes: Option<String>,
    pub created_at: i64,
}

/// Batch with its derived capacity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchCapacity {
    #[serde(flatten)]
    pub batch: Batch,
    /// Σ bags_assigned over non-rejected assignments
    pub bags_allocated: i64,
    pub bags_remaining: i64,
}

impl BatchCapacity {
    pub fn new(batch: Batch, bags_allocated: i64) -> Self {
        let bags_remaining = batch.bags_received - bags_allocated;
        Self {
            batch,
            bags_allocated,
            bags_remaining,
        }
    }
}

/// Create batch payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchCreate {
    pub loader_id: i64,
    pub bags_received: i64,
    pub notes: Option<String>,
}

/// Intake payload: one batch plus its first assignment
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IntakeCreate {
    pub loader_id: i64,
    pub packer_id: i64,
    pub bags_submitted: i64,
    pub notes: Option<String>,
}

/// Intake result
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Intake {
    pub batch: Batch,
    pub assignment: Assignment,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capacity_flattens_batch() {
        let batch = Batch {
            id: 1,
            batch_number: "BATCH-20250314-0042".into(),
            loader_id: 3,
            bags_received: 100,
            status: BatchStatus::Received,
            notes: None,
            created_at: 0,
        };
        let capacity = BatchCapacity::new(batch, 70);
        assert_eq!(capacity.bags_remaining, 30);

        let json = serde_json::to_value(&capacity).unwrap();
        assert_eq!(json["batch_number"], "BATCH-20250314-0042");
        assert_eq!(json["status"], "received");
        assert_eq!(json["bags_allocated"], 70);
    }
}
