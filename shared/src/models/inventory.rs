//! Inventory Model

use serde::{Deserialize, Serialize};

/// Manual signed stock adjustment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct InventoryLog {
    pub id: i64,
    /// Positive adds stock, negative removes it
    pub quantity: i64,
    pub reason: String,
    pub recorded_by: i64,
    pub created_at: i64,
}

/// Adjustment payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InventoryAdjustmentCreate {
    pub quantity: i64,
    pub reason: String,
}

/// Stock derived from the workflow tables, recomputed per request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InventorySnapshot {
    /// Σ bags_received over batches
    pub bags_received: i64,
    /// Σ bags_assigned over approved assignments
    pub bags_allocated: i64,
    /// Σ bags_packed over approved packing logs
    pub bags_produced: i64,
    pub bags_dispatched: i64,
    /// Σ bags_returned over accounted dispatches
    pub bags_returned: i64,
    /// Σ inventory log quantities
    pub adjustments: i64,
    pub current_stock: i64,
    pub computed_at: i64,
}
