//! Inventory API Handlers

use axum::{Json, extract::State};
use shared::error::{ApiResponse, AppResult};
use shared::models::{InventoryAdjustmentCreate, InventoryLog, InventorySnapshot};

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::workflow::inventory;

pub async fn current(
    State(state): State<ServerState>,
    user: CurrentUser,
) -> AppResult<ApiResponse<InventorySnapshot>> {
    let snapshot = inventory::compute_current_inventory(&state.pool, &user).await?;
    Ok(ApiResponse::success(snapshot))
}

pub async fn list_adjustments(
    State(state): State<ServerState>,
    user: CurrentUser,
) -> AppResult<ApiResponse<Vec<InventoryLog>>> {
    let logs = inventory::list_adjustments(&state.pool, &user).await?;
    Ok(ApiResponse::success(logs))
}

pub async fn adjust(
    State(state): State<ServerState>,
    user: CurrentUser,
    Json(payload): Json<InventoryAdjustmentCreate>,
) -> AppResult<ApiResponse<InventoryLog>> {
    let log = inventory::record_adjustment(&state.pool, &user, payload).await?;
    Ok(ApiResponse::success_with_message("Inventory adjusted", log))
}
