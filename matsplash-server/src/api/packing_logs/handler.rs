//! Packing Log API Handlers

use axum::{
    Json,
    extract::{Path, State},
};
use shared::error::{ApiResponse, AppResult};
use shared::models::{
    PackingLog, PackingLogApprove, PackingLogConfirm, PackingLogCreate, PackingLogDispute,
    PackingLogReject, PackingLogResubmit,
};

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::workflow::packing;

pub async fn create(
    State(state): State<ServerState>,
    user: CurrentUser,
    Json(payload): Json<PackingLogCreate>,
) -> AppResult<ApiResponse<PackingLog>> {
    let log = packing::create_packing_log(&state.pool, &user, payload).await?;
    Ok(ApiResponse::success_with_message("Packing log created", log))
}

pub async fn list_by_packer(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(packer_id): Path<i64>,
) -> AppResult<ApiResponse<Vec<PackingLog>>> {
    let logs = packing::list_packing_logs(&state.pool, &user, packer_id).await?;
    Ok(ApiResponse::success(logs))
}

pub async fn pending_approvals(
    State(state): State<ServerState>,
    user: CurrentUser,
) -> AppResult<ApiResponse<Vec<PackingLog>>> {
    let logs = packing::list_pending_approvals(&state.pool, &user).await?;
    Ok(ApiResponse::success(logs))
}

pub async fn confirm(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<i64>,
    payload: Option<Json<PackingLogConfirm>>,
) -> AppResult<ApiResponse<PackingLog>> {
    let payload = payload.map(|Json(p)| p).unwrap_or_default();
    let log = packing::confirm_packing_log(&state.pool, &user, id, payload).await?;
    Ok(ApiResponse::success_with_message("Packing log confirmed", log))
}

pub async fn dispute(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<i64>,
    Json(payload): Json<PackingLogDispute>,
) -> AppResult<ApiResponse<PackingLog>> {
    let log = packing::dispute_packing_log(&state.pool, &user, id, payload).await?;
    Ok(ApiResponse::success_with_message("Packing log disputed", log))
}

pub async fn approve(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<i64>,
    payload: Option<Json<PackingLogApprove>>,
) -> AppResult<ApiResponse<PackingLog>> {
    let payload = payload.map(|Json(p)| p).unwrap_or_default();
    let log = packing::approve_packing_log(&state.pool, &user, id, payload).await?;
    Ok(ApiResponse::success_with_message("Packing log approved", log))
}

pub async fn reject(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<i64>,
    Json(payload): Json<PackingLogReject>,
) -> AppResult<ApiResponse<PackingLog>> {
    let log = packing::reject_packing_log(&state.pool, &user, id, payload).await?;
    Ok(ApiResponse::success_with_message("Packing log rejected", log))
}

pub async fn resubmit(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<i64>,
    Json(payload): Json<PackingLogResubmit>,
) -> AppResult<ApiResponse<PackingLog>> {
    let log = packing::resubmit_packing_log(&state.pool, &user, id, payload).await?;
    Ok(ApiResponse::success_with_message("Packing log resubmitted", log))
}
