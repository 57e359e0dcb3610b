//! Batch API Handlers

use axum::{
    Json,
    extract::{Path, State},
};
use shared::error::{ApiResponse, AppResult};
use shared::models::{Assignment, AssignmentCreate, Batch, BatchCapacity, BatchCreate};

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::workflow::intake;

pub async fn list(
    State(state): State<ServerState>,
    user: CurrentUser,
) -> AppResult<ApiResponse<Vec<BatchCapacity>>> {
    let batches = intake::list_batches(&state.pool, &user).await?;
    Ok(ApiResponse::success(batches))
}

pub async fn get_by_id(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<i64>,
) -> AppResult<ApiResponse<BatchCapacity>> {
    let batch = intake::get_batch(&state.pool, &user, id).await?;
    Ok(ApiResponse::success(batch))
}

pub async fn create(
    State(state): State<ServerState>,
    user: CurrentUser,
    Json(payload): Json<BatchCreate>,
) -> AppResult<ApiResponse<Batch>> {
    let batch = intake::create_batch(&state.pool, &user, payload).await?;
    Ok(ApiResponse::success_with_message("Batch created", batch))
}

pub async fn list_assignments(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<i64>,
) -> AppResult<ApiResponse<Vec<Assignment>>> {
    let assignments = intake::list_batch_assignments(&state.pool, &user, id).await?;
    Ok(ApiResponse::success(assignments))
}

pub async fn create_assignment(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<i64>,
    Json(payload): Json<AssignmentCreate>,
) -> AppResult<ApiResponse<Assignment>> {
    let assignment = intake::create_assignment(&state.pool, &user, id, payload).await?;
    Ok(ApiResponse::success_with_message("Assignment created", assignment))
}
