//! Work Log API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};
use shared::error::{ApiResponse, AppResult};
use shared::models::{ReviewRequest, WorkLog, WorkLogCreate, WorkLogQuery};

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::workflow::work_log;

pub async fn list(
    State(state): State<ServerState>,
    user: CurrentUser,
    Query(query): Query<WorkLogQuery>,
) -> AppResult<ApiResponse<Vec<WorkLog>>> {
    let logs = work_log::list_work_logs(&state.pool, &user, query).await?;
    Ok(ApiResponse::success(logs))
}

pub async fn submit(
    State(state): State<ServerState>,
    user: CurrentUser,
    Json(payload): Json<WorkLogCreate>,
) -> AppResult<ApiResponse<WorkLog>> {
    let log = work_log::submit_work_log(&state.pool, &user, payload).await?;
    Ok(ApiResponse::success_with_message("Work log submitted", log))
}

pub async fn review(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<i64>,
    Json(payload): Json<ReviewRequest>,
) -> AppResult<ApiResponse<WorkLog>> {
    let log = work_log::review_work_log(&state.pool, &user, id, payload).await?;
    Ok(ApiResponse::success_with_message("Work log reviewed", log))
}
