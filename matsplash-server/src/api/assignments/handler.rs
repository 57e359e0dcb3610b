//! Assignment API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};
use shared::error::{ApiResponse, AppResult};
use shared::models::{Assignment, AssignmentQuery, AssignmentResubmit, ReviewRequest};

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::workflow::intake;

pub async fn list(
    State(state): State<ServerState>,
    user: CurrentUser,
    Query(query): Query<AssignmentQuery>,
) -> AppResult<ApiResponse<Vec<Assignment>>> {
    let assignments = intake::list_assignments(&state.pool, &user, query.status).await?;
    Ok(ApiResponse::success(assignments))
}

pub async fn get_by_id(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<i64>,
) -> AppResult<ApiResponse<Assignment>> {
    let assignment = intake::get_assignment(&state.pool, &user, id).await?;
    Ok(ApiResponse::success(assignment))
}

pub async fn review(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<i64>,
    Json(payload): Json<ReviewRequest>,
) -> AppResult<ApiResponse<Assignment>> {
    let assignment = intake::review_assignment(&state.pool, &user, id, payload).await?;
    Ok(ApiResponse::success_with_message("Assignment reviewed", assignment))
}

pub async fn resubmit(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<i64>,
    Json(payload): Json<AssignmentResubmit>,
) -> AppResult<ApiResponse<Assignment>> {
    let assignment = intake::resubmit_assignment(&state.pool, &user, id, payload).await?;
    Ok(ApiResponse::success_with_message("Assignment resubmitted", assignment))
}
