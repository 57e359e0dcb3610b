//! Attendance API Handlers

use axum::{
    Json,
    extract::{Query, State},
};
use shared::error::{ApiResponse, AppResult};
use shared::models::{Attendance, AttendanceQuery, ClockRequest};

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::workflow::attendance;

pub async fn list(
    State(state): State<ServerState>,
    user: CurrentUser,
    Query(query): Query<AttendanceQuery>,
) -> AppResult<ApiResponse<Vec<Attendance>>> {
    let records = attendance::list_attendance(&state.pool, &user, query).await?;
    Ok(ApiResponse::success(records))
}

pub async fn clock_in(
    State(state): State<ServerState>,
    user: CurrentUser,
    payload: Option<Json<ClockRequest>>,
) -> AppResult<ApiResponse<Attendance>> {
    let payload = payload.map(|Json(p)| p).unwrap_or_default();
    let record = attendance::clock_in(&state.pool, &user, payload).await?;
    Ok(ApiResponse::success_with_message("Clocked in", record))
}

pub async fn clock_out(
    State(state): State<ServerState>,
    user: CurrentUser,
    payload: Option<Json<ClockRequest>>,
) -> AppResult<ApiResponse<Attendance>> {
    let payload = payload.map(|Json(p)| p).unwrap_or_default();
    let record = attendance::clock_out(&state.pool, &user, payload).await?;
    Ok(ApiResponse::success_with_message("Clocked out", record))
}
