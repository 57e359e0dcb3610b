//! Authentication Handlers

use std::time::Duration;

use axum::{Json, extract::State};
use shared::error::{ApiResponse, AppResult};
use shared::models::{Employee, LoginRequest, LoginResponse};

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::workflow::employees;

/// Every login answer takes at least this long
const AUTH_FIXED_DELAY_MS: u64 = 500;

pub async fn login(
    State(state): State<ServerState>,
    Json(req): Json<LoginRequest>,
) -> AppResult<ApiResponse<LoginResponse>> {
    let jwt = state.get_jwt_service();
    let (result, _) = tokio::join!(
        employees::login(&state.pool, &jwt, req),
        tokio::time::sleep(Duration::from_millis(AUTH_FIXED_DELAY_MS)),
    );
    Ok(ApiResponse::success_with_message("Login successful", result?))
}

/// Current employee, read fresh from the database
pub async fn me(
    State(state): State<ServerState>,
    user: CurrentUser,
) -> AppResult<ApiResponse<Employee>> {
    let employee = employees::get_employee(&state.pool, &user, user.id).await?;
    Ok(ApiResponse::success(employee))
}
