//! Intake API Handlers

use axum::{Json, extract::State};
use shared::error::{ApiResponse, AppResult};
use shared::models::{Intake, IntakeCreate};

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::workflow::intake;

pub async fn create(
    State(state): State<ServerState>,
    user: CurrentUser,
    Json(payload): Json<IntakeCreate>,
) -> AppResult<ApiResponse<Intake>> {
    let intake = intake::create_intake(&state.pool, &user, payload).await?;
    Ok(ApiResponse::success_with_message("Intake recorded", intake))
}
