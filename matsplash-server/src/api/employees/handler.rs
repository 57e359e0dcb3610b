//! Employee API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};
use shared::error::{ApiResponse, AppResult};
use shared::models::{Employee, EmployeeCreate, EmployeeQuery, EmployeeUpdate};

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::workflow::employees;

pub async fn list(
    State(state): State<ServerState>,
    user: CurrentUser,
    Query(query): Query<EmployeeQuery>,
) -> AppResult<ApiResponse<Vec<Employee>>> {
    let list = employees::list_employees(&state.pool, &user, query.role).await?;
    Ok(ApiResponse::success(list))
}

pub async fn get_by_id(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<i64>,
) -> AppResult<ApiResponse<Employee>> {
    let employee = employees::get_employee(&state.pool, &user, id).await?;
    Ok(ApiResponse::success(employee))
}

pub async fn create(
    State(state): State<ServerState>,
    user: CurrentUser,
    Json(payload): Json<EmployeeCreate>,
) -> AppResult<ApiResponse<Employee>> {
    let employee = employees::create_employee(&state.pool, &user, payload).await?;
    Ok(ApiResponse::success_with_message("Employee created", employee))
}

pub async fn update(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<i64>,
    Json(payload): Json<EmployeeUpdate>,
) -> AppResult<ApiResponse<Employee>> {
    let employee = employees::update_employee(&state.pool, &user, id, payload).await?;
    Ok(ApiResponse::success_with_message("Employee updated", employee))
}
