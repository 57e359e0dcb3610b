//! Salary API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};
use shared::error::{ApiResponse, AppResult};
use shared::models::{SalaryPeriodQuery, SalaryRate, SalaryRateUpdate, SalarySummary};

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::workflow::salary;

pub async fn summary(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(employee_id): Path<i64>,
    Query(period): Query<SalaryPeriodQuery>,
) -> AppResult<ApiResponse<SalarySummary>> {
    let summary =
        salary::compute_salary_summary(&state.pool, &user, employee_id, period.year, period.month)
            .await?;
    Ok(ApiResponse::success(summary))
}

pub async fn summaries(
    State(state): State<ServerState>,
    user: CurrentUser,
    Query(period): Query<SalaryPeriodQuery>,
) -> AppResult<ApiResponse<Vec<SalarySummary>>> {
    let summaries =
        salary::compute_salary_summaries(&state.pool, &user, period.year, period.month).await?;
    Ok(ApiResponse::success(summaries))
}

pub async fn rate_history(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(employee_id): Path<i64>,
) -> AppResult<ApiResponse<Vec<SalaryRate>>> {
    let rates = salary::list_salary_rates(&state.pool, &user, employee_id).await?;
    Ok(ApiResponse::success(rates))
}

pub async fn update_rate(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(employee_id): Path<i64>,
    Json(payload): Json<SalaryRateUpdate>,
) -> AppResult<ApiResponse<SalaryRate>> {
    let rate = salary::update_salary_rate(&state.pool, &user, employee_id, payload).await?;
    Ok(ApiResponse::success_with_message("Salary rate updated", rate))
}
