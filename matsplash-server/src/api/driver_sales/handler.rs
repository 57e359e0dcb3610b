//! Driver Sales API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};
use shared::error::{ApiResponse, AppResult};
use shared::models::{
    DriverDispatch, DriverSalesAccount, DriverSalesLog, DriverSalesQuery, DriverSalesSettlement,
};

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::workflow::dispatch;

pub async fn list(
    State(state): State<ServerState>,
    user: CurrentUser,
    Query(query): Query<DriverSalesQuery>,
) -> AppResult<ApiResponse<Vec<DriverSalesLog>>> {
    let logs = dispatch::list_driver_sales(&state.pool, &user, query).await?;
    Ok(ApiResponse::success(logs))
}

pub async fn create(
    State(state): State<ServerState>,
    user: CurrentUser,
    Json(payload): Json<DriverDispatch>,
) -> AppResult<ApiResponse<DriverSalesLog>> {
    let log = dispatch::dispatch_driver(&state.pool, &user, payload).await?;
    Ok(ApiResponse::success_with_message("Driver dispatched", log))
}

pub async fn account(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<i64>,
    Json(payload): Json<DriverSalesAccount>,
) -> AppResult<ApiResponse<DriverSalesSettlement>> {
    let settlement = dispatch::account_driver_sales(&state.pool, &user, id, payload).await?;
    let message = if settlement.warnings.is_empty() {
        "Sales accounted"
    } else {
        "Sales accounted with warnings"
    };
    Ok(ApiResponse::success_with_message(message, settlement))
}
