//! HTTP API
//!
//! One router per resource, merged in [`build_router`]. Handlers only
//! translate HTTP: the acting employee comes from the auth middleware,
//! the work is done by [`crate::workflow`].
//!
//! - [`health`] - liveness (public)
//! - [`auth`] - login and current user
//! - [`employees`] - account management
//! - [`batches`], [`intake`], [`assignments`] - material intake
//! - [`work_logs`], [`packing_logs`] - packing output
//! - [`salary`], [`inventory`] - derived reports
//! - [`driver_sales`] - dispatch and settlement
//! - [`attendance`] - clock-in / clock-out

pub mod assignments;
pub mod attendance;
pub mod auth;
pub mod batches;
pub mod driver_sales;
pub mod employees;
pub mod health;
pub mod intake;
pub mod inventory;
pub mod packing_logs;
pub mod salary;
pub mod work_logs;

use std::time::Duration;

use axum::Router;
use axum::body::Body;
use axum::middleware::{self, Next};
use http::{HeaderName, Request, Response, StatusCode};
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::auth::require_auth;
use crate::core::ServerState;

const REQUEST_ID_HEADER: &str = "x-request-id";

/// Access log line per request
async fn log_request(request: Request<Body>, next: Next) -> Response<Body> {
    let method = request.method().clone();
    let uri = request.uri().clone();

    let response = next.run(request).await;

    tracing::info!(target: "http_access", "{} {} {}", method, uri, response.status());
    response
}

/// Every route, without middleware or state
pub fn build_router() -> Router<ServerState> {
    Router::new()
        .merge(health::router())
        .merge(auth::router())
        .merge(employees::router())
        .merge(batches::router())
        .merge(intake::router())
        .merge(assignments::router())
        .merge(work_logs::router())
        .merge(packing_logs::router())
        .merge(salary::router())
        .merge(inventory::router())
        .merge(driver_sales::router())
        .merge(attendance::router())
}

/// Fully layered application, used by the server and the integration tests
pub fn build_app(state: &ServerState) -> Router<ServerState> {
    let request_id = HeaderName::from_static(REQUEST_ID_HEADER);

    build_router()
        // Authentication runs closest to the handlers
        .layer(middleware::from_fn_with_state(state.clone(), require_auth))
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_millis(state.config.request_timeout_ms),
        ))
        .layer(PropagateRequestIdLayer::new(request_id.clone()))
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(log_request))
        .layer(SetRequestIdLayer::new(request_id, MakeRequestUuid))
        .layer(CompressionLayer::new())
        .layer(CorsLayer::permissive())
}
