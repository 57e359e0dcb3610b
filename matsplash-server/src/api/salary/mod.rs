//! Salary API Module

mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/salary", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/summary/{employee_id}", get(handler::summary))
        .route("/summaries", get(handler::summaries))
        .route(
            "/rates/{employee_id}",
            get(handler::rate_history).put(handler::update_rate),
        )
}
