//! Inventory API Module

mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/inventory", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::current))
        .route(
            "/adjustments",
            get(handler::list_adjustments).post(handler::adjust),
        )
}
