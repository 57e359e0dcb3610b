//! Intake API Module
//!
//! `POST /api/intake` records a batch and its first assignment atomically.

mod handler;

use axum::{Router, routing::post};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().route("/api/intake", post(handler::create))
}
