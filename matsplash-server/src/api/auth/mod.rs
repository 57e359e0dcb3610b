//! Authentication routes
//!
//! | Path | Method | Auth |
//! |------|--------|------|
//! | /api/auth/login | POST | none |
//! | /api/auth/me | GET | bearer |

mod handler;

use axum::{
    Router,
    routing::{get, post},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/auth", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/login", post(handler::login))
        .route("/me", get(handler::me))
}
