//! Batch API Module
//!
//! | Path | Method | Operation |
//! |------|--------|-----------|
//! | /api/batches | GET, POST | list / create |
//! | /api/batches/{id} | GET | batch with remaining capacity |
//! | /api/batches/{id}/assignments | GET, POST | list / create assignment |

mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/batches", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list).post(handler::create))
        .route("/{id}", get(handler::get_by_id))
        .route(
            "/{id}/assignments",
            get(handler::list_assignments).post(handler::create_assignment),
        )
}
