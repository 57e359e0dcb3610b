//! Packing Log API Module
//!
//! | Path | Method | Operation |
//! |------|--------|-----------|
//! | /api/packing-logs | POST | create (StoreKeeper) |
//! | /api/packing-logs/{packerId} | GET | logs of one packer |
//! | /api/packing-logs/{id}/confirm | PUT | packer confirms |
//! | /api/packing-logs/{id}/dispute | PUT | packer disputes |
//! | /api/packing-logs/{id}/approve | PUT | manager approves |
//! | /api/packing-logs/{id}/reject | PUT | manager rejects |
//! | /api/packing-logs/{id}/resubmit | PUT | storekeeper resubmits |
//! | /api/pending-approvals | GET | confirmed and disputed logs |

mod handler;

use axum::{
    Router,
    routing::{get, post, put},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .nest("/api/packing-logs", routes())
        .route("/api/pending-approvals", get(handler::pending_approvals))
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", post(handler::create))
        .route("/{id}", get(handler::list_by_packer))
        .route("/{id}/confirm", put(handler::confirm))
        .route("/{id}/dispute", put(handler::dispute))
        .route("/{id}/approve", put(handler::approve))
        .route("/{id}/reject", put(handler::reject))
        .route("/{id}/resubmit", put(handler::resubmit))
}
