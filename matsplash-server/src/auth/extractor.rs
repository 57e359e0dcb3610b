//! `CurrentUser` extractor
//!
//! [`crate::auth::require_auth`] resolves the bearer token once and leaves
//! the employee in the request extensions; handlers pick it up by taking
//! `CurrentUser` as an argument. Requests that bypassed the middleware (a
//! router built without it) resolve the token here instead.

use axum::{extract::FromRequestParts, http::request::Parts};
use shared::error::AppError;

use crate::auth::CurrentUser;
use crate::auth::middleware::resolve_bearer;
use crate::core::ServerState;

impl FromRequestParts<ServerState> for CurrentUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &ServerState,
    ) -> Result<Self, Self::Rejection> {
        if let Some(user) = parts.extensions.get::<CurrentUser>() {
            return Ok(user.clone());
        }

        let user = resolve_bearer(&parts.headers, &parts.uri, &state.get_jwt_service())?;
        parts.extensions.insert(user.clone());
        Ok(user)
    }
}
