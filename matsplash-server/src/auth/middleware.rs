//! Authentication middleware

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use http::{HeaderMap, Uri};
use shared::error::{AppError, ErrorCode};

use crate::auth::{CurrentUser, JwtError, JwtService};
use crate::core::ServerState;
use crate::security_log;

const PUBLIC_LOGIN_PATH: &str = "/api/auth/login";

/// Require a valid bearer token on every `/api` route
///
/// On success the resolved [`CurrentUser`] is inserted into the request
/// extensions.
///
/// # Skipped
///
/// - `OPTIONS *` (CORS preflight)
/// - non-`/api/` paths (`/health`, unknown routes fall through to 404)
/// - `/api/auth/login`
///
/// | Failure | Code |
/// |---------|------|
/// | No `Authorization` header | 401 NotAuthenticated |
/// | Expired token | 401 TokenExpired |
/// | Anything else | 401 TokenInvalid |
pub async fn require_auth(
    State(state): State<ServerState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    if skips_auth(req.method(), req.uri().path()) {
        return Ok(next.run(req).await);
    }

    let user = resolve_bearer(req.headers(), req.uri(), &state.get_jwt_service())?;
    req.extensions_mut().insert(user);
    Ok(next.run(req).await)
}

fn skips_auth(method: &http::Method, path: &str) -> bool {
    *method == http::Method::OPTIONS || !path.starts_with("/api/") || path == PUBLIC_LOGIN_PATH
}

/// Turn an `Authorization: Bearer` header into the acting employee
pub(crate) fn resolve_bearer(
    headers: &HeaderMap,
    uri: &Uri,
    jwt: &JwtService,
) -> Result<CurrentUser, AppError> {
    let Some(header) = headers
        .get(http::header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
    else {
        security_log!("WARN", "auth_missing", uri = uri.path());
        return Err(AppError::unauthorized());
    };
    let token = JwtService::extract_from_header(header)
        .ok_or_else(|| AppError::invalid_token("Invalid authorization header"))?;

    let claims = jwt.validate_token(token).map_err(|e| {
        security_log!("WARN", "auth_failed", error = e.to_string(), uri = uri.path());
        match e {
            JwtError::ExpiredToken => AppError::token_expired(),
            _ => AppError::invalid_token("Invalid token"),
        }
    })?;

    CurrentUser::try_from(claims)
        .map_err(|e| AppError::invalid_token(format!("Malformed token claims: {e}")))
}

/// Require the Admin or Director role
///
/// Layered on the employee management routes, after [`require_auth`].
pub async fn require_admin(req: Request, next: Next) -> Result<Response, AppError> {
    let user = req
        .extensions()
        .get::<CurrentUser>()
        .ok_or(AppError::unauthorized())?;
    if !user.is_admin() {
        security_log!(
            "WARN",
            "admin_required",
            user_id = user.id,
            username = user.username.clone(),
            user_role = user.role.as_str()
        );
        return Err(AppError::new(ErrorCode::AdminRequired));
    }

    Ok(next.run(req).await)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_public_paths() {
        assert!(skips_auth(&http::Method::GET, "/health"));
        assert!(skips_auth(&http::Method::POST, "/api/auth/login"));
        assert!(skips_auth(&http::Method::OPTIONS, "/api/batches"));
        assert!(!skips_auth(&http::Method::GET, "/api/auth/me"));
        assert!(!skips_auth(&http::Method::GET, "/api/batches"));
    }
}
