//! Authentication and authorization
//!
//! - [`JwtService`] issues and validates bearer tokens
//! - [`CurrentUser`] is the acting employee resolved from a token
//! - [`require_auth`] / [`require_admin`] are the axum middleware
//! - [`policy`] is the operation → role table every workflow consults

pub mod extractor;
pub mod jwt;
pub mod middleware;
pub mod password;
pub mod policy;

pub use jwt::{Claims, CurrentUser, JwtConfig, JwtError, JwtService};
pub use middleware::{require_admin, require_auth};
pub use policy::{Operation, authorize};
