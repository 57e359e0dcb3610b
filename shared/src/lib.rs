//! Shared types for MatSplash Suite
//!
//! Common types used by the server and its API clients: error codes,
//! the response envelope and the data models exchanged over HTTP.

pub mod error;
pub mod models;
pub mod util;

// Re-exports
pub use axum::{Json, body};
pub use error::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};
pub use http;
pub use serde::{Deserialize, Serialize};
