//! Utilities
//!
//! - [`logger`] - tracing subscriber setup
//! - [`validation`] - text and count checks shared by the workflows

pub mod logger;
pub mod validation;
