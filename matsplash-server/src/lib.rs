//! MatSplash Server - factory operations backend
//!
//! # Overview
//!
//! Tracks sachet-water bags from material intake to cash settlement:
//!
//! - **Intake** (`workflow::intake`): batches and packer assignments, capacity-checked
//! - **Packing** (`workflow::work_log`, `workflow::packing`): reviewed output records
//! - **Dispatch** (`workflow::dispatch`): driver runs and their settlement
//! - **Reports** (`workflow::salary`, `workflow::inventory`): derived per request
//! - **Auth** (`auth`): JWT + Argon2, role policy table
//!
//! # Layout
//!
//! ```text
//! matsplash-server/src/
//! ├── core/          # config, state, server
//! ├── auth/          # JWT, middleware, policy
//! ├── db/            # SQLite pool and repositories
//! ├── workflow/      # one function per operation
//! ├── api/           # HTTP routers and handlers
//! └── utils/         # logger, validation
//! ```

pub mod api;
pub mod auth;
pub mod core;
pub mod db;
pub mod utils;
pub mod workflow;

pub use auth::{CurrentUser, JwtService};
pub use core::{Config, Server, ServerState};
pub use shared::error::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};
pub use utils::logger::{init_logger, init_logger_with_file};
pub use workflow::{WorkflowError, WorkflowResult};

// Security logging macro - structured fields under the "security" target
#[macro_export]
macro_rules! security_log {
    ($level:expr, $event:expr, $($key:ident = $value:expr),*) => {
        tracing::info!(
            target: "security",
            level = $level,
            event = $event,
            $($key = $value),*
        );
    };
}

/// Load `.env` and start logging
///
/// Runs before [`Config::from_env`] so the file's variables are visible to
/// it. Logging settings are read directly from the environment here.
pub fn setup_environment() {
    let dotenv_loaded = dotenv::dotenv().is_ok();

    let log_level = std::env::var("LOG_LEVEL").ok();
    let json = std::env::var("ENVIRONMENT").is_ok_and(|env| env == "production");
    let log_dir = std::env::var("LOG_DIR").ok().map(std::path::PathBuf::from);
    if let Some(dir) = &log_dir {
        if let Err(e) = std::fs::create_dir_all(dir) {
            eprintln!("Cannot create log directory {}: {e}", dir.display());
        }
    }
    init_logger_with_file(log_level.as_deref(), json, log_dir.as_deref());

    if dotenv_loaded {
        tracing::debug!("Loaded environment from .env");
    }
}

pub fn print_banner() {
    println!(
        r#"
    __  ___      __  _____       __           __
   /  |/  /___ _/ /_/ ___/____  / /___ ______/ /_
  / /|_/ / __ `/ __/\__ \/ __ \/ / __ `/ ___/ __ \
 / /  / / /_/ / /_ ___/ / /_/ / / /_/ (__  ) / / /
/_/  /_/\__,_/\__//____/ .___/_/\__,_/____/_/ /_/
                      /_/
    "#
    );
}
