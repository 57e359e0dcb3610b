//! Data models
//!
//! Shared between matsplash-server and the dashboards (via API).
//! DB row types use `#[cfg_attr(feature = "db", derive(sqlx::FromRow))]`.
//! All IDs are `i64` (SQLite INTEGER PRIMARY KEY), timestamps are Unix
//! millis and calendar dates are ISO `YYYY-MM-DD` strings.

pub mod assignment;
pub mod attendance;
pub mod batch;
pub mod driver_sales;
pub mod employee;
pub mod inventory;
pub mod packing_log;
pub mod review;
pub mod salary;
pub mod work_log;

// Re-exports
pub use assignment::*;
pub use attendance::*;
pub use batch::*;
pub use driver_sales::*;
pub use employee::*;
pub use inventory::*;
pub use packing_log::*;
pub use review::*;
pub use salary::*;
pub use work_log::*;
