//! Driver Sales Model

use serde::{Deserialize, Serialize};

/// Standard bag price, also used for the expected revenue of a dispatch
pub const PRICE_STANDARD: i64 = 250;
/// Premium bag price
pub const PRICE_PREMIUM: i64 = 270;

/// Driver sales status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[serde(rename_all = "snake_case")]
#[cfg_attr(feature = "db", sqlx(rename_all = "snake_case"))]
pub enum DriverSalesStatus {
    Dispatched,
    Accounted,
}

impl DriverSalesStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Dispatched => "dispatched",
            Self::Accounted => "accounted",
        }
    }
}

/// One delivery run: dispatched by reception, settled when the driver returns
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct DriverSalesLog {
    pub id: i64,
    pub driver_id: i64,
    pub driver_assistant_id: Option<i64>,
    pub bags_dispatched: i64,
    pub bags_sold_270: i64,
    pub bags_sold_250: i64,
    pub bags_returned: i64,
    pub total_revenue: f64,
    /// `bags_dispatched × 250`
    pub expected_revenue: f64,
    /// ISO date
    pub delivery_date: String,
    pub status: DriverSalesStatus,
    pub receptionist_id: i64,
    pub driver_notes: Option<String>,
    pub receptionist_notes: Option<String>,
    pub dispatched_at: i64,
    pub accounted_at: Option<i64>,
}

/// Dispatch payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DriverDispatch {
    pub driver_id: i64,
    pub driver_assistant_id: Option<i64>,
    pub bags_dispatched: i64,
    pub delivery_date: String,
    pub driver_notes: Option<String>,
}

/// Settlement payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DriverSalesAccount {
    pub bags_sold_270: i64,
    pub bags_sold_250: i64,
    pub bags_returned: i64,
    pub total_revenue: f64,
    pub receptionist_notes: Option<String>,
}

/// Settlement result with the server-side revenue cross-check
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DriverSalesSettlement {
    pub log: DriverSalesLog,
    /// `sold_270 × 270 + sold_250 × 250`
    pub computed_revenue: f64,
    pub unaccounted_bags: i64,
    pub warnings: Vec<String>,
}

/// Query for `GET /api/driver-sales`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DriverSalesQuery {
    pub status: Option<DriverSalesStatus>,
    pub driver_id: Option<i64>,
}
