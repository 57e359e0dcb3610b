//! Salary Model

use serde::{Deserialize, Serialize};

use super::Employee;

/// Rate type used by the monthly summaries
pub const RATE_TYPE_PER_BAG: &str = "per_bag";

fn default_rate_type() -> String {
    RATE_TYPE_PER_BAG.to_string()
}

/// Salary rate (history is kept; at most one active per employee and type)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct SalaryRate {
    pub id: i64,
    pub employee_id: i64,
    pub rate_type: String,
    pub rate_amount: f64,
    pub is_active: bool,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Update rate payload (`PUT /api/salary/rates/{employeeId}`)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SalaryRateUpdate {
    #[serde(default = "default_rate_type")]
    pub rate_type: String,
    pub rate_amount: f64,
}

/// Calendar month a summary covers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalaryPeriod {
    pub year: i32,
    pub month: u32,
    /// First day of the month (inclusive)
    pub start_date: String,
    /// First day of the next month (exclusive)
    pub end_date: String,
}

/// Query for the summary endpoints
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SalaryPeriodQuery {
    pub year: i32,
    pub month: u32,
}

/// Monthly salary summary
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SalarySummary {
    pub employee: Employee,
    pub salary_rate: Option<SalaryRate>,
    pub total_bags: i64,
    pub total_earnings: f64,
    pub period: SalaryPeriod,
}
