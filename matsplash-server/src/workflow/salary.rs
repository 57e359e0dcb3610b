//! Salary rates and monthly summaries
//!
//! Pay is per bag. Packers are paid for bags on approved packing logs,
//! drivers and their assistants for bags sold on accounted runs. A
//! summary is a pure read: asking twice gives the same answer.

use chrono::{Datelike, NaiveDate};
use shared::error::ErrorCode;
use shared::models::{
    Employee, RATE_TYPE_PER_BAG, Role, SalaryPeriod, SalaryRate, SalaryRateUpdate, SalarySummary,
};
use sqlx::SqlitePool;

use super::{WorkflowError, WorkflowResult, money};
use crate::auth::{CurrentUser, Operation, authorize};
use crate::db::repository::{driver_sales, employee, packing_log, salary_rate};
use crate::utils::validation::{MAX_NAME_LEN, validate_required_text};

/// Roles a monthly summary is produced for
const PAID_PER_BAG: &[Role] = &[Role::Packer, Role::Driver, Role::DriverAssistant];

/// Calendar month `[first day, first day of next month)`
pub fn salary_period(year: i32, month: u32) -> WorkflowResult<SalaryPeriod> {
    let invalid = || {
        WorkflowError::validation_code(
            ErrorCode::InvalidPeriod,
            format!("Invalid salary period {year}-{month:02}"),
        )
    };
    if !(2000..=9998).contains(&year) {
        return Err(invalid());
    }
    let start = NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(invalid)?;
    let end = if start.month() == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    }
    .ok_or_else(invalid)?;

    Ok(SalaryPeriod {
        year,
        month,
        start_date: start.format("%Y-%m-%d").to_string(),
        end_date: end.format("%Y-%m-%d").to_string(),
    })
}

fn require_self_or_management(actor: &CurrentUser, employee_id: i64) -> WorkflowResult<()> {
    if actor.id != employee_id && !actor.role.is_elevated() {
        return Err(WorkflowError::forbidden(
            "Only management may view another employee's salary",
        ));
    }
    Ok(())
}

async fn find_employee(pool: &SqlitePool, id: i64) -> WorkflowResult<Employee> {
    employee::find_by_id(pool, id).await?.ok_or_else(|| {
        WorkflowError::not_found(ErrorCode::EmployeeNotFound, format!("Employee {id} not found"))
    })
}

async fn summarize(
    pool: &SqlitePool,
    employee: Employee,
    period: &SalaryPeriod,
) -> WorkflowResult<SalarySummary> {
    let rate = salary_rate::find_active(pool, employee.id, RATE_TYPE_PER_BAG).await?;

    let total_bags = match employee.role {
        Role::Packer => {
            packing_log::sum_approved_bags(pool, employee.id, &period.start_date, &period.end_date)
                .await?
        }
        Role::Driver | Role::DriverAssistant => {
            driver_sales::sum_sold_bags(pool, employee.id, &period.start_date, &period.end_date)
                .await?
        }
        _ => 0,
    };

    let rate_amount = match &rate {
        Some(rate) => rate.rate_amount,
        None => {
            if PAID_PER_BAG.contains(&employee.role) {
                tracing::warn!(
                    employee_id = employee.id,
                    year = period.year,
                    month = period.month,
                    "No active per-bag rate, earnings computed at zero"
                );
            }
            0.0
        }
    };

    Ok(SalarySummary {
        total_earnings: money::earnings(total_bags, rate_amount),
        employee,
        salary_rate: rate,
        total_bags,
        period: period.clone(),
    })
}

pub async fn compute_salary_summary(
    pool: &SqlitePool,
    actor: &CurrentUser,
    employee_id: i64,
    year: i32,
    month: u32,
) -> WorkflowResult<SalarySummary> {
    authorize(actor, Operation::ViewSalary)?;
    require_self_or_management(actor, employee_id)?;
    let period = salary_period(year, month)?;
    let employee = find_employee(pool, employee_id).await?;
    summarize(pool, employee, &period).await
}

/// Summary for every active packer, driver and driver assistant
pub async fn compute_salary_summaries(
    pool: &SqlitePool,
    actor: &CurrentUser,
    year: i32,
    month: u32,
) -> WorkflowResult<Vec<SalarySummary>> {
    authorize(actor, Operation::ViewAllSalaries)?;
    let period = salary_period(year, month)?;
    let staff = employee::find_active_by_roles(pool, PAID_PER_BAG).await?;

    let mut summaries = Vec::with_capacity(staff.len());
    for member in staff {
        summaries.push(summarize(pool, member, &period).await?);
    }
    Ok(summaries)
}

/// Replace the active rate: the old one is kept as history
pub async fn update_salary_rate(
    pool: &SqlitePool,
    actor: &CurrentUser,
    employee_id: i64,
    data: SalaryRateUpdate,
) -> WorkflowResult<SalaryRate> {
    authorize(actor, Operation::UpdateSalaryRate)?;
    validate_required_text(&data.rate_type, "rate_type", MAX_NAME_LEN)?;
    if !money::is_valid_amount(data.rate_amount) {
        return Err(WorkflowError::validation_code(
            ErrorCode::InvalidRateAmount,
            format!("rate_amount must be a non-negative amount, got {}", data.rate_amount),
        ));
    }
    find_employee(pool, employee_id).await?;

    let rate =
        salary_rate::replace_active(pool, employee_id, data.rate_type.trim(), data.rate_amount)
            .await?;
    tracing::info!(
        employee_id,
        rate_type = %rate.rate_type,
        rate_amount = rate.rate_amount,
        actor_id = actor.id,
        "Salary rate updated"
    );
    Ok(rate)
}

/// Rate history, newest first
pub async fn list_salary_rates(
    pool: &SqlitePool,
    actor: &CurrentUser,
    employee_id: i64,
) -> WorkflowResult<Vec<SalaryRate>> {
    authorize(actor, Operation::ViewSalary)?;
    require_self_or_management(actor, employee_id)?;
    find_employee(pool, employee_id).await?;
    Ok(salary_rate::find_by_employee(pool, employee_id).await?)
}
