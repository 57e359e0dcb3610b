//! Workflow services
//!
//! Each function is one operation: it authorizes the actor against the
//! policy table, validates input, then drives the repository with
//! conditional transitions. Handlers stay thin and only translate HTTP.

pub mod attendance;
pub mod dispatch;
pub mod employees;
pub mod error;
pub mod intake;
pub mod inventory;
pub mod money;
pub mod packing;
pub mod review;
pub mod salary;
pub mod work_log;

pub use error::{WorkflowError, WorkflowResult};

use shared::error::ErrorCode;
use shared::models::{Employee, Role};
use sqlx::SqlitePool;

use crate::db::repository::employee;

/// Resolve an employee referenced by a payload
///
/// Missing, inactive and wrong-role employees are all validation failures
/// of the payload, not lookups of a resource.
pub(crate) async fn require_staff(
    pool: &SqlitePool,
    id: i64,
    roles: &[Role],
    field: &str,
) -> WorkflowResult<Employee> {
    let staff = employee::find_by_id(pool, id).await?.ok_or_else(|| {
        WorkflowError::validation_code(
            ErrorCode::EmployeeNotFound,
            format!("{field}: employee {id} does not exist"),
        )
    })?;
    if !staff.is_active {
        return Err(WorkflowError::validation_code(
            ErrorCode::EmployeeInactive,
            format!("{field}: employee {id} is inactive"),
        ));
    }
    if !roles.contains(&staff.role) {
        let expected = roles.iter().map(Role::as_str).collect::<Vec<_>>().join(" or ");
        return Err(WorkflowError::validation_code(
            ErrorCode::EmployeeRoleMismatch,
            format!("{field}: employee {id} is a {}, expected {expected}", staff.role),
        ));
    }
    Ok(staff)
}

#[cfg(test)]
pub(crate) mod test_support {
    use shared::models::Role;
    use sqlx::SqlitePool;

    use crate::auth::CurrentUser;
    use crate::db::repository::test_support::seed_employee;

    pub use crate::db::repository::test_support::test_pool;

    /// Seed an employee and return it as an acting user
    pub async fn staff(pool: &SqlitePool, username: &str, role: Role) -> CurrentUser {
        let id = seed_employee(pool, username, role).await;
        CurrentUser {
            id,
            username: username.to_string(),
            role,
        }
    }
}
