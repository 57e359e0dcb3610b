//! Role policy table
//!
//! Every workflow operation names its [`Operation`] and calls [`authorize`]
//! once before touching the database. Identity rules (named packer,
//! original submitter, self-only views) are checked by the workflow on top
//! of this table.

use shared::models::Role;
use shared::models::Role::*;

use crate::auth::CurrentUser;
use crate::security_log;
use crate::workflow::{WorkflowError, WorkflowResult};

const EVERYONE: &[Role] = &Role::ALL;
const MANAGEMENT: &[Role] = &[Manager, Admin, Director];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    // Intake
    CreateIntake,
    CreateBatch,
    CreateAssignment,
    ViewIntake,
    ReviewAssignment,
    ResubmitAssignment,
    // Work logs
    SubmitWorkLog,
    ReviewWorkLog,
    ViewWorkLogs,
    // Packing logs
    CreatePackingLog,
    ConfirmPackingLog,
    DisputePackingLog,
    ApprovePackingLog,
    RejectPackingLog,
    ResubmitPackingLog,
    ViewPackingLogs,
    ViewPendingApprovals,
    // Payroll & inventory
    ViewSalary,
    ViewAllSalaries,
    UpdateSalaryRate,
    ViewInventory,
    AdjustInventory,
    // Dispatch
    DispatchDriver,
    AccountDriverSales,
    ViewDriverSales,
    // Attendance
    ClockAttendance,
    ViewAttendance,
    // Employees
    ManageEmployees,
    ViewEmployees,
}

impl Operation {
    pub fn allowed_roles(self) -> &'static [Role] {
        match self {
            Operation::CreateIntake | Operation::CreateAssignment | Operation::CreatePackingLog => {
                &[StoreKeeper]
            }
            Operation::CreateBatch => &[Loader, StoreKeeper],
            Operation::ViewIntake => &[Loader, Packer, StoreKeeper, Manager, Admin, Director],
            Operation::ReviewAssignment
            | Operation::ReviewWorkLog
            | Operation::ApprovePackingLog
            | Operation::RejectPackingLog => &[Manager],
            Operation::ResubmitAssignment | Operation::ResubmitPackingLog => {
                &[StoreKeeper, Manager, Admin, Director]
            }
            Operation::SubmitWorkLog | Operation::ConfirmPackingLog | Operation::DisputePackingLog => {
                &[Packer]
            }
            Operation::ViewWorkLogs | Operation::ViewPackingLogs => {
                &[Packer, StoreKeeper, Manager, Admin, Director]
            }
            Operation::ViewPendingApprovals
            | Operation::ViewAllSalaries
            | Operation::UpdateSalaryRate => MANAGEMENT,
            Operation::ViewInventory => &[StoreKeeper, Manager, Receptionist, Admin, Director],
            Operation::AdjustInventory => &[StoreKeeper, Manager, Admin],
            Operation::DispatchDriver | Operation::AccountDriverSales => &[Receptionist],
            Operation::ViewDriverSales => {
                &[Driver, DriverAssistant, Receptionist, Manager, Admin, Director]
            }
            Operation::ViewSalary | Operation::ClockAttendance | Operation::ViewAttendance => {
                EVERYONE
            }
            Operation::ManageEmployees => &[Admin, Director],
            Operation::ViewEmployees => &[StoreKeeper, Manager, Receptionist, Admin, Director],
        }
    }

    pub fn permits(self, role: Role) -> bool {
        self.allowed_roles().contains(&role)
    }
}

/// Fail with `Forbidden` unless the actor's role is listed for `op`
pub fn authorize(actor: &CurrentUser, op: Operation) -> WorkflowResult<()> {
    if op.permits(actor.role) {
        return Ok(());
    }
    security_log!(
        "WARN",
        "permission_denied",
        user_id = actor.id,
        username = actor.username.clone(),
        user_role = actor.role.as_str(),
        operation = format!("{:?}", op)
    );
    Err(WorkflowError::forbidden(format!(
        "Role {} may not perform {:?}",
        actor.role, op
    )))
}

/// Whether the actor may see records belonging to other employees
///
/// Everyone else is narrowed to their own records by the read workflows.
pub fn sees_all_records(actor: &CurrentUser) -> bool {
    actor.role.is_elevated() || matches!(actor.role, StoreKeeper | Receptionist)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(role: Role) -> CurrentUser {
        CurrentUser {
            id: 1,
            username: "u".into(),
            role,
        }
    }

    #[test]
    fn test_review_is_manager_only() {
        assert!(authorize(&user(Manager), Operation::ReviewAssignment).is_ok());
        for role in [StoreKeeper, Packer, Admin, Director] {
            let err = authorize(&user(role), Operation::ReviewAssignment).unwrap_err();
            assert!(matches!(err, WorkflowError::Forbidden { .. }));
        }
    }

    #[test]
    fn test_every_operation_admits_someone() {
        use Operation::*;
        let all = [
            CreateIntake, CreateBatch, CreateAssignment, ViewIntake, ReviewAssignment,
            ResubmitAssignment, SubmitWorkLog, ReviewWorkLog, ViewWorkLogs, CreatePackingLog,
            ConfirmPackingLog, DisputePackingLog, ApprovePackingLog, RejectPackingLog,
            ResubmitPackingLog, ViewPackingLogs, ViewPendingApprovals, ViewSalary,
            ViewAllSalaries, UpdateSalaryRate, ViewInventory, AdjustInventory, DispatchDriver,
            AccountDriverSales, ViewDriverSales, ClockAttendance, ViewAttendance,
            ManageEmployees, ViewEmployees,
        ];
        for op in all {
            assert!(!op.allowed_roles().is_empty(), "{op:?}");
        }
    }

    #[test]
    fn test_attendance_open_to_all_roles() {
        for role in Role::ALL {
            assert!(Operation::ClockAttendance.permits(role));
        }
        assert!(!Operation::DispatchDriver.permits(Driver));
        assert!(Operation::CreateBatch.permits(Loader));
    }
}
