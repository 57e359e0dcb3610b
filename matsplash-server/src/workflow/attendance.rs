//! Clock-in / clock-out
//!
//! At most one open record per employee; the partial unique index on
//! `attendance(employee_id) WHERE status = 'open'` backs the check.

use shared::error::ErrorCode;
use shared::models::{Attendance, AttendanceQuery, ClockRequest};
use sqlx::SqlitePool;

use super::{WorkflowError, WorkflowResult};
use crate::auth::policy::sees_all_records;
use crate::auth::{CurrentUser, Operation, authorize};
use crate::db::repository::{RepoError, attendance};
use crate::utils::validation::{MAX_NOTE_LEN, validate_optional_text};

const MILLIS_PER_MINUTE: i64 = 60_000;

fn already_clocked_in(employee_id: i64) -> WorkflowError {
    WorkflowError::duplicate(
        ErrorCode::AlreadyClockedIn,
        format!("Employee {employee_id} is already clocked in"),
    )
}

pub async fn clock_in(
    pool: &SqlitePool,
    actor: &CurrentUser,
    data: ClockRequest,
) -> WorkflowResult<Attendance> {
    authorize(actor, Operation::ClockAttendance)?;
    validate_optional_text(&data.note, "note", MAX_NOTE_LEN)?;
    if attendance::find_open(pool, actor.id).await?.is_some() {
        return Err(already_clocked_in(actor.id));
    }

    let now = shared::util::now_millis();
    let record = attendance::clock_in(pool, actor.id, now, data.note.as_deref())
        .await
        .map_err(|e| match e {
            // Lost a race against a concurrent clock-in
            RepoError::Duplicate(_) => already_clocked_in(actor.id),
            other => other.into(),
        })?;
    tracing::info!(attendance_id = record.id, employee_id = actor.id, "Clocked in");
    Ok(record)
}

pub async fn clock_out(
    pool: &SqlitePool,
    actor: &CurrentUser,
    data: ClockRequest,
) -> WorkflowResult<Attendance> {
    authorize(actor, Operation::ClockAttendance)?;
    validate_optional_text(&data.note, "note", MAX_NOTE_LEN)?;
    let open = attendance::find_open(pool, actor.id).await?.ok_or_else(|| {
        WorkflowError::duplicate(
            ErrorCode::NotClockedIn,
            format!("Employee {} is not clocked in", actor.id),
        )
    })?;

    let now = shared::util::now_millis().max(open.clock_in_at);
    let worked_minutes = (now - open.clock_in_at) / MILLIS_PER_MINUTE;
    let rows = attendance::clock_out(pool, open.id, now, worked_minutes, data.note.as_deref()).await?;
    if rows == 0 {
        return Err(WorkflowError::conflict(format!(
            "Attendance {} was closed concurrently",
            open.id
        )));
    }

    let record = attendance::find_by_id(pool, open.id).await?.ok_or_else(|| {
        WorkflowError::not_found(
            ErrorCode::AttendanceNotFound,
            format!("Attendance {} not found", open.id),
        )
    })?;
    tracing::info!(
        attendance_id = record.id,
        employee_id = actor.id,
        worked_minutes,
        "Clocked out"
    );
    Ok(record)
}

/// Staff without an overview role only see their own records
pub async fn list_attendance(
    pool: &SqlitePool,
    actor: &CurrentUser,
    query: AttendanceQuery,
) -> WorkflowResult<Vec<Attendance>> {
    authorize(actor, Operation::ViewAttendance)?;
    let employee_id = match query.employee_id {
        _ if sees_all_records(actor) => query.employee_id,
        Some(id) if id != actor.id => {
            return Err(WorkflowError::forbidden(
                "Only management may view another employee's attendance",
            ));
        }
        _ => Some(actor.id),
    };
    if let (Some(from), Some(to)) = (query.from, query.to) {
        if from >= to {
            return Err(WorkflowError::validation("from must be before to"));
        }
    }

    Ok(attendance::find_all(pool, employee_id, query.from, query.to).await?)
}
