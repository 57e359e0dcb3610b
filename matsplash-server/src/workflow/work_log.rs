//! Work logs: a packer reports bags packed against an approved assignment,
//! a manager approves or rejects the report

use shared::error::ErrorCode;
use shared::models::{
    AssignmentStatus, ReviewAction, ReviewRequest, Role, WorkLog, WorkLogCreate, WorkLogQuery,
    WorkLogStatus,
};
use sqlx::SqlitePool;

use super::review::{check_review, expect_transition};
use super::{WorkflowError, WorkflowResult};
use crate::auth::{CurrentUser, Operation, authorize};
use crate::db::repository::{assignment, work_log};
use crate::utils::validation::{MAX_NOTE_LEN, validate_bag_count, validate_optional_text};

async fn find_work_log(pool: &SqlitePool, id: i64) -> WorkflowResult<WorkLog> {
    work_log::find_by_id(pool, id).await?.ok_or_else(|| {
        WorkflowError::not_found(ErrorCode::WorkLogNotFound, format!("Work log {id} not found"))
    })
}

pub async fn submit_work_log(
    pool: &SqlitePool,
    actor: &CurrentUser,
    data: WorkLogCreate,
) -> WorkflowResult<WorkLog> {
    authorize(actor, Operation::SubmitWorkLog)?;
    validate_bag_count(data.bags_packed, "bags_packed")?;

    let assigned = assignment::find_by_id(pool, data.assignment_id)
        .await?
        .ok_or_else(|| {
            WorkflowError::not_found(
                ErrorCode::AssignmentNotFound,
                format!("Assignment {} not found", data.assignment_id),
            )
        })?;
    if assigned.packer_id != actor.id {
        return Err(WorkflowError::forbidden_code(
            ErrorCode::NotNamedPacker,
            format!("Assignment {} belongs to another packer", assigned.id),
        ));
    }
    if assigned.status != AssignmentStatus::Approved {
        return Err(WorkflowError::invalid_state(format!(
            "Assignment {} is {}; work can only be logged against approved assignments",
            assigned.id,
            assigned.status.as_str()
        )));
    }
    if data.bags_packed > assigned.bags_assigned {
        return Err(WorkflowError::validation_code(
            ErrorCode::BagsExceedAssigned,
            format!(
                "bags_packed ({}) exceeds bags assigned ({})",
                data.bags_packed, assigned.bags_assigned
            ),
        ));
    }

    let log = work_log::create(
        pool,
        assigned.id,
        actor.id,
        assigned.bags_assigned,
        data.bags_packed,
    )
    .await?;
    tracing::info!(
        work_log_id = log.id,
        assignment_id = assigned.id,
        packer_id = actor.id,
        bags_packed = log.bags_packed,
        "Work log submitted"
    );
    Ok(log)
}

/// Reject comments are optional here and stored as the modification comment
pub async fn review_work_log(
    pool: &SqlitePool,
    actor: &CurrentUser,
    id: i64,
    request: ReviewRequest,
) -> WorkflowResult<WorkLog> {
    authorize(actor, Operation::ReviewWorkLog)?;
    validate_optional_text(&request.comment, "comment", MAX_NOTE_LEN)?;
    let current = find_work_log(pool, id).await?;
    let comment = check_review(&current, request.action, request.comment.as_deref())?;

    let to = match request.action {
        ReviewAction::Approve => WorkLogStatus::Approved,
        ReviewAction::Reject => WorkLogStatus::Rejected,
    };
    let rows = work_log::review(pool, id, to, actor.id, comment.as_deref()).await?;
    expect_transition(&current, rows)?;

    tracing::info!(work_log_id = id, status = to.as_str(), reviewer_id = actor.id, "Work log reviewed");
    find_work_log(pool, id).await
}

/// Packers are always narrowed to their own logs
pub async fn list_work_logs(
    pool: &SqlitePool,
    actor: &CurrentUser,
    query: WorkLogQuery,
) -> WorkflowResult<Vec<WorkLog>> {
    authorize(actor, Operation::ViewWorkLogs)?;
    let packer_id = if actor.role == Role::Packer {
        Some(actor.id)
    } else {
        query.packer_id
    };
    Ok(work_log::find_all(pool, query.status, packer_id).await?)
}
