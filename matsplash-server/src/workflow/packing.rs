//! Packing logs
//!
//! ```text
//! pending ──confirm──▶ confirmed ──┐
//!    │                             ├──approve──▶ approved
//!    └──dispute──▶ disputed ───────┤
//!                                  └──reject───▶ rejected ──resubmit──▶ pending
//! ```
//!
//! The storekeeper records, the named packer confirms or disputes, a
//! manager settles. Only approved logs count towards pay and stock.

use shared::error::ErrorCode;
use shared::models::{
    Assignment, PackingLog, PackingLogApprove, PackingLogConfirm, PackingLogCreate, PackingLogDispute,
    PackingLogReject, PackingLogResubmit, PackingLogStatus, ReviewAction, Role,
};
use sqlx::SqlitePool;

use super::review::{check_resubmit, check_review, expect_transition};
use super::{WorkflowError, WorkflowResult, require_staff};
use crate::auth::{CurrentUser, Operation, authorize};
use crate::db::repository::packing_log::{self, NewPackingLog};
use crate::db::repository::assignment;
use crate::utils::validation::{
    MAX_NOTE_LEN, validate_bag_count, validate_date, validate_optional_text,
    validate_required_text,
};

async fn find_log(pool: &SqlitePool, id: i64) -> WorkflowResult<PackingLog> {
    packing_log::find_by_id(pool, id).await?.ok_or_else(|| {
        WorkflowError::not_found(ErrorCode::PackingLogNotFound, format!("Packing log {id} not found"))
    })
}

/// Packer actions are reserved for the packer named on the log
fn require_named_packer(log: &PackingLog, actor: &CurrentUser) -> WorkflowResult<()> {
    if log.packer_id != actor.id {
        return Err(WorkflowError::forbidden_code(
            ErrorCode::NotNamedPacker,
            format!("Packing log {} belongs to another packer", log.id),
        ));
    }
    Ok(())
}

fn require_pending(log: &PackingLog, verb: &str) -> WorkflowResult<()> {
    if log.status != PackingLogStatus::Pending {
        return Err(WorkflowError::invalid_state(format!(
            "Packing log {} is {} and cannot be {verb}",
            log.id,
            log.status.as_str()
        )));
    }
    Ok(())
}

fn ensure_within_assigned(linked: &Assignment, bags: i64, field: &str) -> WorkflowResult<()> {
    if bags > linked.bags_assigned {
        return Err(WorkflowError::validation_code(
            ErrorCode::BagsExceedAssigned,
            format!(
                "{field} ({bags}) exceeds bags assigned ({}) on assignment {}",
                linked.bags_assigned, linked.id
            ),
        ));
    }
    Ok(())
}

/// Counts on a log linked to an assignment stay within what was assigned
async fn check_linked_count(
    pool: &SqlitePool,
    log: &PackingLog,
    bags: i64,
    field: &str,
) -> WorkflowResult<()> {
    let Some(assignment_id) = log.assignment_id else {
        return Ok(());
    };
    match assignment::find_by_id(pool, assignment_id).await? {
        Some(linked) => ensure_within_assigned(&linked, bags, field),
        None => Ok(()),
    }
}

pub async fn create_packing_log(
    pool: &SqlitePool,
    actor: &CurrentUser,
    data: PackingLogCreate,
) -> WorkflowResult<PackingLog> {
    authorize(actor, Operation::CreatePackingLog)?;
    validate_bag_count(data.bags_packed, "bags_packed")?;
    validate_date(&data.packing_date, "packing_date")?;
    validate_optional_text(&data.storekeeper_notes, "storekeeper_notes", MAX_NOTE_LEN)?;
    require_staff(pool, data.packer_id, &[Role::Packer], "packer_id").await?;

    if let Some(assignment_id) = data.assignment_id {
        let linked = assignment::find_by_id(pool, assignment_id).await?.ok_or_else(|| {
            WorkflowError::validation_code(
                ErrorCode::AssignmentNotFound,
                format!("assignment_id: assignment {assignment_id} does not exist"),
            )
        })?;
        if linked.packer_id != data.packer_id {
            return Err(WorkflowError::validation(format!(
                "assignment_id: assignment {assignment_id} belongs to another packer"
            )));
        }
        ensure_within_assigned(&linked, data.bags_packed, "bags_packed")?;
    }

    let log = packing_log::create(
        pool,
        NewPackingLog {
            packer_id: data.packer_id,
            storekeeper_id: actor.id,
            assignment_id: data.assignment_id,
            bags_packed: data.bags_packed,
            packing_date: &data.packing_date,
            storekeeper_notes: data.storekeeper_notes.as_deref(),
        },
    )
    .await?;
    tracing::info!(
        packing_log_id = log.id,
        packer_id = log.packer_id,
        bags = log.bags_packed,
        packing_date = %log.packing_date,
        "Packing log recorded"
    );
    Ok(log)
}

pub async fn confirm_packing_log(
    pool: &SqlitePool,
    actor: &CurrentUser,
    id: i64,
    data: PackingLogConfirm,
) -> WorkflowResult<PackingLog> {
    authorize(actor, Operation::ConfirmPackingLog)?;
    validate_optional_text(&data.packer_notes, "packer_notes", MAX_NOTE_LEN)?;
    let current = find_log(pool, id).await?;
    require_named_packer(&current, actor)?;
    require_pending(&current, "confirmed")?;

    let rows = packing_log::confirm(pool, id, data.packer_notes.as_deref()).await?;
    expect_transition(&current, rows)?;
    tracing::info!(packing_log_id = id, packer_id = actor.id, "Packing log confirmed");
    find_log(pool, id).await
}

pub async fn dispute_packing_log(
    pool: &SqlitePool,
    actor: &CurrentUser,
    id: i64,
    data: PackingLogDispute,
) -> WorkflowResult<PackingLog> {
    authorize(actor, Operation::DisputePackingLog)?;
    if data.dispute_reason.trim().is_empty() {
        return Err(WorkflowError::validation_code(
            ErrorCode::DisputeReasonRequired,
            format!("A dispute reason is required to dispute packing log {id}"),
        ));
    }
    validate_required_text(&data.dispute_reason, "dispute_reason", MAX_NOTE_LEN)?;
    validate_bag_count(data.disputed_bags, "disputed_bags")?;
    validate_optional_text(&data.packer_notes, "packer_notes", MAX_NOTE_LEN)?;
    let current = find_log(pool, id).await?;
    require_named_packer(&current, actor)?;
    require_pending(&current, "disputed")?;

    let rows = packing_log::dispute(
        pool,
        id,
        data.disputed_bags,
        data.dispute_reason.trim(),
        data.packer_notes.as_deref(),
    )
    .await?;
    expect_transition(&current, rows)?;
    tracing::info!(
        packing_log_id = id,
        recorded = current.bags_packed,
        claimed = data.disputed_bags,
        "Packing log disputed"
    );
    find_log(pool, id).await
}

/// `final_bags`, when given, replaces the recorded count
pub async fn approve_packing_log(
    pool: &SqlitePool,
    actor: &CurrentUser,
    id: i64,
    data: PackingLogApprove,
) -> WorkflowResult<PackingLog> {
    authorize(actor, Operation::ApprovePackingLog)?;
    validate_optional_text(&data.manager_notes, "manager_notes", MAX_NOTE_LEN)?;
    if let Some(final_bags) = data.final_bags {
        validate_bag_count(final_bags, "final_bags")?;
    }
    let current = find_log(pool, id).await?;
    check_review(&current, ReviewAction::Approve, None)?;
    if let Some(final_bags) = data.final_bags {
        check_linked_count(pool, &current, final_bags, "final_bags").await?;
    }

    let rows = packing_log::approve(
        pool,
        id,
        current.status,
        actor.id,
        data.manager_notes.as_deref(),
        data.final_bags,
    )
    .await?;
    expect_transition(&current, rows)?;

    let approved = find_log(pool, id).await?;
    tracing::info!(
        packing_log_id = id,
        from = current.status.as_str(),
        bags = approved.bags_packed,
        manager_id = actor.id,
        "Packing log approved"
    );
    Ok(approved)
}

/// A modification comment is mandatory
pub async fn reject_packing_log(
    pool: &SqlitePool,
    actor: &CurrentUser,
    id: i64,
    data: PackingLogReject,
) -> WorkflowResult<PackingLog> {
    authorize(actor, Operation::RejectPackingLog)?;
    validate_optional_text(&data.modification_comment, "modification_comment", MAX_NOTE_LEN)?;
    let current = find_log(pool, id).await?;
    let comment = check_review(
        &current,
        ReviewAction::Reject,
        data.modification_comment.as_deref(),
    )?
    .unwrap_or_default();

    let rows = packing_log::reject(pool, id, current.status, actor.id, &comment).await?;
    expect_transition(&current, rows)?;
    tracing::info!(packing_log_id = id, manager_id = actor.id, "Packing log rejected");
    find_log(pool, id).await
}

/// Correct a rejected log; the packer confirms or disputes it again
pub async fn resubmit_packing_log(
    pool: &SqlitePool,
    actor: &CurrentUser,
    id: i64,
    data: PackingLogResubmit,
) -> WorkflowResult<PackingLog> {
    authorize(actor, Operation::ResubmitPackingLog)?;
    validate_bag_count(data.bags_packed, "bags_packed")?;
    validate_optional_text(&data.storekeeper_notes, "storekeeper_notes", MAX_NOTE_LEN)?;
    let current = find_log(pool, id).await?;
    check_resubmit(&current, actor)?;
    check_linked_count(pool, &current, data.bags_packed, "bags_packed").await?;

    let rows =
        packing_log::resubmit(pool, id, data.bags_packed, data.storekeeper_notes.as_deref()).await?;
    expect_transition(&current, rows)?;
    tracing::info!(packing_log_id = id, bags = data.bags_packed, actor_id = actor.id, "Packing log resubmitted");
    find_log(pool, id).await
}

/// A packer's logs, newest packing date first
pub async fn list_packing_logs(
    pool: &SqlitePool,
    actor: &CurrentUser,
    packer_id: i64,
) -> WorkflowResult<Vec<PackingLog>> {
    authorize(actor, Operation::ViewPackingLogs)?;
    if actor.role == Role::Packer && actor.id != packer_id {
        return Err(WorkflowError::forbidden_code(
            ErrorCode::NotNamedPacker,
            "Packers may only view their own packing logs",
        ));
    }
    Ok(packing_log::find_by_packer(pool, packer_id).await?)
}

/// Confirmed and disputed logs awaiting a manager, newest first
pub async fn list_pending_approvals(
    pool: &SqlitePool,
    actor: &CurrentUser,
) -> WorkflowResult<Vec<PackingLog>> {
    authorize(actor, Operation::ViewPendingApprovals)?;
    Ok(packing_log::find_pending_approvals(pool).await?)
}
