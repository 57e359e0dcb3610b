//! Intake: batches and packer assignments
//!
//! ```text
//! pending_review ──approve──▶ approved
//!        │
//!        └──reject──▶ rejected ──resubmit──▶ pending_review
//! ```
//!
//! Capacity: `remaining = bags_received − Σ bags_assigned` over the
//! batch's non-rejected assignments. Creation, resubmission and approval
//! check it inside the same statement that writes.

use shared::error::ErrorCode;
use shared::models::{
    Assignment, AssignmentCreate, AssignmentResubmit, AssignmentStatus, Batch, BatchCapacity,
    BatchCreate, Intake, IntakeCreate, ReviewAction, ReviewRequest, Role,
};
use sqlx::SqlitePool;

use super::review::{check_resubmit, check_review, expect_transition};
use super::{WorkflowError, WorkflowResult, require_staff};
use crate::auth::{CurrentUser, Operation, authorize};
use crate::db::repository::{assignment, batch};
use crate::utils::validation::{MAX_NOTE_LEN, validate_optional_text, validate_positive_bags};

async fn find_batch(pool: &SqlitePool, id: i64) -> WorkflowResult<BatchCapacity> {
    batch::find_with_capacity(pool, id)
        .await?
        .ok_or_else(|| WorkflowError::not_found(ErrorCode::BatchNotFound, format!("Batch {id} not found")))
}

async fn find_assignment(pool: &SqlitePool, id: i64) -> WorkflowResult<Assignment> {
    assignment::find_by_id(pool, id).await?.ok_or_else(|| {
        WorkflowError::not_found(ErrorCode::AssignmentNotFound, format!("Assignment {id} not found"))
    })
}

async fn capacity_exceeded(pool: &SqlitePool, batch_id: i64, requested: i64) -> WorkflowError {
    let remaining = match batch::find_with_capacity(pool, batch_id).await {
        Ok(Some(capacity)) => capacity.bags_remaining.to_string(),
        _ => "unknown".to_string(),
    };
    WorkflowError::validation_code(
        ErrorCode::BatchCapacityExceeded,
        format!("Batch {batch_id} has {remaining} bags remaining, {requested} requested"),
    )
}

/// Record a batch and its first assignment in one transaction
pub async fn create_intake(
    pool: &SqlitePool,
    actor: &CurrentUser,
    data: IntakeCreate,
) -> WorkflowResult<Intake> {
    authorize(actor, Operation::CreateIntake)?;
    validate_positive_bags(data.bags_submitted, "bags_submitted")?;
    validate_optional_text(&data.notes, "notes", MAX_NOTE_LEN)?;
    require_staff(pool, data.loader_id, &[Role::Loader], "loader_id").await?;
    require_staff(pool, data.packer_id, &[Role::Packer], "packer_id").await?;

    let (batch, assignment) = batch::create_with_assignment(
        pool,
        data.loader_id,
        data.packer_id,
        actor.id,
        data.bags_submitted,
        data.notes.as_deref(),
    )
    .await?;

    tracing::info!(
        batch_id = batch.id,
        batch_number = %batch.batch_number,
        assignment_id = assignment.id,
        bags = data.bags_submitted,
        storekeeper_id = actor.id,
        "Intake recorded"
    );
    Ok(Intake { batch, assignment })
}

/// Record a received batch without assigning it yet
///
/// A loader may only record batches they delivered.
pub async fn create_batch(
    pool: &SqlitePool,
    actor: &CurrentUser,
    data: BatchCreate,
) -> WorkflowResult<Batch> {
    authorize(actor, Operation::CreateBatch)?;
    if actor.role == Role::Loader && data.loader_id != actor.id {
        return Err(WorkflowError::forbidden(
            "Loaders may only record their own batches",
        ));
    }
    validate_positive_bags(data.bags_received, "bags_received")?;
    validate_optional_text(&data.notes, "notes", MAX_NOTE_LEN)?;
    require_staff(pool, data.loader_id, &[Role::Loader], "loader_id").await?;

    let batch = batch::create(pool, data.loader_id, data.bags_received, data.notes.as_deref()).await?;
    tracing::info!(
        batch_id = batch.id,
        batch_number = %batch.batch_number,
        bags = batch.bags_received,
        "Batch received"
    );
    Ok(batch)
}

pub async fn list_batches(pool: &SqlitePool, actor: &CurrentUser) -> WorkflowResult<Vec<BatchCapacity>> {
    authorize(actor, Operation::ViewIntake)?;
    Ok(batch::find_all_with_capacity(pool).await?)
}

pub async fn get_batch(pool: &SqlitePool, actor: &CurrentUser, id: i64) -> WorkflowResult<BatchCapacity> {
    authorize(actor, Operation::ViewIntake)?;
    find_batch(pool, id).await
}

/// Assign part of a batch's remaining bags to a packer
pub async fn create_assignment(
    pool: &SqlitePool,
    actor: &CurrentUser,
    batch_id: i64,
    data: AssignmentCreate,
) -> WorkflowResult<Assignment> {
    authorize(actor, Operation::CreateAssignment)?;
    validate_positive_bags(data.bags_assigned, "bags_assigned")?;
    validate_optional_text(&data.notes, "notes", MAX_NOTE_LEN)?;
    find_batch(pool, batch_id).await?;
    require_staff(pool, data.packer_id, &[Role::Packer], "packer_id").await?;

    let created = assignment::create_within_capacity(
        pool,
        batch_id,
        data.packer_id,
        actor.id,
        data.bags_assigned,
        data.notes.as_deref(),
    )
    .await?;

    match created {
        Some(assignment) => {
            tracing::info!(
                assignment_id = assignment.id,
                batch_id,
                packer_id = assignment.packer_id,
                bags = assignment.bags_assigned,
                "Assignment submitted"
            );
            Ok(assignment)
        }
        None => Err(capacity_exceeded(pool, batch_id, data.bags_assigned).await),
    }
}

/// Approve an assignment read as pending. When no row changes, the
/// assignment either no longer fits its batch (still pending) or was
/// reviewed by someone else in the meantime.
async fn apply_approval(
    pool: &SqlitePool,
    current: &Assignment,
    reviewer_id: i64,
    comment: Option<&str>,
) -> WorkflowResult<()> {
    let rows = assignment::approve(pool, current.id, reviewer_id, comment).await?;
    if rows > 0 {
        return Ok(());
    }
    let latest = find_assignment(pool, current.id).await?;
    if latest.status == AssignmentStatus::PendingReview {
        return Err(capacity_exceeded(pool, latest.batch_id, latest.bags_assigned).await);
    }
    expect_transition(&latest, 0)
}

/// Manager approves or rejects a pending assignment
pub async fn review_assignment(
    pool: &SqlitePool,
    actor: &CurrentUser,
    id: i64,
    request: ReviewRequest,
) -> WorkflowResult<Assignment> {
    authorize(actor, Operation::ReviewAssignment)?;
    validate_optional_text(&request.comment, "comment", MAX_NOTE_LEN)?;
    let current = find_assignment(pool, id).await?;
    let comment = check_review(&current, request.action, request.comment.as_deref())?;

    match request.action {
        ReviewAction::Approve => apply_approval(pool, &current, actor.id, comment.as_deref()).await?,
        ReviewAction::Reject => {
            let rows = assignment::reject(pool, id, actor.id, comment.as_deref()).await?;
            expect_transition(&current, rows)?;
        }
    }

    let reviewed = find_assignment(pool, id).await?;
    tracing::info!(
        assignment_id = id,
        status = reviewed.status.as_str(),
        reviewer_id = actor.id,
        "Assignment reviewed"
    );
    Ok(reviewed)
}

/// Correct a rejected assignment and send it back for review
pub async fn resubmit_assignment(
    pool: &SqlitePool,
    actor: &CurrentUser,
    id: i64,
    data: AssignmentResubmit,
) -> WorkflowResult<Assignment> {
    authorize(actor, Operation::ResubmitAssignment)?;
    validate_positive_bags(data.bags_assigned, "bags_assigned")?;
    validate_optional_text(&data.notes, "notes", MAX_NOTE_LEN)?;
    let current = find_assignment(pool, id).await?;
    check_resubmit(&current, actor)?;

    let rows =
        assignment::resubmit_within_capacity(pool, id, data.bags_assigned, data.notes.as_deref())
            .await?;
    if rows == 0 {
        let latest = find_assignment(pool, id).await?;
        if latest.status == AssignmentStatus::Rejected {
            return Err(capacity_exceeded(pool, latest.batch_id, data.bags_assigned).await);
        }
        expect_transition(&latest, 0)?;
    }

    let resubmitted = find_assignment(pool, id).await?;
    tracing::info!(
        assignment_id = id,
        bags = resubmitted.bags_assigned,
        actor_id = actor.id,
        "Assignment resubmitted"
    );
    Ok(resubmitted)
}

/// Assignments by status; packers only see their own
pub async fn list_assignments(
    pool: &SqlitePool,
    actor: &CurrentUser,
    status: Option<AssignmentStatus>,
) -> WorkflowResult<Vec<Assignment>> {
    authorize(actor, Operation::ViewIntake)?;
    let mut assignments = assignment::find_by_status(pool, status).await?;
    if actor.role == Role::Packer {
        assignments.retain(|a| a.packer_id == actor.id);
    }
    Ok(assignments)
}

pub async fn list_batch_assignments(
    pool: &SqlitePool,
    actor: &CurrentUser,
    batch_id: i64,
) -> WorkflowResult<Vec<Assignment>> {
    authorize(actor, Operation::ViewIntake)?;
    find_batch(pool, batch_id).await?;
    let mut assignments = assignment::find_by_batch(pool, batch_id).await?;
    if actor.role == Role::Packer {
        assignments.retain(|a| a.packer_id == actor.id);
    }
    Ok(assignments)
}

pub async fn get_assignment(
    pool: &SqlitePool,
    actor: &CurrentUser,
    id: i64,
) -> WorkflowResult<Assignment> {
    authorize(actor, Operation::ViewIntake)?;
    let found = find_assignment(pool, id).await?;
    if actor.role == Role::Packer && found.packer_id != actor.id {
        return Err(WorkflowError::forbidden_code(
            ErrorCode::NotNamedPacker,
            format!("Assignment {id} belongs to another packer"),
        ));
    }
    Ok(found)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflow::test_support::{staff, test_pool};

    struct Crew {
        loader: CurrentUser,
        packer: CurrentUser,
        keeper: CurrentUser,
        manager: CurrentUser,
    }

    async fn crew(pool: &SqlitePool) -> Crew {
        Crew {
            loader: staff(pool, "loader", Role::Loader).await,
            packer: staff(pool, "packer", Role::Packer).await,
            keeper: staff(pool, "keeper", Role::StoreKeeper).await,
            manager: staff(pool, "manager", Role::Manager).await,
        }
    }

    fn intake(c: &Crew, bags: i64) -> IntakeCreate {
        IntakeCreate {
            loader_id: c.loader.id,
            packer_id: c.packer.id,
            bags_submitted: bags,
            notes: None,
        }
    }

    fn review(action: ReviewAction, comment: Option<&str>) -> ReviewRequest {
        ReviewRequest {
            action,
            comment: comment.map(str::to_string),
        }
    }

    #[tokio::test]
    async fn test_reject_resubmit_approve() {
        let pool = test_pool().await;
        let c = crew(&pool).await;

        let created = create_intake(&pool, &c.keeper, intake(&c, 100)).await.unwrap();
        assert_eq!(created.batch.bags_received, 100);
        assert_eq!(created.assignment.status, AssignmentStatus::PendingReview);
        let id = created.assignment.id;

        let rejected = review_assignment(&pool, &c.manager, id, review(ReviewAction::Reject, Some("recount")))
            .await
            .unwrap();
        assert_eq!(rejected.status, AssignmentStatus::Rejected);
        assert_eq!(rejected.rejection_comment.as_deref(), Some("recount"));

        let resubmitted = resubmit_assignment(
            &pool,
            &c.keeper,
            id,
            AssignmentResubmit {
                bags_assigned: 90,
                notes: Some("recounted".into()),
            },
        )
        .await
        .unwrap();
        assert_eq!(resubmitted.status, AssignmentStatus::PendingReview);
        assert_eq!(resubmitted.bags_assigned, 90);
        assert_eq!(resubmitted.rejection_comment, None);

        let approved = review_assignment(&pool, &c.manager, id, review(ReviewAction::Approve, None))
            .await
            .unwrap();
        assert_eq!(approved.status, AssignmentStatus::Approved);
        assert_eq!(approved.reviewed_by, Some(c.manager.id));
    }

    #[tokio::test]
    async fn test_reject_without_comment_leaves_record_unchanged() {
        let pool = test_pool().await;
        let c = crew(&pool).await;
        let created = create_intake(&pool, &c.keeper, intake(&c, 40)).await.unwrap();

        let err = review_assignment(&pool, &c.manager, created.assignment.id, review(ReviewAction::Reject, None))
            .await
            .unwrap_err();
        assert_eq!(err.code(), ErrorCode::RejectionCommentRequired);

        let unchanged = get_assignment(&pool, &c.manager, created.assignment.id).await.unwrap();
        assert_eq!(unchanged, created.assignment);
    }

    #[tokio::test]
    async fn test_review_of_approved_assignment_is_invalid_state() {
        let pool = test_pool().await;
        let c = crew(&pool).await;
        let created = create_intake(&pool, &c.keeper, intake(&c, 40)).await.unwrap();
        let id = created.assignment.id;
        review_assignment(&pool, &c.manager, id, review(ReviewAction::Approve, None)).await.unwrap();
        let before = get_assignment(&pool, &c.manager, id).await.unwrap();

        let err = review_assignment(&pool, &c.manager, id, review(ReviewAction::Reject, Some("late")))
            .await
            .unwrap_err();
        assert!(matches!(err, WorkflowError::InvalidState(_)));
        assert_eq!(get_assignment(&pool, &c.manager, id).await.unwrap(), before);

        let err = resubmit_assignment(
            &pool,
            &c.keeper,
            id,
            AssignmentResubmit {
                bags_assigned: 10,
                notes: None,
            },
        )
        .await
        .unwrap_err();
        assert!(matches!(err, WorkflowError::InvalidState(_)));
    }

    #[tokio::test]
    async fn test_approval_after_concurrent_rejection_is_conflict() {
        let pool = test_pool().await;
        let c = crew(&pool).await;
        let created = create_intake(&pool, &c.keeper, intake(&c, 40)).await.unwrap();
        let stale = created.assignment;

        // Another manager rejects between our read and our update
        let rows = assignment::reject(&pool, stale.id, c.manager.id, Some("recount")).await.unwrap();
        assert_eq!(rows, 1);

        let err = apply_approval(&pool, &stale, c.manager.id, None).await.unwrap_err();
        assert!(matches!(err, WorkflowError::Conflict(_)));
        let latest = get_assignment(&pool, &c.manager, stale.id).await.unwrap();
        assert_eq!(latest.status, AssignmentStatus::Rejected);
    }

    #[tokio::test]
    async fn test_only_manager_reviews() {
        let pool = test_pool().await;
        let c = crew(&pool).await;
        let created = create_intake(&pool, &c.keeper, intake(&c, 40)).await.unwrap();

        let err = review_assignment(&pool, &c.keeper, created.assignment.id, review(ReviewAction::Approve, None))
            .await
            .unwrap_err();
        assert!(matches!(err, WorkflowError::Forbidden { .. }));
    }

    #[tokio::test]
    async fn test_capacity_is_enforced() {
        let pool = test_pool().await;
        let c = crew(&pool).await;
        let batch = create_batch(
            &pool,
            &c.loader,
            BatchCreate {
                loader_id: c.loader.id,
                bags_received: 100,
                notes: None,
            },
        )
        .await
        .unwrap();

        let assign = |bags| AssignmentCreate {
            packer_id: c.packer.id,
            bags_assigned: bags,
            notes: None,
        };
        create_assignment(&pool, &c.keeper, batch.id, assign(60)).await.unwrap();
        let second = create_assignment(&pool, &c.keeper, batch.id, assign(40)).await.unwrap();

        let err = create_assignment(&pool, &c.keeper, batch.id, assign(1)).await.unwrap_err();
        assert_eq!(err.code(), ErrorCode::BatchCapacityExceeded);

        // Rejection frees the bags again
        review_assignment(&pool, &c.manager, second.id, review(ReviewAction::Reject, Some("split")))
            .await
            .unwrap();
        let capacity = get_batch(&pool, &c.keeper, batch.id).await.unwrap();
        assert_eq!(capacity.bags_remaining, 40);

        // Resubmitting beyond what is left fails and keeps the rejection
        let err = resubmit_assignment(
            &pool,
            &c.keeper,
            second.id,
            AssignmentResubmit {
                bags_assigned: 41,
                notes: None,
            },
        )
        .await
        .unwrap_err();
        assert_eq!(err.code(), ErrorCode::BatchCapacityExceeded);
        let still = get_assignment(&pool, &c.keeper, second.id).await.unwrap();
        assert_eq!(still.status, AssignmentStatus::Rejected);
    }

    #[tokio::test]
    async fn test_intake_validates_people_and_bags() {
        let pool = test_pool().await;
        let c = crew(&pool).await;

        let err = create_intake(&pool, &c.keeper, intake(&c, 0)).await.unwrap_err();
        assert_eq!(err.code(), ErrorCode::InvalidBagCount);

        let mut wrong = intake(&c, 10);
        wrong.packer_id = c.loader.id;
        let err = create_intake(&pool, &c.keeper, wrong).await.unwrap_err();
        assert_eq!(err.code(), ErrorCode::EmployeeRoleMismatch);

        let mut missing = intake(&c, 10);
        missing.loader_id = 9_999;
        let err = create_intake(&pool, &c.keeper, missing).await.unwrap_err();
        assert!(matches!(err, WorkflowError::Validation { .. }));

        assert!(batch::find_all(&pool).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_loader_records_only_own_batches() {
        let pool = test_pool().await;
        let c = crew(&pool).await;
        let other = staff(&pool, "other-loader", Role::Loader).await;

        let err = create_batch(
            &pool,
            &c.loader,
            BatchCreate {
                loader_id: other.id,
                bags_received: 10,
                notes: None,
            },
        )
        .await
        .unwrap_err();
        assert!(matches!(err, WorkflowError::Forbidden { .. }));
    }

    #[tokio::test]
    async fn test_packer_sees_only_own_assignments() {
        let pool = test_pool().await;
        let c = crew(&pool).await;
        let other = staff(&pool, "packer-2", Role::Packer).await;
        create_intake(&pool, &c.keeper, intake(&c, 10)).await.unwrap();
        let mut theirs = intake(&c, 10);
        theirs.packer_id = other.id;
        let foreign = create_intake(&pool, &c.keeper, theirs).await.unwrap();

        assert_eq!(list_assignments(&pool, &c.packer, None).await.unwrap().len(), 1);
        assert_eq!(list_assignments(&pool, &c.manager, None).await.unwrap().len(), 2);
        let err = get_assignment(&pool, &c.packer, foreign.assignment.id).await.unwrap_err();
        assert_eq!(err.code(), ErrorCode::NotNamedPacker);
    }
}
