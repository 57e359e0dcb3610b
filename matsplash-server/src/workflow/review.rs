//! Reviewable submissions
//!
//! Assignments, work logs and packing logs share one lifecycle: a
//! submission awaits review, a manager approves or rejects it, and a
//! rejected submission may be corrected and resubmitted. The transition
//! checks live here once; each kind supplies a [`ReviewPolicy`].

use shared::error::ErrorCode;
use shared::models::{
    Assignment, AssignmentStatus, PackingLog, PackingLogStatus, ReviewAction, WorkLog,
    WorkLogStatus,
};

use crate::auth::CurrentUser;
use crate::workflow::{WorkflowError, WorkflowResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommentRule {
    Required,
    Optional,
}

/// Per-kind review rules
#[derive(Debug, Clone, Copy)]
pub struct ReviewPolicy {
    /// Name used in messages, e.g. `"Assignment"`
    pub kind: &'static str,
    pub reject_comment: CommentRule,
    pub resubmittable: bool,
}

pub trait Reviewable {
    const POLICY: ReviewPolicy;

    fn id(&self) -> i64;
    fn status_name(&self) -> &'static str;
    fn awaits_review(&self) -> bool;
    fn is_rejected(&self) -> bool;
    /// Employee who created the submission
    fn submitted_by(&self) -> i64;
}

impl Reviewable for Assignment {
    const POLICY: ReviewPolicy = ReviewPolicy {
        kind: "Assignment",
        reject_comment: CommentRule::Required,
        resubmittable: true,
    };

    fn id(&self) -> i64 {
        self.id
    }
    fn status_name(&self) -> &'static str {
        self.status.as_str()
    }
    fn awaits_review(&self) -> bool {
        self.status == AssignmentStatus::PendingReview
    }
    fn is_rejected(&self) -> bool {
        self.status == AssignmentStatus::Rejected
    }
    fn submitted_by(&self) -> i64 {
        self.storekeeper_id
    }
}

impl Reviewable for WorkLog {
    const POLICY: ReviewPolicy = ReviewPolicy {
        kind: "Work log",
        reject_comment: CommentRule::Optional,
        resubmittable: false,
    };

    fn id(&self) -> i64 {
        self.id
    }
    fn status_name(&self) -> &'static str {
        self.status.as_str()
    }
    fn awaits_review(&self) -> bool {
        self.status == WorkLogStatus::Pending
    }
    fn is_rejected(&self) -> bool {
        self.status == WorkLogStatus::Rejected
    }
    fn submitted_by(&self) -> i64 {
        self.packer_id
    }
}

impl Reviewable for PackingLog {
    const POLICY: ReviewPolicy = ReviewPolicy {
        kind: "Packing log",
        reject_comment: CommentRule::Required,
        resubmittable: true,
    };

    fn id(&self) -> i64 {
        self.id
    }
    fn status_name(&self) -> &'static str {
        self.status.as_str()
    }
    fn awaits_review(&self) -> bool {
        self.status.awaits_manager()
    }
    fn is_rejected(&self) -> bool {
        self.status == PackingLogStatus::Rejected
    }
    fn submitted_by(&self) -> i64 {
        self.storekeeper_id
    }
}

/// Trimmed comment, `None` when blank
pub fn normalize_comment(comment: Option<&str>) -> Option<String> {
    comment
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .map(str::to_string)
}

/// Validate a review decision against the record's state and policy
///
/// Returns the normalized comment to store.
pub fn check_review<R: Reviewable>(
    record: &R,
    action: ReviewAction,
    comment: Option<&str>,
) -> WorkflowResult<Option<String>> {
    let policy = R::POLICY;
    if !record.awaits_review() {
        return Err(WorkflowError::invalid_state(format!(
            "{} {} is {} and cannot be reviewed",
            policy.kind,
            record.id(),
            record.status_name()
        )));
    }

    let comment = normalize_comment(comment);
    if action == ReviewAction::Reject
        && policy.reject_comment == CommentRule::Required
        && comment.is_none()
    {
        return Err(WorkflowError::validation_code(
            ErrorCode::RejectionCommentRequired,
            format!("A comment is required to reject {} {}", policy.kind.to_lowercase(), record.id()),
        ));
    }
    Ok(comment)
}

/// Validate a resubmission: only rejected records, only by the original
/// submitter or an elevated role
pub fn check_resubmit<R: Reviewable>(record: &R, actor: &CurrentUser) -> WorkflowResult<()> {
    let policy = R::POLICY;
    if !policy.resubmittable {
        return Err(WorkflowError::invalid_state(format!(
            "{} {} cannot be resubmitted",
            policy.kind,
            record.id()
        )));
    }
    if actor.id != record.submitted_by() && !actor.role.is_elevated() {
        return Err(WorkflowError::forbidden_code(
            ErrorCode::NotSubmitter,
            format!(
                "Only the original submitter may resubmit {} {}",
                policy.kind.to_lowercase(),
                record.id()
            ),
        ));
    }
    if !record.is_rejected() {
        return Err(WorkflowError::invalid_state(format!(
            "{} {} is {}; only rejected submissions can be resubmitted",
            policy.kind,
            record.id(),
            record.status_name()
        )));
    }
    Ok(())
}

/// Map the row count of a conditional update: zero means the record moved
/// after it was read
pub fn expect_transition<R: Reviewable>(record: &R, rows: u64) -> WorkflowResult<()> {
    if rows == 0 {
        return Err(WorkflowError::conflict(format!(
            "{} {} was modified concurrently",
            R::POLICY.kind,
            record.id()
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::Role;

    fn assignment(status: AssignmentStatus) -> Assignment {
        Assignment {
            id: 7,
            batch_id: 1,
            packer_id: 2,
            storekeeper_id: 3,
            bags_assigned: 50,
            status,
            notes: None,
            rejection_comment: None,
            review_comment: None,
            reviewed_by: None,
            created_at: 0,
            updated_at: 0,
        }
    }

    fn actor(id: i64, role: Role) -> CurrentUser {
        CurrentUser {
            id,
            username: "someone".into(),
            role,
        }
    }

    #[test]
    fn test_reject_requires_comment_when_policy_says_so() {
        let pending = assignment(AssignmentStatus::PendingReview);
        let err = check_review(&pending, ReviewAction::Reject, Some("   ")).unwrap_err();
        assert_eq!(err.code(), ErrorCode::RejectionCommentRequired);

        let comment = check_review(&pending, ReviewAction::Reject, Some(" recount ")).unwrap();
        assert_eq!(comment.as_deref(), Some("recount"));
        assert_eq!(check_review(&pending, ReviewAction::Approve, None).unwrap(), None);
    }

    #[test]
    fn test_review_outside_pending_is_invalid_state() {
        let approved = assignment(AssignmentStatus::Approved);
        let err = check_review(&approved, ReviewAction::Approve, None).unwrap_err();
        assert!(matches!(err, WorkflowError::InvalidState(_)));
    }

    #[test]
    fn test_resubmit_rules() {
        let rejected = assignment(AssignmentStatus::Rejected);
        assert!(check_resubmit(&rejected, &actor(3, Role::StoreKeeper)).is_ok());
        assert!(check_resubmit(&rejected, &actor(99, Role::Manager)).is_ok());
        assert_eq!(
            check_resubmit(&rejected, &actor(4, Role::StoreKeeper)).unwrap_err().code(),
            ErrorCode::NotSubmitter
        );

        let pending = assignment(AssignmentStatus::PendingReview);
        assert!(matches!(
            check_resubmit(&pending, &actor(3, Role::StoreKeeper)),
            Err(WorkflowError::InvalidState(_))
        ));
    }

    #[test]
    fn test_zero_rows_is_conflict() {
        let pending = assignment(AssignmentStatus::PendingReview);
        assert!(expect_transition(&pending, 1).is_ok());
        assert!(matches!(
            expect_transition(&pending, 0),
            Err(WorkflowError::Conflict(_))
        ));
    }
}
