//! The draft -> pending_review -> published workflow.
//!
//! `archived` is part of [`Status`] but no event leads into or out of it;
//! records only get there through direct persistence-layer action.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

use crate::domain::errors::{
    EditorialError, EmptyReason, FieldIssue, InvalidTransition, IssueKind, ValidationFailed,
};
use crate::domain::record::{ContentRecord, RecordContent};
use crate::domain::types::{ActorId, TypeConstraintError};
use crate::domain::validation::ValidationRules;

/// Moderation status of a content record.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    #[default]
    Draft,
    PendingReview,
    Published,
    Archived,
}

impl Status {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::PendingReview => "pending_review",
            Self::Published => "published",
            Self::Archived => "archived",
        }
    }
}

impl Display for Status {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl TryFrom<&str> for Status {
    type Error = TypeConstraintError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim() {
            "draft" => Ok(Self::Draft),
            "pending_review" => Ok(Self::PendingReview),
            "published" => Ok(Self::Published),
            "archived" => Ok(Self::Archived),
            other => Err(TypeConstraintError::InvalidValue(format!("status: {other}"))),
        }
    }
}

/// Requested action on a record.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ModerationEvent {
    Submit,
    Approve,
    Reject,
    Edit,
    Delete,
}

impl ModerationEvent {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Submit => "submit",
            Self::Approve => "approve",
            Self::Reject => "reject",
            Self::Edit => "edit",
            Self::Delete => "delete",
        }
    }
}

impl Display for ModerationEvent {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Effect of a legal event on the record's status.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    Moves(Status),
    Stays,
    Removed,
}

/// What happens to the status of a `published` record when it is edited.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PublishedEditPolicy {
    /// Stay published with the new content; no re-review.
    #[default]
    KeepPublished,
    /// Go back to `pending_review` as if resubmitted by the editor.
    RequireReview,
}

/// Transition table and the audit side effects of each transition.
///
/// Every operation takes the record by reference and returns an updated copy;
/// on failure the caller's record is untouched.
pub struct ModerationStateMachine;

impl ModerationStateMachine {
    /// Looks up `event` in the transition table.
    pub fn next(from: Status, event: ModerationEvent) -> Result<Outcome, InvalidTransition> {
        use ModerationEvent::*;
        use Status::*;

        match (from, event) {
            (Draft, Submit) => Ok(Outcome::Moves(PendingReview)),
            (PendingReview, Approve) => Ok(Outcome::Moves(Published)),
            (PendingReview, Reject) => Ok(Outcome::Moves(Draft)),
            (_, Edit) => Ok(Outcome::Stays),
            (_, Delete) => Ok(Outcome::Removed),
            _ => Err(InvalidTransition { from, event }),
        }
    }

    pub fn permits(from: Status, event: ModerationEvent) -> bool {
        Self::next(from, event).is_ok()
    }

    /// `draft -> pending_review`, guarded by the full validation table.
    pub fn submit(
        record: &ContentRecord,
        actor: &ActorId,
        now: NaiveDateTime,
    ) -> Result<ContentRecord, EditorialError> {
        let status = Self::target(record.status, ModerationEvent::Submit)?;
        ValidationRules::check_submittable(&record.content)?;

        let mut next = record.clone();
        next.status = status;
        next.audit.submitted_by = Some(actor.clone());
        next.audit.submitted_at = Some(now);
        next.updated_at = now;
        Ok(next)
    }

    /// `pending_review -> published`; clears any rejection reason.
    pub fn approve(
        record: &ContentRecord,
        actor: &ActorId,
        now: NaiveDateTime,
    ) -> Result<ContentRecord, InvalidTransition> {
        let status = Self::target(record.status, ModerationEvent::Approve)?;

        let mut next = record.clone();
        next.status = status;
        next.audit.reviewed_by = Some(actor.clone());
        next.audit.reviewed_at = Some(now);
        next.audit.published_by = Some(actor.clone());
        next.audit.published_at = Some(now);
        next.audit.rejection_reason = None;
        next.updated_at = now;
        Ok(next)
    }

    /// `pending_review -> draft` with a mandatory reviewer note.
    ///
    /// A blank reason fails with [`EmptyReason`] whatever the current status.
    pub fn reject(
        record: &ContentRecord,
        actor: &ActorId,
        reason: &str,
        now: NaiveDateTime,
    ) -> Result<ContentRecord, EditorialError> {
        let reason = reason.trim();
        if reason.is_empty() {
            return Err(EmptyReason.into());
        }
        let status = Self::target(record.status, ModerationEvent::Reject)?;

        let mut next = record.clone();
        next.status = status;
        next.audit.reviewed_by = Some(actor.clone());
        next.audit.reviewed_at = Some(now);
        next.audit.rejection_reason = Some(reason.to_string());
        next.updated_at = now;
        Ok(next)
    }

    /// Replaces the record content wholesale.
    ///
    /// Only field-level checks run, except when `policy` sends an edited
    /// `published` record back to review: that path is a resubmission and
    /// needs the full table.
    pub fn edit(
        record: &ContentRecord,
        content: RecordContent,
        actor: &ActorId,
        now: NaiveDateTime,
        policy: PublishedEditPolicy,
    ) -> Result<ContentRecord, EditorialError> {
        Self::next(record.status, ModerationEvent::Edit)?;

        if content.kind() != record.kind() {
            return Err(ValidationFailed {
                issues: vec![FieldIssue::new("kind", IssueKind::NotAllowed)],
            }
            .into());
        }

        let back_to_review = record.status == Status::Published
            && policy == PublishedEditPolicy::RequireReview;

        if back_to_review {
            ValidationRules::check_submittable(&content)?;
        } else {
            ValidationRules::check_fields(&content)?;
        }

        let mut next = record.clone();
        next.content = content;
        next.updated_at = now;
        if back_to_review {
            next.status = Status::PendingReview;
            next.audit.submitted_by = Some(actor.clone());
            next.audit.submitted_at = Some(now);
        }
        Ok(next)
    }

    /// Confirms the record may be removed. Deletion is legal from every status.
    pub fn delete(record: &ContentRecord) -> Result<(), InvalidTransition> {
        Self::next(record.status, ModerationEvent::Delete).map(|_| ())
    }

    fn target(from: Status, event: ModerationEvent) -> Result<Status, InvalidTransition> {
        match Self::next(from, event)? {
            Outcome::Moves(status) => Ok(status),
            Outcome::Stays => Ok(from),
            Outcome::Removed => Err(InvalidTransition { from, event }),
        }
    }
}

/// See [`ModerationStateMachine::submit`].
pub fn submit(
    record: &ContentRecord,
    actor: &ActorId,
    now: NaiveDateTime,
) -> Result<ContentRecord, EditorialError> {
    ModerationStateMachine::submit(record, actor, now)
}

/// See [`ModerationStateMachine::approve`].
pub fn approve(
    record: &ContentRecord,
    actor: &ActorId,
    now: NaiveDateTime,
) -> Result<ContentRecord, InvalidTransition> {
    ModerationStateMachine::approve(record, actor, now)
}

/// See [`ModerationStateMachine::reject`].
pub fn reject(
    record: &ContentRecord,
    actor: &ActorId,
    reason: &str,
    now: NaiveDateTime,
) -> Result<ContentRecord, EditorialError> {
    ModerationStateMachine::reject(record, actor, reason, now)
}
