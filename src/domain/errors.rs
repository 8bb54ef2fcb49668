//! Typed failures of the editorial core.
//!
//! Every variant carries structured detail (field paths, states, levels) so
//! callers can render localized messages; the `Display` strings are meant for
//! logs only.

use serde::Serialize;
use std::fmt::{Display, Formatter};
use thiserror::Error;

use crate::domain::geo::GeoLevel;
use crate::domain::moderation::{ModerationEvent, Status};
use crate::domain::query::QueryDimension;
use crate::domain::types::TypeConstraintError;

/// What is wrong with a single field.
#[derive(Clone, Copy, Debug, Serialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum IssueKind {
    /// Required before the record may leave `draft` (or be saved, for leaf entities).
    Missing,
    /// Numeric value outside its allowed range.
    OutOfRange,
    /// Value present but syntactically invalid (email, URL, date, enum literal).
    InvalidFormat,
    /// Start date falls after end date.
    DateOrder,
    /// Value cannot apply to this record, e.g. a kind change on edit.
    NotAllowed,
}

/// One problem found while validating a record.
#[derive(Clone, Debug, Serialize, PartialEq, Eq, Hash)]
pub struct FieldIssue {
    /// Dotted field path, e.g. `name.en` or `geo.country_id`.
    pub field: String,
    pub kind: IssueKind,
}

impl FieldIssue {
    pub fn new(field: impl Into<String>, kind: IssueKind) -> Self {
        Self {
            field: field.into(),
            kind,
        }
    }

    pub fn missing(field: impl Into<String>) -> Self {
        Self::new(field, IssueKind::Missing)
    }

    /// Maps a value-object construction failure on `field` to an issue.
    pub fn from_constraint(field: impl Into<String>, err: &TypeConstraintError) -> Self {
        let kind = match err {
            TypeConstraintError::EmptyString(_) => IssueKind::Missing,
            TypeConstraintError::OutOfRange(_) | TypeConstraintError::NegativeNumber(_) => {
                IssueKind::OutOfRange
            }
            TypeConstraintError::InvalidUrl(_)
            | TypeConstraintError::InvalidEmail(_)
            | TypeConstraintError::InvalidValue(_) => IssueKind::InvalidFormat,
        };
        Self::new(field, kind)
    }
}

/// Aggregated validation result listing every offending field.
#[derive(Clone, Debug, Error, Serialize, PartialEq, Eq)]
pub struct ValidationFailed {
    pub issues: Vec<FieldIssue>,
}

impl ValidationFailed {
    /// `Ok(())` when `issues` is empty, otherwise the aggregated failure.
    pub fn check(issues: Vec<FieldIssue>) -> Result<(), Self> {
        if issues.is_empty() {
            Ok(())
        } else {
            Err(Self { issues })
        }
    }

    /// Whether any issue was reported for `field`.
    pub fn has_field(&self, field: &str) -> bool {
        self.issues.iter().any(|issue| issue.field == field)
    }

    pub fn fields(&self) -> Vec<&str> {
        self.issues.iter().map(|issue| issue.field.as_str()).collect()
    }
}

impl Display for ValidationFailed {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "validation failed for: {}", self.fields().join(", "))
    }
}

/// A status change was requested that the moderation graph does not allow.
#[derive(Clone, Copy, Debug, Error, Serialize, PartialEq, Eq)]
#[error("cannot {event} a record in status {from}")]
pub struct InvalidTransition {
    pub from: Status,
    pub event: ModerationEvent,
}

/// A geography node does not belong to the ancestor the record states.
#[derive(Clone, Debug, Error, Serialize, PartialEq, Eq)]
#[error("{level} {node} does not belong to {expected_parent}")]
pub struct GeoInconsistency {
    /// Level of the offending node.
    pub level: GeoLevel,
    /// Identifier of the offending node.
    pub node: String,
    /// Parent the record claims for the node.
    pub expected_parent: String,
    /// Parent the hierarchy reports, `None` when the node is unknown.
    pub actual_parent: Option<String>,
}

/// A query filters on a child level without its ancestor.
#[derive(Clone, Copy, Debug, Error, Serialize, PartialEq, Eq)]
#[error("{dimension} filter requires a {missing} filter")]
pub struct IncompleteScope {
    pub dimension: QueryDimension,
    pub missing: QueryDimension,
}

/// `reject` was called without a reason.
#[derive(Clone, Copy, Debug, Error, Serialize, PartialEq, Eq)]
#[error("a rejection reason is required")]
pub struct EmptyReason;

/// Union of every failure the editorial core can report.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum EditorialError {
    #[error(transparent)]
    ValidationFailed(#[from] ValidationFailed),
    #[error(transparent)]
    InvalidTransition(#[from] InvalidTransition),
    #[error(transparent)]
    GeoInconsistency(#[from] GeoInconsistency),
    #[error(transparent)]
    IncompleteScope(#[from] IncompleteScope),
    #[error(transparent)]
    EmptyReason(#[from] EmptyReason),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn check_passes_without_issues() {
        assert!(ValidationFailed::check(vec![]).is_ok());
    }

    #[test]
    fn check_keeps_every_issue() {
        let err = ValidationFailed::check(vec![
            FieldIssue::missing("main_image"),
            FieldIssue::missing("latitude"),
        ])
        .unwrap_err();
        assert_eq!(err.fields(), vec!["main_image", "latitude"]);
        assert!(err.has_field("latitude"));
        assert_eq!(
            err.to_string(),
            "validation failed for: main_image, latitude"
        );
    }

    #[test]
    fn constraint_errors_map_to_issue_kinds() {
        let issue = FieldIssue::from_constraint(
            "latitude",
            &TypeConstraintError::OutOfRange("latitude"),
        );
        assert_eq!(issue.kind, IssueKind::OutOfRange);

        let issue =
            FieldIssue::from_constraint("email", &TypeConstraintError::InvalidEmail("email"));
        assert_eq!(issue.kind, IssueKind::InvalidFormat);
    }

    #[test]
    fn invalid_transition_names_state_and_event() {
        let err = InvalidTransition {
            from: Status::Draft,
            event: ModerationEvent::Approve,
        };
        assert_eq!(err.to_string(), "cannot approve a record in status draft");
    }
}
