//
//  gitlab-state
//  reconcile/outcome.rs
//
//  Created by Ngonidzashe Mangudya on 2026/02/21.
//  Copyright (c) 2026 IAMNGONI. All rights reserved.
//

//! Reconciliation result types.
//!
//! Every reconciliation call produces exactly one [`Outcome`] describing
//! what was observed and what, if anything, was done. Outcomes are produced
//! fresh per call and never persisted.

use thiserror::Error;

use crate::api::common::ApiError;

/// The action a reconciliation performed.
///
/// Exactly one transition happens per call: a resource is created, updated
/// in place, deleted, or left alone. Failures always report
/// [`Action::None`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Current state already matched the declared state.
    None,
    /// The resource was created.
    Created,
    /// The resource was updated in place.
    Updated,
    /// The resource was deleted.
    Deleted,
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::None => "none",
            Self::Created => "created",
            Self::Updated => "updated",
            Self::Deleted => "deleted",
        };
        f.write_str(s)
    }
}

/// Errors a reconciliation can fail with.
///
/// # Variants
///
/// - `ParentNotFound`: a parent-scoped operation could not resolve its
///   parent (deploy key or hook without its project, project without its
///   namespace group). The reconciler fails fast and performs no create
/// - `Api`: any error surfaced by the underlying client
#[derive(Debug, Error)]
pub enum ReconcileError {
    /// The parent a resource must live under does not exist.
    ///
    /// # Parameters
    ///
    /// - `0` - Natural key of the missing parent
    #[error("parent not found: {0}")]
    ParentNotFound(String),

    /// The underlying API call failed.
    #[error(transparent)]
    Api(#[from] ApiError),
}

/// The structured result of one reconciliation call.
///
/// # Fields
///
/// * `target` - Natural key of the resource that was reconciled; for
///   parent-scoped resources this is `project_path:key`
/// * `changed` - Whether remote state was modified
/// * `action` - Which transition, if any, was performed
/// * `message` - Human-readable status, suitable for user-facing output
/// * `error` - The failure, when the reconciliation did not succeed
///
/// # Invariants
///
/// - A failed outcome always has `changed = false`, `action = None` and
///   `error = Some(..)`; errors are never swallowed silently
/// - `changed = true` implies `action != None`
///
/// # Example
///
/// ```rust
/// use gitlab_state::reconcile::{Action, Outcome};
///
/// let outcome = Outcome::created("teamA/service1", "project \"teamA/service1\" has been created");
/// assert!(outcome.changed);
/// assert_eq!(outcome.action, Action::Created);
/// assert!(outcome.is_ok());
/// ```
#[derive(Debug)]
pub struct Outcome {
    /// Natural key of the resource that was reconciled.
    pub target: String,

    /// Whether remote state was modified by this call.
    pub changed: bool,

    /// Which transition was performed.
    pub action: Action,

    /// Human-readable status message.
    pub message: String,

    /// The failure, when the reconciliation did not succeed.
    pub error: Option<ReconcileError>,
}

impl Outcome {
    fn new(target: impl Into<String>, action: Action, message: impl Into<String>) -> Self {
        Self {
            target: target.into(),
            changed: !matches!(action, Action::None),
            action,
            message: message.into(),
            error: None,
        }
    }

    /// Builds an outcome for a resource already in the desired state.
    pub fn unchanged(target: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(target, Action::None, message)
    }

    /// Builds an outcome for a freshly created resource.
    pub fn created(target: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(target, Action::Created, message)
    }

    /// Builds an outcome for an in-place update.
    pub fn updated(target: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(target, Action::Updated, message)
    }

    /// Builds an outcome for a deleted resource.
    pub fn deleted(target: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(target, Action::Deleted, message)
    }

    /// Builds a failed outcome.
    ///
    /// Failed outcomes never report a change; the error doubles as the
    /// message.
    pub fn failed(target: impl Into<String>, error: ReconcileError) -> Self {
        Self {
            target: target.into(),
            changed: false,
            action: Action::None,
            message: error.to_string(),
            error: Some(error),
        }
    }

    /// Checks whether the reconciliation succeeded.
    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_changed_follows_action() {
        assert!(!Outcome::unchanged("x", "m").changed);
        assert!(Outcome::created("x", "m").changed);
        assert!(Outcome::updated("x", "m").changed);
        assert!(Outcome::deleted("x", "m").changed);
    }

    #[test]
    fn test_failed_outcome_reports_no_change() {
        let outcome = Outcome::failed("x", ReconcileError::ParentNotFound("ns".to_string()));
        assert!(!outcome.changed);
        assert_eq!(outcome.action, Action::None);
        assert!(!outcome.is_ok());
        assert_eq!(outcome.message, "parent not found: ns");
    }

    #[test]
    fn test_action_display() {
        assert_eq!(Action::Created.to_string(), "created");
        assert_eq!(Action::None.to_string(), "none");
    }
}
