//
//  gitlab-state
//  reconcile/desired.rs
//
//  Created by Ngonidzashe Mangudya on 2026/02/21.
//  Copyright (c) 2026 IAMNGONI. All rights reserved.
//

//! Declared-state descriptions the reconciler converges towards.
//!
//! Every field is optional (except the deploy key material, which has no
//! meaningful default): an unset field means "do not manage this
//! attribute", so existing remote values are left untouched both on create
//! and on update. Each type knows how to diff itself against the live
//! record and produce a partial-update payload carrying only the drifted
//! attributes.

use crate::api::resources::{
    EditGroupRequest, EditProjectRequest, HookPayload, Project, ProjectHook, Visibility,
};

/// Declared attributes of a project.
///
/// # Fields
///
/// * `description` - Managed description, unmanaged when `None`
/// * `default_branch` - Managed default branch, unmanaged when `None`
/// * `visibility_level` - Managed visibility, unmanaged when `None`
#[derive(Debug, Clone, Default)]
pub struct ProjectState {
    /// Desired description.
    pub description: Option<String>,

    /// Desired default branch.
    pub default_branch: Option<String>,

    /// Desired visibility.
    pub visibility_level: Option<Visibility>,
}

impl ProjectState {
    /// Diffs the declared attributes against the live record.
    ///
    /// Returns a partial-update payload carrying only the attributes that
    /// drifted, together with their names for reporting. An empty payload
    /// means the project already matches.
    pub fn diff(&self, current: &Project) -> (EditProjectRequest, Vec<&'static str>) {
        let mut edit = EditProjectRequest::default();
        let mut changed = Vec::new();

        if let Some(want) = &self.description {
            if current.description.as_deref() != Some(want.as_str()) {
                edit.description = Some(want.clone());
                changed.push("description");
            }
        }
        if let Some(want) = &self.default_branch {
            if current.default_branch.as_deref() != Some(want.as_str()) {
                edit.default_branch = Some(want.clone());
                changed.push("default_branch");
            }
        }
        if let Some(want) = self.visibility_level {
            if current.visibility_level != Some(want) {
                edit.visibility_level = Some(want);
                changed.push("visibility_level");
            }
        }

        (edit, changed)
    }
}

/// Declared attributes of a group.
#[derive(Debug, Clone, Default)]
pub struct GroupState {
    /// Desired description.
    pub description: Option<String>,
}

impl GroupState {
    /// Diffs the declared attributes against the live record.
    pub fn diff(&self, current: &crate::api::resources::Group) -> (EditGroupRequest, Vec<&'static str>) {
        let mut edit = EditGroupRequest::default();
        let mut changed = Vec::new();

        if let Some(want) = &self.description {
            if current.description.as_deref() != Some(want.as_str()) {
                edit.description = Some(want.clone());
                changed.push("description");
            }
        }

        (edit, changed)
    }
}

/// Declared attributes of a deploy key.
///
/// Deploy keys are matched by title; the key material is only consulted on
/// create, since the remote side offers no edit operation for keys.
#[derive(Debug, Clone)]
pub struct DeployKeyState {
    /// Public key material in OpenSSH format.
    pub key: String,

    /// Whether the key may push. Remote default when absent.
    pub can_push: Option<bool>,
}

/// Declared attributes of a project hook.
///
/// Hooks are matched by URL; event flags left unset are unmanaged.
#[derive(Debug, Clone, Default)]
pub struct HookState {
    /// Fire on push events.
    pub push_events: Option<bool>,

    /// Fire on issue events.
    pub issues_events: Option<bool>,

    /// Fire on merge request events.
    pub merge_requests_events: Option<bool>,
}

impl HookState {
    /// Builds the creation payload for a hook that does not exist yet.
    pub fn to_payload(&self, url: &str) -> HookPayload {
        HookPayload {
            url: url.to_string(),
            push_events: self.push_events,
            issues_events: self.issues_events,
            merge_requests_events: self.merge_requests_events,
        }
    }

    /// Diffs the declared event flags against the live hook.
    ///
    /// The returned payload keeps the hook's URL and carries only the
    /// drifted flags.
    pub fn diff(&self, current: &ProjectHook) -> (HookPayload, Vec<&'static str>) {
        let mut payload = HookPayload {
            url: current.url.clone(),
            push_events: None,
            issues_events: None,
            merge_requests_events: None,
        };
        let mut changed = Vec::new();

        if let Some(want) = self.push_events {
            if current.push_events != want {
                payload.push_events = Some(want);
                changed.push("push_events");
            }
        }
        if let Some(want) = self.issues_events {
            if current.issues_events != want {
                payload.issues_events = Some(want);
                changed.push("issues_events");
            }
        }
        if let Some(want) = self.merge_requests_events {
            if current.merge_requests_events != want {
                payload.merge_requests_events = Some(want);
                changed.push("merge_requests_events");
            }
        }

        (payload, changed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn live_project() -> Project {
        serde_json::from_str(
            r#"{
                "id": 1,
                "name": "service1",
                "path": "service1",
                "path_with_namespace": "teamA/service1",
                "description": "svc",
                "default_branch": "master",
                "visibility_level": 0
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn test_unset_fields_are_unmanaged() {
        let desired = ProjectState::default();
        let (edit, changed) = desired.diff(&live_project());
        assert!(edit.is_empty());
        assert!(changed.is_empty());
    }

    #[test]
    fn test_diff_reports_only_drifted_fields() {
        let desired = ProjectState {
            description: Some("svc v2".to_string()),
            default_branch: Some("master".to_string()),
            visibility_level: None,
        };
        let (edit, changed) = desired.diff(&live_project());
        assert_eq!(edit.description.as_deref(), Some("svc v2"));
        assert!(edit.default_branch.is_none());
        assert_eq!(changed, vec!["description"]);
    }

    #[test]
    fn test_hook_diff_keeps_url_and_flips_flags() {
        let current: ProjectHook = serde_json::from_str(
            r#"{"id": 3, "url": "https://ci.example.com/hook", "push_events": true}"#,
        )
        .unwrap();
        let desired = HookState {
            push_events: Some(true),
            issues_events: Some(true),
            merge_requests_events: None,
        };
        let (payload, changed) = desired.diff(&current);
        assert_eq!(payload.url, "https://ci.example.com/hook");
        assert!(payload.push_events.is_none());
        assert_eq!(payload.issues_events, Some(true));
        assert_eq!(changed, vec!["issues_events"]);
    }
}
