//
//  gitlab-state
//  api/resources/projects.rs
//
//  Created by Ngonidzashe Mangudya on 2026/02/21.
//  Copyright (c) 2026 IAMNGONI. All rights reserved.
//

//! Project API types.
//!
//! Projects are the central resource: they own deploy keys and webhooks and
//! are addressed by their path-with-namespace (`"namespace/name"`). The
//! remote API has no lookup-by-path endpoint, so resolving a project by its
//! natural key means enumerating the full (paginated) project list and
//! matching on `path_with_namespace`.
//!
//! # Example
//!
//! ```rust
//! use gitlab_state::api::resources::{CreateProjectRequest, Visibility};
//!
//! let request = CreateProjectRequest {
//!     name: "service1".to_string(),
//!     namespace_id: Some(7),
//!     description: Some("Main backend service".to_string()),
//!     default_branch: None,
//!     visibility_level: Some(Visibility::Internal),
//! };
//! ```
//!
//! # Notes
//!
//! - `visibility_level` is numeric on the wire (0/10/20); [`Visibility`]
//!   converts to and from those values
//! - `namespace` is embedded as a lightweight reference, mirroring how the
//!   remote nests the owning group

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Project visibility as encoded by the remote API.
///
/// GitLab serializes visibility as the numeric `visibility_level` field:
/// `0` for private, `10` for internal, `20` for public.
///
/// # Example
///
/// ```rust
/// use gitlab_state::api::resources::Visibility;
///
/// let level: u8 = Visibility::Public.into();
/// assert_eq!(level, 20);
/// assert_eq!(Visibility::try_from(10).unwrap(), Visibility::Internal);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum Visibility {
    /// Visible only to members (`visibility_level = 0`).
    Private,
    /// Visible to any authenticated user (`visibility_level = 10`).
    Internal,
    /// Visible to everyone (`visibility_level = 20`).
    Public,
}

impl From<Visibility> for u8 {
    fn from(visibility: Visibility) -> Self {
        match visibility {
            Visibility::Private => 0,
            Visibility::Internal => 10,
            Visibility::Public => 20,
        }
    }
}

impl TryFrom<u8> for Visibility {
    type Error = String;

    fn try_from(level: u8) -> Result<Self, Self::Error> {
        match level {
            0 => Ok(Self::Private),
            10 => Ok(Self::Internal),
            20 => Ok(Self::Public),
            other => Err(format!("unknown visibility level: {other}")),
        }
    }
}

/// A lightweight reference to the namespace (group) owning a project.
///
/// # Fields
///
/// * `id` - Numeric identifier of the namespace
/// * `name` - Display name of the namespace
/// * `path` - URL path segment of the namespace
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NamespaceRef {
    /// Numeric identifier of the namespace.
    pub id: u64,

    /// Display name of the namespace.
    pub name: String,

    /// URL path segment of the namespace.
    pub path: String,
}

/// A GitLab project as returned by the remote API.
///
/// # Fields
///
/// * `id` - Internal numeric identifier
/// * `name` - Human-readable project name
/// * `path` - URL path segment within the namespace
/// * `path_with_namespace` - Natural key, `"namespace/name"`
/// * `description` - Optional free-form description
/// * `default_branch` - Name of the default branch, if any commits exist
/// * `visibility_level` - Project visibility, numeric on the wire
/// * `namespace` - Owning group, embedded as a reference
/// * `created_at` - Creation timestamp
///
/// # Example
///
/// ```rust
/// use gitlab_state::api::resources::Project;
///
/// fn display(project: &Project) {
///     println!("{} (id {})", project.path_with_namespace, project.id);
///     if let Some(ref description) = project.description {
///         println!("  {}", description);
///     }
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    /// Internal numeric identifier assigned by the remote instance.
    pub id: u64,

    /// Human-readable name of the project.
    pub name: String,

    /// URL path segment within the owning namespace.
    pub path: String,

    /// Full path in format `{namespace}/{path}`. The natural key used for
    /// reconciliation; unique per instance.
    pub path_with_namespace: String,

    /// Optional description of the project's purpose.
    #[serde(default)]
    pub description: Option<String>,

    /// Name of the default branch. `None` for empty repositories.
    #[serde(default)]
    pub default_branch: Option<String>,

    /// Project visibility. Defaults to absent when the remote omits it.
    #[serde(default)]
    pub visibility_level: Option<Visibility>,

    /// The group that owns this project.
    #[serde(default)]
    pub namespace: Option<NamespaceRef>,

    /// Timestamp indicating when the project was created.
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// Request payload for creating a new project.
///
/// Only the `name` field is required; everything else falls back to the
/// remote platform's defaults.
///
/// # Fields
///
/// * `name` - Required name for the new project
/// * `namespace_id` - Owning group id; user namespace when absent
/// * `description` - Optional description
/// * `default_branch` - Optional default branch name
/// * `visibility_level` - Optional visibility
#[derive(Debug, Clone, Serialize)]
pub struct CreateProjectRequest {
    /// The name for the new project. The path is derived from it remotely.
    pub name: String,

    /// Identifier of the owning group. When absent the project is created
    /// in the authenticated user's namespace.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub namespace_id: Option<u64>,

    /// Optional description of the project's purpose.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Optional default branch name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_branch: Option<String>,

    /// Optional visibility for the new project.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visibility_level: Option<Visibility>,
}

/// Partial-update payload for an existing project.
///
/// Only fields set to `Some` are serialized, so unspecified fields are left
/// at their current remote value. The reconciler builds this payload from
/// exactly the attributes that drifted.
///
/// # Example
///
/// ```rust
/// use gitlab_state::api::resources::EditProjectRequest;
///
/// let edit = EditProjectRequest {
///     description: Some("svc v2".to_string()),
///     ..Default::default()
/// };
/// assert_eq!(serde_json::to_string(&edit).unwrap(), r#"{"description":"svc v2"}"#);
/// ```
#[derive(Debug, Clone, Default, Serialize)]
pub struct EditProjectRequest {
    /// New description, when it drifted.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// New default branch, when it drifted.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_branch: Option<String>,

    /// New visibility, when it drifted.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visibility_level: Option<Visibility>,
}

impl EditProjectRequest {
    /// Checks whether the payload carries any change at all.
    pub fn is_empty(&self) -> bool {
        self.description.is_none()
            && self.default_branch.is_none()
            && self.visibility_level.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_project_record() {
        let json = r#"{
            "id": 42,
            "name": "service1",
            "path": "service1",
            "path_with_namespace": "teamA/service1",
            "description": "svc",
            "default_branch": "master",
            "visibility_level": 10,
            "namespace": {"id": 7, "name": "teamA", "path": "teamA"},
            "created_at": "2016-03-01T08:00:00Z"
        }"#;
        let project: Project = serde_json::from_str(json).unwrap();
        assert_eq!(project.id, 42);
        assert_eq!(project.path_with_namespace, "teamA/service1");
        assert_eq!(project.visibility_level, Some(Visibility::Internal));
        assert_eq!(project.namespace.unwrap().id, 7);
    }

    #[test]
    fn test_parse_minimal_project_record() {
        let json = r#"{
            "id": 1,
            "name": "empty",
            "path": "empty",
            "path_with_namespace": "ns/empty"
        }"#;
        let project: Project = serde_json::from_str(json).unwrap();
        assert!(project.description.is_none());
        assert!(project.default_branch.is_none());
        assert!(project.visibility_level.is_none());
    }

    #[test]
    fn test_edit_request_is_partial() {
        let edit = EditProjectRequest {
            default_branch: Some("main".to_string()),
            ..Default::default()
        };
        assert!(!edit.is_empty());
        assert_eq!(
            serde_json::to_string(&edit).unwrap(),
            r#"{"default_branch":"main"}"#
        );
    }

    #[test]
    fn test_visibility_round_trip() {
        assert_eq!(u8::from(Visibility::Private), 0);
        assert_eq!(Visibility::try_from(20).unwrap(), Visibility::Public);
        assert!(Visibility::try_from(15).is_err());
    }
}
