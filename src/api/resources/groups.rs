//
//  gitlab-state
//  api/resources/groups.rs
//
//  Created by Ngonidzashe Mangudya on 2026/02/21.
//  Copyright (c) 2026 IAMNGONI. All rights reserved.
//

//! Group API types.
//!
//! Groups are the top-level namespaces that own projects. Their natural key
//! is the URL path segment (`path`); lookups also accept the display `name`
//! since older deployments used the two interchangeably.

use serde::{Deserialize, Serialize};

/// A GitLab group as returned by the remote API.
///
/// # Fields
///
/// * `id` - Internal numeric identifier
/// * `name` - Human-readable group name
/// * `path` - URL path segment; the natural key for reconciliation
/// * `description` - Optional free-form description
///
/// # Example
///
/// ```rust
/// use gitlab_state::api::resources::Group;
///
/// let json = r#"{"id": 7, "name": "Team A", "path": "teamA", "description": null}"#;
/// let group: Group = serde_json::from_str(json).unwrap();
/// assert_eq!(group.path, "teamA");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Group {
    /// Internal numeric identifier assigned by the remote instance.
    pub id: u64,

    /// Human-readable name of the group.
    pub name: String,

    /// URL path segment. Unique among groups; used as the natural key.
    pub path: String,

    /// Optional description of the group.
    #[serde(default)]
    pub description: Option<String>,
}

impl Group {
    /// Checks whether this group answers to the given natural key.
    ///
    /// Matches on `path` first, falling back to `name`, since callers have
    /// historically addressed groups by either.
    pub fn matches(&self, key: &str) -> bool {
        self.path == key || self.name == key
    }
}

/// Request payload for creating a new group.
///
/// # Fields
///
/// * `name` - Display name for the group (required)
/// * `path` - URL path segment (required)
/// * `description` - Optional description
///
/// # Example
///
/// ```rust
/// use gitlab_state::api::resources::CreateGroupRequest;
///
/// let request = CreateGroupRequest {
///     name: "teamA".to_string(),
///     path: "teamA".to_string(),
///     description: Some("Team A services".to_string()),
/// };
/// ```
#[derive(Debug, Clone, Serialize)]
pub struct CreateGroupRequest {
    /// Display name for the new group.
    pub name: String,

    /// URL path segment for the new group.
    pub path: String,

    /// Optional description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Partial-update payload for an existing group.
///
/// Only fields set to `Some` are serialized; everything else is left at the
/// current remote value.
#[derive(Debug, Clone, Default, Serialize)]
pub struct EditGroupRequest {
    /// New description, when the caller declared one that differs.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl EditGroupRequest {
    /// Checks whether the payload carries any change at all.
    pub fn is_empty(&self) -> bool {
        self.description.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matches_path_or_name() {
        let group = Group {
            id: 1,
            name: "Team A".to_string(),
            path: "teamA".to_string(),
            description: None,
        };
        assert!(group.matches("teamA"));
        assert!(group.matches("Team A"));
        assert!(!group.matches("teamB"));
    }

    #[test]
    fn test_edit_request_skips_absent_fields() {
        let edit = EditGroupRequest::default();
        assert!(edit.is_empty());
        assert_eq!(serde_json::to_string(&edit).unwrap(), "{}");
    }
}
