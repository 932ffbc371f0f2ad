//
//  gitlab-state
//  api/resources/deploy_keys.rs
//
//  Created by Ngonidzashe Mangudya on 2026/02/21.
//  Copyright (c) 2026 IAMNGONI. All rights reserved.
//

//! Deploy key API types.
//!
//! Deploy keys exist only within the context of an owning project. Their
//! natural key is the (project, title) pair; the key material itself never
//! participates in matching, since the title is the declared unique key.
//!
//! # Notes
//!
//! - The remote API offers no edit endpoint for deploy keys: reconciliation
//!   is create/delete only, and replacing key material is delete-then-create
//!   at the caller's discretion

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A deploy key attached to a project.
///
/// # Fields
///
/// * `id` - Internal numeric identifier
/// * `title` - Caller-chosen title; the natural key within a project
/// * `key` - Public key material
/// * `created_at` - Timestamp when the key was added
///
/// # Example
///
/// ```rust
/// use gitlab_state::api::resources::DeployKey;
///
/// let json = r#"{"id": 3, "title": "ci-deploy", "key": "ssh-rsa AAAA..."}"#;
/// let key: DeployKey = serde_json::from_str(json).unwrap();
/// assert_eq!(key.title, "ci-deploy");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeployKey {
    /// Internal numeric identifier assigned by the remote instance.
    pub id: u64,

    /// Caller-chosen title. Unique among the keys of one project.
    pub title: String,

    /// Public key material.
    pub key: String,

    /// Timestamp indicating when the key was added.
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// Request payload for attaching a deploy key to a project.
///
/// # Fields
///
/// * `title` - Title for the new key (the natural key)
/// * `key` - Public key material
/// * `can_push` - Whether the key may push; remote default when absent
#[derive(Debug, Clone, Serialize)]
pub struct AddDeployKeyRequest {
    /// Title for the new key.
    pub title: String,

    /// Public key material.
    pub key: String,

    /// Whether the key is allowed to push. Left to the remote default
    /// when not declared.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub can_push: Option<bool>,
}
