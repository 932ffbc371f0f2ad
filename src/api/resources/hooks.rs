//
//  gitlab-state
//  api/resources/hooks.rs
//
//  Created by Ngonidzashe Mangudya on 2026/02/21.
//  Copyright (c) 2026 IAMNGONI. All rights reserved.
//

//! Project webhook API types.
//!
//! Webhooks exist only within the context of an owning project. Their
//! natural key is the (project, target URL) pair. Event flags are plain
//! booleans on the remote record and drift-correctable via hook edit.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A webhook registered on a project.
///
/// # Fields
///
/// * `id` - Internal numeric identifier
/// * `url` - Target URL notified on events; the natural key within a project
/// * `push_events` - Fire on pushes
/// * `issues_events` - Fire on issue changes
/// * `merge_requests_events` - Fire on merge request changes
/// * `created_at` - Timestamp when the hook was registered
///
/// # Example
///
/// ```rust
/// use gitlab_state::api::resources::ProjectHook;
///
/// let json = r#"{"id": 9, "url": "https://ci.example.com/hook", "push_events": true}"#;
/// let hook: ProjectHook = serde_json::from_str(json).unwrap();
/// assert!(hook.push_events);
/// assert!(!hook.issues_events);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectHook {
    /// Internal numeric identifier assigned by the remote instance.
    pub id: u64,

    /// Target URL notified on events. Unique among the hooks of one project.
    pub url: String,

    /// Whether the hook fires on push events.
    #[serde(default)]
    pub push_events: bool,

    /// Whether the hook fires on issue events.
    #[serde(default)]
    pub issues_events: bool,

    /// Whether the hook fires on merge request events.
    #[serde(default)]
    pub merge_requests_events: bool,

    /// Timestamp indicating when the hook was registered.
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// Request payload for registering or editing a project webhook.
///
/// The same shape serves both create and edit: the remote requires the
/// target `url` in either case, and event flags left as `None` keep their
/// current (or default) value.
///
/// # Example
///
/// ```rust
/// use gitlab_state::api::resources::HookPayload;
///
/// let payload = HookPayload {
///     url: "https://ci.example.com/hook".to_string(),
///     push_events: Some(true),
///     issues_events: None,
///     merge_requests_events: None,
/// };
/// assert_eq!(
///     serde_json::to_string(&payload).unwrap(),
///     r#"{"url":"https://ci.example.com/hook","push_events":true}"#
/// );
/// ```
#[derive(Debug, Clone, Serialize)]
pub struct HookPayload {
    /// Target URL for the webhook.
    pub url: String,

    /// Fire on push events. Remote default when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub push_events: Option<bool>,

    /// Fire on issue events. Remote default when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub issues_events: Option<bool>,

    /// Fire on merge request events. Remote default when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub merge_requests_events: Option<bool>,
}
