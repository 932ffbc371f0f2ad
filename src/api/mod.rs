//
//  gitlab-state
//  api/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/02/21.
//  Copyright (c) 2026 IAMNGONI. All rights reserved.
//

//! # API Client Layer
//!
//! This module provides the typed client for the GitLab REST API and the
//! [`GitlabApi`] trait the reconciler is written against.
//!
//! ## Architecture
//!
//! - [`client`]: Core HTTP client with authentication and request handling
//! - [`common`]: Shared types (errors, pagination)
//! - [`resources`]: Wire types per resource kind (groups, projects, deploy
//!   keys, hooks)
//! - [`GitlabApi`]: The operation surface consumed by the reconciler,
//!   implemented by [`GitlabClient`] and by test fakes
//!
//! ## Natural-Key Lookups
//!
//! The remote API has no find-by-path endpoint for projects or groups.
//! Lookups by natural key therefore enumerate the paginated list and match
//! client-side, first match wins. That is O(total resources) per lookup;
//! callers reconciling many resources should fetch
//! [`list_projects`](GitlabApi::list_projects) once and hand the result to
//! the reconciler as an explicit cache instead of re-scanning per resource.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use gitlab_state::api::{GitlabApi, GitlabClient};
//! use gitlab_state::auth::Credentials;
//!
//! # async fn example() -> Result<(), gitlab_state::api::common::ApiError> {
//! let credentials = Credentials::token("https://gitlab.example.com", "secret");
//! let client = GitlabClient::authenticate(&credentials).await?;
//!
//! if let Some(project) = client.project_by_path("teamA/service1").await? {
//!     println!("found project id {}", project.id);
//! }
//! # Ok(())
//! # }
//! ```

use async_trait::async_trait;
use tracing::debug;

pub mod client;
pub mod common;
pub mod resources;

pub use client::GitlabClient;
pub use common::ApiError;

use common::Pager;
use resources::{
    AddDeployKeyRequest, CreateGroupRequest, CreateProjectRequest, DeployKey, EditGroupRequest,
    EditProjectRequest, Group, HookPayload, Project, ProjectHook,
};

/// The CRUD operation surface per resource kind.
///
/// One canonical interface, regardless of how the underlying HTTP library
/// shapes its records. The reconciler is generic over this trait so its
/// convergence logic can be exercised against an in-memory fake; production
/// callers use [`GitlabClient`].
///
/// # Semantics
///
/// - `*_by_path` lookups return `Ok(None)` for absence; errors are reserved
///   for real failures
/// - `create_*` surfaces remote natural-key collisions as
///   [`ApiError::Conflict`], without pre-checking
/// - `update_*` payloads are partial: unspecified fields keep their current
///   remote value
/// - `delete_*` / `remove_*` fail with [`ApiError::NotFound`] when the id
///   does not resolve
#[async_trait]
pub trait GitlabApi: Send + Sync {
    /// Enumerates every project visible to the authenticated user.
    async fn list_projects(&self) -> Result<Vec<Project>, ApiError>;

    /// Looks a project up by path-with-namespace (or numeric id).
    async fn project_by_path(&self, path: &str) -> Result<Option<Project>, ApiError>;

    /// Creates a project.
    async fn create_project(&self, request: &CreateProjectRequest) -> Result<Project, ApiError>;

    /// Partially updates a project.
    async fn update_project(
        &self,
        id: u64,
        request: &EditProjectRequest,
    ) -> Result<Project, ApiError>;

    /// Deletes a project.
    async fn delete_project(&self, id: u64) -> Result<(), ApiError>;

    /// Enumerates every group visible to the authenticated user.
    async fn list_groups(&self) -> Result<Vec<Group>, ApiError>;

    /// Looks a group up by path (or display name).
    async fn group_by_path(&self, path: &str) -> Result<Option<Group>, ApiError>;

    /// Creates a group.
    async fn create_group(&self, request: &CreateGroupRequest) -> Result<Group, ApiError>;

    /// Partially updates a group.
    async fn update_group(&self, id: u64, request: &EditGroupRequest) -> Result<Group, ApiError>;

    /// Deletes a group.
    async fn delete_group(&self, id: u64) -> Result<(), ApiError>;

    /// Lists the deploy keys of a project.
    async fn list_deploy_keys(&self, project_id: u64) -> Result<Vec<DeployKey>, ApiError>;

    /// Attaches a deploy key to a project.
    async fn add_deploy_key(
        &self,
        project_id: u64,
        request: &AddDeployKeyRequest,
    ) -> Result<DeployKey, ApiError>;

    /// Removes a deploy key from a project.
    async fn remove_deploy_key(&self, project_id: u64, key_id: u64) -> Result<(), ApiError>;

    /// Lists the webhooks of a project.
    async fn list_hooks(&self, project_id: u64) -> Result<Vec<ProjectHook>, ApiError>;

    /// Registers a webhook on a project.
    async fn add_hook(
        &self,
        project_id: u64,
        request: &HookPayload,
    ) -> Result<ProjectHook, ApiError>;

    /// Edits an existing webhook.
    async fn update_hook(
        &self,
        project_id: u64,
        hook_id: u64,
        request: &HookPayload,
    ) -> Result<ProjectHook, ApiError>;

    /// Removes a webhook from a project.
    async fn remove_hook(&self, project_id: u64, hook_id: u64) -> Result<(), ApiError>;
}

#[async_trait]
impl GitlabApi for GitlabClient {
    async fn list_projects(&self) -> Result<Vec<Project>, ApiError> {
        self.get_paged("/projects/all").await
    }

    async fn project_by_path(&self, path: &str) -> Result<Option<Project>, ApiError> {
        // Numeric keys address the project directly.
        if !path.is_empty() && path.chars().all(|c| c.is_ascii_digit()) {
            return self.get_optional(&format!("/projects/{path}")).await;
        }

        // No find-by-path endpoint: scan the paginated list, first match
        // wins, stop as soon as it is found.
        let mut pager = Pager::new("/projects/all", self.per_page());
        while !pager.is_done() {
            let batch: Vec<Project> = self.get(&pager.query()).await?;
            let batch_len = batch.len();
            if let Some(project) = batch
                .into_iter()
                .find(|p| p.path_with_namespace == path)
            {
                return Ok(Some(project));
            }
            pager.advance(batch_len);
        }
        debug!(path = %path, "project not found in listing");
        Ok(None)
    }

    async fn create_project(&self, request: &CreateProjectRequest) -> Result<Project, ApiError> {
        self.post("/projects", request).await
    }

    async fn update_project(
        &self,
        id: u64,
        request: &EditProjectRequest,
    ) -> Result<Project, ApiError> {
        self.put(&format!("/projects/{id}"), request).await
    }

    async fn delete_project(&self, id: u64) -> Result<(), ApiError> {
        self.delete(&format!("/projects/{id}")).await
    }

    async fn list_groups(&self) -> Result<Vec<Group>, ApiError> {
        self.get_paged("/groups").await
    }

    async fn group_by_path(&self, path: &str) -> Result<Option<Group>, ApiError> {
        let mut pager = Pager::new("/groups", self.per_page());
        while !pager.is_done() {
            let batch: Vec<Group> = self.get(&pager.query()).await?;
            let batch_len = batch.len();
            if let Some(group) = batch.into_iter().find(|g| g.matches(path)) {
                return Ok(Some(group));
            }
            pager.advance(batch_len);
        }
        debug!(path = %path, "group not found in listing");
        Ok(None)
    }

    async fn create_group(&self, request: &CreateGroupRequest) -> Result<Group, ApiError> {
        self.post("/groups", request).await
    }

    async fn update_group(&self, id: u64, request: &EditGroupRequest) -> Result<Group, ApiError> {
        self.put(&format!("/groups/{id}"), request).await
    }

    async fn delete_group(&self, id: u64) -> Result<(), ApiError> {
        self.delete(&format!("/groups/{id}")).await
    }

    async fn list_deploy_keys(&self, project_id: u64) -> Result<Vec<DeployKey>, ApiError> {
        self.get_paged(&format!("/projects/{project_id}/keys")).await
    }

    async fn add_deploy_key(
        &self,
        project_id: u64,
        request: &AddDeployKeyRequest,
    ) -> Result<DeployKey, ApiError> {
        self.post(&format!("/projects/{project_id}/keys"), request)
            .await
    }

    async fn remove_deploy_key(&self, project_id: u64, key_id: u64) -> Result<(), ApiError> {
        self.delete(&format!("/projects/{project_id}/keys/{key_id}"))
            .await
    }

    async fn list_hooks(&self, project_id: u64) -> Result<Vec<ProjectHook>, ApiError> {
        self.get_paged(&format!("/projects/{project_id}/hooks")).await
    }

    async fn add_hook(
        &self,
        project_id: u64,
        request: &HookPayload,
    ) -> Result<ProjectHook, ApiError> {
        self.post(&format!("/projects/{project_id}/hooks"), request)
            .await
    }

    async fn update_hook(
        &self,
        project_id: u64,
        hook_id: u64,
        request: &HookPayload,
    ) -> Result<ProjectHook, ApiError> {
        self.put(&format!("/projects/{project_id}/hooks/{hook_id}"), request)
            .await
    }

    async fn remove_hook(&self, project_id: u64, hook_id: u64) -> Result<(), ApiError> {
        self.delete(&format!("/projects/{project_id}/hooks/{hook_id}"))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::Credentials;
    use mockito::Matcher;

    async fn client(server: &mut mockito::ServerGuard) -> GitlabClient {
        server
            .mock("GET", "/api/v3/user")
            .with_status(200)
            .with_body(r#"{"id": 1}"#)
            .create_async()
            .await;
        GitlabClient::authenticate(&Credentials::token(server.url(), "secret"))
            .await
            .unwrap()
            .with_per_page(2)
    }

    #[tokio::test]
    async fn test_project_by_path_scans_until_match() {
        let mut server = mockito::Server::new_async().await;
        let client = client(&mut server).await;

        server
            .mock("GET", "/api/v3/projects/all")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("page".into(), "1".into()),
                Matcher::UrlEncoded("per_page".into(), "2".into()),
            ]))
            .with_status(200)
            .with_body(
                r#"[
                    {"id": 1, "name": "a", "path": "a", "path_with_namespace": "ns/a"},
                    {"id": 2, "name": "b", "path": "b", "path_with_namespace": "ns/b"}
                ]"#,
            )
            .create_async()
            .await;
        server
            .mock("GET", "/api/v3/projects/all")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("page".into(), "2".into()),
                Matcher::UrlEncoded("per_page".into(), "2".into()),
            ]))
            .with_status(200)
            .with_body(r#"[{"id": 3, "name": "c", "path": "c", "path_with_namespace": "ns/c"}]"#)
            .create_async()
            .await;

        let found = client.project_by_path("ns/c").await.unwrap();
        assert_eq!(found.unwrap().id, 3);

        let missing = client.project_by_path("ns/zzz").await.unwrap();
        assert!(missing.is_none());
    }

    #[tokio::test]
    async fn test_project_by_numeric_id_goes_direct() {
        let mut server = mockito::Server::new_async().await;
        let client = client(&mut server).await;
        server
            .mock("GET", "/api/v3/projects/42")
            .with_status(200)
            .with_body(r#"{"id": 42, "name": "x", "path": "x", "path_with_namespace": "ns/x"}"#)
            .create_async()
            .await;

        let found = client.project_by_path("42").await.unwrap();
        assert_eq!(found.unwrap().path_with_namespace, "ns/x");
    }

    #[tokio::test]
    async fn test_group_by_path_matches_path_or_name() {
        let mut server = mockito::Server::new_async().await;
        let client = client(&mut server).await;
        server
            .mock("GET", "/api/v3/groups")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("page".into(), "1".into()),
                Matcher::UrlEncoded("per_page".into(), "2".into()),
            ]))
            .with_status(200)
            .with_body(r#"[{"id": 7, "name": "Team A", "path": "teamA"}]"#)
            .create_async()
            .await;

        let by_path = client.group_by_path("teamA").await.unwrap();
        assert_eq!(by_path.unwrap().id, 7);
        let by_name = client.group_by_path("Team A").await.unwrap();
        assert_eq!(by_name.unwrap().id, 7);
    }
}
