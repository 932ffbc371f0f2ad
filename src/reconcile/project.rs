//
//  gitlab-state
//  reconcile/project.rs
//
//  Created by Ngonidzashe Mangudya on 2026/02/21.
//  Copyright (c) 2026 IAMNGONI. All rights reserved.
//

//! Project presence and absence.

use tracing::debug;

use crate::api::resources::CreateProjectRequest;
use crate::api::GitlabApi;

use super::{Outcome, ProjectState, ReconcileError, Reconciler};

impl<'a, A: GitlabApi> Reconciler<'a, A> {
    /// Ensures a project exists at `path` with the declared attributes.
    ///
    /// When the path carries a namespace segment (`group/name`), the group
    /// must already exist; it is resolved by path or display name and its
    /// id becomes the new project's namespace. A missing group fails the
    /// reconciliation with [`ReconcileError::ParentNotFound`] and nothing
    /// is created.
    ///
    /// An existing project is diffed attribute by attribute; only declared
    /// attributes that drifted are sent in the update, so unmanaged fields
    /// keep their remote values.
    pub async fn project_present(&self, path: &str, desired: &ProjectState) -> Outcome {
        match self.project_present_inner(path, desired).await {
            Ok(outcome) => outcome,
            Err(error) => Outcome::failed(path, error),
        }
    }

    async fn project_present_inner(
        &self,
        path: &str,
        desired: &ProjectState,
    ) -> Result<Outcome, ReconcileError> {
        if let Some(current) = self.resolve_project(path).await? {
            let (edit, changed) = desired.diff(&current);
            if edit.is_empty() {
                return Ok(Outcome::unchanged(
                    path,
                    format!("project \"{path}\" is already in the desired state"),
                ));
            }
            debug!(project = %path, fields = ?changed, "updating drifted project");
            self.api().update_project(current.id, &edit).await?;
            return Ok(Outcome::updated(
                path,
                format!("project \"{path}\" has been updated ({})", changed.join(", ")),
            ));
        }

        let (namespace_id, name) = match path.rsplit_once('/') {
            Some((namespace, name)) => {
                let group = self
                    .api()
                    .group_by_path(namespace)
                    .await?
                    .ok_or_else(|| ReconcileError::ParentNotFound(namespace.to_string()))?;
                (Some(group.id), name)
            }
            None => (None, path),
        };

        debug!(project = %path, "creating missing project");
        let request = CreateProjectRequest {
            name: name.to_string(),
            namespace_id,
            description: desired.description.clone(),
            default_branch: desired.default_branch.clone(),
            visibility_level: desired.visibility_level,
        };
        self.api().create_project(&request).await?;
        Ok(Outcome::created(
            path,
            format!("project \"{path}\" has been created"),
        ))
    }

    /// Ensures no project exists at `path`.
    ///
    /// An already-absent project is a success with no change, as is a
    /// delete that races with another remover.
    pub async fn project_absent(&self, path: &str) -> Outcome {
        match self.project_absent_inner(path).await {
            Ok(outcome) => outcome,
            Err(error) => Outcome::failed(path, error),
        }
    }

    async fn project_absent_inner(&self, path: &str) -> Result<Outcome, ReconcileError> {
        let Some(current) = self.resolve_project(path).await? else {
            return Ok(Outcome::unchanged(
                path,
                format!("project \"{path}\" is already absent"),
            ));
        };

        debug!(project = %path, id = current.id, "deleting project");
        match self.api().delete_project(current.id).await {
            Ok(()) => Ok(Outcome::deleted(
                path,
                format!("project \"{path}\" has been deleted"),
            )),
            Err(e) if e.is_not_found() => Ok(Outcome::unchanged(
                path,
                format!("project \"{path}\" is already absent"),
            )),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::api::common::ApiError;
    use crate::api::resources::Visibility;
    use crate::reconcile::testing::FakeGitlab;
    use crate::reconcile::{Action, ProjectCache, ProjectState, ReconcileError, Reconciler};

    #[tokio::test]
    async fn test_missing_namespace_fails_without_creating() {
        let fake = FakeGitlab::new();
        let reconciler = Reconciler::new(&fake);

        let outcome = reconciler
            .project_present("ghosts/service1", &ProjectState::default())
            .await;

        assert!(!outcome.is_ok());
        assert!(!outcome.changed);
        assert!(matches!(
            outcome.error,
            Some(ReconcileError::ParentNotFound(ref ns)) if ns == "ghosts"
        ));
        assert_eq!(fake.creates(), 0);
    }

    #[tokio::test]
    async fn test_bare_path_creates_in_user_namespace() {
        let fake = FakeGitlab::new();
        let reconciler = Reconciler::new(&fake);

        let desired = ProjectState {
            visibility_level: Some(Visibility::Internal),
            ..Default::default()
        };
        let outcome = reconciler.project_present("sandbox", &desired).await;
        assert_eq!(outcome.action, Action::Created);

        let state = fake.state.lock().unwrap();
        let project = &state.projects[0];
        assert_eq!(project.path_with_namespace, "sandbox");
        assert!(project.namespace.is_none());
        assert_eq!(project.visibility_level, Some(Visibility::Internal));
    }

    #[tokio::test]
    async fn test_lost_create_race_surfaces_conflict() {
        let fake = FakeGitlab::new()
            .with_group("teamA")
            .with_project("teamA/service1");
        // A snapshot taken before another converger created the project:
        // the lookup misses, the create collides remotely.
        let reconciler = Reconciler::new(&fake).with_project_cache(ProjectCache::new(Vec::new()));

        let outcome = reconciler
            .project_present("teamA/service1", &ProjectState::default())
            .await;

        assert!(!outcome.is_ok());
        assert!(!outcome.changed);
        assert_eq!(outcome.action, Action::None);
        assert!(matches!(
            outcome.error,
            Some(ReconcileError::Api(ApiError::Conflict(_)))
        ));
        // One create attempt, never retried.
        assert_eq!(fake.creates(), 1);
    }

    #[tokio::test]
    async fn test_absent_is_idempotent() {
        let fake = FakeGitlab::new()
            .with_group("teamA")
            .with_project("teamA/service1");
        let reconciler = Reconciler::new(&fake);

        let outcome = reconciler.project_absent("teamA/service1").await;
        assert_eq!(outcome.action, Action::Deleted);
        assert!(outcome.changed);

        let outcome = reconciler.project_absent("teamA/service1").await;
        assert_eq!(outcome.action, Action::None);
        assert!(!outcome.changed);
        assert!(outcome.is_ok());
        assert_eq!(fake.deletes(), 1);
    }

    #[tokio::test]
    async fn test_unmanaged_attributes_survive_updates() {
        let fake = FakeGitlab::new().with_group("teamA");
        let reconciler = Reconciler::new(&fake);

        let initial = ProjectState {
            description: Some("svc".to_string()),
            default_branch: Some("master".to_string()),
            ..Default::default()
        };
        reconciler.project_present("teamA/service1", &initial).await;

        let partial = ProjectState {
            description: Some("svc v2".to_string()),
            ..Default::default()
        };
        let outcome = reconciler.project_present("teamA/service1", &partial).await;
        assert_eq!(outcome.action, Action::Updated);
        assert_eq!(
            outcome.message,
            "project \"teamA/service1\" has been updated (description)"
        );

        let state = fake.state.lock().unwrap();
        let project = &state.projects[0];
        assert_eq!(project.description.as_deref(), Some("svc v2"));
        assert_eq!(project.default_branch.as_deref(), Some("master"));
    }
}
