//
//  gitlab-state
//  reconcile/deploy_key.rs
//
//  Created by Ngonidzashe Mangudya on 2026/02/21.
//  Copyright (c) 2026 IAMNGONI. All rights reserved.
//

//! Deploy key presence and absence on a project.

use tracing::debug;

use crate::api::resources::AddDeployKeyRequest;
use crate::api::GitlabApi;

use super::{DeployKeyState, Outcome, ReconcileError, Reconciler};

impl<'a, A: GitlabApi> Reconciler<'a, A> {
    /// Ensures a deploy key titled `title` is attached to the project at
    /// `project_path`.
    ///
    /// Keys are matched by title. A key that exists under the declared
    /// title is left alone even when its material differs, since the
    /// remote side has no edit operation for keys; replacing material
    /// means declaring the old title absent first.
    ///
    /// The outcome target is `project_path:title`, so batch callers can
    /// attribute results without parsing messages.
    ///
    /// A missing project fails with [`ReconcileError::ParentNotFound`].
    pub async fn deploy_key_present(
        &self,
        project_path: &str,
        title: &str,
        desired: &DeployKeyState,
    ) -> Outcome {
        match self.deploy_key_present_inner(project_path, title, desired).await {
            Ok(outcome) => outcome,
            Err(error) => Outcome::failed(format!("{project_path}:{title}"), error),
        }
    }

    async fn deploy_key_present_inner(
        &self,
        project_path: &str,
        title: &str,
        desired: &DeployKeyState,
    ) -> Result<Outcome, ReconcileError> {
        let target = format!("{project_path}:{title}");
        let project = self
            .resolve_project(project_path)
            .await?
            .ok_or_else(|| ReconcileError::ParentNotFound(project_path.to_string()))?;

        let keys = self.api().list_deploy_keys(project.id).await?;
        if keys.iter().any(|k| k.title == title) {
            return Ok(Outcome::unchanged(
                target,
                format!("deploy key \"{title}\" is already attached to \"{project_path}\""),
            ));
        }

        debug!(project = %project_path, key = %title, "attaching deploy key");
        let request = AddDeployKeyRequest {
            title: title.to_string(),
            key: desired.key.clone(),
            can_push: desired.can_push,
        };
        self.api().add_deploy_key(project.id, &request).await?;
        Ok(Outcome::created(
            target,
            format!("deploy key \"{title}\" has been attached to \"{project_path}\""),
        ))
    }

    /// Ensures no deploy key titled `title` is attached to the project at
    /// `project_path`.
    ///
    /// A missing project means there is nothing to detach; that is a
    /// success with no change.
    pub async fn deploy_key_absent(&self, project_path: &str, title: &str) -> Outcome {
        match self.deploy_key_absent_inner(project_path, title).await {
            Ok(outcome) => outcome,
            Err(error) => Outcome::failed(format!("{project_path}:{title}"), error),
        }
    }

    async fn deploy_key_absent_inner(
        &self,
        project_path: &str,
        title: &str,
    ) -> Result<Outcome, ReconcileError> {
        let target = format!("{project_path}:{title}");
        let Some(project) = self.resolve_project(project_path).await? else {
            return Ok(Outcome::unchanged(
                target,
                format!("project \"{project_path}\" is absent, nothing to detach"),
            ));
        };

        let keys = self.api().list_deploy_keys(project.id).await?;
        let Some(existing) = keys.iter().find(|k| k.title == title) else {
            return Ok(Outcome::unchanged(
                target,
                format!("deploy key \"{title}\" is already absent from \"{project_path}\""),
            ));
        };

        debug!(project = %project_path, key = %title, id = existing.id, "detaching deploy key");
        match self.api().remove_deploy_key(project.id, existing.id).await {
            Ok(()) => Ok(Outcome::deleted(
                target,
                format!("deploy key \"{title}\" has been detached from \"{project_path}\""),
            )),
            Err(e) if e.is_not_found() => Ok(Outcome::unchanged(
                target,
                format!("deploy key \"{title}\" is already absent from \"{project_path}\""),
            )),
            Err(e) => Err(e.into()),
        }
    }
}
