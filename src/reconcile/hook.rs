//
//  gitlab-state
//  reconcile/hook.rs
//
//  Created by Ngonidzashe Mangudya on 2026/02/21.
//  Copyright (c) 2026 IAMNGONI. All rights reserved.
//

//! Webhook presence and absence on a project.

use tracing::debug;

use crate::api::GitlabApi;

use super::{HookState, Outcome, ReconcileError, Reconciler};

impl<'a, A: GitlabApi> Reconciler<'a, A> {
    /// Ensures a webhook for `url` is registered on the project at
    /// `project_path` with the declared event flags.
    ///
    /// Hooks are matched by URL. Declared event flags that differ on the
    /// live hook are corrected in place; unset flags are unmanaged and
    /// keep their remote values.
    ///
    /// The outcome target is `project_path:url`, so batch callers can
    /// attribute results without parsing messages.
    ///
    /// A missing project fails with [`ReconcileError::ParentNotFound`].
    pub async fn hook_present(
        &self,
        project_path: &str,
        url: &str,
        desired: &HookState,
    ) -> Outcome {
        match self.hook_present_inner(project_path, url, desired).await {
            Ok(outcome) => outcome,
            Err(error) => Outcome::failed(format!("{project_path}:{url}"), error),
        }
    }

    async fn hook_present_inner(
        &self,
        project_path: &str,
        url: &str,
        desired: &HookState,
    ) -> Result<Outcome, ReconcileError> {
        let target = format!("{project_path}:{url}");
        let project = self
            .resolve_project(project_path)
            .await?
            .ok_or_else(|| ReconcileError::ParentNotFound(project_path.to_string()))?;

        let hooks = self.api().list_hooks(project.id).await?;
        if let Some(existing) = hooks.iter().find(|h| h.url == url) {
            let (payload, changed) = desired.diff(existing);
            if changed.is_empty() {
                return Ok(Outcome::unchanged(
                    target,
                    format!("hook \"{url}\" is already registered on \"{project_path}\""),
                ));
            }
            debug!(project = %project_path, hook = %url, fields = ?changed, "updating drifted hook");
            self.api().update_hook(project.id, existing.id, &payload).await?;
            return Ok(Outcome::updated(
                target,
                format!("hook \"{url}\" has been updated ({})", changed.join(", ")),
            ));
        }

        debug!(project = %project_path, hook = %url, "registering hook");
        self.api().add_hook(project.id, &desired.to_payload(url)).await?;
        Ok(Outcome::created(
            target,
            format!("hook \"{url}\" has been registered on \"{project_path}\""),
        ))
    }

    /// Ensures no webhook for `url` is registered on the project at
    /// `project_path`.
    pub async fn hook_absent(&self, project_path: &str, url: &str) -> Outcome {
        match self.hook_absent_inner(project_path, url).await {
            Ok(outcome) => outcome,
            Err(error) => Outcome::failed(format!("{project_path}:{url}"), error),
        }
    }

    async fn hook_absent_inner(
        &self,
        project_path: &str,
        url: &str,
    ) -> Result<Outcome, ReconcileError> {
        let target = format!("{project_path}:{url}");
        let Some(project) = self.resolve_project(project_path).await? else {
            return Ok(Outcome::unchanged(
                target,
                format!("project \"{project_path}\" is absent, nothing to remove"),
            ));
        };

        let hooks = self.api().list_hooks(project.id).await?;
        let Some(existing) = hooks.iter().find(|h| h.url == url) else {
            return Ok(Outcome::unchanged(
                target,
                format!("hook \"{url}\" is already absent from \"{project_path}\""),
            ));
        };

        debug!(project = %project_path, hook = %url, id = existing.id, "removing hook");
        match self.api().remove_hook(project.id, existing.id).await {
            Ok(()) => Ok(Outcome::deleted(
                target,
                format!("hook \"{url}\" has been removed from \"{project_path}\""),
            )),
            Err(e) if e.is_not_found() => Ok(Outcome::unchanged(
                target,
                format!("hook \"{url}\" is already absent from \"{project_path}\""),
            )),
            Err(e) => Err(e.into()),
        }
    }
}
