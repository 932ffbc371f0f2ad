//
//  gitlab-state
//  reconcile/group.rs
//
//  Created by Ngonidzashe Mangudya on 2026/02/21.
//  Copyright (c) 2026 IAMNGONI. All rights reserved.
//

//! Group presence and absence.

use tracing::debug;

use crate::api::resources::CreateGroupRequest;
use crate::api::GitlabApi;

use super::{GroupState, Outcome, ReconcileError, Reconciler};

impl<'a, A: GitlabApi> Reconciler<'a, A> {
    /// Ensures a group exists at `path` with the declared attributes.
    ///
    /// Existing groups are matched by path or display name. When the group
    /// is created, `path` doubles as its display name.
    pub async fn group_present(&self, path: &str, desired: &GroupState) -> Outcome {
        match self.group_present_inner(path, desired).await {
            Ok(outcome) => outcome,
            Err(error) => Outcome::failed(path, error),
        }
    }

    async fn group_present_inner(
        &self,
        path: &str,
        desired: &GroupState,
    ) -> Result<Outcome, ReconcileError> {
        if let Some(current) = self.api().group_by_path(path).await? {
            let (edit, changed) = desired.diff(&current);
            if edit.is_empty() {
                return Ok(Outcome::unchanged(
                    path,
                    format!("group \"{path}\" is already in the desired state"),
                ));
            }
            debug!(group = %path, fields = ?changed, "updating drifted group");
            self.api().update_group(current.id, &edit).await?;
            return Ok(Outcome::updated(
                path,
                format!("group \"{path}\" has been updated ({})", changed.join(", ")),
            ));
        }

        debug!(group = %path, "creating missing group");
        let request = CreateGroupRequest {
            name: path.to_string(),
            path: path.to_string(),
            description: desired.description.clone(),
        };
        self.api().create_group(&request).await?;
        Ok(Outcome::created(
            path,
            format!("group \"{path}\" has been created"),
        ))
    }

    /// Ensures no group exists at `path`.
    pub async fn group_absent(&self, path: &str) -> Outcome {
        match self.group_absent_inner(path).await {
            Ok(outcome) => outcome,
            Err(error) => Outcome::failed(path, error),
        }
    }

    async fn group_absent_inner(&self, path: &str) -> Result<Outcome, ReconcileError> {
        let Some(current) = self.api().group_by_path(path).await? else {
            return Ok(Outcome::unchanged(
                path,
                format!("group \"{path}\" is already absent"),
            ));
        };

        debug!(group = %path, id = current.id, "deleting group");
        match self.api().delete_group(current.id).await {
            Ok(()) => Ok(Outcome::deleted(
                path,
                format!("group \"{path}\" has been deleted"),
            )),
            Err(e) if e.is_not_found() => Ok(Outcome::unchanged(
                path,
                format!("group \"{path}\" is already absent"),
            )),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::reconcile::testing::FakeGitlab;
    use crate::reconcile::{Action, GroupState, Reconciler};

    #[tokio::test]
    async fn test_group_converges_then_settles() {
        let fake = FakeGitlab::new();
        let reconciler = Reconciler::new(&fake);

        let desired = GroupState {
            description: Some("team A".to_string()),
        };

        let outcome = reconciler.group_present("teamA", &desired).await;
        assert_eq!(outcome.action, Action::Created);

        let outcome = reconciler.group_present("teamA", &desired).await;
        assert_eq!(outcome.action, Action::None);
        assert!(!outcome.changed);
        assert_eq!(fake.creates(), 1);
        assert_eq!(fake.updates(), 0);
    }

    #[tokio::test]
    async fn test_group_description_drift_is_corrected() {
        let fake = FakeGitlab::new().with_group("teamA");
        let reconciler = Reconciler::new(&fake);

        let desired = GroupState {
            description: Some("owners of team A services".to_string()),
        };
        let outcome = reconciler.group_present("teamA", &desired).await;
        assert_eq!(outcome.action, Action::Updated);
        assert_eq!(outcome.message, "group \"teamA\" has been updated (description)");

        let state = fake.state.lock().unwrap();
        assert_eq!(
            state.groups[0].description.as_deref(),
            Some("owners of team A services")
        );
    }

    #[tokio::test]
    async fn test_group_absent_is_idempotent() {
        let fake = FakeGitlab::new().with_group("teamA");
        let reconciler = Reconciler::new(&fake);

        let outcome = reconciler.group_absent("teamA").await;
        assert_eq!(outcome.action, Action::Deleted);

        let outcome = reconciler.group_absent("teamA").await;
        assert_eq!(outcome.action, Action::None);
        assert!(outcome.is_ok());
    }
}
