//
//  gitlab-state
//  reconcile/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/02/21.
//  Copyright (c) 2026 IAMNGONI. All rights reserved.
//

//! Idempotent convergence of declared resources.
//!
//! The [`Reconciler`] compares a declared resource against the live remote
//! state and performs at most one transition per call to close the gap:
//! create what is missing, patch what drifted, delete what should be
//! absent, and touch nothing that already matches. Every call reports a
//! structured [`Outcome`]; failures are captured there rather than
//! propagated, so a batch of reconciliations can always run to completion.
//!
//! Parent-scoped resources (deploy keys and hooks, and projects declared
//! under a group namespace) fail fast with
//! [`ReconcileError::ParentNotFound`] when their parent does not exist.
//! The reconciler never creates parents implicitly.
//!
//! # Example
//!
//! ```rust,no_run
//! use gitlab_state::api::GitlabClient;
//! use gitlab_state::auth::{ConnectionOverrides, Credentials};
//! use gitlab_state::config::Settings;
//! use gitlab_state::reconcile::{ProjectState, Reconciler};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let settings = Settings::load()?;
//! let client = GitlabClient::connect(&ConnectionOverrides::default(), &settings).await?;
//! let reconciler = Reconciler::new(&client);
//!
//! let desired = ProjectState {
//!     description: Some("payments service".to_string()),
//!     ..Default::default()
//! };
//! let outcome = reconciler.project_present("teamA/service1", &desired).await;
//! println!("{}: {}", outcome.action, outcome.message);
//! # Ok(())
//! # }
//! ```

mod deploy_key;
mod desired;
mod group;
mod hook;
mod outcome;
mod project;

pub use desired::{DeployKeyState, GroupState, HookState, ProjectState};
pub use outcome::{Action, Outcome, ReconcileError};

use std::collections::HashMap;

use crate::api::common::ApiError;
use crate::api::resources::Project;
use crate::api::GitlabApi;

/// Snapshot of every visible project, keyed by path-with-namespace.
///
/// Resolving a project by path costs a paginated scan on the remote side.
/// For bulk runs touching many projects, fetch the listing once and hand
/// the cache to the reconciler; lookups then cost nothing and the cache is
/// treated as authoritative for the run.
///
/// # Notes
///
/// A cache is a point-in-time snapshot. Projects created mid-run by the
/// same reconciler are not added to it, so group a run's project creations
/// before the resources that live under them, or skip the cache.
pub struct ProjectCache {
    by_path: HashMap<String, Project>,
}

impl ProjectCache {
    /// Builds a cache from an already-fetched project listing.
    pub fn new(projects: Vec<Project>) -> Self {
        let by_path = projects
            .into_iter()
            .map(|p| (p.path_with_namespace.clone(), p))
            .collect();
        Self { by_path }
    }

    /// Fetches the full project listing and builds a cache from it.
    pub async fn fetch<A: GitlabApi>(api: &A) -> Result<Self, ApiError> {
        Ok(Self::new(api.list_projects().await?))
    }

    /// Looks a project up by path-with-namespace.
    pub fn get(&self, path: &str) -> Option<&Project> {
        self.by_path.get(path)
    }

    /// Number of projects in the snapshot.
    pub fn len(&self) -> usize {
        self.by_path.len()
    }

    /// Checks whether the snapshot is empty.
    pub fn is_empty(&self) -> bool {
        self.by_path.is_empty()
    }
}

/// Drives declared resources towards the live remote state.
///
/// The reconciler borrows any [`GitlabApi`] implementation, so production
/// runs hand it a connected client while tests hand it an in-memory fake.
///
/// # Fields
///
/// * `api` - The client performing the remote calls
/// * `cache` - Optional project snapshot for bulk runs
pub struct Reconciler<'a, A: GitlabApi> {
    api: &'a A,
    cache: Option<ProjectCache>,
}

impl<'a, A: GitlabApi> Reconciler<'a, A> {
    /// Creates a reconciler resolving projects through the API directly.
    pub fn new(api: &'a A) -> Self {
        Self { api, cache: None }
    }

    /// Attaches a project snapshot; lookups use it instead of the API.
    pub fn with_project_cache(mut self, cache: ProjectCache) -> Self {
        self.cache = Some(cache);
        self
    }

    pub(crate) fn api(&self) -> &A {
        self.api
    }

    /// Resolves a project by path, through the cache when one is attached.
    pub(crate) async fn resolve_project(&self, path: &str) -> Result<Option<Project>, ApiError> {
        match &self.cache {
            Some(cache) => Ok(cache.get(path).cloned()),
            None => self.api.project_by_path(path).await,
        }
    }
}
