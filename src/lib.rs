//
//  gitlab-state
//  lib.rs
//
//  Created by Ngonidzashe Mangudya on 2026/02/21.
//  Copyright (c) 2026 IAMNGONI. All rights reserved.
//

//! # GitLab State Library
//!
//! A configuration-management library that converges GitLab resources
//! towards declared state over the REST API.
//!
//! ## Overview
//!
//! This library embeds in provisioning and automation tools that need
//! repeatable, idempotent management of a GitLab instance: declare what
//! should exist (groups, projects, deploy keys, webhooks), run the
//! reconciler, and get back a structured report of what was created,
//! updated, deleted, or already in place.
//!
//! ## Features
//!
//! - **Idempotent Convergence**: Re-running a reconciliation against a
//!   converged instance performs no writes
//! - **Partial Updates**: Only declared attributes are managed; everything
//!   else keeps its remote value
//! - **Token & Session Authentication**: Private tokens directly, or a
//!   user/password exchange through the session endpoint
//! - **Batch-Friendly**: Per-call structured outcomes instead of
//!   propagated failures, plus a project cache for bulk runs
//! - **Layered Configuration**: Config file, environment variables, and
//!   per-call overrides
//!
//! ## Module Structure
//!
//! - [`api`]: HTTP client, wire types, and the [`GitlabApi`] seam
//! - [`auth`]: Credential resolution and authentication modes
//! - [`config`]: Settings file and environment handling
//! - [`reconcile`]: The reconciler and declared-state types
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use gitlab_state::{ConnectionOverrides, GitlabClient, Reconciler, Settings};
//! use gitlab_state::reconcile::ProjectState;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let settings = Settings::load()?;
//! let client = GitlabClient::connect(&ConnectionOverrides::default(), &settings).await?;
//!
//! let reconciler = Reconciler::new(&client);
//! let desired = ProjectState {
//!     description: Some("payments service".to_string()),
//!     ..Default::default()
//! };
//! let outcome = reconciler.project_present("teamA/service1", &desired).await;
//! if outcome.changed {
//!     println!("{}", outcome.message);
//! }
//! # Ok(())
//! # }
//! ```

/// API client for the GitLab REST API.
///
/// Provides the authenticated HTTP client, the wire types for every managed
/// resource, and the [`GitlabApi`] trait the reconciler is generic over.
/// The client handles authentication, pagination, and error mapping.
pub mod api;

/// Credential resolution and authentication modes.
pub mod auth;

/// Settings file and environment variable handling.
pub mod config;

/// Idempotent convergence of declared resources.
///
/// The reconciler compares declared state against the live instance and
/// performs at most one transition per resource per call.
pub mod reconcile;

pub use api::{ApiError, GitlabApi, GitlabClient};
pub use auth::{ConnectionOverrides, Credentials};
pub use config::Settings;
pub use reconcile::{Action, Outcome, ProjectCache, ReconcileError, Reconciler};

/// Library version, taken from the crate manifest.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
