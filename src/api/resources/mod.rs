//
//  gitlab-state
//  api/resources/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/02/21.
//  Copyright (c) 2026 IAMNGONI. All rights reserved.
//

//! Wire Types for GitLab Resources
//!
//! Serde structs for the four resource kinds this crate manages, plus the
//! request payloads used to create and edit them.
//!
//! # Submodules
//!
//! - [`groups`]: Groups (top-level namespaces)
//! - [`projects`]: Projects addressed by path-with-namespace
//! - [`deploy_keys`]: Per-project deploy keys, identified by title
//! - [`hooks`]: Per-project webhooks, identified by target URL
//!
//! # Notes
//!
//! - Record structs mirror what the remote API returns; optional fields use
//!   `#[serde(default)]` so partial responses still deserialize
//! - Request payloads mark every optional field with
//!   `skip_serializing_if = "Option::is_none"`, which is what makes edits
//!   partial: absent fields are left at their current remote value

pub mod deploy_keys;
pub mod groups;
pub mod hooks;
pub mod projects;

pub use deploy_keys::*;
pub use groups::*;
pub use hooks::*;
pub use projects::*;
