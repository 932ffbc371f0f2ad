//
//  gitlab-state
//  api/common/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/02/21.
//  Copyright (c) 2026 IAMNGONI. All rights reserved.
//

//! Common API Types for the GitLab Client
//!
//! This module provides shared types used across the GitLab API client:
//! the unified error taxonomy and the pagination helpers.
//!
//! # Overview
//!
//! - [`ApiError`] - Unified error type for all API operations
//! - [`Pager`] - Page-number based pagination cursor (re-exported from
//!   the [`pagination`] submodule)
//!
//! # Example
//!
//! ```rust
//! use gitlab_state::api::common::ApiError;
//!
//! fn handle_result<T>(result: Result<T, ApiError>) {
//!     match result {
//!         Ok(_) => println!("Success!"),
//!         Err(ApiError::AuthFailed(reason)) => println!("Check credentials: {}", reason),
//!         Err(ApiError::NotFound(resource)) => println!("Resource not found: {}", resource),
//!         Err(e) => println!("Error: {}", e),
//!     }
//! }
//! ```
//!
//! # Notes
//!
//! - All types implement `Debug` for easy inspection
//! - The `Unreachable` variant converts automatically from `reqwest::Error`

use thiserror::Error;

mod pagination;

pub use pagination::*;

/// Unified error type for all GitLab API operations.
///
/// `ApiError` covers the failure scenarios a caller can observe when talking
/// to a GitLab instance. HTTP status codes are translated into these variants
/// by the client; callers never see raw status codes.
///
/// # Variants
///
/// | Variant | Description | HTTP Status |
/// |---------|-------------|-------------|
/// | `AuthFailed` | Credentials rejected by the remote instance | 401 |
/// | `Forbidden` | Insufficient permissions | 403 |
/// | `NotFound` | Requested resource does not exist | 404 |
/// | `Conflict` | Natural key already taken on create | 409, 400 (duplicate) |
/// | `BadRequest` | Invalid request parameters | 400 |
/// | `ServerError` | Remote instance failure | 5xx |
/// | `Unreachable` | Network or host failure | N/A |
/// | `Unknown` | Unexpected or unclassified errors | N/A |
///
/// # Example
///
/// ```rust
/// use gitlab_state::api::common::ApiError;
///
/// fn delete_missing() -> Result<(), ApiError> {
///     Err(ApiError::NotFound("project 'ns/missing'".to_string()))
/// }
///
/// match delete_missing() {
///     Err(ApiError::NotFound(resource)) => eprintln!("Could not find: {}", resource),
///     other => eprintln!("Unexpected: {:?}", other),
/// }
/// ```
///
/// # Notes
///
/// - GitLab signals duplicate natural keys either as 409 or as 400 with a
///   "has already been taken" message; both map to [`ApiError::Conflict`]
/// - `AuthFailed` and `Unreachable` are fatal for the current call and are
///   never retried by this crate
#[derive(Error, Debug)]
pub enum ApiError {
    /// Authentication failed due to invalid credentials or an invalid token.
    ///
    /// # Parameters
    ///
    /// - `0` - Detailed reason for the authentication failure
    #[error("Authentication failed: {0}")]
    AuthFailed(String),

    /// Access to the resource is forbidden.
    ///
    /// The authenticated user does not have sufficient permissions to perform
    /// the requested operation. This maps to HTTP 403 responses.
    ///
    /// # Parameters
    ///
    /// - `0` - Description of the forbidden action or resource
    #[error("Permission denied: {0}")]
    Forbidden(String),

    /// The requested resource was not found.
    ///
    /// This typically indicates a 404 HTTP response, meaning the project,
    /// group, deploy key or hook does not exist or is not accessible.
    ///
    /// # Parameters
    ///
    /// - `0` - Description of the resource that was not found
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// A natural key collision occurred on create.
    ///
    /// The resource being created already exists remotely. Likely caused by a
    /// lost race between two callers converging the same identity; surfaced
    /// to the caller, never retried.
    ///
    /// # Parameters
    ///
    /// - `0` - Message from the remote instance describing the collision
    #[error("Conflict: {0}")]
    Conflict(String),

    /// The request was malformed or contained invalid parameters.
    ///
    /// # Parameters
    ///
    /// - `0` - Description of what was wrong with the request
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// An internal error occurred on the GitLab instance.
    ///
    /// This indicates a problem on the server side (HTTP 5xx responses).
    ///
    /// # Parameters
    ///
    /// - `0` - Error message or details from the server
    #[error("Server error: {0}")]
    ServerError(String),

    /// A network-level error occurred during the request.
    ///
    /// This covers connection failures, timeouts, DNS resolution errors,
    /// and other transport-layer issues. The whole reconciliation may be
    /// retried by the caller.
    ///
    /// # Parameters
    ///
    /// - `0` - The underlying `reqwest::Error` with network details
    #[error("Host unreachable: {0}")]
    Unreachable(#[from] reqwest::Error),

    /// An unknown or unexpected error occurred.
    ///
    /// # Parameters
    ///
    /// - `0` - Description of the unknown error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

impl ApiError {
    /// Checks whether this error means the target resource is absent.
    ///
    /// Used by the reconciler to distinguish "nothing to do" from a real
    /// failure when converging towards absence.
    ///
    /// # Returns
    ///
    /// Returns `true` for [`ApiError::NotFound`], `false` otherwise.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}
