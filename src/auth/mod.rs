//
//  gitlab-state
//  auth/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/02/21.
//  Copyright (c) 2026 IAMNGONI. All rights reserved.
//

//! # Authentication Module
//!
//! Credential types for connecting to a GitLab instance and the layered
//! resolution that produces them.
//!
//! ## Supported Authentication Methods
//!
//! - **Private Token**: the token is sent as the `PRIVATE-TOKEN` header on
//!   every request. Preferred when available.
//! - **Username/Password**: the client performs a session login once per
//!   construction and adopts the private token the remote hands back.
//!
//! ## Resolution Layering
//!
//! Credentials are resolved once per client construction, from three layers:
//! explicit per-call [`ConnectionOverrides`] win over process-wide
//! [`Settings`](crate::config::Settings) (config file plus `GITLAB_*`
//! environment), which win over built-in defaults. A token in any layer
//! selects token authentication over password authentication.
//!
//! Credentials are immutable per call and never cached across calls: every
//! reconciliation constructs a fresh client, trading round trips for the
//! absence of stale-session bugs.
//!
//! ## Example
//!
//! ```rust
//! use gitlab_state::auth::{AuthMode, ConnectionOverrides, Credentials};
//! use gitlab_state::config::Settings;
//!
//! let overrides = ConnectionOverrides {
//!     token: Some("432432432432432".to_string()),
//!     ..Default::default()
//! };
//! let credentials = Credentials::resolve(&overrides, &Settings::default());
//! assert!(matches!(credentials.auth, AuthMode::Token(_)));
//! ```

use crate::config::Settings;

/// The authentication mechanism to use against the remote instance.
///
/// # Variants
///
/// - `Token`: private token sent as the `PRIVATE-TOKEN` header
/// - `Password`: session login with username and password, exchanging them
///   for a private token once per client construction
///
/// # Notes
///
/// - Token authentication is selected whenever a token is present in any
///   configuration layer
#[derive(Debug, Clone)]
pub enum AuthMode {
    /// Private token authentication.
    Token(String),

    /// Username/password session authentication.
    Password {
        /// The login user name.
        user: String,
        /// The login password.
        password: String,
    },
}

/// Connection credentials for one client construction.
///
/// Holds the instance base URL and the selected authentication mode.
/// Constructed either directly via [`Credentials::token`] /
/// [`Credentials::password`], or through the layered
/// [`Credentials::resolve`].
///
/// # Fields
///
/// * `base_url` - Base URL of the GitLab instance (e.g., `https://gitlab.example.com`)
/// * `auth` - The authentication mode to use
///
/// # Example
///
/// ```rust
/// use gitlab_state::auth::Credentials;
///
/// let credentials = Credentials::token("https://gitlab.example.com", "secret");
/// assert_eq!(credentials.base_url, "https://gitlab.example.com");
/// ```
#[derive(Debug, Clone)]
pub struct Credentials {
    /// Base URL of the GitLab instance, without the `/api/...` suffix.
    pub base_url: String,

    /// The authentication mode to use.
    pub auth: AuthMode,
}

impl Credentials {
    /// Creates token credentials for the given instance.
    pub fn token(base_url: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            auth: AuthMode::Token(token.into()),
        }
    }

    /// Creates username/password credentials for the given instance.
    pub fn password(
        base_url: impl Into<String>,
        user: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            base_url: base_url.into(),
            auth: AuthMode::Password {
                user: user.into(),
                password: password.into(),
            },
        }
    }

    /// Resolves credentials from explicit overrides layered over settings.
    ///
    /// Each field is looked up in the overrides first and falls back to the
    /// process-wide settings. A token found in either layer selects
    /// [`AuthMode::Token`]; otherwise username/password is used.
    ///
    /// # Parameters
    ///
    /// * `overrides` - Explicit per-call connection arguments
    /// * `settings` - Process-wide defaults (config file plus environment)
    ///
    /// # Example
    ///
    /// ```rust
    /// use gitlab_state::auth::{AuthMode, ConnectionOverrides, Credentials};
    /// use gitlab_state::config::Settings;
    ///
    /// // No overrides and no token configured: password mode with defaults.
    /// let credentials = Credentials::resolve(&ConnectionOverrides::default(), &Settings::default());
    /// assert!(matches!(credentials.auth, AuthMode::Password { .. }));
    /// ```
    pub fn resolve(overrides: &ConnectionOverrides, settings: &Settings) -> Self {
        let base_url = overrides
            .url
            .clone()
            .unwrap_or_else(|| settings.url.clone());

        let token = overrides.token.clone().or_else(|| settings.token.clone());
        if let Some(token) = token {
            return Self::token(base_url, token);
        }

        let user = overrides
            .user
            .clone()
            .unwrap_or_else(|| settings.user.clone());
        let password = overrides
            .password
            .clone()
            .or_else(|| settings.password.clone())
            .unwrap_or_default();
        Self::password(base_url, user, password)
    }
}

/// Explicit per-call connection arguments.
///
/// Every field is optional; `None` delegates to the process-wide
/// [`Settings`](crate::config::Settings). This is the "explicit override"
/// layer of credential resolution.
///
/// # Example
///
/// ```rust
/// use gitlab_state::auth::ConnectionOverrides;
///
/// let overrides = ConnectionOverrides {
///     url: Some("https://gitlab.other.com".to_string()),
///     ..Default::default()
/// };
/// ```
#[derive(Debug, Clone, Default)]
pub struct ConnectionOverrides {
    /// Overrides the instance base URL.
    pub url: Option<String>,

    /// Overrides the login user name.
    pub user: Option<String>,

    /// Overrides the login password.
    pub password: Option<String>,

    /// Overrides the private token. Presence selects token authentication.
    pub token: Option<String>,
}
