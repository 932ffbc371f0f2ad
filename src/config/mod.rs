//
//  gitlab-state
//  config/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/02/21.
//  Copyright (c) 2026 IAMNGONI. All rights reserved.
//

//! # Configuration Module
//!
//! Process-wide connection settings for the GitLab client, loaded from a
//! TOML file and overlaid with environment variables.
//!
//! ## Configuration File Location
//!
//! Settings are stored in platform-specific directories:
//!
//! - **Linux**: `~/.config/gitlab-state/config.toml`
//! - **macOS**: `~/Library/Application Support/gitlab-state/config.toml`
//! - **Windows**: `C:\Users\<User>\AppData\Roaming\gitlab-state\config.toml`
//!
//! ## Example Configuration File
//!
//! ```toml
//! url = "https://gitlab.domain.com"
//! user = "admin"
//! password = "verybadpass"
//! # or, for token based authentication:
//! # token = "432432432432432"
//! per_page = 1000
//! ```
//!
//! ## Environment Overrides
//!
//! Each setting can be overridden by an environment variable, applied on top
//! of the file: `GITLAB_URL`, `GITLAB_USER`, `GITLAB_PASSWORD`,
//! `GITLAB_TOKEN`, `GITLAB_PER_PAGE`. Explicit per-call
//! [`ConnectionOverrides`](crate::auth::ConnectionOverrides) sit above both.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use gitlab_state::config::Settings;
//!
//! let settings = Settings::load()?;
//! println!("Instance: {}", settings.url);
//! # Ok::<(), anyhow::Error>(())
//! ```

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::api::common::DEFAULT_PER_PAGE;

/// Process-wide connection settings.
///
/// Supplies the default credentials and page size used when a call does not
/// override them explicitly. All fields have serde defaults so a partial (or
/// absent) file still loads.
///
/// # Fields
///
/// * `url` - Base URL of the GitLab instance
/// * `user` - Login user name for password authentication
/// * `password` - Login password for password authentication
/// * `token` - Private token; presence selects token authentication
/// * `per_page` - Page size for list enumeration
///
/// # Default Values
///
/// | Field | Default |
/// |-------|---------|
/// | `url` | `"https://localhost/"` |
/// | `user` | `"admin"` |
/// | `password` | `None` |
/// | `token` | `None` |
/// | `per_page` | `1000` |
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Base URL of the GitLab instance.
    #[serde(default = "default_url")]
    pub url: String,

    /// Login user name used when no token is configured.
    #[serde(default = "default_user")]
    pub user: String,

    /// Login password used when no token is configured.
    #[serde(default)]
    pub password: Option<String>,

    /// Private token. When present, token authentication is selected.
    #[serde(default)]
    pub token: Option<String>,

    /// Page size requested from paginated list endpoints.
    #[serde(default = "default_per_page")]
    pub per_page: u32,
}

/// Returns the default instance URL.
///
/// Mirrors the historical module default of `https://localhost/`.
fn default_url() -> String {
    "https://localhost/".to_string()
}

/// Returns the default login user name.
fn default_user() -> String {
    "admin".to_string()
}

/// Returns the default page size for list enumeration.
fn default_per_page() -> u32 {
    DEFAULT_PER_PAGE
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            url: default_url(),
            user: default_user(),
            password: None,
            token: None,
            per_page: default_per_page(),
        }
    }
}

impl Settings {
    /// Returns the platform-specific path of the configuration file.
    ///
    /// # Returns
    ///
    /// `Some(path)` when a home directory can be determined, `None` in
    /// environments without one (some containers, CI sandboxes).
    pub fn config_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "gitlab-state")
            .map(|dirs| dirs.config_dir().join("config.toml"))
    }

    /// Loads settings from the default location, then applies environment
    /// overrides.
    ///
    /// A missing configuration file is not an error; defaults are used.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load() -> Result<Self> {
        let mut settings = match Self::config_path() {
            Some(path) if path.exists() => Self::load_from(&path)?,
            _ => Self::default(),
        };
        settings.apply_env();
        Ok(settings)
    }

    /// Loads settings from an explicit file path, without environment
    /// overrides.
    ///
    /// # Parameters
    ///
    /// * `path` - Path to a TOML settings file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_from(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read settings file {}", path.display()))?;
        toml::from_str(&raw)
            .with_context(|| format!("failed to parse settings file {}", path.display()))
    }

    /// Applies `GITLAB_*` environment variables on top of the current
    /// values.
    ///
    /// An unparsable `GITLAB_PER_PAGE` is ignored rather than failing the
    /// whole load.
    pub fn apply_env(&mut self) {
        if let Ok(url) = std::env::var("GITLAB_URL") {
            self.url = url;
        }
        if let Ok(user) = std::env::var("GITLAB_USER") {
            self.user = user;
        }
        if let Ok(password) = std::env::var("GITLAB_PASSWORD") {
            self.password = Some(password);
        }
        if let Ok(token) = std::env::var("GITLAB_TOKEN") {
            self.token = Some(token);
        }
        if let Ok(per_page) = std::env::var("GITLAB_PER_PAGE") {
            if let Ok(per_page) = per_page.parse() {
                self.per_page = per_page;
            }
        }
    }
}
