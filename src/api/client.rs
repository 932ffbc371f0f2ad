//
//  gitlab-state
//  api/client.rs
//
//  Created by Ngonidzashe Mangudya on 2026/02/21.
//  Copyright (c) 2026 IAMNGONI. All rights reserved.
//

//! # HTTP Client Wrapper for the GitLab API
//!
//! This module provides the core HTTP client for interacting with a GitLab
//! instance. It handles authentication, request/response serialization, and
//! translation of HTTP status codes into [`ApiError`] values.
//!
//! ## Features
//!
//! - Session login (username/password) or private token authentication
//! - `PRIVATE-TOKEN` header injection on every request
//! - JSON serialization/deserialization
//! - Status code mapping into the [`ApiError`] taxonomy
//! - Transparent page-by-page enumeration for list endpoints
//!
//! ## Lifecycle
//!
//! A client is constructed, used for one reconciliation, and dropped.
//! Nothing is cached across constructions; every call is
//! authenticate-then-act.

use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::debug;
use url::Url;

use crate::api::common::{ApiError, Pager, DEFAULT_PER_PAGE};
use crate::auth::{AuthMode, ConnectionOverrides, Credentials};
use crate::config::Settings;

/// Parses a GitLab API error response and extracts a useful message.
///
/// GitLab returns errors in one of two formats:
///
/// ```json
/// {"message": "404 Project Not Found"}
/// ```
///
/// ```json
/// {"error": "invalid_grant"}
/// ```
///
/// If neither field is present the raw body is used, prefixed with the
/// status code.
///
/// # Parameters
///
/// * `status` - The HTTP status code
/// * `body` - The raw error response body
fn error_message(status: StatusCode, body: &str) -> String {
    if let Ok(json) = serde_json::from_str::<serde_json::Value>(body) {
        if let Some(message) = json.get("message") {
            // "message" may be a string or a field-to-errors map.
            if let Some(message) = message.as_str() {
                return message.to_string();
            }
            return message.to_string();
        }
        if let Some(error) = json.get("error").and_then(|e| e.as_str()) {
            return error.to_string();
        }
    }
    format!("API error ({status}): {body}")
}

/// Translates a non-success HTTP response into an [`ApiError`].
///
/// | Status | Error |
/// |--------|-------|
/// | 400 | `Conflict` when the body reports a taken key, else `BadRequest` |
/// | 401 | `AuthFailed` |
/// | 403 | `Forbidden` |
/// | 404 | `NotFound` |
/// | 409 | `Conflict` |
/// | 5xx | `ServerError` |
/// | anything else | `Unknown` |
///
/// GitLab reports duplicate natural keys on create as a 400 with a
/// "has already been taken" message at least as often as a 409, so both are
/// normalized to [`ApiError::Conflict`].
pub fn map_api_error(status: StatusCode, body: &str) -> ApiError {
    let message = error_message(status, body);
    match status {
        StatusCode::BAD_REQUEST => {
            if message.contains("already been taken") || message.contains("already exists") {
                ApiError::Conflict(message)
            } else {
                ApiError::BadRequest(message)
            }
        }
        StatusCode::UNAUTHORIZED => ApiError::AuthFailed(message),
        StatusCode::FORBIDDEN => ApiError::Forbidden(message),
        StatusCode::NOT_FOUND => ApiError::NotFound(message),
        StatusCode::CONFLICT => ApiError::Conflict(message),
        status if status.is_server_error() => ApiError::ServerError(message),
        _ => ApiError::Unknown(message),
    }
}

/// Response payload of a session login.
#[derive(Debug, Deserialize)]
struct Session {
    /// The private token to use for subsequent requests.
    private_token: String,
}

/// Minimal record returned by the current-user endpoint.
///
/// Only used to validate a configured token during authentication.
#[derive(Debug, Deserialize)]
struct CurrentUser {
    #[allow(dead_code)]
    id: u64,
}

/// The authenticated HTTP client for one GitLab instance.
///
/// This client handles all HTTP communication with the remote API:
/// building request URLs, applying the `PRIVATE-TOKEN` header, serializing
/// bodies, and mapping error responses into [`ApiError`] values.
///
/// # Creating a Client
///
/// ```rust,no_run
/// use gitlab_state::api::GitlabClient;
/// use gitlab_state::auth::Credentials;
///
/// # async fn example() -> Result<(), gitlab_state::api::common::ApiError> {
/// let credentials = Credentials::token("https://gitlab.example.com", "secret");
/// let client = GitlabClient::authenticate(&credentials).await?;
/// # Ok(())
/// # }
/// ```
///
/// # Authentication
///
/// [`authenticate`](Self::authenticate) performs the whole handshake:
/// token mode validates the token against the current-user endpoint,
/// password mode exchanges the login for a private token via the session
/// endpoint. Either way a failed handshake surfaces as
/// [`ApiError::AuthFailed`] before any resource operation runs.
#[derive(Debug)]
pub struct GitlabClient {
    /// The underlying HTTP client.
    http: Client,

    /// API root, `{base_url}/api/v3`.
    api_root: String,

    /// Private token applied to every request.
    token: String,

    /// Page size used for list enumeration.
    per_page: u32,
}

impl GitlabClient {
    /// Authenticates against the instance described by `credentials`.
    ///
    /// - Token mode validates the token with a current-user request
    /// - Password mode performs a session login and adopts the returned
    ///   private token
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::BadRequest`] when the base URL does not parse,
    /// [`ApiError::AuthFailed`] when the instance rejects the credentials,
    /// or [`ApiError::Unreachable`] when the host cannot be reached.
    pub async fn authenticate(credentials: &Credentials) -> Result<Self, ApiError> {
        let http = Client::builder()
            .user_agent(format!("gitlab-state/{}", crate::VERSION))
            .build()?;
        let base = Url::parse(&credentials.base_url).map_err(|e| {
            ApiError::BadRequest(format!(
                "invalid base url \"{}\": {e}",
                credentials.base_url
            ))
        })?;
        let api_root = format!("{}/api/v3", base.as_str().trim_end_matches('/'));

        let client = match &credentials.auth {
            AuthMode::Token(token) => {
                let client = Self {
                    http,
                    api_root,
                    token: token.clone(),
                    per_page: DEFAULT_PER_PAGE,
                };
                // Reject a bad token here rather than on the first resource call.
                client.get::<CurrentUser>("/user").await.map_err(|e| match e {
                    ApiError::NotFound(m) | ApiError::Forbidden(m) => ApiError::AuthFailed(m),
                    other => other,
                })?;
                client
            }
            AuthMode::Password { user, password } => {
                let url = format!("{api_root}/session");
                debug!(url = %url, user = %user, "session login");
                let response = http
                    .post(&url)
                    .json(&serde_json::json!({ "login": user, "password": password }))
                    .send()
                    .await?;
                let status = response.status();
                if !status.is_success() {
                    let text = response.text().await.unwrap_or_default();
                    return Err(map_api_error(status, &text));
                }
                let session: Session = response.json().await?;
                Self {
                    http,
                    api_root,
                    token: session.private_token,
                    per_page: DEFAULT_PER_PAGE,
                }
            }
        };
        Ok(client)
    }

    /// Resolves credentials from overrides layered over settings and
    /// authenticates in one step.
    ///
    /// This is the per-call entry point used by batch callers: resolve,
    /// authenticate, act, drop.
    ///
    /// # Errors
    ///
    /// Same as [`authenticate`](Self::authenticate).
    pub async fn connect(
        overrides: &ConnectionOverrides,
        settings: &Settings,
    ) -> Result<Self, ApiError> {
        let credentials = Credentials::resolve(overrides, settings);
        Ok(Self::authenticate(&credentials)
            .await?
            .with_per_page(settings.per_page))
    }

    /// Sets the page size used for list enumeration.
    ///
    /// # Parameters
    ///
    /// * `per_page` - Entries per page; values of 0 are clamped to 1
    pub fn with_per_page(mut self, per_page: u32) -> Self {
        self.per_page = per_page.max(1);
        self
    }

    /// Returns the API root this client targets, `{base_url}/api/v3`.
    pub fn api_root(&self) -> &str {
        &self.api_root
    }

    /// Returns the page size used for list enumeration.
    pub fn per_page(&self) -> u32 {
        self.per_page
    }

    /// Makes an HTTP GET request to the specified path.
    ///
    /// # Type Parameters
    ///
    /// * `T` - The type to deserialize the response JSON into
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails, the response status is not
    /// successful, or the body cannot be deserialized into `T`.
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let url = format!("{}{}", self.api_root, path);
        debug!(url = %url, "GET");
        let response = self
            .http
            .get(&url)
            .header("PRIVATE-TOKEN", &self.token)
            .send()
            .await?;
        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(map_api_error(status, &text));
        }
        Ok(response.json().await?)
    }

    /// Makes an HTTP GET request, treating 404 as absence.
    ///
    /// # Returns
    ///
    /// `Ok(Some(T))` on success, `Ok(None)` when the resource does not
    /// exist, and `Err` for every other failure.
    pub async fn get_optional<T: DeserializeOwned>(
        &self,
        path: &str,
    ) -> Result<Option<T>, ApiError> {
        match self.get(path).await {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.is_not_found() => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Makes an HTTP POST request with a JSON body.
    ///
    /// # Type Parameters
    ///
    /// * `T` - The type to deserialize the response JSON into
    /// * `B` - The type of the request body
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Conflict`] when the remote reports a natural key
    /// collision, or any other mapped error.
    pub async fn post<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let url = format!("{}{}", self.api_root, path);
        debug!(url = %url, "POST");
        let response = self
            .http
            .post(&url)
            .header("PRIVATE-TOKEN", &self.token)
            .json(body)
            .send()
            .await?;
        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(map_api_error(status, &text));
        }
        Ok(response.json().await?)
    }

    /// Makes an HTTP PUT request with a JSON body.
    ///
    /// Used for partial updates: the payload types serialize only the
    /// fields being changed.
    ///
    /// # Type Parameters
    ///
    /// * `T` - The type to deserialize the response JSON into
    /// * `B` - The type of the request body
    pub async fn put<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let url = format!("{}{}", self.api_root, path);
        debug!(url = %url, "PUT");
        let response = self
            .http
            .put(&url)
            .header("PRIVATE-TOKEN", &self.token)
            .json(body)
            .send()
            .await?;
        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(map_api_error(status, &text));
        }
        Ok(response.json().await?)
    }

    /// Makes an HTTP DELETE request to the specified path.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::NotFound`] when the target does not exist.
    pub async fn delete(&self, path: &str) -> Result<(), ApiError> {
        let url = format!("{}{}", self.api_root, path);
        debug!(url = %url, "DELETE");
        let response = self
            .http
            .delete(&url)
            .header("PRIVATE-TOKEN", &self.token)
            .send()
            .await?;
        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(map_api_error(status, &text));
        }
        Ok(())
    }

    /// Enumerates a paginated list endpoint to completion.
    ///
    /// Issues as many page requests as needed, stopping when a page returns
    /// fewer entries than the configured page size or no entries at all.
    /// The full result set is materialized; callers doing bulk work should
    /// call this once and reuse the result rather than re-enumerating per
    /// resource.
    ///
    /// # Type Parameters
    ///
    /// * `T` - The element type of the list
    ///
    /// # Parameters
    ///
    /// * `path` - The list endpoint path, without pagination parameters
    pub async fn get_paged<T: DeserializeOwned>(&self, path: &str) -> Result<Vec<T>, ApiError> {
        let mut pager = Pager::new(path, self.per_page);
        let mut all = Vec::new();
        while !pager.is_done() {
            let batch: Vec<T> = self.get(&pager.query()).await?;
            let batch_len = batch.len();
            all.extend(batch);
            pager.advance(batch_len);
        }
        debug!(path = %path, total = all.len(), "paged enumeration complete");
        Ok(all)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::resources::Project;
    use mockito::Matcher;

    async fn token_client(server: &mut mockito::ServerGuard) -> GitlabClient {
        let _user = server
            .mock("GET", "/api/v3/user")
            .match_header("PRIVATE-TOKEN", "secret")
            .with_status(200)
            .with_body(r#"{"id": 1, "username": "admin"}"#)
            .create_async()
            .await;
        GitlabClient::authenticate(&Credentials::token(server.url(), "secret"))
            .await
            .unwrap()
    }

    fn project_page(start: u64, len: u64) -> String {
        let items: Vec<serde_json::Value> = (start..start + len)
            .map(|i| {
                serde_json::json!({
                    "id": i,
                    "name": format!("p{i}"),
                    "path": format!("p{i}"),
                    "path_with_namespace": format!("ns/p{i}")
                })
            })
            .collect();
        serde_json::to_string(&items).unwrap()
    }

    #[tokio::test]
    async fn test_password_login_adopts_private_token() {
        let mut server = mockito::Server::new_async().await;
        let session = server
            .mock("POST", "/api/v3/session")
            .match_body(Matcher::Json(serde_json::json!({
                "login": "admin",
                "password": "verybadpass"
            })))
            .with_status(201)
            .with_body(r#"{"id": 1, "private_token": "abc123"}"#)
            .create_async()
            .await;
        let user = server
            .mock("GET", "/api/v3/user")
            .match_header("PRIVATE-TOKEN", "abc123")
            .with_status(200)
            .with_body(r#"{"id": 1}"#)
            .create_async()
            .await;

        let credentials = Credentials::password(server.url(), "admin", "verybadpass");
        let client = GitlabClient::authenticate(&credentials).await.unwrap();
        // The adopted token is applied to subsequent requests.
        let _: CurrentUser = client.get("/user").await.unwrap();

        session.assert_async().await;
        user.assert_async().await;
    }

    #[tokio::test]
    async fn test_rejected_password_is_auth_failed() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/api/v3/session")
            .with_status(401)
            .with_body(r#"{"message": "401 Unauthorized"}"#)
            .create_async()
            .await;

        let credentials = Credentials::password(server.url(), "admin", "wrong");
        let err = GitlabClient::authenticate(&credentials).await.unwrap_err();
        assert!(matches!(err, ApiError::AuthFailed(_)), "{err:?}");
    }

    #[tokio::test]
    async fn test_rejected_token_is_auth_failed() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/api/v3/user")
            .with_status(401)
            .with_body(r#"{"message": "401 Unauthorized"}"#)
            .create_async()
            .await;

        let credentials = Credentials::token(server.url(), "bogus");
        let err = GitlabClient::authenticate(&credentials).await.unwrap_err();
        assert!(matches!(err, ApiError::AuthFailed(_)), "{err:?}");
    }

    #[tokio::test]
    async fn test_invalid_base_url_is_rejected_before_any_request() {
        let credentials = Credentials::token("not a url", "secret");
        let err = GitlabClient::authenticate(&credentials).await.unwrap_err();
        assert!(matches!(err, ApiError::BadRequest(_)), "{err:?}");
    }

    #[tokio::test]
    async fn test_unreachable_host() {
        // Nothing listens on this port.
        let credentials = Credentials::token("http://127.0.0.1:1", "secret");
        let err = GitlabClient::authenticate(&credentials).await.unwrap_err();
        assert!(matches!(err, ApiError::Unreachable(_)), "{err:?}");
    }

    #[tokio::test]
    async fn test_delete_missing_resource_is_not_found() {
        let mut server = mockito::Server::new_async().await;
        let client = token_client(&mut server).await;
        server
            .mock("DELETE", "/api/v3/projects/999")
            .with_status(404)
            .with_body(r#"{"message": "404 Project Not Found"}"#)
            .create_async()
            .await;

        let err = client.delete("/projects/999").await.unwrap_err();
        assert!(matches!(err, ApiError::NotFound(_)), "{err:?}");
    }

    #[tokio::test]
    async fn test_duplicate_create_is_conflict() {
        let mut server = mockito::Server::new_async().await;
        let client = token_client(&mut server).await;
        server
            .mock("POST", "/api/v3/projects")
            .with_status(400)
            .with_body(r#"{"message": {"name": ["has already been taken"]}}"#)
            .create_async()
            .await;

        let err = client
            .post::<Project, _>("/projects", &serde_json::json!({"name": "dupe"}))
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Conflict(_)), "{err:?}");
    }

    #[tokio::test]
    async fn test_409_is_conflict() {
        assert!(matches!(
            map_api_error(StatusCode::CONFLICT, r#"{"message": "taken"}"#),
            ApiError::Conflict(_)
        ));
        assert!(matches!(
            map_api_error(StatusCode::BAD_REQUEST, r#"{"message": "bad visibility"}"#),
            ApiError::BadRequest(_)
        ));
        assert!(matches!(
            map_api_error(StatusCode::INTERNAL_SERVER_ERROR, "boom"),
            ApiError::ServerError(_)
        ));
    }

    #[tokio::test]
    async fn test_get_optional_maps_404_to_none() {
        let mut server = mockito::Server::new_async().await;
        let client = token_client(&mut server).await;
        server
            .mock("GET", "/api/v3/projects/7")
            .with_status(404)
            .with_body(r#"{"message": "404 Not Found"}"#)
            .create_async()
            .await;

        let project: Option<Project> = client.get_optional("/projects/7").await.unwrap();
        assert!(project.is_none());
    }

    #[tokio::test]
    async fn test_paged_enumeration_returns_all_distinct_entries() {
        let mut server = mockito::Server::new_async().await;
        let client = token_client(&mut server).await;

        // 2500 projects at 1000 per page: two full pages and a short third.
        for (page, start, len) in [(1u32, 0u64, 1000u64), (2, 1000, 1000), (3, 2000, 500)] {
            server
                .mock("GET", "/api/v3/projects/all")
                .match_query(Matcher::AllOf(vec![
                    Matcher::UrlEncoded("page".into(), page.to_string()),
                    Matcher::UrlEncoded("per_page".into(), "1000".into()),
                ]))
                .with_status(200)
                .with_body(project_page(start, len))
                .create_async()
                .await;
        }

        let projects: Vec<Project> = client.get_paged("/projects/all").await.unwrap();
        assert_eq!(projects.len(), 2500);
        let distinct: std::collections::HashSet<u64> = projects.iter().map(|p| p.id).collect();
        assert_eq!(distinct.len(), 2500, "no duplicates, no omissions");
    }

    #[tokio::test]
    async fn test_paged_enumeration_stops_on_empty_first_page() {
        let mut server = mockito::Server::new_async().await;
        let client = token_client(&mut server).await;
        server
            .mock("GET", "/api/v3/projects/all")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("page".into(), "1".into()),
                Matcher::UrlEncoded("per_page".into(), "1000".into()),
            ]))
            .with_status(200)
            .with_body("[]")
            .create_async()
            .await;

        let projects: Vec<Project> = client.get_paged("/projects/all").await.unwrap();
        assert!(projects.is_empty());
    }
}
