//! Authenticated request wrapper for the Strava API.
//!
//! One internal send path shared by GET, form PUT, and multipart POST:
//! injects the bearer token, applies the bounded connect timeout, decodes
//! the body as JSON on any status, and turns a 401 into token invalidation.

use std::sync::Arc;

use reqwest::StatusCode;
use tracing::{debug, warn};

use crate::auth::AuthManager;
use crate::config::CONNECT_TIMEOUT;
use crate::error::{Error, Result};

/// HTTP client for authenticated Strava API calls.
pub struct ApiClient {
    client: reqwest::Client,
    auth: Arc<AuthManager>,
}

impl ApiClient {
    /// Create a new API client.
    pub fn new(auth: Arc<AuthManager>) -> Self {
        let client = reqwest::Client::builder()
            .connect_timeout(CONNECT_TIMEOUT)
            .build()
            .expect("Failed to build HTTP client");

        Self { client, auth }
    }

    /// Create with a custom reqwest client (testing, custom TLS).
    pub fn with_client(client: reqwest::Client, auth: Arc<AuthManager>) -> Self {
        Self { client, auth }
    }

    /// Authenticated GET with params encoded as a query string.
    ///
    /// Any non-401 status returns the decoded body - the API's own error
    /// envelope passes through to the caller.
    pub async fn get(&self, endpoint: &str, params: &[(&str, &str)]) -> Result<serde_json::Value> {
        let url = self.auth.endpoints().api_url(endpoint);
        debug!(endpoint, "GET");

        let request = self.client.get(&url).query(params);
        let (_, body) = self.execute(request).await?;
        Ok(body)
    }

    /// Authenticated PUT with a form-encoded body.
    pub async fn put_form(
        &self,
        endpoint: &str,
        params: &[(&str, &str)],
    ) -> Result<serde_json::Value> {
        let url = self.auth.endpoints().api_url(endpoint);
        debug!(endpoint, "PUT");

        let request = self.client.put(&url).form(params);
        let (_, body) = self.execute(request).await?;
        Ok(body)
    }

    /// Authenticated multipart POST. Returns the status alongside the body
    /// so callers can apply endpoint-specific success rules (uploads: 201).
    pub async fn post_multipart(
        &self,
        endpoint: &str,
        form: reqwest::multipart::Form,
    ) -> Result<(StatusCode, serde_json::Value)> {
        let url = self.auth.endpoints().api_url(endpoint);
        debug!(endpoint, "POST (multipart)");

        let request = self.client.post(&url).multipart(form);
        self.execute(request).await
    }

    /// Shared send path: bearer header, transport error mapping, JSON
    /// decoding, and 401 handling.
    async fn execute(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<(StatusCode, serde_json::Value)> {
        let token = self.auth.bearer_token().await?;

        let response = request
            .bearer_auth(&token)
            .send()
            .await
            .map_err(|e| if e.is_timeout() { Error::Timeout } else { Error::Network(e) })?;

        let status = response.status();

        if status == StatusCode::UNAUTHORIZED {
            // The token is dead; purge it everywhere before reporting.
            warn!("API returned 401 - invalidating access token");
            self.auth.invalidate().await?;
            return Err(Error::AuthorizationExpired);
        }

        let text = response.text().await.map_err(Error::Network)?;
        let body: serde_json::Value = serde_json::from_str(&text)?;
        Ok((status, body))
    }
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient").field("auth", &self.auth).finish()
    }
}
