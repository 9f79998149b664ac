//! Endpoint constants and URL helpers for the Strava V3 API.

use std::time::Duration;

/// Authorization page shown to the user (GET).
pub const AUTHORIZE_URL: &str = "https://www.strava.com/oauth/authorize";

/// Token exchange endpoint (POST).
pub const TOKEN_EXCHANGE_URL: &str = "https://www.strava.com/oauth/token";

/// Base URL for authenticated API calls.
pub const API_BASE_URL: &str = "https://www.strava.com/api/v3";

/// File name of the single token cache slot inside the cache directory.
pub const ACCESS_TOKEN_FILENAME: &str = "strava-access-token";

/// Endpoint for activity file uploads (relative to the API base).
pub const UPLOADS_ENDPOINT: &str = "uploads";

/// Connect timeout for all HTTP requests - calls never block indefinitely.
pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(20);

/// Resolved endpoint set for one client instance.
///
/// Defaults to the production Strava endpoints; overridable through the
/// client builder for tests and staging environments.
#[derive(Debug, Clone)]
pub struct Endpoints {
    /// Authorization page base URL.
    pub authorize_url: String,
    /// Token exchange URL.
    pub token_url: String,
    /// API base URL.
    pub api_base: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            authorize_url: AUTHORIZE_URL.to_string(),
            token_url: TOKEN_EXCHANGE_URL.to_string(),
            api_base: API_BASE_URL.to_string(),
        }
    }
}

impl Endpoints {
    /// Returns the full URL for an API endpoint, e.g. `athlete/activities`.
    pub fn api_url(&self, endpoint: &str) -> String {
        format!(
            "{}/{}",
            self.api_base.trim_end_matches('/'),
            endpoint.trim_start_matches('/')
        )
    }
}
