//! OAuth 2.0 authorization-code flow.
//!
//! This module provides the two pure pieces of the flow:
//! - Authorization URL construction (no side effects; the embedding
//!   application decides how to present or redirect)
//! - Exchange of a one-time authorization code for an access token
//!
//! # Flow
//!
//! 1. Build the authorization URL and send the user there
//! 2. The provider redirects back with a `code` query parameter
//! 3. Exchange the code for an access token (single use)

use serde::Deserialize;
use tracing::{debug, warn};

use crate::auth::ClientCredentials;
use crate::error::{Error, Result};

/// Build the provider authorization URL.
///
/// Pure function of the credentials and the authorize base URL:
/// `{base}?client_id=&response_type=code&redirect_uri=&scope=`, with all
/// values percent-encoded.
///
/// # Example
///
/// ```
/// use strava_gateway::auth::{oauth, ClientCredentials};
///
/// let creds = ClientCredentials::new("42", "secret", "https://ex.com/cb", "write");
/// let url = oauth::build_authorize_url(&creds, strava_gateway::config::AUTHORIZE_URL);
///
/// assert!(url.contains("client_id=42"));
/// assert!(url.contains("response_type=code"));
/// assert!(url.contains("redirect_uri=https%3A%2F%2Fex.com%2Fcb"));
/// assert!(url.contains("scope=write"));
/// ```
pub fn build_authorize_url(credentials: &ClientCredentials, authorize_base: &str) -> String {
    format!(
        "{}?client_id={}&response_type=code&redirect_uri={}&scope={}",
        authorize_base,
        urlencoding::encode(&credentials.client_id),
        urlencoding::encode(&credentials.redirect_uri),
        urlencoding::encode(&credentials.scope),
    )
}

/// Response from the token exchange endpoint.
///
/// `access_token` is optional on purpose: a 200 without the field is an
/// exchange failure, not a deserialization crash.
#[derive(Debug, Deserialize)]
struct TokenResponse {
    #[serde(default)]
    access_token: Option<String>,
}

/// Exchange a one-time authorization code for an access token.
///
/// Sends `client_id`, `client_secret`, and `code` as a form body. The call
/// carries no bearer header - there is no token yet.
///
/// # Errors
///
/// - [`Error::ExchangeFailed`] on a non-200 response or a 200 lacking
///   `access_token` (the code has likely expired or been used already)
/// - [`Error::Timeout`] / [`Error::Network`] on transport failure
/// - [`Error::Decode`] if a 200 body is not valid JSON
pub async fn exchange_code(
    client: &reqwest::Client,
    credentials: &ClientCredentials,
    token_url: &str,
    code: &str,
) -> Result<String> {
    debug!("Exchanging authorization code for an access token");

    let response = client
        .post(token_url)
        .form(&[
            ("client_id", credentials.client_id.as_str()),
            ("client_secret", credentials.client_secret.as_str()),
            ("code", code),
        ])
        .send()
        .await
        .map_err(|e| if e.is_timeout() { Error::Timeout } else { Error::Network(e) })?;

    let status = response.status();
    let body = response.text().await.map_err(Error::Network)?;

    if !status.is_success() {
        // The code has probably expired or has been used more than once.
        warn!(status = status.as_u16(), "Token exchange rejected");
        return Err(Error::ExchangeFailed(format!(
            "token endpoint returned {}",
            status.as_u16()
        )));
    }

    let token_response: TokenResponse = serde_json::from_str(&body)?;
    match token_response.access_token {
        Some(token) if !token.is_empty() => {
            debug!("Token exchange successful");
            Ok(token)
        }
        _ => {
            warn!("Token exchange response lacked access_token");
            Err(Error::ExchangeFailed(
                "response did not contain an access_token".into(),
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn creds() -> ClientCredentials {
        ClientCredentials::new("42", "s3cret", "https://ex.com/cb", "write")
    }

    #[test]
    fn test_authorize_url_contains_required_params() {
        let url = build_authorize_url(&creds(), crate::config::AUTHORIZE_URL);

        assert!(url.starts_with("https://www.strava.com/oauth/authorize?"));
        assert!(url.contains("client_id=42"));
        assert!(url.contains("response_type=code"));
        assert!(url.contains("scope=write"));
    }

    #[test]
    fn test_authorize_url_percent_encodes_redirect() {
        let url = build_authorize_url(&creds(), crate::config::AUTHORIZE_URL);

        assert!(url.contains("redirect_uri=https%3A%2F%2Fex.com%2Fcb"));
        assert!(!url.contains("redirect_uri=https://"));
    }

    #[test]
    fn test_authorize_url_encodes_scope_with_comma() {
        let creds = ClientCredentials::new("42", "s3cret", "https://ex.com/cb", "read,write");
        let url = build_authorize_url(&creds, crate::config::AUTHORIZE_URL);
        assert!(url.contains("scope=read%2Cwrite"));
    }

    #[test]
    fn test_token_response_tolerates_missing_field() {
        let parsed: TokenResponse = serde_json::from_str(r#"{"error":"invalid"}"#).unwrap();
        assert!(parsed.access_token.is_none());

        let parsed: TokenResponse =
            serde_json::from_str(r#"{"access_token":"abc","athlete":{"id":1}}"#).unwrap();
        assert_eq!(parsed.access_token.as_deref(), Some("abc"));
    }
}
