//! Error types for strava-gateway.

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for strava-gateway.
#[derive(Debug, Error)]
pub enum Error {
    // ── Authorization ────────────────────────────────────────────────────────
    /// No usable access token - send the user to the authorize URL and rebuild
    /// the client with the resulting code.
    #[error("Authorization required - redirect the user to {authorize_url}")]
    AuthorizationRequired {
        /// URL of the provider's authorization page.
        authorize_url: String,
    },

    /// The authorization-code exchange did not yield an access token.
    /// The code has probably expired or has already been used.
    #[error("Unable to acquire a valid access token: {0}")]
    ExchangeFailed(String),

    /// The API reported the current token as invalid (HTTP 401).
    /// The cached token has been purged; the caller must re-authorize.
    #[error("Access token rejected by the API - re-authorization required")]
    AuthorizationExpired,

    // ── API ──────────────────────────────────────────────────────────────────
    /// Activity upload was not accepted (non-201 response).
    #[error("Upload rejected: {message}")]
    UploadRejected {
        /// Message field from the server's error body.
        message: String,
    },

    // ── Storage ──────────────────────────────────────────────────────────────
    /// Token cache I/O error.
    #[error("Storage I/O error at {path}: {message}")]
    StorageIo {
        /// Path that caused the error.
        path: PathBuf,
        /// Error description.
        message: String,
    },

    // ── Infrastructure ───────────────────────────────────────────────────────
    /// Network/HTTP error.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Request timed out before the server responded.
    #[error("Request timed out")]
    Timeout,

    /// Response body was not valid JSON.
    #[error("Malformed response body: {0}")]
    Decode(#[from] serde_json::Error),

    /// Local file I/O error (e.g. reading an activity file for upload).
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid or incomplete client configuration.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Returns true if this error means the caller must run the
    /// authorization flow again.
    #[must_use]
    pub fn requires_reauth(&self) -> bool {
        matches!(
            self,
            Error::AuthorizationRequired { .. } | Error::AuthorizationExpired
        )
    }

    /// Creates a storage I/O error.
    #[must_use]
    pub fn storage_io(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::StorageIo {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// Convenience type alias.
pub type Result<T> = std::result::Result<T, Error>;
