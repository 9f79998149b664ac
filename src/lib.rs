//! # strava-gateway
//!
//! Rust client library for the Strava V3 API.
//!
//! Manages the OAuth2 access-token lifecycle - explicit supply, on-disk
//! caching, authorization-code exchange, and automatic invalidation when the
//! API rejects a token - and provides an authenticated request layer for
//! GET, PUT, and activity-upload calls.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use strava_gateway::{ClientInit, Result, StravaClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let init = StravaClient::builder()
//!         .client_id("42")
//!         .client_secret("your-client-secret")
//!         .redirect_uri("https://example.com/callback")
//!         .scope("view_private")
//!         .cache_dir("/var/cache/strava")
//!         .build()
//!         .await?;
//!
//!     match init {
//!         ClientInit::Ready(client) => {
//!             let athlete = client.get("athlete", &[]).await?;
//!             println!("{}", athlete);
//!         }
//!         ClientInit::NeedsAuthorization { authorize_url } => {
//!             // Send the user here, then rebuild with .authorization_code(code)
//!             println!("Authorize at: {}", authorize_url);
//!         }
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Token lifecycle
//!
//! Construction resolves a token in strict order: explicit token, then the
//! cached token, then exchange of a supplied authorization code. With none
//! of the three available, [`ClientInit::NeedsAuthorization`] carries the
//! authorization URL for the embedding application's redirect mechanism.
//!
//! A mid-session 401 purges the token from memory and cache together and
//! surfaces [`Error::AuthorizationExpired`]; the caller decides whether to
//! run the flow again.

pub mod api;
pub mod auth;
pub mod client;
pub mod config;
pub mod error;
pub mod storage;
pub mod transport;

// Re-exports for ergonomic usage
pub use auth::{AuthManager, ClientCredentials};
pub use client::{ClientInit, StravaClient, StravaClientBuilder};
pub use error::{Error, Result};
pub use storage::{FileTokenStore, MemoryTokenStore, TokenStore};
