//! Authentication for the Strava API.
//!
//! Handles the access-token lifecycle: explicit supply, cache lookup,
//! authorization-code exchange, and invalidation on 401.

pub mod credentials;
pub mod manager;
pub mod oauth;

pub use credentials::ClientCredentials;
pub use manager::AuthManager;
