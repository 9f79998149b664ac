//! HTTP transport for authenticated API calls.

pub mod http;

pub use http::ApiClient;
