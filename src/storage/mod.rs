//! Token storage backends for persisting the Strava access token.
//!
//! Provides the [`TokenStore`] trait and implementations:
//! - [`FileTokenStore`] - single cache file in a validated directory
//! - [`MemoryTokenStore`] - in-memory (testing)

mod file;
mod memory;

use async_trait::async_trait;

pub use file::FileTokenStore;
pub use memory::MemoryTokenStore;

use crate::error::Result;

/// Trait for token storage backends.
///
/// The store holds a single slot: one cached access token per store. Absence
/// of a token is a normal outcome, not an error.
#[async_trait]
pub trait TokenStore: Send + Sync {
    /// Load the stored token, if any.
    async fn load(&self) -> Result<Option<String>>;

    /// Overwrite the single cache slot with `token`.
    async fn save(&self, token: &str) -> Result<()>;

    /// Remove the cached token. Clearing an already-empty slot is not an error.
    async fn clear(&self) -> Result<()>;

    /// Name of this storage backend.
    fn name(&self) -> &str {
        "unknown"
    }
}

/// Blanket impl for `Arc<T>`.
#[async_trait]
impl<T: TokenStore + ?Sized> TokenStore for std::sync::Arc<T> {
    async fn load(&self) -> Result<Option<String>> {
        (**self).load().await
    }
    async fn save(&self, token: &str) -> Result<()> {
        (**self).save(token).await
    }
    async fn clear(&self) -> Result<()> {
        (**self).clear().await
    }
    fn name(&self) -> &str {
        (**self).name()
    }
}
