//! Token lifecycle manager.
//!
//! Owns the current access token and orchestrates cache lookup, code
//! exchange, and invalidation when the API rejects the token.

use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info};

use crate::auth::{oauth, ClientCredentials};
use crate::config::Endpoints;
use crate::error::{Error, Result};
use crate::storage::TokenStore;

/// Manages the Strava access-token lifecycle.
///
/// At most one token is current at any time. The slot lives behind a
/// `RwLock` so the read-invalidate-write sequences stay safe when the
/// session is embedded in a concurrent host.
pub struct AuthManager {
    credentials: ClientCredentials,
    endpoints: Endpoints,
    /// Current token state.
    token: RwLock<Option<String>>,
    /// HTTP client for exchange requests.
    client: reqwest::Client,
    /// Storage backend holding the single cache slot.
    store: Arc<dyn TokenStore>,
}

impl AuthManager {
    /// Create a new auth manager with no token installed.
    pub fn new(
        credentials: ClientCredentials,
        endpoints: Endpoints,
        store: Arc<dyn TokenStore>,
        client: reqwest::Client,
    ) -> Self {
        Self {
            credentials,
            endpoints,
            token: RwLock::new(None),
            client,
            store,
        }
    }

    /// The credentials this session was built with.
    pub fn credentials(&self) -> &ClientCredentials {
        &self.credentials
    }

    /// The endpoint set this session talks to.
    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    /// The provider authorization URL for this credential set.
    ///
    /// Pure function of credentials and scope; always available.
    pub fn authorize_url(&self) -> String {
        oauth::build_authorize_url(&self.credentials, &self.endpoints.authorize_url)
    }

    /// Install an explicitly supplied token (memory only).
    ///
    /// The cache is never written here: cache contents always come from a
    /// successful exchange.
    pub async fn set_token(&self, token: String) {
        let mut slot = self.token.write().await;
        *slot = Some(token);
    }

    /// Attempt to load a token from the cache slot.
    pub async fn load_from_store(&self) -> Result<bool> {
        if let Some(token) = self.store.load().await? {
            info!(source = self.store.name(), "Loaded access token from cache");
            let mut slot = self.token.write().await;
            *slot = Some(token);
            return Ok(true);
        }
        Ok(false)
    }

    /// Exchange a one-time authorization code for an access token.
    ///
    /// On success the token is written to the cache slot before it becomes
    /// current; a save failure propagates and leaves the session without a
    /// token.
    pub async fn exchange_code(&self, code: &str) -> Result<()> {
        let token = oauth::exchange_code(
            &self.client,
            &self.credentials,
            &self.endpoints.token_url,
            code,
        )
        .await?;

        self.store.save(&token).await?;
        let mut slot = self.token.write().await;
        *slot = Some(token);
        info!("Access token acquired via code exchange");
        Ok(())
    }

    /// The current bearer token.
    ///
    /// Fails with [`Error::AuthorizationRequired`] (carrying the authorize
    /// URL) when no token is installed - a request is never issued with a
    /// token already known to be invalid.
    pub async fn bearer_token(&self) -> Result<String> {
        self.token
            .read()
            .await
            .clone()
            .ok_or_else(|| Error::AuthorizationRequired {
                authorize_url: self.authorize_url(),
            })
    }

    /// Whether a token is currently installed.
    pub async fn is_authenticated(&self) -> bool {
        self.token.read().await.is_some()
    }

    /// Purge the current token from memory and cache together.
    ///
    /// Called when the API reports the token invalid (401). The cache entry
    /// is removed before control returns; both copies go under one write
    /// lock so no request can observe a half-purged state.
    pub async fn invalidate(&self) -> Result<()> {
        let mut slot = self.token.write().await;
        self.store.clear().await?;
        *slot = None;
        debug!("Access token invalidated, cache purged");
        Ok(())
    }
}

impl std::fmt::Debug for AuthManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthManager")
            .field("credentials", &self.credentials)
            .field("store", &self.store.name())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryTokenStore;

    fn manager_with_store(store: Arc<dyn TokenStore>) -> AuthManager {
        AuthManager::new(
            ClientCredentials::new("42", "s3cret", "https://ex.com/cb", "write"),
            Endpoints::default(),
            store,
            reqwest::Client::new(),
        )
    }

    #[tokio::test]
    async fn test_bearer_token_requires_auth_when_empty() {
        let manager = manager_with_store(Arc::new(MemoryTokenStore::new()));

        let err = manager.bearer_token().await.unwrap_err();
        match err {
            Error::AuthorizationRequired { authorize_url } => {
                assert!(authorize_url.contains("client_id=42"));
            }
            other => panic!("expected AuthorizationRequired, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_set_token_does_not_touch_cache() {
        let store = Arc::new(MemoryTokenStore::new());
        let manager = manager_with_store(store.clone());

        manager.set_token("explicit".into()).await;

        assert_eq!(manager.bearer_token().await.unwrap(), "explicit");
        assert!(store.load().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_load_from_store() {
        let store = Arc::new(MemoryTokenStore::with_token("cached"));
        let manager = manager_with_store(store);

        assert!(manager.load_from_store().await.unwrap());
        assert_eq!(manager.bearer_token().await.unwrap(), "cached");

        let empty = manager_with_store(Arc::new(MemoryTokenStore::new()));
        assert!(!empty.load_from_store().await.unwrap());
    }

    #[tokio::test]
    async fn test_invalidate_purges_memory_and_cache() {
        let store = Arc::new(MemoryTokenStore::with_token("cached"));
        let manager = manager_with_store(store.clone());
        manager.load_from_store().await.unwrap();

        manager.invalidate().await.unwrap();

        assert!(!manager.is_authenticated().await);
        assert!(store.load().await.unwrap().is_none());
    }
}
