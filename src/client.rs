//! Main client entry point.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::info;

use crate::api::uploads;
use crate::auth::{AuthManager, ClientCredentials};
use crate::config::{Endpoints, CONNECT_TIMEOUT};
use crate::error::{Error, Result};
use crate::storage::{FileTokenStore, TokenStore};
use crate::transport::ApiClient;

/// Outcome of client construction.
///
/// Construction either yields a usable authenticated client or tells the
/// caller to send the user through the authorization flow. The redirect
/// itself belongs to the embedding application (a web handler, a CLI); the
/// library only computes the target URL.
#[derive(Debug)]
pub enum ClientInit {
    /// A token was resolved; the client is ready for API calls.
    Ready(StravaClient),
    /// No usable token and no authorization code. Send the user to
    /// `authorize_url`, then rebuild with the code from the callback.
    NeedsAuthorization {
        /// URL of the provider's authorization page.
        authorize_url: String,
    },
}

impl ClientInit {
    /// Unwrap the ready client, turning the redirect case into
    /// [`Error::AuthorizationRequired`] for callers that treat an
    /// unauthorized start as fatal.
    pub fn ready(self) -> Result<StravaClient> {
        match self {
            ClientInit::Ready(client) => Ok(client),
            ClientInit::NeedsAuthorization { authorize_url } => {
                Err(Error::AuthorizationRequired { authorize_url })
            }
        }
    }
}

/// Strava API client.
///
/// # Examples
///
/// ```rust,no_run
/// use strava_gateway::{ClientInit, StravaClient};
///
/// # async fn example() -> strava_gateway::Result<()> {
/// let init = StravaClient::builder()
///     .client_id("42")
///     .client_secret("secret")
///     .redirect_uri("https://example.com/callback")
///     .scope("view_private")
///     .build()
///     .await?;
///
/// match init {
///     ClientInit::Ready(client) => {
///         let athlete = client.get("athlete", &[]).await?;
///         println!("{}", athlete);
///     }
///     ClientInit::NeedsAuthorization { authorize_url } => {
///         println!("Visit {} to authorize", authorize_url);
///     }
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct StravaClient {
    auth: Arc<AuthManager>,
    http: ApiClient,
}

impl StravaClient {
    /// Create a builder for configuring the client.
    pub fn builder() -> StravaClientBuilder {
        StravaClientBuilder::new()
    }

    /// Authenticated GET. Params are encoded as a URL query string.
    ///
    /// The decoded JSON body is returned for any non-401 status, including
    /// the API's own error envelopes.
    pub async fn get(&self, endpoint: &str, params: &[(&str, &str)]) -> Result<serde_json::Value> {
        self.http.get(endpoint, params).await
    }

    /// Authenticated PUT with a form-encoded body.
    pub async fn put(&self, endpoint: &str, params: &[(&str, &str)]) -> Result<serde_json::Value> {
        self.http.put_form(endpoint, params).await
    }

    /// Upload a pre-generated activity file (multipart POST, expects 201).
    pub async fn post_activity(
        &self,
        path: impl AsRef<Path>,
        activity_type: &str,
        data_type: &str,
    ) -> Result<serde_json::Value> {
        uploads::upload_activity(&self.http, path.as_ref(), activity_type, data_type).await
    }

    /// The provider authorization URL for this credential set.
    pub fn authorize_url(&self) -> String {
        self.auth.authorize_url()
    }

    /// Get a reference to the auth manager.
    pub fn auth(&self) -> &AuthManager {
        &self.auth
    }
}

/// Builder for [`StravaClient`].
pub struct StravaClientBuilder {
    client_id: Option<String>,
    client_secret: Option<String>,
    redirect_uri: Option<String>,
    scope: Option<String>,
    cache_dir: Option<PathBuf>,
    access_token: Option<String>,
    authorization_code: Option<String>,
    store: Option<Arc<dyn TokenStore>>,
    reqwest_client: Option<reqwest::Client>,
    endpoints: Endpoints,
}

impl StravaClientBuilder {
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            client_id: None,
            client_secret: None,
            redirect_uri: None,
            scope: None,
            cache_dir: None,
            access_token: None,
            authorization_code: None,
            store: None,
            reqwest_client: None,
            endpoints: Endpoints::default(),
        }
    }

    /// Set the application client ID.
    pub fn client_id(mut self, id: impl Into<String>) -> Self {
        self.client_id = Some(id.into());
        self
    }

    /// Set the application client secret.
    pub fn client_secret(mut self, secret: impl Into<String>) -> Self {
        self.client_secret = Some(secret.into());
        self
    }

    /// Set the redirect URI registered with the provider.
    pub fn redirect_uri(mut self, uri: impl Into<String>) -> Self {
        self.redirect_uri = Some(uri.into());
        self
    }

    /// Set the requested authorization scope (e.g. `"view_private"`).
    pub fn scope(mut self, scope: impl Into<String>) -> Self {
        self.scope = Some(scope.into());
        self
    }

    /// Set the token cache directory.
    ///
    /// Validated at build time; a missing or unwritable directory falls
    /// back to the system temp directory.
    pub fn cache_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.cache_dir = Some(dir.into());
        self
    }

    /// Supply an access token directly, bypassing cache and exchange.
    pub fn access_token(mut self, token: impl Into<String>) -> Self {
        self.access_token = Some(token.into());
        self
    }

    /// Supply the authorization code received on the OAuth callback.
    pub fn authorization_code(mut self, code: impl Into<String>) -> Self {
        self.authorization_code = Some(code.into());
        self
    }

    /// Set a token storage backend, replacing the default file store.
    pub fn store(mut self, store: Arc<dyn TokenStore>) -> Self {
        self.store = Some(store);
        self
    }

    /// Set a custom reqwest client.
    pub fn reqwest_client(mut self, client: reqwest::Client) -> Self {
        self.reqwest_client = Some(client);
        self
    }

    /// Override the API base URL (testing, staging).
    pub fn api_base(mut self, url: impl Into<String>) -> Self {
        self.endpoints.api_base = url.into();
        self
    }

    /// Override the token exchange URL (testing, staging).
    pub fn token_url(mut self, url: impl Into<String>) -> Self {
        self.endpoints.token_url = url.into();
        self
    }

    /// Override the authorization page URL (testing, staging).
    pub fn authorize_url(mut self, url: impl Into<String>) -> Self {
        self.endpoints.authorize_url = url.into();
        self
    }

    /// Build the client, resolving a usable token.
    ///
    /// Resolution order is strict:
    /// 1. an explicitly supplied access token (no cache read, no exchange)
    /// 2. the cached token, if any
    /// 3. exchange of a supplied authorization code (cache written on success)
    /// 4. otherwise [`ClientInit::NeedsAuthorization`] with the authorize URL
    ///
    /// A failed exchange aborts construction with [`Error::ExchangeFailed`].
    pub async fn build(self) -> Result<ClientInit> {
        let credentials = ClientCredentials::new(
            self.client_id.unwrap_or_default(),
            self.client_secret.unwrap_or_default(),
            self.redirect_uri.unwrap_or_default(),
            self.scope.unwrap_or_default(),
        );
        credentials.validate()?;

        let store: Arc<dyn TokenStore> = match self.store {
            Some(store) => store,
            None => Arc::new(FileTokenStore::resolve(self.cache_dir)),
        };

        let client = match self.reqwest_client {
            Some(client) => client,
            None => reqwest::Client::builder()
                .connect_timeout(CONNECT_TIMEOUT)
                .build()
                .expect("Failed to build HTTP client"),
        };

        let auth = Arc::new(AuthManager::new(
            credentials,
            self.endpoints,
            store,
            client.clone(),
        ));

        match self.access_token.filter(|t| !t.is_empty()) {
            Some(token) => auth.set_token(token).await,
            None => {
                if !auth.load_from_store().await? {
                    match self.authorization_code.filter(|c| !c.is_empty()) {
                        Some(code) => auth.exchange_code(&code).await?,
                        None => {
                            return Ok(ClientInit::NeedsAuthorization {
                                authorize_url: auth.authorize_url(),
                            });
                        }
                    }
                }
            }
        }

        let http = ApiClient::with_client(client, Arc::clone(&auth));

        info!("StravaClient initialized");
        Ok(ClientInit::Ready(StravaClient { auth, http }))
    }
}

impl Default for StravaClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}
