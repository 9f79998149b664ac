//! OAuth client credentials.

use crate::error::{Error, Result};

/// Immutable OAuth application credentials.
///
/// All four fields are required; the scope is always caller-supplied
/// (e.g. `"view_private"` or `"write"`).
#[derive(Clone)]
pub struct ClientCredentials {
    /// Application client ID (opaque; Strava issues numeric ids).
    pub client_id: String,
    /// Application client secret.
    pub client_secret: String,
    /// Redirect URI registered with the provider.
    pub redirect_uri: String,
    /// Requested authorization scope.
    pub scope: String,
}

impl ClientCredentials {
    /// Create a credential set.
    pub fn new(
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
        redirect_uri: impl Into<String>,
        scope: impl Into<String>,
    ) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            redirect_uri: redirect_uri.into(),
            scope: scope.into(),
        }
    }

    /// Reject empty fields before any network or storage work happens.
    pub fn validate(&self) -> Result<()> {
        let missing = [
            ("client_id", &self.client_id),
            ("client_secret", &self.client_secret),
            ("redirect_uri", &self.redirect_uri),
            ("scope", &self.scope),
        ]
        .iter()
        .find(|(_, value)| value.is_empty())
        .map(|(name, _)| *name);

        match missing {
            Some(field) => Err(Error::Config(format!("missing required field: {}", field))),
            None => Ok(()),
        }
    }
}

// Manual impl so the client secret never lands in logs.
impl std::fmt::Debug for ClientCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientCredentials")
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .field("redirect_uri", &self.redirect_uri)
            .field("scope", &self.scope)
            .finish()
    }
}
