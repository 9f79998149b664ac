//! File-based token storage: one cache file in a validated directory.

use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use super::TokenStore;
use crate::config::ACCESS_TOKEN_FILENAME;
use crate::error::{Error, Result};

/// File-based token storage.
///
/// The slot is `<dir>/strava-access-token`, holding the raw token string
/// with no encoding and no expiry metadata. Written with 0600 permissions
/// on Unix.
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    /// Create a store rooted at the given cache directory.
    pub fn in_dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            path: dir.into().join(ACCESS_TOKEN_FILENAME),
        }
    }

    /// Resolve a cache directory with fallback.
    ///
    /// Uses `dir` if it exists and is writable; otherwise falls back to the
    /// system temp directory. An unusable configured directory is not fatal.
    pub fn resolve(dir: Option<PathBuf>) -> Self {
        let resolved = match dir {
            Some(d) if dir_is_writable(&d) => d,
            Some(d) => {
                warn!(
                    dir = %d.display(),
                    "Cache directory missing or not writable, falling back to temp dir"
                );
                std::env::temp_dir()
            }
            None => std::env::temp_dir(),
        };
        debug!(dir = %resolved.display(), "Token cache directory resolved");
        Self::in_dir(resolved)
    }

    /// Path of the cache slot.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Probe a directory for writability by creating and removing a marker file.
fn dir_is_writable(dir: &Path) -> bool {
    if !dir.is_dir() {
        return false;
    }
    let probe = dir.join(".strava-gateway-probe");
    match std::fs::write(&probe, b"") {
        Ok(()) => {
            let _ = std::fs::remove_file(&probe);
            true
        }
        Err(_) => false,
    }
}

#[async_trait]
impl TokenStore for FileTokenStore {
    async fn load(&self) -> Result<Option<String>> {
        match std::fs::read_to_string(&self.path) {
            Ok(token) => Ok(Some(token)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(Error::storage_io(&self.path, e.to_string())),
        }
    }

    async fn save(&self, token: &str) -> Result<()> {
        std::fs::write(&self.path, token)
            .map_err(|e| Error::storage_io(&self.path, e.to_string()))?;

        // Set 0600 permissions on Unix
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let perms = std::fs::Permissions::from_mode(0o600);
            std::fs::set_permissions(&self.path, perms)
                .map_err(|e| Error::storage_io(&self.path, format!("chmod: {}", e)))?;
        }

        debug!(path = %self.path.display(), "Token saved");
        Ok(())
    }

    async fn clear(&self) -> Result<()> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => {
                debug!(path = %self.path.display(), "Token cache cleared");
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(Error::storage_io(&self.path, e.to_string())),
        }
    }

    fn name(&self) -> &str {
        "file"
    }
}
