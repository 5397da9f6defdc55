use std::path::{Path, PathBuf};

use anyhow::Context;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use notin_core::NotinError;

/// Access tokens live for one day, matching the server's cookie expiry.
const TOKEN_TTL_HOURS: i64 = 24;

#[derive(Debug, Serialize, Deserialize)]
struct StoredToken {
    access_token: String,
    expires_at: DateTime<Utc>,
}

/// Persists the access token between invocations.
///
/// The contract is deliberately small: a token string is persisted with a
/// one-day expiry and attached to subsequent requests; an expired token
/// reads back as absent.
#[derive(Debug, Clone)]
pub struct TokenStore {
    path: PathBuf,
}

impl TokenStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store under the platform config dir: `<config>/notin/token.json`.
    pub fn default_location() -> Self {
        let base = dirs::config_dir().unwrap_or_else(std::env::temp_dir);
        Self::new(base.join("notin").join("token.json"))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Persist `token` with a fresh one-day expiry.
    pub fn save(&self, token: &str) -> Result<(), NotinError> {
        let stored = StoredToken {
            access_token: token.to_string(),
            expires_at: Utc::now() + Duration::hours(TOKEN_TTL_HOURS),
        };
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }
        let json = serde_json::to_string_pretty(&stored).context("failed to encode token")?;
        std::fs::write(&self.path, json)
            .with_context(|| format!("failed to write {}", self.path.display()))?;
        debug!(path = %self.path.display(), "access token saved");
        Ok(())
    }

    /// The stored token, or `None` when absent, unreadable, or expired.
    pub fn load(&self) -> Option<String> {
        let json = std::fs::read_to_string(&self.path).ok()?;
        let stored: StoredToken = serde_json::from_str(&json).ok()?;
        if stored.expires_at <= Utc::now() {
            debug!(path = %self.path.display(), "stored access token expired");
            return None;
        }
        Some(stored.access_token)
    }

    /// Forget the stored token.
    pub fn clear(&self) {
        let _ = std::fs::remove_file(&self.path);
    }
}
