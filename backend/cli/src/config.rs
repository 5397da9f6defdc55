use std::path::PathBuf;
use std::time::Duration;

use notin_content::cache::PRODUCTION_TTL;

/// Deployment mode; drives the content-cache TTL default.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Production,
    Development,
}

/// Notin CLI runtime configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub mode: Mode,
    /// Directory containing `content/markdown/`.
    pub content_dir: PathBuf,
    /// Base URL of the remote Notin API.
    pub api_url: String,
    /// Explicit cache TTL; overrides the mode default.
    pub cache_ttl_override: Option<Duration>,
    pub log_dir: PathBuf,
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            mode: Mode::Development,
            content_dir: PathBuf::from("."),
            api_url: "http://localhost:8000".to_string(),
            cache_ttl_override: None,
            log_dir: PathBuf::from("logs"),
            log_level: "info".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from `NOTIN_*` environment variables with
    /// sensible defaults.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            mode: match std::env::var("NOTIN_MODE").as_deref() {
                Ok("production") => Mode::Production,
                _ => Mode::Development,
            },
            content_dir: std::env::var("NOTIN_CONTENT_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.content_dir),
            api_url: std::env::var("NOTIN_API_URL").unwrap_or(defaults.api_url),
            cache_ttl_override: std::env::var("NOTIN_CACHE_TTL_SECS")
                .ok()
                .and_then(|secs| secs.parse().ok())
                .map(Duration::from_secs),
            log_dir: std::env::var("NOTIN_LOG_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.log_dir),
            log_level: std::env::var("RUST_LOG").unwrap_or(defaults.log_level),
        }
    }

    /// Effective content-cache TTL: explicit override, else five minutes in
    /// production and disabled in development so edits show up immediately.
    pub fn cache_ttl(&self) -> Duration {
        if let Some(ttl) = self.cache_ttl_override {
            return ttl;
        }
        match self.mode {
            Mode::Production => PRODUCTION_TTL,
            Mode::Development => Duration::ZERO,
        }
    }
}
