//! Configuration for the site resolvers

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use tracing::{info, warn};

/// Configuration for the remote store and local state
#[derive(Debug, Clone)]
pub struct SiteConfig {
    /// Local storage path for persisted state
    pub storage_path: PathBuf,

    /// Hosted database URL (e.g., "https://project.supabase.co")
    pub remote_url: String,

    /// Public (anonymous) API key sent with every request
    pub anon_key: String,

    /// HTTP timeout for fetches
    pub timeout: Duration,

    /// Proxy URL
    pub proxy_url: Option<String>,

    /// Lifetime of an admin dashboard session
    pub session_ttl: Duration,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            storage_path: PathBuf::from("."),
            remote_url: "http://localhost:54321".to_string(),
            anon_key: String::new(),
            timeout: Duration::from_secs(30),
            proxy_url: None,
            session_ttl: Duration::from_secs(8 * 3600), // 8 hours
        }
    }
}

impl SiteConfig {
    /// Loads configuration from `SITE_*` environment variables, keeping
    /// defaults for anything unset or malformed.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(url) = var("SITE_REMOTE_URL") {
            config.remote_url = url;
        }
        if let Some(key) = var("SITE_ANON_KEY") {
            config.anon_key = key;
        }
        if let Some(dir) = var("SITE_DATA_DIR") {
            config.storage_path = PathBuf::from(dir);
        }
        if let Some(secs) = var("SITE_TIMEOUT_SECS") {
            match secs.parse() {
                Ok(secs) => config.timeout = Duration::from_secs(secs),
                Err(e) => warn!("Invalid SITE_TIMEOUT_SECS value {secs:?}: {e}"),
            }
        }
        config.proxy_url = var("SITE_PROXY_URL");

        config
    }

    /// Configure with custom remote store
    pub fn with_remote(mut self, url: impl Into<String>, anon_key: impl Into<String>) -> Self {
        self.remote_url = url.into();
        self.anon_key = anon_key.into();
        self
    }

    /// Configure with custom storage path
    pub fn with_storage_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.storage_path = path.into();
        self
    }

    /// Configure with custom proxy
    pub fn with_proxy(mut self, proxy_url: String) -> Self {
        self.proxy_url = Some(proxy_url);
        self
    }
}

fn var(key: &str) -> Option<String> {
    match env::var(key) {
        Ok(value) if !value.trim().is_empty() => Some(value.trim().to_string()),
        _ => {
            info!("{key} not set, using default");
            None
        }
    }
}
