//! # Viewer Configuration
//!
//! Server endpoint and cache location for a catalog viewer.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     ZEBRAGET_SERVER_URL=http://192.168.1.20:3000                       │
//! │     ZEBRAGET_CACHE_PATH=/tmp/products_cache.json                       │
//! │     ZEBRAGET_HTTP_TIMEOUT_SECS=5                                       │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     ~/.config/viewer/viewer.toml (Linux)                               │
//! │     ~/Library/Application Support/com.zebraget.viewer/viewer.toml      │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     http://localhost:3000/, 10s timeout, cache in the data dir         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! # viewer.toml
//! [server]
//! url = "http://localhost:3000/"
//! http_timeout_secs = 10
//!
//! [cache]
//! path = "/var/lib/zebraget/products_cache.json"
//! ```

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use tracing::{debug, info, warn};

use crate::cache::{FileCacheStore, CACHE_FILE_NAME};
use crate::client::HttpProductApi;
use crate::endpoint::{normalize_base_url, Endpoint};
use crate::error::{CatalogError, CatalogResult};

/// Environment variable overriding the server URL.
pub const ENV_SERVER_URL: &str = "ZEBRAGET_SERVER_URL";
/// Environment variable overriding the cache file path.
pub const ENV_CACHE_PATH: &str = "ZEBRAGET_CACHE_PATH";
/// Environment variable overriding the HTTP timeout.
pub const ENV_HTTP_TIMEOUT_SECS: &str = "ZEBRAGET_HTTP_TIMEOUT_SECS";

/// Server address used until the user picks one.
pub const DEFAULT_SERVER_URL: &str = "http://localhost:3000/";

// =============================================================================
// Server Settings
// =============================================================================

/// Where the product list is fetched from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerSettings {
    /// Base URL. `None` disables the network step; stored as `""` so a
    /// cleared server survives a save/load cycle.
    #[serde(
        default = "default_server_url",
        serialize_with = "serialize_url",
        deserialize_with = "deserialize_url"
    )]
    pub url: Option<String>,

    /// HTTP request timeout in seconds.
    #[serde(default = "default_http_timeout")]
    pub http_timeout_secs: u64,
}

fn default_server_url() -> Option<String> {
    Some(DEFAULT_SERVER_URL.to_string())
}

fn serialize_url<S: Serializer>(url: &Option<String>, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(url.as_deref().unwrap_or(""))
}

fn deserialize_url<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    let raw = String::deserialize(deserializer)?;
    Ok((!raw.trim().is_empty()).then_some(raw))
}

fn default_http_timeout() -> u64 {
    10
}

impl Default for ServerSettings {
    fn default() -> Self {
        ServerSettings {
            url: default_server_url(),
            http_timeout_secs: default_http_timeout(),
        }
    }
}

// =============================================================================
// Cache Settings
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheSettings {
    /// Cache file. `None` means `products_cache.json` in the data directory.
    #[serde(default)]
    pub path: Option<PathBuf>,
}

// =============================================================================
// Main Configuration
// =============================================================================

/// Complete viewer configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewerConfig {
    #[serde(default)]
    pub server: ServerSettings,

    #[serde(default)]
    pub cache: CacheSettings,
}

impl ViewerConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (viewer.toml)
    /// 3. Environment variables
    pub fn load(config_path: Option<PathBuf>) -> CatalogResult<Self> {
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading viewer config from file");
                let contents = std::fs::read_to_string(&path)
                    .map_err(|e| CatalogError::ConfigLoadFailed(e.to_string()))?;
                config = toml::from_str(&contents)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_overrides(|key| std::env::var(key).ok());
        config.validate()?;

        Ok(config)
    }

    /// Loads config or returns default if load fails.
    pub fn load_or_default(config_path: Option<PathBuf>) -> Self {
        Self::load(config_path).unwrap_or_else(|e| {
            warn!("Failed to load viewer config: {}. Using defaults.", e);
            Self::default()
        })
    }

    /// Saves configuration to file.
    pub fn save(&self, config_path: Option<PathBuf>) -> CatalogResult<()> {
        let path = config_path
            .or_else(Self::default_config_path)
            .ok_or_else(|| CatalogError::ConfigSaveFailed("No config path available".into()))?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| CatalogError::ConfigSaveFailed(e.to_string()))?;
        }

        let contents = toml::to_string_pretty(self)?;
        std::fs::write(&path, contents)
            .map_err(|e| CatalogError::ConfigSaveFailed(e.to_string()))?;

        info!(?path, "Viewer config saved");
        Ok(())
    }

    /// Validates the configuration.
    pub fn validate(&self) -> CatalogResult<()> {
        if let Some(ref url) = self.server.url {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(CatalogError::InvalidUrl(format!(
                    "Server URL must start with http:// or https://, got: {}",
                    url
                )));
            }
            Endpoint::parse(url)?;
        }

        if self.server.http_timeout_secs == 0 {
            return Err(CatalogError::InvalidConfig(
                "http_timeout_secs must be greater than 0".into(),
            ));
        }

        Ok(())
    }

    /// Applies overrides from a variable lookup (the process environment in
    /// [`ViewerConfig::load`]).
    fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(ENV_SERVER_URL) {
            debug!(url = %url, "Overriding server URL from environment");
            self.server.url = if url.trim().is_empty() {
                None
            } else {
                Some(normalize_base_url(&url))
            };
        }

        if let Some(path) = lookup(ENV_CACHE_PATH) {
            debug!(path = %path, "Overriding cache path from environment");
            self.cache.path = Some(PathBuf::from(path));
        }

        if let Some(secs) = lookup(ENV_HTTP_TIMEOUT_SECS) {
            match secs.parse::<u64>() {
                Ok(s) => self.server.http_timeout_secs = s,
                Err(_) => warn!(value = %secs, "Ignoring unparsable HTTP timeout"),
            }
        }
    }

    /// Returns the default config file path.
    fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "zebraget", "viewer")
            .map(|dirs| dirs.config_dir().join("viewer.toml"))
    }

    // =========================================================================
    // Convenience Methods
    // =========================================================================

    /// Stores a new server URL, normalized with a trailing slash.
    pub fn set_server_url(&mut self, raw: &str) -> CatalogResult<()> {
        let endpoint = Endpoint::parse(raw)?;
        self.server.url = Some(endpoint.to_string());
        Ok(())
    }

    /// Returns the server URL if configured.
    pub fn server_url(&self) -> Option<&str> {
        self.server.url.as_deref()
    }

    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.server.http_timeout_secs)
    }

    /// Returns the configured cache path, or the platform default.
    pub fn cache_path(&self) -> CatalogResult<PathBuf> {
        if let Some(ref path) = self.cache.path {
            return Ok(path.clone());
        }
        directories::ProjectDirs::from("com", "zebraget", "viewer")
            .map(|dirs| dirs.data_dir().join(CACHE_FILE_NAME))
            .ok_or_else(|| CatalogError::InvalidConfig("No data directory available".into()))
    }

    /// Builds the HTTP client for the configured server, if any.
    pub fn product_api(&self) -> CatalogResult<Option<Arc<HttpProductApi>>> {
        match self.server.url {
            Some(ref url) => {
                let api = HttpProductApi::with_timeout(Endpoint::parse(url)?, self.http_timeout())?;
                Ok(Some(Arc::new(api)))
            }
            None => Ok(None),
        }
    }

    /// Builds the file cache at [`ViewerConfig::cache_path`].
    pub fn cache_store(&self) -> CatalogResult<FileCacheStore> {
        Ok(FileCacheStore::new(self.cache_path()?))
    }
}
