//! # Catalog Error Types
//!
//! Error types for loading the product list.
//!
//! ## Error Categories
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Catalog Error Categories                            │
//! │                                                                         │
//! │  ┌─────────────────────┐  ┌─────────────────────┐  ┌────────────────┐  │
//! │  │  Network            │  │  Cache              │  │  Configuration │  │
//! │  │                     │  │                     │  │                │  │
//! │  │  NetworkUnavailable │  │  CacheReadFailure   │  │  InvalidUrl    │  │
//! │  │  (recovered by      │  │  (→ empty)          │  │  InvalidConfig │  │
//! │  │   fallback)         │  │  CacheWriteFailure  │  │  ConfigLoad…   │  │
//! │  │                     │  │  (logged)           │  │  ConfigSave…   │  │
//! │  └─────────────────────┘  └─────────────────────┘  └────────────────┘  │
//! │                                                                         │
//! │  NoDataAvailable { cause } ← only error `load()` ever returns;         │
//! │  cause is the network failure message, if there was one.              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

/// Result type alias for catalog operations.
pub type CatalogResult<T> = Result<T, CatalogError>;

/// Default message when no root cause is known.
pub const CONNECTION_FAILED: &str = "Connection failed";

/// Catalog error type.
#[derive(Debug, Error)]
pub enum CatalogError {
    // =========================================================================
    // Network Errors
    // =========================================================================
    /// Endpoint unset, unreachable, non-2xx or unparsable response.
    #[error("Network unavailable: {0}")]
    NetworkUnavailable(String),

    // =========================================================================
    // Cache Errors
    // =========================================================================
    /// Cache file corrupt or inaccessible.
    #[error("Cache read failed: {0}")]
    CacheReadFailure(String),

    /// Write-through to the cache failed; the previous value is intact.
    #[error("Cache write failed: {0}")]
    CacheWriteFailure(String),

    // =========================================================================
    // Terminal Error
    // =========================================================================
    /// Network, cache and bundle all came up empty.
    #[error("No product data available: {}", .cause.as_deref().unwrap_or(CONNECTION_FAILED))]
    NoDataAvailable { cause: Option<String> },

    // =========================================================================
    // Configuration Errors
    // =========================================================================
    /// Invalid server URL.
    #[error("Invalid server URL: {0}")]
    InvalidUrl(String),

    /// Invalid viewer configuration.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Failed to load config file.
    #[error("Failed to load config: {0}")]
    ConfigLoadFailed(String),

    /// Failed to save config file.
    #[error("Failed to save config: {0}")]
    ConfigSaveFailed(String),
}

// =============================================================================
// Error Conversions
// =============================================================================

impl From<reqwest::Error> for CatalogError {
    fn from(err: reqwest::Error) -> Self {
        if let Some(status) = err.status() {
            CatalogError::NetworkUnavailable(format!("server returned {}", status))
        } else if err.is_timeout() {
            CatalogError::NetworkUnavailable("request timed out".to_string())
        } else if err.is_decode() {
            CatalogError::NetworkUnavailable(format!("malformed response: {}", err))
        } else {
            CatalogError::NetworkUnavailable(err.to_string())
        }
    }
}

impl From<url::ParseError> for CatalogError {
    fn from(err: url::ParseError) -> Self {
        CatalogError::InvalidUrl(err.to_string())
    }
}

impl From<toml::de::Error> for CatalogError {
    fn from(err: toml::de::Error) -> Self {
        CatalogError::ConfigLoadFailed(err.to_string())
    }
}

impl From<toml::ser::Error> for CatalogError {
    fn from(err: toml::ser::Error) -> Self {
        CatalogError::ConfigSaveFailed(err.to_string())
    }
}

// =============================================================================
// Error Categorization
// =============================================================================

impl CatalogError {
    /// Returns true if this error came from the network step.
    pub fn is_network_error(&self) -> bool {
        matches!(self, CatalogError::NetworkUnavailable(_))
    }

    /// Returns true if this error indicates a configuration problem.
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            CatalogError::InvalidUrl(_)
                | CatalogError::InvalidConfig(_)
                | CatalogError::ConfigLoadFailed(_)
                | CatalogError::ConfigSaveFailed(_)
        )
    }

    /// The underlying failure message, without the category prefix.
    pub fn cause_message(&self) -> String {
        match self {
            CatalogError::NetworkUnavailable(msg) => msg.clone(),
            other => other.to_string(),
        }
    }

    /// Message for the presentation layer.
    ///
    /// For `NoDataAvailable` this is the root cause alone, falling back to
    /// "Connection failed".
    pub fn user_message(&self) -> String {
        match self {
            CatalogError::NoDataAvailable { cause } => {
                cause.clone().unwrap_or_else(|| CONNECTION_FAILED.to_string())
            }
            other => other.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_data_message() {
        let err = CatalogError::NoDataAvailable {
            cause: Some("Server not configured".into()),
        };
        assert_eq!(err.user_message(), "Server not configured");
        assert!(err.to_string().contains("Server not configured"));

        let err = CatalogError::NoDataAvailable { cause: None };
        assert_eq!(err.user_message(), "Connection failed");
        assert_eq!(err.to_string(), "No product data available: Connection failed");
    }

    #[test]
    fn test_cause_message_drops_prefix() {
        let err = CatalogError::NetworkUnavailable("request timed out".into());
        assert_eq!(err.cause_message(), "request timed out");

        let err = CatalogError::CacheReadFailure("corrupt".into());
        assert_eq!(err.cause_message(), "Cache read failed: corrupt");
    }

    #[test]
    fn test_categories() {
        assert!(CatalogError::NetworkUnavailable("refused".into()).is_network_error());
        assert!(!CatalogError::CacheReadFailure("corrupt".into()).is_network_error());
        assert!(CatalogError::InvalidUrl("x".into()).is_config_error());
        assert!(!CatalogError::NoDataAvailable { cause: None }.is_config_error());
    }
}
