//! # Product API Client
//!
//! HTTP client for `GET <base>/products`.
//!
//! ## Request Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Product Fetch                                     │
//! │                                                                         │
//! │  HttpProductApi::fetch_products()                                      │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  GET http://host:3000/products ─── transport error ──► NetworkUnavailable│
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  status 2xx? ───────────────────── no ───────────────► NetworkUnavailable│
//! │       │ yes                                                             │
//! │       ▼                                                                 │
//! │  JSON array of Product? ────────── no ───────────────► NetworkUnavailable│
//! │       │ yes                                                             │
//! │       ▼                                                                 │
//! │  Vec<Product>                                                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, instrument};
use zebraget_core::Product;

use crate::endpoint::Endpoint;
use crate::error::{CatalogError, CatalogResult};

/// Default HTTP timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Source of the live product list.
///
/// Implemented by [`HttpProductApi`]; tests supply fakes.
#[async_trait]
pub trait ProductApi: Send + Sync {
    /// Human-readable label for logs (usually the base URL).
    fn label(&self) -> String;

    /// Fetches the full product list.
    async fn fetch_products(&self) -> CatalogResult<Vec<Product>>;
}

/// `reqwest`-backed product API.
#[derive(Debug, Clone)]
pub struct HttpProductApi {
    client: reqwest::Client,
    endpoint: Endpoint,
}

impl HttpProductApi {
    /// Creates a client for `endpoint` with the default timeout.
    pub fn new(endpoint: Endpoint) -> CatalogResult<Self> {
        Self::with_timeout(endpoint, DEFAULT_TIMEOUT)
    }

    /// Creates a client with an explicit request timeout.
    pub fn with_timeout(endpoint: Endpoint, timeout: Duration) -> CatalogResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| CatalogError::InvalidConfig(format!("HTTP client: {}", e)))?;

        Ok(HttpProductApi { client, endpoint })
    }

    /// The endpoint this client talks to.
    pub fn endpoint(&self) -> &Endpoint {
        &self.endpoint
    }
}

#[async_trait]
impl ProductApi for HttpProductApi {
    fn label(&self) -> String {
        self.endpoint.to_string()
    }

    #[instrument(skip(self), fields(base = %self.endpoint))]
    async fn fetch_products(&self) -> CatalogResult<Vec<Product>> {
        let url = self.endpoint.products_url()?;
        debug!(%url, "Fetching products");

        let products = self
            .client
            .get(url)
            .send()
            .await?
            .error_for_status()?
            .json::<Vec<Product>>()
            .await?;

        debug!(count = products.len(), "Products fetched");
        Ok(products)
    }
}
