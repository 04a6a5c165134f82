//! # zebraget-catalog: Product List Resolution
//!
//! Fetches the product list from the configured server and falls back to the
//! last cached list, then to the snapshot bundled with the binary.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Catalog Architecture                             │
//! │                                                                         │
//! │  ┌───────────────┐     load()      ┌─────────────────────────────────┐ │
//! │  │ Presentation  │ ──────────────► │          CatalogSource          │ │
//! │  │ (viewer)      │ ◄────────────── │                                 │ │
//! │  └───────────────┘  CatalogSnapshot│  NetworkProvider ── ProductApi  │ │
//! │                                    │        │             (reqwest)  │ │
//! │                                    │        ▼                        │ │
//! │                                    │  CacheProvider ──── CacheStore  │ │
//! │                                    │        │        (products_cache │ │
//! │                                    │        ▼              .json)    │ │
//! │                                    │  BundleProvider ─ assets/*.json │ │
//! │                                    └─────────────────────────────────┘ │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`source`] - Ordered fallback chain and `load()`
//! - [`client`] - HTTP client for `GET <base>/products`
//! - [`endpoint`] - Base URL normalization
//! - [`cache`] - Single-slot cache store (file, memory)
//! - [`bundle`] - Embedded default snapshot
//! - [`config`] - Viewer configuration (TOML + environment)
//! - [`error`] - Catalog error types
//!
//! ## Usage
//!
//! ```rust,ignore
//! use zebraget_catalog::{CatalogSource, ViewerConfig};
//!
//! let config = ViewerConfig::load_or_default(None);
//! let source = CatalogSource::from_config(&config)?;
//!
//! let snapshot = source.load().await?;
//! if snapshot.freshness.is_offline() {
//!     println!("offline — showing cached data");
//! }
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod bundle;
pub mod cache;
pub mod client;
pub mod config;
pub mod endpoint;
pub mod error;
pub mod source;

// =============================================================================
// Re-exports
// =============================================================================

pub use bundle::BundledCatalog;
pub use cache::{CacheStore, FileCacheStore, MemoryCacheStore, CACHE_FILE_NAME};
pub use client::{HttpProductApi, ProductApi};
pub use config::{CacheSettings, ServerSettings, ViewerConfig};
pub use endpoint::{normalize_base_url, Endpoint};
pub use error::{CatalogError, CatalogResult};
pub use source::{
    ApiHandle, BundleProvider, CacheProvider, CatalogSource, NetworkProvider, SnapshotProvider,
};
