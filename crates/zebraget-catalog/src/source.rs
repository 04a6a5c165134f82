//! # Catalog Source
//!
//! Resolves the current product list through an ordered fallback chain.
//!
//! ## Fallback Chain
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         CatalogSource::load()                           │
//! │                                                                         │
//! │  ┌──────────────────┐  Some(list)                                       │
//! │  │ NetworkProvider  │ ──────────────► write cache ──► { list, live }    │
//! │  └────────┬─────────┘                                                   │
//! │           │ Err (kept as root cause) / None                             │
//! │           ▼                                                             │
//! │  ┌──────────────────┐  Some(list)                                       │
//! │  │ CacheProvider    │ ──────────────────────────────► { list, cached }  │
//! │  └────────┬─────────┘                                                   │
//! │           │ None (empty or unreadable)                                  │
//! │           ▼                                                             │
//! │  ┌──────────────────┐  Some(list)                                       │
//! │  │ BundleProvider   │ ──────────────────────────────► { list, cached }  │
//! │  └────────┬─────────┘                                                   │
//! │           │ None                                                        │
//! │           ▼                                                             │
//! │  NoDataAvailable { cause: root cause message }                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Only the live step writes the cache, and only after it succeeded.
//! `load()` holds a mutex for the whole chain, so concurrent calls queue and
//! cache writes never interleave.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, info, instrument, warn};
use zebraget_core::{CatalogSnapshot, Freshness, Product, SnapshotSource};

use crate::bundle::BundledCatalog;
use crate::cache::CacheStore;
use crate::client::{HttpProductApi, ProductApi};
use crate::config::ViewerConfig;
use crate::endpoint::Endpoint;
use crate::error::{CatalogError, CatalogResult};

/// Message used when no endpoint is configured.
pub const SERVER_NOT_CONFIGURED: &str = "Server not configured";

/// Swappable handle to the live product API.
pub type ApiHandle = Arc<RwLock<Option<Arc<dyn ProductApi>>>>;

// =============================================================================
// Providers
// =============================================================================

/// One step of the fallback chain.
#[async_trait]
pub trait SnapshotProvider: Send + Sync {
    /// Which source this step represents.
    fn source(&self) -> SnapshotSource;

    /// `Ok(Some(list))` serves the snapshot, `Ok(None)` moves on quietly,
    /// `Err` moves on and is remembered as the root cause.
    async fn fetch(&self) -> CatalogResult<Option<Vec<Product>>>;
}

/// Fetches from the configured server.
pub struct NetworkProvider {
    api: ApiHandle,
}

impl NetworkProvider {
    pub fn new(api: ApiHandle) -> Self {
        NetworkProvider { api }
    }
}

#[async_trait]
impl SnapshotProvider for NetworkProvider {
    fn source(&self) -> SnapshotSource {
        SnapshotSource::Network
    }

    async fn fetch(&self) -> CatalogResult<Option<Vec<Product>>> {
        // Clone the handle so a concurrent set_endpoint is not blocked by the fetch
        let api = self.api.read().await.clone();
        match api {
            Some(api) => api.fetch_products().await.map(Some),
            None => Err(CatalogError::NetworkUnavailable(SERVER_NOT_CONFIGURED.into())),
        }
    }
}

/// Reads the last known list from the cache.
pub struct CacheProvider {
    store: Arc<dyn CacheStore>,
}

impl CacheProvider {
    pub fn new(store: Arc<dyn CacheStore>) -> Self {
        CacheProvider { store }
    }
}

#[async_trait]
impl SnapshotProvider for CacheProvider {
    fn source(&self) -> SnapshotSource {
        SnapshotSource::Cache
    }

    async fn fetch(&self) -> CatalogResult<Option<Vec<Product>>> {
        let products = self.store.read().await;
        Ok((!products.is_empty()).then_some(products))
    }
}

/// Serves the bundled default list.
pub struct BundleProvider {
    bundle: BundledCatalog,
}

impl BundleProvider {
    pub fn new(bundle: BundledCatalog) -> Self {
        BundleProvider { bundle }
    }
}

#[async_trait]
impl SnapshotProvider for BundleProvider {
    fn source(&self) -> SnapshotSource {
        SnapshotSource::Bundle
    }

    async fn fetch(&self) -> CatalogResult<Option<Vec<Product>>> {
        if self.bundle.is_empty() {
            Ok(None)
        } else {
            Ok(Some(self.bundle.products().to_vec()))
        }
    }
}

// =============================================================================
// Catalog Source
// =============================================================================

/// Resolves the product list: network, then cache, then bundle.
pub struct CatalogSource {
    api: ApiHandle,
    cache: Arc<dyn CacheStore>,
    providers: Vec<Box<dyn SnapshotProvider>>,
    load_lock: Mutex<()>,
}

impl CatalogSource {
    /// Builds the standard three-step chain.
    pub fn new(
        api: Option<Arc<dyn ProductApi>>,
        cache: Arc<dyn CacheStore>,
        bundle: BundledCatalog,
    ) -> Self {
        let api: ApiHandle = Arc::new(RwLock::new(api));
        let providers: Vec<Box<dyn SnapshotProvider>> = vec![
            Box::new(NetworkProvider::new(api.clone())),
            Box::new(CacheProvider::new(cache.clone())),
            Box::new(BundleProvider::new(bundle)),
        ];

        CatalogSource {
            api,
            cache,
            providers,
            load_lock: Mutex::new(()),
        }
    }

    /// Builds a source from viewer configuration, with the embedded bundle.
    pub fn from_config(config: &ViewerConfig) -> CatalogResult<Self> {
        let api = config
            .product_api()?
            .map(|api| api as Arc<dyn ProductApi>);
        let cache = Arc::new(config.cache_store()?);

        Ok(Self::new(api, cache, BundledCatalog::embedded()))
    }

    /// Resolves the current product list.
    ///
    /// Fails only with [`CatalogError::NoDataAvailable`].
    #[instrument(skip(self))]
    pub async fn load(&self) -> CatalogResult<CatalogSnapshot> {
        let _guard = self.load_lock.lock().await;
        let mut root_cause: Option<CatalogError> = None;

        for provider in &self.providers {
            let source = provider.source();

            match provider.fetch().await {
                Ok(Some(products)) => {
                    if source.freshness() == Freshness::Live {
                        self.write_through(&products).await;
                    } else if let Some(ref cause) = root_cause {
                        info!(%source, %cause, "Serving fallback snapshot");
                    }

                    debug!(%source, count = products.len(), "Snapshot resolved");
                    return Ok(CatalogSnapshot::new(products, source));
                }
                Ok(None) => {
                    debug!(%source, "Source empty, trying next");
                }
                Err(e) => {
                    warn!(%source, error = %e, "Source failed, trying next");
                    if root_cause.is_none() {
                        root_cause = Some(e);
                    }
                }
            }
        }

        warn!("No product data available from any source");
        Err(CatalogError::NoDataAvailable {
            cause: root_cause.map(|e| e.cause_message()),
        })
    }

    /// Cache write failures are logged; the live list is still served.
    async fn write_through(&self, products: &[Product]) {
        if let Err(e) = self.cache.write(products).await {
            warn!(error = %e, "Failed to write product cache");
        }
    }

    // =========================================================================
    // Endpoint Reconfiguration
    // =========================================================================

    /// Points the network step at a new server. Takes effect on the next load.
    pub async fn set_endpoint(&self, raw: &str, timeout: std::time::Duration) -> CatalogResult<()> {
        let endpoint = Endpoint::parse(raw)?;
        info!(%endpoint, "Server endpoint changed");
        let api = HttpProductApi::with_timeout(endpoint, timeout)?;
        self.set_api(Arc::new(api)).await;
        Ok(())
    }

    /// Replaces the live product API.
    pub async fn set_api(&self, api: Arc<dyn ProductApi>) {
        *self.api.write().await = Some(api);
    }

    /// Disables the network step.
    pub async fn clear_api(&self) {
        info!("Server endpoint cleared");
        *self.api.write().await = None;
    }

    /// Label of the current endpoint, if one is set.
    pub async fn endpoint_label(&self) -> Option<String> {
        self.api.read().await.as_ref().map(|api| api.label())
    }

    /// The cache this source writes through to.
    pub fn cache(&self) -> &Arc<dyn CacheStore> {
        &self.cache
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::{FileCacheStore, MemoryCacheStore};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    /// Scripted product API.
    struct FakeApi {
        response: Result<Vec<Product>, String>,
        calls: AtomicUsize,
        delay: Duration,
    }

    impl FakeApi {
        fn ok(products: Vec<Product>) -> Arc<Self> {
            Arc::new(FakeApi {
                response: Ok(products),
                calls: AtomicUsize::new(0),
                delay: Duration::ZERO,
            })
        }

        fn failing(message: &str) -> Arc<Self> {
            Arc::new(FakeApi {
                response: Err(message.to_string()),
                calls: AtomicUsize::new(0),
                delay: Duration::ZERO,
            })
        }
    }

    #[async_trait]
    impl ProductApi for FakeApi {
        fn label(&self) -> String {
            "fake".into()
        }

        async fn fetch_products(&self) -> CatalogResult<Vec<Product>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if !self.delay.is_zero() {
                tokio::time::sleep(self.delay).await;
            }
            self.response
                .clone()
                .map_err(CatalogError::NetworkUnavailable)
        }
    }

    /// Cache that refuses writes.
    struct ReadOnlyCache;

    #[async_trait]
    impl CacheStore for ReadOnlyCache {
        async fn write(&self, _products: &[Product]) -> CatalogResult<()> {
            Err(CatalogError::CacheWriteFailure("disk full".into()))
        }

        async fn try_read(&self) -> CatalogResult<Vec<Product>> {
            Ok(Vec::new())
        }
    }

    fn p1() -> Product {
        Product::new(1, "Milk", "", "4006381333931")
    }

    fn p2() -> Product {
        Product::new(2, "Bread", "", "5901234123457")
    }

    fn p3() -> Product {
        Product::new(3, "Tea", "", "4601234567893").with_format("EAN_13")
    }

    fn source(
        api: Option<Arc<dyn ProductApi>>,
        cache: Vec<Product>,
        bundle: Vec<Product>,
    ) -> CatalogSource {
        CatalogSource::new(
            api,
            Arc::new(MemoryCacheStore::with_products(cache)),
            BundledCatalog::from_products(bundle),
        )
    }

    #[tokio::test]
    async fn test_network_success_is_live_and_written_through() {
        let api = FakeApi::ok(vec![p3(), p1()]);
        let source = source(Some(api.clone()), vec![p2()], vec![p2()]);

        let snapshot = source.load().await.unwrap();
        assert_eq!(snapshot.products, vec![p3(), p1()]);
        assert_eq!(snapshot.freshness, Freshness::Live);
        assert_eq!(snapshot.source, SnapshotSource::Network);

        // Cache holds exactly the live list, in order
        assert_eq!(source.cache().read().await, vec![p3(), p1()]);
    }

    #[tokio::test]
    async fn test_network_failure_falls_back_to_cache() {
        let api = FakeApi::failing("connection refused");
        let source = source(Some(api), vec![p1()], vec![p2()]);

        let snapshot = source.load().await.unwrap();
        assert_eq!(snapshot.products, vec![p1()]);
        assert_eq!(snapshot.freshness, Freshness::Cached);
        assert_eq!(snapshot.source, SnapshotSource::Cache);
    }

    #[tokio::test]
    async fn test_empty_cache_falls_back_to_bundle() {
        let api = FakeApi::failing("connection refused");
        let source = source(Some(api), vec![], vec![p2()]);

        let snapshot = source.load().await.unwrap();
        assert_eq!(snapshot.products, vec![p2()]);
        assert!(snapshot.freshness.is_offline());
        assert_eq!(snapshot.source, SnapshotSource::Bundle);
    }

    #[tokio::test]
    async fn test_cached_snapshot_is_not_rewritten() {
        let source = source(None, vec![], vec![p2()]);

        source.load().await.unwrap();
        assert!(source.cache().read().await.is_empty());
    }

    #[tokio::test]
    async fn test_total_failure_carries_network_cause() {
        let api = FakeApi::failing("server returned 503 Service Unavailable");
        let source = source(Some(api), vec![], vec![]);

        let err = source.load().await.unwrap_err();
        match err {
            CatalogError::NoDataAvailable { cause } => {
                assert!(cause.unwrap().contains("503"));
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_unconfigured_endpoint_is_root_cause() {
        let source = source(None, vec![], vec![]);

        let err = source.load().await.unwrap_err();
        assert_eq!(err.user_message(), SERVER_NOT_CONFIGURED);
    }

    #[tokio::test]
    async fn test_cache_write_failure_still_serves_live() {
        let source = CatalogSource::new(
            Some(FakeApi::ok(vec![p1()])),
            Arc::new(ReadOnlyCache),
            BundledCatalog::default(),
        );

        let snapshot = source.load().await.unwrap();
        assert_eq!(snapshot.freshness, Freshness::Live);
        assert_eq!(snapshot.products, vec![p1()]);
    }

    #[tokio::test]
    async fn test_endpoint_swap_between_loads() {
        let source = source(Some(FakeApi::failing("refused")), vec![p1()], vec![]);
        assert_eq!(source.load().await.unwrap().freshness, Freshness::Cached);

        source.set_api(FakeApi::ok(vec![p2()])).await;
        let snapshot = source.load().await.unwrap();
        assert_eq!(snapshot.freshness, Freshness::Live);
        assert_eq!(snapshot.products, vec![p2()]);

        source.clear_api().await;
        assert!(source.endpoint_label().await.is_none());
        let snapshot = source.load().await.unwrap();
        assert_eq!(snapshot.source, SnapshotSource::Cache);
        assert_eq!(snapshot.products, vec![p2()]);
    }

    #[tokio::test]
    async fn test_set_endpoint_normalizes() {
        let source = source(None, vec![], vec![]);
        source
            .set_endpoint("http://h:3000", Duration::from_secs(1))
            .await
            .unwrap();
        assert_eq!(source.endpoint_label().await.as_deref(), Some("http://h:3000/"));

        assert!(source
            .set_endpoint("ftp://h", Duration::from_secs(1))
            .await
            .is_err());
        assert_eq!(source.endpoint_label().await.as_deref(), Some("http://h:3000/"));
    }

    #[tokio::test]
    async fn test_concurrent_loads_are_serialized() {
        let api = Arc::new(FakeApi {
            response: Ok(vec![p1(), p2()]),
            calls: AtomicUsize::new(0),
            delay: Duration::from_millis(20),
        });
        let source = Arc::new(source(Some(api.clone()), vec![], vec![]));

        let a = tokio::spawn({
            let source = source.clone();
            async move { source.load().await }
        });
        let b = tokio::spawn({
            let source = source.clone();
            async move { source.load().await }
        });

        assert!(a.await.unwrap().unwrap().is_live());
        assert!(b.await.unwrap().unwrap().is_live());
        assert_eq!(api.calls.load(Ordering::SeqCst), 2);
        assert_eq!(source.cache().read().await, vec![p1(), p2()]);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_cancelled_load_leaves_whole_cache() {
        let dir = tempfile::tempdir().unwrap();
        let store = Arc::new(FileCacheStore::in_dir(dir.path()));
        store.write(&[p1()]).await.unwrap();

        let bulk: Vec<Product> = (0..200_000)
            .map(|id| Product::new(id, "Bulk", "", "4006381333931"))
            .collect();
        let source = Arc::new(CatalogSource::new(
            Some(FakeApi::ok(bulk.clone())),
            store.clone(),
            BundledCatalog::default(),
        ));

        let loading = tokio::spawn({
            let source = source.clone();
            async move { source.load().await }
        });

        // Abort once the temp file shows up next to the cache file
        for _ in 0..2_000 {
            let entries = std::fs::read_dir(dir.path()).unwrap().count();
            if entries > 1 || loading.is_finished() {
                break;
            }
            tokio::time::sleep(Duration::from_millis(1)).await;
        }
        loading.abort();
        let _ = loading.await;

        let cached = store.try_read().await.unwrap();
        assert!(cached == vec![p1()] || cached == bulk);

        // A newer load always lands after the abandoned write
        source.set_api(FakeApi::ok(vec![p3()])).await;
        assert!(source.load().await.unwrap().is_live());
        assert_eq!(store.try_read().await.unwrap(), vec![p3()]);
    }
}
