//! # Cache Store
//!
//! Single-slot persistent store for the last known product list.
//!
//! ## Write Path (atomic)
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    FileCacheStore::write                                │
//! │                                                                         │
//! │  products ──serde_json──► bytes                                         │
//! │                             │                                           │
//! │                             ▼                                           │
//! │           NamedTempFile in the cache directory                          │
//! │                             │  write_all + sync                         │
//! │                             ▼                                           │
//! │           persist() = rename over products_cache.json                   │
//! │                                                                         │
//! │  A reader sees either the old file or the new one, never a mix.         │
//! │  The write runs on the blocking pool, so dropping the caller's future   │
//! │  does not interrupt it halfway. The blocking task owns the write lock,  │
//! │  so an abandoned write finishes before the next one starts.             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Read Path (degrading)
//! Missing file → empty. Unreadable or corrupt file → `CacheReadFailure`,
//! which [`CacheStore::read`] logs and turns into empty.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, warn};
use zebraget_core::Product;

use crate::error::{CatalogError, CatalogResult};

/// File name of the cache slot.
pub const CACHE_FILE_NAME: &str = "products_cache.json";

/// Persistent single-slot product store.
#[async_trait]
pub trait CacheStore: Send + Sync {
    /// Replaces the stored list. Last write wins.
    async fn write(&self, products: &[Product]) -> CatalogResult<()>;

    /// Reads the stored list, surfacing failures.
    async fn try_read(&self) -> CatalogResult<Vec<Product>>;

    /// Reads the stored list; any failure degrades to empty.
    async fn read(&self) -> Vec<Product> {
        match self.try_read().await {
            Ok(products) => products,
            Err(e) => {
                warn!(error = %e, "Cache unreadable, treating as empty");
                Vec::new()
            }
        }
    }
}

// =============================================================================
// File Cache
// =============================================================================

/// JSON file cache.
#[derive(Debug, Clone)]
pub struct FileCacheStore {
    path: PathBuf,
    write_lock: Arc<Mutex<()>>,
}

impl FileCacheStore {
    /// Creates a store backed by `path`. The file need not exist yet.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        FileCacheStore {
            path: path.into(),
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    /// Creates a store at `<dir>/products_cache.json`.
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        Self::new(dir.as_ref().join(CACHE_FILE_NAME))
    }

    /// Path of the cache file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl CacheStore for FileCacheStore {
    async fn write(&self, products: &[Product]) -> CatalogResult<()> {
        let bytes = serde_json::to_vec(products)
            .map_err(|e| CatalogError::CacheWriteFailure(e.to_string()))?;
        let path = self.path.clone();
        let guard = self.write_lock.clone().lock_owned().await;

        tokio::task::spawn_blocking(move || {
            let _guard = guard;
            write_atomically(&path, &bytes)
        })
        .await
        .map_err(|e| CatalogError::CacheWriteFailure(e.to_string()))??;

        debug!(path = ?self.path, count = products.len(), "Cache written");
        Ok(())
    }

    async fn try_read(&self) -> CatalogResult<Vec<Product>> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = ?self.path, "No cache file yet");
                return Ok(Vec::new());
            }
            Err(e) => return Err(CatalogError::CacheReadFailure(e.to_string())),
        };

        serde_json::from_slice(&bytes).map_err(|e| {
            CatalogError::CacheReadFailure(format!("{}: {}", self.path.display(), e))
        })
    }
}

/// Writes `bytes` to a sibling temp file, then renames it over `path`.
fn write_atomically(path: &Path, bytes: &[u8]) -> CatalogResult<()> {
    let dir = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(dir).map_err(|e| CatalogError::CacheWriteFailure(e.to_string()))?;

    let mut tmp = tempfile::NamedTempFile::new_in(dir)
        .map_err(|e| CatalogError::CacheWriteFailure(e.to_string()))?;
    tmp.write_all(bytes)
        .and_then(|_| tmp.as_file().sync_all())
        .map_err(|e| CatalogError::CacheWriteFailure(e.to_string()))?;
    tmp.persist(path)
        .map_err(|e| CatalogError::CacheWriteFailure(e.error.to_string()))?;

    Ok(())
}

// =============================================================================
// In-Memory Cache
// =============================================================================

/// Process-local cache, for tests and ephemeral sessions.
#[derive(Debug, Default)]
pub struct MemoryCacheStore {
    slot: RwLock<Vec<Product>>,
}

impl MemoryCacheStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-filled with `products`.
    pub fn with_products(products: Vec<Product>) -> Self {
        MemoryCacheStore {
            slot: RwLock::new(products),
        }
    }
}

#[async_trait]
impl CacheStore for MemoryCacheStore {
    async fn write(&self, products: &[Product]) -> CatalogResult<()> {
        *self.slot.write().await = products.to_vec();
        Ok(())
    }

    async fn try_read(&self) -> CatalogResult<Vec<Product>> {
        Ok(self.slot.read().await.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn products() -> Vec<Product> {
        vec![
            Product::new(2, "Bread", "", "5901234123457"),
            Product::new(1, "Milk", "", "4006381333931").with_format("EAN_13"),
        ]
    }

    #[tokio::test]
    async fn test_missing_file_reads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileCacheStore::in_dir(dir.path());
        assert!(store.try_read().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_write_then_read_preserves_order() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileCacheStore::in_dir(dir.path().join("nested"));

        store.write(&products()).await.unwrap();
        assert_eq!(store.read().await, products());
    }

    #[tokio::test]
    async fn test_last_write_wins() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileCacheStore::in_dir(dir.path());

        store.write(&products()).await.unwrap();
        let newer = vec![Product::new(9, "Tea", "", "4601234567893")];
        store.write(&newer).await.unwrap();

        assert_eq!(store.read().await, newer);
    }

    #[tokio::test]
    async fn test_corrupt_file_degrades_to_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileCacheStore::in_dir(dir.path());
        std::fs::write(store.path(), b"[{\"id\": 1, \"na").unwrap();

        assert!(matches!(
            store.try_read().await,
            Err(CatalogError::CacheReadFailure(_))
        ));
        assert!(store.read().await.is_empty());
    }

    #[tokio::test]
    async fn test_write_leaves_no_temp_files() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileCacheStore::in_dir(dir.path());
        store.write(&products()).await.unwrap();

        let entries: Vec<_> = std::fs::read_dir(dir.path()).unwrap().collect();
        assert_eq!(entries.len(), 1);
    }

    #[tokio::test]
    async fn test_abandoned_write_lands_before_next() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileCacheStore::in_dir(dir.path());

        let stale: Vec<Product> = (0..50_000)
            .map(|id| Product::new(id, "Bulk", "", "4006381333931"))
            .collect();
        let writer = tokio::spawn({
            let store = store.clone();
            async move { store.write(&stale).await }
        });
        tokio::task::yield_now().await;
        writer.abort();

        let fresh = vec![Product::new(9, "Tea", "", "4601234567893")];
        store.write(&fresh).await.unwrap();

        assert_eq!(store.try_read().await.unwrap(), fresh);
    }

    #[tokio::test]
    async fn test_memory_store() {
        let store = MemoryCacheStore::new();
        assert!(store.read().await.is_empty());
        store.write(&products()).await.unwrap();
        assert_eq!(store.read().await, products());
    }
}
