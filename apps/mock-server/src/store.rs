//! # Product Store
//!
//! The JSON database behind the mock server.
//!
//! ## File Format
//! ```json
//! { "products": [ { "id": 1, "name": "…", "imageUrl": "…", "barcodeValue": "…", "barcodeFormat": "EAN_13" } ] }
//! ```
//!
//! ## Write Path
//! ```text
//! write lock ──► clone db ──► apply change ──► persist (temp file + rename) ──► swap in
//! ```
//! A failed persist leaves both the file and the in-memory db unchanged.

use std::io::Write;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use tracing::{debug, info};
use zebraget_core::{search, validation, CoreError, Product};

use crate::error::{ServerError, ServerResult};

/// On-disk database document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Database {
    #[serde(default)]
    pub products: Vec<Product>,
}

/// Product fields accepted on create and replace.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductInput {
    /// Ignored on replace; absent or 0 on create means "assign one".
    #[serde(default)]
    pub id: Option<i64>,
    pub name: String,
    #[serde(default)]
    pub image_url: String,
    pub barcode_value: String,
    #[serde(default)]
    pub barcode_format: Option<String>,
}

impl ProductInput {
    fn into_product(self, id: i64) -> Product {
        Product {
            id,
            name: self.name.trim().to_string(),
            image_url: self.image_url.trim().to_string(),
            barcode_value: self.barcode_value,
            barcode_format: self.barcode_format,
        }
    }
}

/// File-backed product collection.
#[derive(Debug)]
pub struct ProductStore {
    path: PathBuf,
    db: RwLock<Database>,
}

impl ProductStore {
    /// Opens the database at `path`. A missing file starts an empty database.
    pub async fn open(path: impl Into<PathBuf>) -> ServerResult<Self> {
        let path = path.into();

        let db = match tokio::fs::read(&path).await {
            Ok(bytes) => serde_json::from_slice(&bytes)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                info!(?path, "Database file not found, starting empty");
                Database::default()
            }
            Err(e) => return Err(e.into()),
        };

        info!(?path, count = db.products.len(), "Product database loaded");
        Ok(Self::with_database(path, db))
    }

    /// Creates a store around an in-memory database; writes go to `path`.
    pub fn with_database(path: impl Into<PathBuf>, db: Database) -> Self {
        ProductStore {
            path: path.into(),
            db: RwLock::new(db),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    // =========================================================================
    // Reads
    // =========================================================================

    /// All products in file order, optionally filtered by name.
    pub async fn list(&self, query: Option<&str>) -> ServerResult<Vec<Product>> {
        let db = self.db.read().await;

        match query {
            Some(q) => {
                let q = validation::validate_search_query(q)?;
                Ok(search::filter_products(&db.products, &q)
                    .into_iter()
                    .cloned()
                    .collect())
            }
            None => Ok(db.products.clone()),
        }
    }

    pub async fn get(&self, id: i64) -> ServerResult<Product> {
        let db = self.db.read().await;
        let product = search::find_by_id(&db.products, id).ok_or(CoreError::ProductNotFound(id))?;
        Ok(product.clone())
    }

    // =========================================================================
    // Writes
    // =========================================================================

    /// Adds a product, assigning `max(id) + 1` when no id was given.
    pub async fn create(&self, input: ProductInput) -> ServerResult<Product> {
        let mut db = self.db.write().await;
        let mut next = db.clone();

        let id = match input.id {
            Some(id) if id != 0 => {
                if search::find_by_id(&next.products, id).is_some() {
                    return Err(ServerError::BadRequest(format!(
                        "Product {} already exists",
                        id
                    )));
                }
                id
            }
            _ => next
                .products
                .iter()
                .map(|p| p.id)
                .max()
                .unwrap_or(0)
                .checked_add(1)
                .ok_or_else(|| ServerError::BadRequest("id space exhausted".into()))?,
        };

        let product = input.into_product(id);
        validation::validate_product(&product)?;
        next.products.push(product.clone());

        self.persist(&next).await?;
        *db = next;

        info!(id, "Product created");
        Ok(product)
    }

    /// Replaces the product with `id`, keeping its position.
    pub async fn replace(&self, id: i64, input: ProductInput) -> ServerResult<Product> {
        let mut db = self.db.write().await;
        let mut next = db.clone();

        let slot = next
            .products
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or(CoreError::ProductNotFound(id))?;

        let product = input.into_product(id);
        validation::validate_product(&product)?;
        *slot = product.clone();

        self.persist(&next).await?;
        *db = next;

        info!(id, "Product replaced");
        Ok(product)
    }

    /// Removes the product with `id` and returns it.
    pub async fn delete(&self, id: i64) -> ServerResult<Product> {
        let mut db = self.db.write().await;
        let mut next = db.clone();

        let index = next
            .products
            .iter()
            .position(|p| p.id == id)
            .ok_or(CoreError::ProductNotFound(id))?;
        let removed = next.products.remove(index);

        self.persist(&next).await?;
        *db = next;

        info!(id, "Product deleted");
        Ok(removed)
    }

    /// Rewrites the database file atomically.
    async fn persist(&self, db: &Database) -> ServerResult<()> {
        let bytes = serde_json::to_vec_pretty(db)?;
        let path = self.path.clone();

        tokio::task::spawn_blocking(move || write_atomically(&path, &bytes))
            .await
            .map_err(|e| ServerError::Internal(e.to_string()))??;

        debug!(path = ?self.path, count = db.products.len(), "Database persisted");
        Ok(())
    }
}

fn write_atomically(path: &Path, bytes: &[u8]) -> ServerResult<()> {
    let dir = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };

    let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
    tmp.write_all(bytes)?;
    tmp.as_file().sync_all()?;
    tmp.persist(path).map_err(|e| ServerError::from(e.error))?;

    Ok(())
}
