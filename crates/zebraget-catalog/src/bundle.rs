//! # Bundled Snapshot
//!
//! Read-only product list compiled into the binary, the last resort of the
//! fallback chain. It is never written.

use tracing::warn;
use zebraget_core::Product;

/// JSON text of the bundled snapshot.
const EMBEDDED_PRODUCTS: &str = include_str!("../assets/products.json");

/// Fixed default product list.
#[derive(Debug, Clone, Default)]
pub struct BundledCatalog {
    products: Vec<Product>,
}

impl BundledCatalog {
    /// The snapshot shipped with this build.
    pub fn embedded() -> Self {
        Self::from_json(EMBEDDED_PRODUCTS)
    }

    /// Parses a snapshot from JSON. Unparsable input yields an empty catalog.
    pub fn from_json(json: &str) -> Self {
        match serde_json::from_str::<Vec<Product>>(json) {
            Ok(products) => BundledCatalog { products },
            Err(e) => {
                warn!(error = %e, "Bundled snapshot unreadable, treating as empty");
                BundledCatalog::default()
            }
        }
    }

    /// Builds a catalog from an in-memory list.
    pub fn from_products(products: Vec<Product>) -> Self {
        BundledCatalog { products }
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use zebraget_core::barcode;

    #[test]
    fn test_embedded_snapshot_is_usable() {
        let bundle = BundledCatalog::embedded();
        assert!(!bundle.is_empty());

        for product in bundle.products() {
            assert!(
                barcode::validate(&product.barcode_value, product.symbology_tag()),
                "bundled barcode for {} should validate",
                product.name
            );
        }
    }

    #[test]
    fn test_embedded_ids_are_unique() {
        let bundle = BundledCatalog::embedded();
        let mut ids: Vec<i64> = bundle.products().iter().map(|p| p.id).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), bundle.products().len());
    }

    #[test]
    fn test_unparsable_json_is_empty() {
        assert!(BundledCatalog::from_json("not json").is_empty());
        assert!(BundledCatalog::from_json("[]").is_empty());
    }
}
