//! # Catalog Search
//!
//! Filters a loaded snapshot for the catalog list.
//!
//! ```text
//! query ""        → every product, original order
//! query "  "      → every product, original order
//! query "MILK"    → products whose name contains "milk" (any case)
//! ```

use crate::types::Product;

/// Returns products whose name contains `query`, ignoring case.
///
/// A blank query returns the whole list. Order is preserved.
///
/// ## Example
/// ```rust
/// use zebraget_core::{search::filter_products, Product};
///
/// let products = vec![
///     Product::new(1, "Whole Milk", "", "4006381333931"),
///     Product::new(2, "Rye Bread", "", "5901234123457"),
/// ];
/// let hits = filter_products(&products, "milk");
/// assert_eq!(hits.len(), 1);
/// assert_eq!(hits[0].id, 1);
/// ```
pub fn filter_products<'a>(products: &'a [Product], query: &str) -> Vec<&'a Product> {
    if query.trim().is_empty() {
        return products.iter().collect();
    }

    let needle = query.to_lowercase();
    products
        .iter()
        .filter(|p| p.name.to_lowercase().contains(&needle))
        .collect()
}

/// Finds a product by id.
pub fn find_by_id(products: &[Product], id: i64) -> Option<&Product> {
    products.iter().find(|p| p.id == id)
}
