//! # Domain Types
//!
//! Core domain types used throughout Zebraget.
//!
//! ## Type Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────────┐   ┌─────────────────┐   │
//! │  │    Product      │   │  CatalogSnapshot    │   │   Freshness     │   │
//! │  │  ─────────────  │   │  ─────────────────  │   │  ─────────────  │   │
//! │  │  id (i64)       │   │  products (ordered) │   │  Live           │   │
//! │  │  name           │   │  freshness          │   │  Cached         │   │
//! │  │  image_url      │   │  source             │   └─────────────────┘   │
//! │  │  barcode_value  │   │  loaded_at          │                         │
//! │  │  barcode_format │   └─────────────────────┘   ┌─────────────────┐   │
//! │  └─────────────────┘                             │   Symbology     │   │
//! │                                                  │  ─────────────  │   │
//! │                                                  │  Ean13          │   │
//! │                                                  │  Unrecognized   │   │
//! │                                                  └─────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Wire Format
//! Products travel as camelCase JSON, identical on the network, in the cache
//! file and in the bundled snapshot:
//! ```json
//! { "id": 1, "name": "Milk", "imageUrl": "https://…", "barcodeValue": "4006381333931", "barcodeFormat": null }
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::DEFAULT_SYMBOLOGY;

// =============================================================================
// Product
// =============================================================================

/// A catalog entry.
///
/// Immutable once constructed: a fresh fetch replaces the whole list, it never
/// patches individual records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Unique identifier, stable across fetches.
    #[ts(type = "number")]
    pub id: i64,

    /// Display name.
    pub name: String,

    /// Image reference (URI string).
    pub image_url: String,

    /// Barcode payload in the symbology's alphabet.
    pub barcode_value: String,

    /// Symbology tag (e.g. "EAN_13"). `None` means the default symbology.
    #[serde(default)]
    pub barcode_format: Option<String>,
}

impl Product {
    /// Creates a product with the default symbology.
    pub fn new(
        id: i64,
        name: impl Into<String>,
        image_url: impl Into<String>,
        barcode_value: impl Into<String>,
    ) -> Self {
        Product {
            id,
            name: name.into(),
            image_url: image_url.into(),
            barcode_value: barcode_value.into(),
            barcode_format: None,
        }
    }

    /// Sets an explicit symbology tag.
    pub fn with_format(mut self, format: impl Into<String>) -> Self {
        self.barcode_format = Some(format.into());
        self
    }

    /// Returns the symbology tag, falling back to [`DEFAULT_SYMBOLOGY`].
    pub fn symbology_tag(&self) -> &str {
        self.barcode_format.as_deref().unwrap_or(DEFAULT_SYMBOLOGY)
    }

    /// Returns the parsed symbology.
    pub fn symbology(&self) -> Symbology {
        Symbology::from_tag(self.symbology_tag())
    }
}

// =============================================================================
// Symbology
// =============================================================================

/// Barcode symbology resolved from a product's tag.
///
/// Only EAN-13 is supported; every other tag is kept verbatim so callers can
/// still display it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Symbology {
    /// 13-digit European Article Number with a mod-10 check digit.
    Ean13,
    /// Any tag we have no encoder for.
    Unrecognized(String),
}

impl Symbology {
    /// Parses a symbology tag. Matching is exact, as in the wire format.
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "EAN_13" => Symbology::Ean13,
            other => Symbology::Unrecognized(other.to_string()),
        }
    }

    /// Returns the wire tag.
    pub fn tag(&self) -> &str {
        match self {
            Symbology::Ean13 => "EAN_13",
            Symbology::Unrecognized(tag) => tag,
        }
    }
}

impl Default for Symbology {
    fn default() -> Self {
        Symbology::Ean13
    }
}

impl std::fmt::Display for Symbology {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.tag())
    }
}

// =============================================================================
// Freshness
// =============================================================================

/// Whether a snapshot was just fetched or served from local storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum Freshness {
    /// Fetched from the network during this load.
    Live,
    /// Served from the local cache or the bundled default.
    Cached,
}

impl Freshness {
    /// Returns true when the presentation layer should show an offline banner.
    pub fn is_offline(&self) -> bool {
        matches!(self, Freshness::Cached)
    }
}

impl std::fmt::Display for Freshness {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Freshness::Live => write!(f, "live"),
            Freshness::Cached => write!(f, "cached"),
        }
    }
}

// =============================================================================
// Snapshot Source
// =============================================================================

/// Which step of the fallback chain produced a snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum SnapshotSource {
    Network,
    Cache,
    Bundle,
}

impl SnapshotSource {
    /// Freshness implied by the source.
    pub fn freshness(&self) -> Freshness {
        match self {
            SnapshotSource::Network => Freshness::Live,
            SnapshotSource::Cache | SnapshotSource::Bundle => Freshness::Cached,
        }
    }
}

impl std::fmt::Display for SnapshotSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SnapshotSource::Network => write!(f, "network"),
            SnapshotSource::Cache => write!(f, "cache"),
            SnapshotSource::Bundle => write!(f, "bundle"),
        }
    }
}

// =============================================================================
// Catalog Snapshot
// =============================================================================

/// The product list returned by one `load()` call.
///
/// Ephemeral: rebuilt on every load request.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CatalogSnapshot {
    /// Products in server order.
    pub products: Vec<Product>,

    /// Live or cached.
    pub freshness: Freshness,

    /// Fallback step that produced the list.
    pub source: SnapshotSource,

    /// When the snapshot was assembled.
    #[ts(as = "String")]
    pub loaded_at: DateTime<Utc>,
}

impl CatalogSnapshot {
    /// Builds a snapshot; freshness follows from the source.
    pub fn new(products: Vec<Product>, source: SnapshotSource) -> Self {
        CatalogSnapshot {
            products,
            freshness: source.freshness(),
            source,
            loaded_at: Utc::now(),
        }
    }

    /// Returns true if the list came from the network.
    #[inline]
    pub fn is_live(&self) -> bool {
        self.freshness == Freshness::Live
    }

    /// Number of products.
    #[inline]
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// Returns true if the snapshot holds no products.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_product_wire_format() {
        let json = r#"{"id":7,"name":"Milk","imageUrl":"https://img/milk.png","barcodeValue":"4006381333931","barcodeFormat":null}"#;
        let product: Product = serde_json::from_str(json).unwrap();
        assert_eq!(product.id, 7);
        assert_eq!(product.image_url, "https://img/milk.png");
        assert_eq!(product.barcode_format, None);

        let back = serde_json::to_string(&product).unwrap();
        assert!(back.contains("\"barcodeValue\":\"4006381333931\""));
    }

    #[test]
    fn test_missing_format_defaults_to_ean13() {
        let json = r#"{"id":1,"name":"Tea","imageUrl":"","barcodeValue":"5901234123457"}"#;
        let product: Product = serde_json::from_str(json).unwrap();
        assert_eq!(product.symbology_tag(), "EAN_13");
        assert_eq!(product.symbology(), Symbology::Ean13);
    }

    #[test]
    fn test_unrecognized_symbology_keeps_tag() {
        let product = Product::new(1, "Box", "", "ABC").with_format("QR_CODE");
        assert_eq!(
            product.symbology(),
            Symbology::Unrecognized("QR_CODE".to_string())
        );
        assert_eq!(product.symbology().to_string(), "QR_CODE");
    }

    #[test]
    fn test_snapshot_freshness_follows_source() {
        let live = CatalogSnapshot::new(vec![], SnapshotSource::Network);
        assert!(live.is_live());

        let cached = CatalogSnapshot::new(vec![], SnapshotSource::Bundle);
        assert_eq!(cached.freshness, Freshness::Cached);
        assert!(cached.freshness.is_offline());
    }
}
