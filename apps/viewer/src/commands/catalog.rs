//! # Catalog Commands
//!
//! ## Detail Flow
//! ```text
//! load() ──► find_by_id ──► barcode::prepare(product)
//!                               │
//!              ┌────────────────┼─────────────────────┐
//!              ▼                ▼                     ▼
//!         Ok(matrix)   InvalidBarcodePayload     RenderFailure
//!         bars + digits  "Invalid EAN-13 …"    "Error generating barcode: …"
//! ```

use serde_json::json;
use tracing::{debug, info};
use zebraget_catalog::{CatalogSource, ViewerConfig};
use zebraget_core::{barcode, search, validation, CatalogSnapshot, Product};

/// Shown above any list served from the cache or the bundle.
pub const OFFLINE_BANNER: &str = "offline — showing cached data";

/// Horizontal sampling step: 600 px wide matrix → 100 terminal columns.
const BARCODE_COLUMN_STEP: usize = 6;

/// Terminal lines used for the bars.
const BARCODE_LINES: usize = 6;

/// `zebraget list [--query Q]`
pub async fn list(config: &ViewerConfig, query: Option<&str>, json: bool) -> anyhow::Result<bool> {
    let Some(snapshot) = load(config).await? else {
        return Ok(false);
    };

    let query = validation::validate_search_query(query.unwrap_or(""))?;
    let hits = search::filter_products(&snapshot.products, &query);
    debug!(query = %query, hits = hits.len(), "Catalog filtered");

    if json {
        let body = json!({
            "freshness": snapshot.freshness,
            "source": snapshot.source,
            "products": hits,
        });
        println!("{}", serde_json::to_string_pretty(&body)?);
    } else {
        for line in list_lines(&snapshot, &hits) {
            println!("{}", line);
        }
    }

    Ok(true)
}

/// `zebraget show <ID>`
pub async fn show(config: &ViewerConfig, id: i64, json: bool) -> anyhow::Result<bool> {
    let Some(snapshot) = load(config).await? else {
        return Ok(false);
    };

    let Some(product) = search::find_by_id(&snapshot.products, id) else {
        eprintln!("Product {} not found", id);
        return Ok(false);
    };

    if json {
        let barcode_error = barcode::prepare(product).err().map(|e| e.to_string());
        let body = json!({
            "freshness": snapshot.freshness,
            "product": product,
            "barcodeError": barcode_error,
        });
        println!("{}", serde_json::to_string_pretty(&body)?);
    } else {
        for line in detail_lines(product, snapshot.freshness.is_offline()) {
            println!("{}", line);
        }
    }

    Ok(true)
}

/// Runs one load. `None` means no data at all; the cause was printed.
async fn load(config: &ViewerConfig) -> anyhow::Result<Option<CatalogSnapshot>> {
    let source = CatalogSource::from_config(config)?;

    match source.load().await {
        Ok(snapshot) => {
            info!(
                source = %snapshot.source,
                count = snapshot.len(),
                "Catalog loaded"
            );
            Ok(Some(snapshot))
        }
        Err(e) => {
            eprintln!("{}", e.user_message());
            Ok(None)
        }
    }
}

// =============================================================================
// Formatting
// =============================================================================

fn list_lines(snapshot: &CatalogSnapshot, hits: &[&Product]) -> Vec<String> {
    let mut lines = Vec::with_capacity(hits.len() + 1);

    if snapshot.freshness.is_offline() {
        lines.push(OFFLINE_BANNER.to_string());
    }

    if hits.is_empty() {
        lines.push("No products found".to_string());
    }

    lines.extend(
        hits.iter()
            .map(|p| format!("{:>5}  {:<32}  {}", p.id, p.name, p.barcode_value)),
    );
    lines
}

fn detail_lines(product: &Product, offline: bool) -> Vec<String> {
    let mut lines = Vec::new();

    if offline {
        lines.push(OFFLINE_BANNER.to_string());
    }

    lines.push(product.name.clone());
    if !product.image_url.is_empty() {
        lines.push(format!("Image:   {}", product.image_url));
    }
    lines.push(format!(
        "Barcode: {} ({})",
        product.barcode_value,
        product.symbology()
    ));
    lines.push(String::new());

    match barcode::prepare(product) {
        Ok(matrix) => {
            lines.extend(matrix.to_text_rows(BARCODE_COLUMN_STEP, BARCODE_LINES));
            let width = matrix.width() / BARCODE_COLUMN_STEP;
            lines.push(format!("{:^width$}", product.barcode_value, width = width));
        }
        // Shown in place of the image
        Err(e) => lines.push(e.to_string()),
    }

    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use zebraget_core::SnapshotSource;

    fn catalog() -> Vec<Product> {
        vec![
            Product::new(1, "Whole Milk", "https://img/milk.png", "4006381333931"),
            Product::new(2, "Rye Bread", "", "5901234123457"),
        ]
    }

    #[test]
    fn test_cached_list_has_banner() {
        let snapshot = CatalogSnapshot::new(catalog(), SnapshotSource::Cache);
        let hits = search::filter_products(&snapshot.products, "");

        let lines = list_lines(&snapshot, &hits);
        assert_eq!(lines[0], OFFLINE_BANNER);
        assert_eq!(lines.len(), 3);
        assert!(lines[1].contains("Whole Milk"));
    }

    #[test]
    fn test_live_list_has_no_banner() {
        let snapshot = CatalogSnapshot::new(catalog(), SnapshotSource::Network);
        let hits = search::filter_products(&snapshot.products, "bread");

        let lines = list_lines(&snapshot, &hits);
        assert_eq!(lines.len(), 1);
        assert!(lines[0].contains("5901234123457"));
    }

    #[test]
    fn test_empty_search_result() {
        let snapshot = CatalogSnapshot::new(catalog(), SnapshotSource::Network);
        let hits = search::filter_products(&snapshot.products, "coffee");
        assert_eq!(list_lines(&snapshot, &hits), vec!["No products found"]);
    }

    #[test]
    fn test_detail_renders_bars() {
        let lines = detail_lines(&catalog()[0], false);

        assert_eq!(lines[0], "Whole Milk");
        assert!(lines.iter().any(|l| l == "Barcode: 4006381333931 (EAN_13)"));
        let bars: Vec<_> = lines.iter().filter(|l| l.contains('█')).collect();
        assert_eq!(bars.len(), BARCODE_LINES);
    }

    #[test]
    fn test_detail_shows_inline_errors() {
        let bad_checksum = Product::new(3, "Broken", "", "4006381333932");
        let lines = detail_lines(&bad_checksum, true);
        assert_eq!(lines[0], OFFLINE_BANNER);
        assert!(lines.last().unwrap().starts_with("Invalid EAN-13 barcode"));

        // Unknown symbologies pass validation but still need an EAN-13 payload
        let unknown = Product::new(4, "Gift Card", "", "GIFT-0042").with_format("CODE_128");
        let lines = detail_lines(&unknown, false);
        assert!(lines.last().unwrap().starts_with("Error generating barcode"));
    }
}
