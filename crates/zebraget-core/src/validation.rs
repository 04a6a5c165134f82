//! # Validation Module
//!
//! Product record validation for writers of the catalog (the mock server's
//! admin endpoints). Readers never reject records: a product with a bad
//! barcode is still listed, and the detail view shows the problem inline.
//!
//! ## Validation Layers
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Deserialization (serde)                                      │
//! │  └── Field presence and types                                          │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                  │
//! │  ├── name non-empty, bounded                                           │
//! │  ├── imageUrl empty or http(s)                                         │
//! │  └── barcodeValue non-empty, no whitespace                             │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: barcode::validate (checksum, in the detail view)             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use crate::error::ValidationError;
use crate::types::Product;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Maximum product name length.
pub const MAX_NAME_LEN: usize = 200;

/// Maximum barcode payload length.
pub const MAX_BARCODE_LEN: usize = 64;

/// Maximum search query length.
pub const MAX_QUERY_LEN: usize = 100;

// =============================================================================
// Field Validators
// =============================================================================

/// Validates a product name.
///
/// ## Rules
/// - Must not be empty after trimming
/// - At most 200 characters
///
/// ## Example
/// ```rust
/// use zebraget_core::validation::validate_product_name;
///
/// assert!(validate_product_name("Whole Milk 1L").is_ok());
/// assert!(validate_product_name("   ").is_err());
/// ```
pub fn validate_product_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }

    if name.chars().count() > MAX_NAME_LEN {
        return Err(ValidationError::TooLong {
            field: "name".to_string(),
            max: MAX_NAME_LEN,
        });
    }

    Ok(())
}

/// Validates an image reference.
///
/// Empty is allowed (no image); otherwise it must be an `http://` or
/// `https://` URL.
pub fn validate_image_url(url: &str) -> ValidationResult<()> {
    if url.is_empty() {
        return Ok(());
    }

    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(ValidationError::InvalidFormat {
            field: "imageUrl".to_string(),
            reason: "must start with http:// or https://".to_string(),
        });
    }

    Ok(())
}

/// Validates a barcode payload's shape.
///
/// The checksum is NOT checked here; unknown symbologies may use any
/// alphabet.
pub fn validate_barcode_value(value: &str) -> ValidationResult<()> {
    if value.is_empty() {
        return Err(ValidationError::Required {
            field: "barcodeValue".to_string(),
        });
    }

    if value.len() > MAX_BARCODE_LEN {
        return Err(ValidationError::TooLong {
            field: "barcodeValue".to_string(),
            max: MAX_BARCODE_LEN,
        });
    }

    if value.chars().any(char::is_whitespace) {
        return Err(ValidationError::InvalidFormat {
            field: "barcodeValue".to_string(),
            reason: "must not contain whitespace".to_string(),
        });
    }

    Ok(())
}

/// Validates a whole product record.
pub fn validate_product(product: &Product) -> ValidationResult<()> {
    validate_product_name(&product.name)?;
    validate_image_url(&product.image_url)?;
    validate_barcode_value(&product.barcode_value)?;
    Ok(())
}

/// Validates a search query.
///
/// ## Rules
/// - Can be empty (returns all results)
/// - Maximum 100 characters
///
/// ## Returns
/// The trimmed query string.
pub fn validate_search_query(query: &str) -> ValidationResult<String> {
    let query = query.trim();

    if query.chars().count() > MAX_QUERY_LEN {
        return Err(ValidationError::TooLong {
            field: "query".to_string(),
            max: MAX_QUERY_LEN,
        });
    }

    Ok(query.to_string())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_product_name() {
        assert!(validate_product_name("Whole Milk 1L").is_ok());
        assert!(validate_product_name("").is_err());
        assert!(validate_product_name(&"A".repeat(201)).is_err());
    }

    #[test]
    fn test_validate_image_url() {
        assert!(validate_image_url("").is_ok());
        assert!(validate_image_url("https://cdn.example.com/milk.png").is_ok());
        assert!(validate_image_url("ftp://example.com/milk.png").is_err());
    }

    #[test]
    fn test_validate_barcode_value() {
        assert!(validate_barcode_value("4006381333931").is_ok());
        // Checksum is not this layer's concern
        assert!(validate_barcode_value("4006381333932").is_ok());
        assert!(validate_barcode_value("").is_err());
        assert!(validate_barcode_value("400 638").is_err());
        assert!(validate_barcode_value(&"1".repeat(65)).is_err());
    }

    #[test]
    fn test_validate_product() {
        let product = Product::new(1, "Milk", "https://img/milk.png", "4006381333931");
        assert!(validate_product(&product).is_ok());

        let nameless = Product::new(1, " ", "", "4006381333931");
        assert!(matches!(
            validate_product(&nameless),
            Err(ValidationError::Required { .. })
        ));
    }

    #[test]
    fn test_validate_search_query() {
        assert_eq!(validate_search_query("  milk ").unwrap(), "milk");
        assert_eq!(validate_search_query("").unwrap(), "");
        assert!(validate_search_query(&"q".repeat(101)).is_err());
    }
}
