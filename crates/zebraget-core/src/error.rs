//! # Error Types
//!
//! Domain-specific error types for zebraget-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  zebraget-core errors (this file)                                      │
//! │  ├── CoreError        - General domain errors                          │
//! │  ├── ValidationError  - Product record validation failures             │
//! │  ├── BarcodeError     - What the detail view shows inline              │
//! │  └── RenderError      - Why the encoder refused a payload              │
//! │                                                                         │
//! │  zebraget-catalog errors (separate crate)                              │
//! │  └── CatalogError     - Network / cache / config failures              │
//! │                                                                         │
//! │  Flow: RenderError → BarcodeError → inline message in detail view      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! None of these are fatal; every one is recoverable at the call site.

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core domain errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// No product with this id in the current snapshot.
    #[error("Product not found: {0}")]
    ProductNotFound(i64),

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Barcode could not be shown.
    #[error(transparent)]
    Barcode(#[from] BarcodeError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Product record validation errors.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Invalid format (e.g., image reference that is not a URL).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

// =============================================================================
// Barcode Errors
// =============================================================================

/// Errors surfaced by the product detail view in place of the barcode image.
///
/// ## User Workflow
/// ```text
/// Open product detail
///      │
///      ▼
/// validate(payload, symbology) ── false ──► InvalidBarcodePayload
///      │ true                               "Invalid EAN-13 barcode"
///      ▼
/// render(payload, symbology) ──── Err ────► RenderFailure
///      │ Ok                                 "Error generating barcode"
///      ▼
/// PixelMatrix shown with the payload underneath
/// ```
#[derive(Debug, Error)]
pub enum BarcodeError {
    /// Checksum validation failed.
    #[error("Invalid {symbology} barcode: {value}")]
    InvalidBarcodePayload { value: String, symbology: String },

    /// The encoder could not produce a matrix.
    #[error("Error generating barcode: {0}")]
    RenderFailure(#[from] RenderError),
}

/// Reasons the EAN-13 encoder rejects a payload.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RenderError {
    /// Payload is neither 12 nor 13 characters long.
    #[error("expected 12 or 13 digits, got {len}")]
    InvalidLength { len: usize },

    /// Payload contains something other than ASCII digits.
    #[error("invalid character {ch:?} at position {position}")]
    InvalidCharacter { ch: char, position: usize },

    /// 13-digit payload whose last digit is not the computed check digit.
    #[error("check digit mismatch: expected {expected}, got {actual}")]
    ChecksumMismatch { expected: u8, actual: u8 },
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

/// Result type for barcode rendering.
pub type RenderResult<T> = Result<T, RenderError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_barcode_error_messages() {
        let err = BarcodeError::InvalidBarcodePayload {
            value: "4006381333932".to_string(),
            symbology: "EAN-13".to_string(),
        };
        assert_eq!(err.to_string(), "Invalid EAN-13 barcode: 4006381333932");

        let err: BarcodeError = RenderError::InvalidLength { len: 3 }.into();
        assert_eq!(
            err.to_string(),
            "Error generating barcode: expected 12 or 13 digits, got 3"
        );
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "name".to_string(),
        };
        assert_eq!(err.to_string(), "name is required");
    }

    #[test]
    fn test_conversions_into_core_error() {
        let core: CoreError = ValidationError::Required {
            field: "barcodeValue".to_string(),
        }
        .into();
        assert!(matches!(core, CoreError::Validation(_)));

        let core: CoreError = BarcodeError::from(RenderError::InvalidLength { len: 0 }).into();
        assert!(matches!(core, CoreError::Barcode(_)));
    }
}
