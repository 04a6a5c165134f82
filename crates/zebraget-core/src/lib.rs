//! # zebraget-core: Pure Domain Logic for the Zebraget Catalog
//!
//! This crate holds the parts of the catalog viewer that never touch I/O:
//! the product model, the barcode codec, the search filter and record
//! validation.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Zebraget Architecture                            │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │              Presentation (apps/viewer, web, mobile)            │   │
//! │  │     Catalog list ──► Search ──► Product detail ──► Barcode      │   │
//! │  └───────────────┬─────────────────────────────────┬───────────────┘   │
//! │                  │ load()                          │ prepare()          │
//! │  ┌───────────────▼──────────────┐  ┌───────────────▼───────────────┐   │
//! │  │  zebraget-catalog            │  │  ★ zebraget-core (THIS) ★     │   │
//! │  │  network → cache → bundle    │  │                               │   │
//! │  └──────────────────────────────┘  │  types · barcode · search     │   │
//! │                                    │  validation · error           │   │
//! │                                    │                               │   │
//! │                                    │  NO I/O • PURE FUNCTIONS      │   │
//! │                                    └───────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Product, CatalogSnapshot, Freshness, Symbology)
//! - [`barcode`] - EAN-13 checksum validation and pixel-matrix rendering
//! - [`search`] - Catalog search filter
//! - [`validation`] - Product record validation
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use zebraget_core::barcode;
//!
//! assert!(barcode::validate("4006381333931", "EAN_13"));
//! assert!(!barcode::validate("4006381333932", "EAN_13"));
//!
//! let matrix = barcode::render("4006381333931", "EAN_13").unwrap();
//! assert_eq!((matrix.width(), matrix.height()), (600, 300));
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod barcode;
pub mod error;
pub mod search;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use barcode::PixelMatrix;
pub use error::{BarcodeError, CoreError, RenderError, ValidationError};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Symbology tag assumed when a product carries no `barcodeFormat`.
pub const DEFAULT_SYMBOLOGY: &str = "EAN_13";

/// Rendered barcode width in logical pixels.
pub const BARCODE_WIDTH: usize = 600;

/// Rendered barcode height in logical pixels.
pub const BARCODE_HEIGHT: usize = 300;
