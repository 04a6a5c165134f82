//! # Zebraget Mock Server
//!
//! HTTP server for the product list the catalog viewer fetches.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Mock Server                                      │
//! │                                                                         │
//! │  Viewer ───► HTTP (3000) ───► routes ───► ProductStore ───► db.json    │
//! │                   │                                                     │
//! │                   └── unmatched paths ───► ServeDir(public/)            │
//! │                                                                         │
//! │  Layers: Trace → CORS (permissive) → Cache-Control: no-cache           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod config;
pub mod error;
pub mod routes;
pub mod store;

use std::path::Path;
use std::sync::Arc;

use axum::http::{header, HeaderValue};
use axum::routing::get;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;

pub use config::{ConfigError, ServerConfig};
pub use error::{ServerError, ServerResult};
pub use store::{Database, ProductInput, ProductStore};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<ProductStore>,
}

impl AppState {
    pub fn new(store: ProductStore) -> Self {
        AppState {
            store: Arc::new(store),
        }
    }
}

/// Builds the full router: product routes, health, static fallback.
pub fn router(state: AppState, static_dir: impl AsRef<Path>) -> Router {
    Router::new()
        .route(
            "/products",
            get(routes::list_products).post(routes::create_product),
        )
        .route(
            "/products/{id}",
            get(routes::get_product)
                .put(routes::replace_product)
                .delete(routes::delete_product),
        )
        .route("/health", get(routes::health))
        .fallback_service(ServeDir::new(static_dir.as_ref()))
        .layer(SetResponseHeaderLayer::overriding(
            header::CACHE_CONTROL,
            HeaderValue::from_static("no-cache"),
        ))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
