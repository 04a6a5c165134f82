//! # HTTP Routes
//!
//! ```text
//! GET    /products          list (optional ?q= name filter)
//! GET    /products/{id}     one product
//! POST   /products          create, id assigned when absent or 0
//! PUT    /products/{id}     replace, id taken from the path
//! DELETE /products/{id}     remove
//! GET    /health            liveness
//! *                         static files from STATIC_DIR
//! ```

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use zebraget_core::Product;

use crate::error::{ServerError, ServerResult};
use crate::store::ProductInput;
use crate::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    pub q: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}

pub async fn list_products(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> ServerResult<Json<Vec<Product>>> {
    let products = state.store.list(params.q.as_deref()).await?;
    Ok(Json(products))
}

pub async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ServerResult<Json<Product>> {
    Ok(Json(state.store.get(id).await?))
}

pub async fn create_product(
    State(state): State<AppState>,
    payload: Result<Json<ProductInput>, JsonRejection>,
) -> ServerResult<(StatusCode, Json<Product>)> {
    let Json(input) = payload.map_err(|e| ServerError::BadRequest(e.body_text()))?;
    let product = state.store.create(input).await?;
    Ok((StatusCode::CREATED, Json(product)))
}

pub async fn replace_product(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    payload: Result<Json<ProductInput>, JsonRejection>,
) -> ServerResult<Json<Product>> {
    let Json(input) = payload.map_err(|e| ServerError::BadRequest(e.body_text()))?;
    Ok(Json(state.store.replace(id, input).await?))
}

pub async fn delete_product(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ServerResult<Json<Product>> {
    Ok(Json(state.store.delete(id).await?))
}

pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}
