//! Product handlers

use crate::error::{ApiError, Result};
use crate::services::ProductQuery;
use crate::AppState;
use axum::{
    extract::{rejection::QueryRejection, Path, Query, State},
    Json,
};
use catalog_types::Product;
use tracing::{debug, info};

pub async fn list(
    State(state): State<AppState>,
    query: std::result::Result<Query<ProductQuery>, QueryRejection>,
) -> Result<Json<Vec<Product>>> {
    let Query(query) = query.map_err(|e| ApiError::Validation(e.body_text()))?;

    let products = state.catalog.list(&query).await?;
    debug!(
        "Listed {} products (category={:?}, featured={:?})",
        products.len(),
        query.category,
        query.featured
    );

    Ok(Json(products))
}

pub async fn get(State(state): State<AppState>, Path(slug): Path<String>) -> Result<Json<Product>> {
    match state.catalog.get(&slug).await {
        Ok(product) => Ok(Json(product)),
        Err(ApiError::NotFound) => {
            info!("Product not found: {}", slug);
            Err(ApiError::NotFound)
        }
        Err(e) => Err(e),
    }
}
