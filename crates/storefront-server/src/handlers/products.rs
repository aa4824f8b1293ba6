//! Product catalog endpoints.

use crate::error::ApiError;
use crate::state::AppState;
use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use serde::Deserialize;
use storefront_core::Product;
use storefront_records::NewProduct;

/// Cache key for the featured-products listing.
pub const FEATURED_CACHE_KEY: &str = "featured_products";

const RECOMMENDED_COUNT: u32 = 3;

/// GET /api/products (admin)
pub async fn list_all(State(state): State<AppState>) -> Result<Json<Vec<Product>>, ApiError> {
    Ok(Json(state.products.list_all().await?))
}

/// GET /api/products/featured (public)
///
/// Served from the cache when possible; a miss falls through to the record
/// store and rewrites the cache.
pub async fn featured(State(state): State<AppState>) -> Result<Json<Vec<Product>>, ApiError> {
    if let Some(cached) = state.cache.get(FEATURED_CACHE_KEY).await? {
        match serde_json::from_str::<Vec<Product>>(&cached) {
            Ok(products) => return Ok(Json(products)),
            Err(e) => {
                // Stale or corrupt cache entry; rebuild below.
                tracing::warn!(error = %e, "dropping unreadable featured cache entry");
                state.cache.delete(FEATURED_CACHE_KEY).await?;
            }
        }
    }

    let products = state.products.list_featured().await?;
    write_featured_cache(&state, &products).await;
    Ok(Json(products))
}

async fn write_featured_cache(state: &AppState, products: &[Product]) {
    // Cache refresh is best-effort; the record store stays authoritative.
    match serde_json::to_string(products) {
        Ok(serialized) => {
            if let Err(e) = state.cache.set(FEATURED_CACHE_KEY, &serialized, None).await {
                tracing::warn!(error = %e, "failed to write featured cache");
            }
        }
        Err(e) => tracing::warn!(error = %e, "failed to serialize featured products"),
    }
}

/// GET /api/products/recommended (public)
pub async fn recommended(State(state): State<AppState>) -> Result<Json<Vec<Product>>, ApiError> {
    Ok(Json(state.products.sample(RECOMMENDED_COUNT).await?))
}

/// GET /api/products/category/{category} (public)
pub async fn by_category(
    State(state): State<AppState>,
    Path(category): Path<String>,
) -> Result<Json<Vec<Product>>, ApiError> {
    Ok(Json(state.products.list_by_category(&category).await?))
}

#[derive(Debug, Deserialize)]
pub struct CreateProductRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub price: f64,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub category: String,
}

/// POST /api/products (admin)
pub async fn create(
    State(state): State<AppState>,
    Json(body): Json<CreateProductRequest>,
) -> Result<(StatusCode, Json<Product>), ApiError> {
    if body.name.is_empty()
        || body.description.is_empty()
        || body.image.is_empty()
        || body.category.is_empty()
        || body.price <= 0.0
    {
        return Err(ApiError::Validation("All fields are required".to_string()));
    }

    let hosted_url = state
        .images
        .upload(&body.image)
        .await
        .map_err(|e| ApiError::Internal(e.into()))?;

    let product = state
        .products
        .create(NewProduct {
            name: body.name,
            description: body.description,
            price: body.price,
            image: hosted_url,
            category: body.category,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(product)))
}

/// DELETE /api/products/{id} (admin)
pub async fn remove(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Product>, ApiError> {
    let product = state
        .products
        .delete(&id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Product not found".to_string()))?;

    // Image cleanup is best-effort; the product is already gone.
    if let Err(e) = state.images.remove(&product.image).await {
        tracing::warn!(product_id = %product.id, error = %e, "failed to remove hosted image");
    }

    Ok(Json(product))
}

/// PATCH /api/products/{id} (admin) — toggle the featured flag.
pub async fn toggle_featured(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Product>, ApiError> {
    let product = state
        .products
        .toggle_featured(&id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Product not found".to_string()))?;

    let featured = state.products.list_featured().await?;
    write_featured_cache(&state, &featured).await;

    Ok(Json(product))
}
