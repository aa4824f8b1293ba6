//! Cart endpoints. Cart entries live on the user record; every mutation
//! replaces the stored cart wholesale and echoes the result.

use crate::error::ApiError;
use crate::middleware::CurrentUser;
use crate::state::AppState;
use axum::Json;
use axum::extract::{Path, State};
use axum::Extension;
use serde::{Deserialize, Serialize};
use storefront_core::{CartEntry, Product};

/// A cart line joined with its product, as returned to the client.
#[derive(Debug, Serialize)]
pub struct CartProduct {
    #[serde(flatten)]
    pub product: Product,
    pub quantity: u32,
}

/// GET /api/cart
pub async fn list(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
) -> Result<Json<Vec<CartProduct>>, ApiError> {
    let mut items = Vec::with_capacity(current.0.cart_items.len());
    for entry in &current.0.cart_items {
        // Entries pointing at deleted products are skipped rather than failing
        // the whole cart.
        if let Some(product) = state.products.find(&entry.product_id).await? {
            items.push(CartProduct {
                product,
                quantity: entry.quantity,
            });
        }
    }
    Ok(Json(items))
}

#[derive(Debug, Deserialize)]
pub struct AddToCartRequest {
    #[serde(default)]
    pub product_id: String,
}

/// POST /api/cart — add a product, or bump its quantity when present.
pub async fn add(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    Json(body): Json<AddToCartRequest>,
) -> Result<Json<Vec<CartEntry>>, ApiError> {
    if body.product_id.is_empty() {
        return Err(ApiError::Validation("Product ID is required".to_string()));
    }

    let mut entries = current.0.cart_items;
    match entries.iter_mut().find(|e| e.product_id == body.product_id) {
        Some(entry) => entry.quantity += 1,
        None => entries.push(CartEntry {
            product_id: body.product_id,
            quantity: 1,
        }),
    }

    Ok(Json(state.users.set_cart(&current.0.id, entries).await?))
}

#[derive(Debug, Deserialize)]
pub struct RemoveFromCartRequest {
    #[serde(default)]
    pub product_id: Option<String>,
}

/// DELETE /api/cart — remove one product, or everything when no id is given.
pub async fn remove(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    Json(body): Json<RemoveFromCartRequest>,
) -> Result<Json<Vec<CartEntry>>, ApiError> {
    let entries = match body.product_id {
        Some(product_id) => current
            .0
            .cart_items
            .into_iter()
            .filter(|e| e.product_id != product_id)
            .collect(),
        None => Vec::new(),
    };
    Ok(Json(state.users.set_cart(&current.0.id, entries).await?))
}

/// DELETE /api/cart/all
pub async fn clear(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
) -> Result<Json<Vec<CartEntry>>, ApiError> {
    Ok(Json(state.users.set_cart(&current.0.id, Vec::new()).await?))
}

#[derive(Debug, Deserialize)]
pub struct UpdateQuantityRequest {
    pub quantity: u32,
}

/// PUT /api/cart/{id} — set a line's quantity; zero removes the line.
pub async fn update_quantity(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    Path(product_id): Path<String>,
    Json(body): Json<UpdateQuantityRequest>,
) -> Result<Json<Vec<CartEntry>>, ApiError> {
    let mut entries = current.0.cart_items;
    if !entries.iter().any(|e| e.product_id == product_id) {
        return Err(ApiError::NotFound("Product not found".to_string()));
    }

    if body.quantity == 0 {
        entries.retain(|e| e.product_id != product_id);
    } else if let Some(entry) = entries.iter_mut().find(|e| e.product_id == product_id) {
        entry.quantity = body.quantity;
    }

    Ok(Json(state.users.set_cart(&current.0.id, entries).await?))
}
