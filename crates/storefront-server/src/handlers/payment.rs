//! Checkout endpoints, bridging the cart to the payment collaborator.

use crate::error::ApiError;
use crate::gateway::{CheckoutLineItem, CheckoutRequest, GatewayError};
use crate::middleware::CurrentUser;
use crate::state::AppState;
use axum::extract::State;
use axum::{Extension, Json};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

#[derive(Debug, Deserialize)]
pub struct CheckoutItem {
    pub id: String,
    #[serde(default = "default_quantity")]
    pub quantity: u32,
}

fn default_quantity() -> u32 {
    1
}

#[derive(Debug, Deserialize)]
pub struct CreateSessionRequest {
    #[serde(default)]
    pub products: Vec<CheckoutItem>,
    #[serde(default)]
    pub coupon_code: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct CreateSessionResponse {
    pub id: String,
    pub url: String,
    /// Order total after discounts, in cents.
    pub total_amount: i64,
}

fn to_cents(price: f64) -> i64 {
    (price * 100.0).round() as i64
}

/// POST /api/payment/create-checkout-session
pub async fn create_checkout_session(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    Json(body): Json<CreateSessionRequest>,
) -> Result<Json<CreateSessionResponse>, ApiError> {
    if body.products.is_empty() {
        return Err(ApiError::Validation("Products are required".to_string()));
    }

    let mut line_items = Vec::with_capacity(body.products.len());
    let mut total_cents: i64 = 0;
    for item in &body.products {
        let product = state
            .products
            .find(&item.id)
            .await?
            .ok_or_else(|| ApiError::NotFound("Product not found".to_string()))?;
        let unit = to_cents(product.price);
        total_cents += unit * i64::from(item.quantity);
        line_items.push(CheckoutLineItem {
            name: product.name,
            unit_amount_cents: unit,
            quantity: item.quantity,
        });
    }

    if let Some(code) = body.coupon_code.as_deref() {
        if let Some(coupon) = state
            .coupons
            .find_active_by_code(&current.0.id, code.trim())
            .await?
        {
            if !coupon.is_expired() {
                total_cents -= total_cents * i64::from(coupon.discount_percentage) / 100;
            }
        }
    }

    let session = state
        .checkout
        .create_session(CheckoutRequest {
            user_id: current.0.id.clone(),
            line_items,
            total_cents,
        })
        .await
        .map_err(|e| ApiError::Internal(e.into()))?;

    Ok(Json(CreateSessionResponse {
        id: session.id,
        url: session.url,
        total_amount: total_cents,
    }))
}

#[derive(Debug, Deserialize)]
pub struct CheckoutSuccessRequest {
    pub session_id: String,
    #[serde(default)]
    pub coupon_code: Option<String>,
}

/// POST /api/payment/checkout-success
///
/// Confirms the session with the provider and retires the coupon that was
/// spent on it, if any.
pub async fn checkout_success(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    Json(body): Json<CheckoutSuccessRequest>,
) -> Result<Json<Value>, ApiError> {
    state
        .checkout
        .confirm_session(&body.session_id)
        .await
        .map_err(|e| match e {
            GatewayError::SessionNotFound => {
                ApiError::NotFound("Checkout session not found".to_string())
            }
            other => ApiError::Internal(other.into()),
        })?;

    if let Some(code) = body.coupon_code.as_deref() {
        if let Some(coupon) = state
            .coupons
            .find_active_by_code(&current.0.id, code.trim())
            .await?
        {
            state.coupons.set_active(&coupon.id, false).await?;
        }
    }

    Ok(Json(json!({ "message": "Payment successful" })))
}
