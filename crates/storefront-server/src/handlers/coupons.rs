//! Coupon endpoints.

use crate::error::ApiError;
use crate::middleware::CurrentUser;
use crate::state::AppState;
use axum::extract::State;
use axum::{Extension, Json};
use serde::{Deserialize, Serialize};
use storefront_core::Coupon;

/// GET /api/coupons — the caller's single active coupon, or null.
pub async fn mine(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
) -> Result<Json<Option<Coupon>>, ApiError> {
    Ok(Json(state.coupons.active_for_user(&current.0.id).await?))
}

#[derive(Debug, Deserialize)]
pub struct ValidateCouponRequest {
    #[serde(default)]
    pub code: String,
}

#[derive(Debug, Serialize)]
pub struct ValidCouponResponse {
    pub message: String,
    pub code: String,
    pub discount_percentage: u8,
}

/// POST /api/coupons/validate
///
/// A coupon whose expiration date has passed is deactivated on the spot and
/// reported as expired.
pub async fn validate(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    Json(body): Json<ValidateCouponRequest>,
) -> Result<Json<ValidCouponResponse>, ApiError> {
    let code = body.code.trim();
    if code.is_empty() {
        return Err(ApiError::Validation(
            "Valid coupon code is required".to_string(),
        ));
    }

    let coupon: Coupon = state
        .coupons
        .find_active_by_code(&current.0.id, code)
        .await?
        .ok_or_else(|| ApiError::NotFound("Coupon not found".to_string()))?;

    if coupon.is_expired() {
        state.coupons.set_active(&coupon.id, false).await?;
        return Err(ApiError::NotFound("Coupon expired".to_string()));
    }

    Ok(Json(ValidCouponResponse {
        message: "Coupon is valid".to_string(),
        code: coupon.code,
        discount_percentage: coupon.discount_percentage,
    }))
}
