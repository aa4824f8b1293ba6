//! Route definitions.

use crate::handlers::{auth, cart, coupons, payment, products};
use crate::middleware::{require_admin, require_auth};
use crate::state::AppState;
use axum::routing::{delete, get, post, put};
use axum::{Json, Router, middleware};
use serde_json::json;
use tower_http::trace::TraceLayer;

/// Build the full API router over the given state.
pub fn build_router(state: AppState) -> Router {
    let guard = |s: &AppState| middleware::from_fn_with_state(s.clone(), require_auth);

    let auth_routes = Router::new()
        .route("/signup", post(auth::signup))
        .route("/login", post(auth::login))
        .route("/logout", get(auth::logout))
        .route("/refresh-token", post(auth::refresh))
        .route("/profile", get(auth::profile).route_layer(guard(&state)));

    let product_routes = Router::new()
        // Admin surface.
        .route("/", get(products::list_all).post(products::create))
        .route(
            "/{id}",
            delete(products::remove).patch(products::toggle_featured),
        )
        .route_layer(middleware::from_fn(require_admin))
        .route_layer(guard(&state))
        // Public surface.
        .route("/featured", get(products::featured))
        .route("/recommended", get(products::recommended))
        .route("/category/{category}", get(products::by_category));

    let cart_routes = Router::new()
        .route("/", get(cart::list).post(cart::add).delete(cart::remove))
        .route("/all", delete(cart::clear))
        .route("/{id}", put(cart::update_quantity))
        .route_layer(guard(&state));

    let coupon_routes = Router::new()
        .route("/", get(coupons::mine))
        .route("/validate", post(coupons::validate))
        .route_layer(guard(&state));

    let payment_routes = Router::new()
        .route(
            "/create-checkout-session",
            post(payment::create_checkout_session),
        )
        .route("/checkout-success", post(payment::checkout_success))
        .route_layer(guard(&state));

    Router::new()
        .route("/healthz", get(healthz))
        .nest("/api/auth", auth_routes)
        .nest("/api/products", product_routes)
        .nest("/api/cart", cart_routes)
        .nest("/api/coupons", coupon_routes)
        .nest("/api/payment", payment_routes)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn healthz() -> Json<serde_json::Value> {
    Json(json!({ "ok": true, "service": "storefront-server" }))
}
