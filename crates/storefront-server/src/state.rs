//! Application state shared by all handlers.

use crate::gateway::{CheckoutGateway, ImageHost};
use std::sync::Arc;
use storefront_auth::{CredentialStore, KeyValueStore, TokenIssuer};
use storefront_core::Environment;
use storefront_records::{CouponRecords, ProductRecords, UserRecords};

/// Constructor-injected collaborators. Everything is behind an `Arc` so the
/// state clones cheaply into each request task.
#[derive(Clone)]
pub struct AppState {
    pub environment: Environment,
    pub tokens: Arc<TokenIssuer>,
    /// Authoritative per-user refresh tokens.
    pub credentials: CredentialStore,
    /// General key-value cache (featured products).
    pub cache: Arc<dyn KeyValueStore>,
    pub users: Arc<dyn UserRecords>,
    pub products: Arc<dyn ProductRecords>,
    pub coupons: Arc<dyn CouponRecords>,
    pub checkout: Arc<dyn CheckoutGateway>,
    pub images: Arc<dyn ImageHost>,
}

impl AppState {
    /// Whether session cookies should carry the `Secure` attribute.
    pub fn secure_cookies(&self) -> bool {
        self.environment.is_production()
    }
}
