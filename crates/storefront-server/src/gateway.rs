//! Checkout and image-hosting collaborator boundaries.
//!
//! The real payment processor and image host live outside this repository;
//! handlers only see these traits. The dev implementations keep a local,
//! self-consistent view so the API is fully exercisable without either
//! provider.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::RwLock;
use thiserror::Error;
use uuid::Uuid;

/// Errors from the external providers.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// The referenced checkout session does not exist.
    #[error("checkout session not found")]
    SessionNotFound,

    /// Provider-side failure.
    #[error("provider error: {0}")]
    Provider(String),
}

/// One priced line in a checkout session. Amounts are in cents; the payment
/// provider contract is integer currency.
#[derive(Debug, Clone)]
pub struct CheckoutLineItem {
    pub name: String,
    pub unit_amount_cents: i64,
    pub quantity: u32,
}

/// A checkout session to be created with the provider.
#[derive(Debug, Clone)]
pub struct CheckoutRequest {
    pub user_id: String,
    pub line_items: Vec<CheckoutLineItem>,
    /// Total after discounts, in cents.
    pub total_cents: i64,
}

/// A created session the client is redirected to.
#[derive(Debug, Clone)]
pub struct CheckoutSession {
    pub id: String,
    pub url: String,
}

/// Payment provider boundary.
#[async_trait]
pub trait CheckoutGateway: Send + Sync {
    /// Create a hosted checkout session for the given order.
    async fn create_session(&self, request: CheckoutRequest)
    -> Result<CheckoutSession, GatewayError>;

    /// Confirm that a session completed payment.
    async fn confirm_session(&self, session_id: &str) -> Result<(), GatewayError>;
}

/// Image host boundary. `upload` takes the client-submitted image payload and
/// returns the hosted URL persisted on the product.
#[async_trait]
pub trait ImageHost: Send + Sync {
    async fn upload(&self, image: &str) -> Result<String, GatewayError>;

    /// Best-effort removal of a previously hosted image.
    async fn remove(&self, url: &str) -> Result<(), GatewayError>;
}

/// Local checkout gateway: sessions live in memory and every confirmation of
/// a known session succeeds.
#[derive(Default)]
pub struct LocalGateway {
    sessions: RwLock<HashMap<String, CheckoutRequest>>,
}

impl LocalGateway {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CheckoutGateway for LocalGateway {
    async fn create_session(
        &self,
        request: CheckoutRequest,
    ) -> Result<CheckoutSession, GatewayError> {
        let id = Uuid::new_v4().to_string();
        let url = format!("https://checkout.invalid/session/{id}");
        self.sessions
            .write()
            .map_err(|e| GatewayError::Provider(e.to_string()))?
            .insert(id.clone(), request);
        Ok(CheckoutSession { id, url })
    }

    async fn confirm_session(&self, session_id: &str) -> Result<(), GatewayError> {
        let sessions = self
            .sessions
            .read()
            .map_err(|e| GatewayError::Provider(e.to_string()))?;
        if sessions.contains_key(session_id) {
            Ok(())
        } else {
            Err(GatewayError::SessionNotFound)
        }
    }
}

/// Image host that passes the submitted payload through as the hosted URL.
pub struct PassthroughImages;

#[async_trait]
impl ImageHost for PassthroughImages {
    async fn upload(&self, image: &str) -> Result<String, GatewayError> {
        Ok(image.to_string())
    }

    async fn remove(&self, _url: &str) -> Result<(), GatewayError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn local_gateway_confirms_only_known_sessions() {
        let gateway = LocalGateway::new();
        let session = gateway
            .create_session(CheckoutRequest {
                user_id: "u1".into(),
                line_items: vec![],
                total_cents: 1000,
            })
            .await
            .unwrap();

        assert!(gateway.confirm_session(&session.id).await.is_ok());
        assert!(matches!(
            gateway.confirm_session("nope").await,
            Err(GatewayError::SessionNotFound)
        ));
    }
}
