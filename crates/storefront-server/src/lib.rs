//! # storefront-server
//!
//! The storefront HTTP API: session lifecycle (signup, login, logout,
//! refresh, profile) plus the product catalog, per-user cart, coupons, and
//! checkout. Handlers talk to constructor-injected collaborators only, so the
//! whole router can run against in-memory backends in tests.

pub mod cookies;
pub mod error;
pub mod gateway;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod state;

pub use error::ApiError;
pub use routes::build_router;
pub use state::AppState;
