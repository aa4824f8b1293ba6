//! # storefront-auth
//!
//! Session credentials for the storefront API.
//!
//! This crate provides functionality for:
//! - Issuing paired access/refresh tokens under two distinct signing secrets
//! - Verifying tokens, distinguishing "expired" from "invalid"
//! - Persisting the authoritative refresh token per user in a key-value store
//!
//! ## Two-Token Model
//!
//! | Token Type | Lifetime | Validation |
//! |------------|----------|------------|
//! | **Access token** | 15 minutes | Stateless: signature + expiry only |
//! | **Refresh token** | 7 days | Signature + expiry + byte-equality with the stored copy |
//!
//! The stored copy is what makes logout and re-login effective: a refresh
//! token that verifies cryptographically is still rejected once its store
//! entry has been deleted or replaced.

pub mod claims;
pub mod error;
pub mod store;
pub mod token;

pub use claims::TokenClaims;
pub use error::AuthError;
pub use store::{CredentialStore, KeyValueStore, MemoryStore, RedisStore};
pub use token::{ACCESS_TOKEN_TTL, REFRESH_TOKEN_TTL, TokenIssuer, TokenPair};
