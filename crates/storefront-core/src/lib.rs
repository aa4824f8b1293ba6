//! # storefront-core
//!
//! Shared domain types and environment configuration for the storefront API.
//!
//! This crate is dependency-light on purpose: it holds the types every other
//! crate agrees on (users, products, coupons, cart entries) plus the
//! process-wide [`config::AppConfig`] loaded once at startup.

pub mod config;
pub mod models;

pub use config::{AppConfig, Environment};
pub use models::{CartEntry, Coupon, Product, Role, User};
