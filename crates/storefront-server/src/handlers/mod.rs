pub mod auth;
pub mod cart;
pub mod coupons;
pub mod payment;
pub mod products;
