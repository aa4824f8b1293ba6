//! Domain types shared across the workspace.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Account role. Everyone signs up as a customer; admins are promoted
/// out of band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Customer,
    Admin,
}

impl Default for Role {
    fn default() -> Self {
        Role::Customer
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Customer => write!(f, "customer"),
            Role::Admin => write!(f, "admin"),
        }
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "customer" => Ok(Role::Customer),
            "admin" => Ok(Role::Admin),
            other => Err(format!("unknown role: {other}")),
        }
    }
}

/// One entry in a user's cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartEntry {
    /// Product being purchased.
    pub product_id: String,
    /// Units of that product.
    pub quantity: u32,
}

/// A user as seen by API clients and downstream handlers.
///
/// Never carries the password hash; the record layer keeps that to itself.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: Role,
    #[serde(default)]
    pub cart_items: Vec<CartEntry>,
}

/// A catalog product.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    pub id: String,
    pub name: String,
    pub description: String,
    pub price: f64,
    /// URL of the hosted product image.
    pub image: String,
    pub category: String,
    #[serde(default)]
    pub is_featured: bool,
}

/// A per-user discount coupon.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Coupon {
    pub id: String,
    pub code: String,
    /// Percentage taken off the order total, 0..=100.
    pub discount_percentage: u8,
    /// Owner of the coupon; coupons are not transferable.
    pub user_id: String,
    pub is_active: bool,
    pub expiration_date: DateTime<Utc>,
}

impl Coupon {
    /// Whether the coupon's expiration date has passed.
    pub fn is_expired(&self) -> bool {
        self.expiration_date < Utc::now()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn role_round_trips_through_str() {
        assert_eq!("admin".parse::<Role>().unwrap(), Role::Admin);
        assert_eq!(Role::Customer.to_string(), "customer");
        assert!("root".parse::<Role>().is_err());
    }

    #[test]
    fn coupon_expiry() {
        let mut coupon = Coupon {
            id: "c1".into(),
            code: "WELCOME10".into(),
            discount_percentage: 10,
            user_id: "u1".into(),
            is_active: true,
            expiration_date: Utc::now() + Duration::days(1),
        };
        assert!(!coupon.is_expired());

        coupon.expiration_date = Utc::now() - Duration::minutes(1);
        assert!(coupon.is_expired());
    }
}
