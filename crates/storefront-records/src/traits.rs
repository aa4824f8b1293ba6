//! Collaborator contracts for the record stores.

use crate::error::RecordsError;
use crate::password;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use storefront_core::{CartEntry, Coupon, Product, User};

/// Input for creating a user account. The password arrives in plaintext and
/// is hashed by the backend before persistence.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Input for creating a product. `image` is already a hosted URL.
#[derive(Debug, Clone)]
pub struct NewProduct {
    pub name: String,
    pub description: String,
    pub price: f64,
    pub image: String,
    pub category: String,
}

/// Input for creating a coupon.
#[derive(Debug, Clone)]
pub struct NewCoupon {
    pub code: String,
    pub discount_percentage: u8,
    pub user_id: String,
    pub expiration_date: DateTime<Utc>,
}

/// A user with its password hash. Stays inside the auth path; everything
/// downstream of the route guard sees [`User`] only.
#[derive(Debug, Clone)]
pub struct UserRecord {
    pub user: User,
    pub password_hash: String,
}

impl UserRecord {
    /// Verify a login attempt against the stored hash.
    pub fn verify_password(&self, password: &str) -> bool {
        password::verify(password, &self.password_hash)
    }
}

/// User account storage.
#[async_trait]
pub trait UserRecords: Send + Sync {
    /// Create an account. Fails with [`RecordsError::DuplicateEmail`] when
    /// the email is taken.
    async fn create(&self, new: NewUser) -> Result<User, RecordsError>;

    /// Look up an account by email, hash included, for password verification.
    async fn find_by_email(&self, email: &str) -> Result<Option<UserRecord>, RecordsError>;

    /// Look up an account by id, without the hash.
    async fn find_by_id(&self, id: &str) -> Result<Option<User>, RecordsError>;

    /// Replace the user's cart wholesale and return the stored entries.
    async fn set_cart(
        &self,
        user_id: &str,
        entries: Vec<CartEntry>,
    ) -> Result<Vec<CartEntry>, RecordsError>;
}

/// Product catalog storage.
#[async_trait]
pub trait ProductRecords: Send + Sync {
    async fn list_all(&self) -> Result<Vec<Product>, RecordsError>;

    async fn list_featured(&self) -> Result<Vec<Product>, RecordsError>;

    async fn list_by_category(&self, category: &str) -> Result<Vec<Product>, RecordsError>;

    /// Up to `count` products picked for the recommendation strip.
    async fn sample(&self, count: u32) -> Result<Vec<Product>, RecordsError>;

    async fn find(&self, id: &str) -> Result<Option<Product>, RecordsError>;

    async fn create(&self, new: NewProduct) -> Result<Product, RecordsError>;

    /// Delete a product, returning it so the caller can clean up its hosted
    /// image. `None` when the id is unknown.
    async fn delete(&self, id: &str) -> Result<Option<Product>, RecordsError>;

    /// Flip `is_featured` and return the updated product.
    async fn toggle_featured(&self, id: &str) -> Result<Option<Product>, RecordsError>;
}

/// Coupon storage.
#[async_trait]
pub trait CouponRecords: Send + Sync {
    async fn create(&self, new: NewCoupon) -> Result<Coupon, RecordsError>;

    /// The user's single active coupon, if any.
    async fn active_for_user(&self, user_id: &str) -> Result<Option<Coupon>, RecordsError>;

    /// An active coupon owned by `user_id` with this code.
    async fn find_active_by_code(
        &self,
        user_id: &str,
        code: &str,
    ) -> Result<Option<Coupon>, RecordsError>;

    /// Activate or deactivate a coupon.
    async fn set_active(&self, id: &str, active: bool) -> Result<(), RecordsError>;
}
