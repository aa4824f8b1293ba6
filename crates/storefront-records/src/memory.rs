//! In-memory record stores for tests and local development.

use crate::error::RecordsError;
use crate::password;
use crate::traits::{
    CouponRecords, NewCoupon, NewProduct, NewUser, ProductRecords, UserRecord, UserRecords,
};
use async_trait::async_trait;
use std::sync::RwLock;
use storefront_core::{CartEntry, Coupon, Product, Role, User};
use uuid::Uuid;

/// All three record stores backed by locked vectors.
///
/// Sampling is deterministic (first N) rather than random; callers that care
/// about ordering are tests, which want determinism anyway.
#[derive(Default)]
pub struct MemoryRecords {
    users: RwLock<Vec<UserRecord>>,
    products: RwLock<Vec<Product>>,
    coupons: RwLock<Vec<Coupon>>,
}

impl MemoryRecords {
    pub fn new() -> Self {
        Self::default()
    }

    /// Promote an account to admin. Test/dev convenience; production roles
    /// are managed directly in the database.
    pub fn promote_to_admin(&self, user_id: &str) -> Result<(), RecordsError> {
        let mut users = lock_write(&self.users)?;
        let record = users
            .iter_mut()
            .find(|r| r.user.id == user_id)
            .ok_or(RecordsError::NotFound)?;
        record.user.role = Role::Admin;
        Ok(())
    }
}

fn lock_read<T>(lock: &RwLock<T>) -> Result<std::sync::RwLockReadGuard<'_, T>, RecordsError> {
    lock.read().map_err(|e| RecordsError::Database(e.to_string()))
}

fn lock_write<T>(lock: &RwLock<T>) -> Result<std::sync::RwLockWriteGuard<'_, T>, RecordsError> {
    lock.write().map_err(|e| RecordsError::Database(e.to_string()))
}

#[async_trait]
impl UserRecords for MemoryRecords {
    async fn create(&self, new: NewUser) -> Result<User, RecordsError> {
        let password_hash = password::hash(&new.password)?;
        let mut users = lock_write(&self.users)?;
        if users.iter().any(|r| r.user.email == new.email) {
            return Err(RecordsError::DuplicateEmail);
        }

        let user = User {
            id: Uuid::new_v4().to_string(),
            name: new.name,
            email: new.email,
            role: Role::Customer,
            cart_items: Vec::new(),
        };
        users.push(UserRecord {
            user: user.clone(),
            password_hash,
        });
        Ok(user)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<UserRecord>, RecordsError> {
        let users = lock_read(&self.users)?;
        Ok(users.iter().find(|r| r.user.email == email).cloned())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<User>, RecordsError> {
        let users = lock_read(&self.users)?;
        Ok(users.iter().find(|r| r.user.id == id).map(|r| r.user.clone()))
    }

    async fn set_cart(
        &self,
        user_id: &str,
        entries: Vec<CartEntry>,
    ) -> Result<Vec<CartEntry>, RecordsError> {
        let mut users = lock_write(&self.users)?;
        let record = users
            .iter_mut()
            .find(|r| r.user.id == user_id)
            .ok_or(RecordsError::NotFound)?;
        record.user.cart_items = entries.clone();
        Ok(entries)
    }
}

#[async_trait]
impl ProductRecords for MemoryRecords {
    async fn list_all(&self) -> Result<Vec<Product>, RecordsError> {
        Ok(lock_read(&self.products)?.clone())
    }

    async fn list_featured(&self) -> Result<Vec<Product>, RecordsError> {
        let products = lock_read(&self.products)?;
        Ok(products.iter().filter(|p| p.is_featured).cloned().collect())
    }

    async fn list_by_category(&self, category: &str) -> Result<Vec<Product>, RecordsError> {
        let products = lock_read(&self.products)?;
        Ok(products
            .iter()
            .filter(|p| p.category == category)
            .cloned()
            .collect())
    }

    async fn sample(&self, count: u32) -> Result<Vec<Product>, RecordsError> {
        let products = lock_read(&self.products)?;
        Ok(products.iter().take(count as usize).cloned().collect())
    }

    async fn find(&self, id: &str) -> Result<Option<Product>, RecordsError> {
        let products = lock_read(&self.products)?;
        Ok(products.iter().find(|p| p.id == id).cloned())
    }

    async fn create(&self, new: NewProduct) -> Result<Product, RecordsError> {
        let product = Product {
            id: Uuid::new_v4().to_string(),
            name: new.name,
            description: new.description,
            price: new.price,
            image: new.image,
            category: new.category,
            is_featured: false,
        };
        lock_write(&self.products)?.push(product.clone());
        Ok(product)
    }

    async fn delete(&self, id: &str) -> Result<Option<Product>, RecordsError> {
        let mut products = lock_write(&self.products)?;
        let position = products.iter().position(|p| p.id == id);
        Ok(position.map(|i| products.remove(i)))
    }

    async fn toggle_featured(&self, id: &str) -> Result<Option<Product>, RecordsError> {
        let mut products = lock_write(&self.products)?;
        Ok(products.iter_mut().find(|p| p.id == id).map(|p| {
            p.is_featured = !p.is_featured;
            p.clone()
        }))
    }
}

#[async_trait]
impl CouponRecords for MemoryRecords {
    async fn create(&self, new: NewCoupon) -> Result<Coupon, RecordsError> {
        let coupon = Coupon {
            id: Uuid::new_v4().to_string(),
            code: new.code,
            discount_percentage: new.discount_percentage.min(100),
            user_id: new.user_id,
            is_active: true,
            expiration_date: new.expiration_date,
        };
        lock_write(&self.coupons)?.push(coupon.clone());
        Ok(coupon)
    }

    async fn active_for_user(&self, user_id: &str) -> Result<Option<Coupon>, RecordsError> {
        let coupons = lock_read(&self.coupons)?;
        Ok(coupons
            .iter()
            .find(|c| c.user_id == user_id && c.is_active)
            .cloned())
    }

    async fn find_active_by_code(
        &self,
        user_id: &str,
        code: &str,
    ) -> Result<Option<Coupon>, RecordsError> {
        let coupons = lock_read(&self.coupons)?;
        Ok(coupons
            .iter()
            .find(|c| c.user_id == user_id && c.code == code && c.is_active)
            .cloned())
    }

    async fn set_active(&self, id: &str, active: bool) -> Result<(), RecordsError> {
        let mut coupons = lock_write(&self.coupons)?;
        let coupon = coupons
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or(RecordsError::NotFound)?;
        coupon.is_active = active;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::{NewCoupon, NewProduct, NewUser};
    use chrono::{Duration, Utc};

    fn new_user(email: &str) -> NewUser {
        NewUser {
            name: "Alice".into(),
            email: email.into(),
            password: "secret1".into(),
        }
    }

    #[tokio::test]
    async fn duplicate_email_is_rejected() {
        let records = MemoryRecords::new();
        UserRecords::create(&records, new_user("alice@x.com"))
            .await
            .unwrap();
        assert!(matches!(
            UserRecords::create(&records, new_user("alice@x.com")).await,
            Err(RecordsError::DuplicateEmail)
        ));
    }

    #[tokio::test]
    async fn password_is_hashed_and_verifiable() {
        let records = MemoryRecords::new();
        UserRecords::create(&records, new_user("alice@x.com"))
            .await
            .unwrap();

        let record = records.find_by_email("alice@x.com").await.unwrap().unwrap();
        assert_ne!(record.password_hash, "secret1");
        assert!(record.verify_password("secret1"));
        assert!(!record.verify_password("wrong"));
    }

    #[tokio::test]
    async fn cart_replacement_round_trips() {
        let records = MemoryRecords::new();
        let user = UserRecords::create(&records, new_user("alice@x.com"))
            .await
            .unwrap();

        let entries = vec![CartEntry {
            product_id: "p1".into(),
            quantity: 2,
        }];
        records.set_cart(&user.id, entries.clone()).await.unwrap();

        let reloaded = records.find_by_id(&user.id).await.unwrap().unwrap();
        assert_eq!(reloaded.cart_items, entries);

        assert!(matches!(
            records.set_cart("missing", vec![]).await,
            Err(RecordsError::NotFound)
        ));
    }

    #[tokio::test]
    async fn featured_toggle_and_listing() {
        let records = MemoryRecords::new();
        let product = ProductRecords::create(
            &records,
            NewProduct {
                name: "Mug".into(),
                description: "A mug".into(),
                price: 9.5,
                image: "https://img/mug".into(),
                category: "kitchen".into(),
            },
        )
        .await
        .unwrap();

        assert!(records.list_featured().await.unwrap().is_empty());
        let toggled = records.toggle_featured(&product.id).await.unwrap().unwrap();
        assert!(toggled.is_featured);
        assert_eq!(records.list_featured().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn coupon_lookup_and_deactivation() {
        let records = MemoryRecords::new();
        let coupon = CouponRecords::create(
            &records,
            NewCoupon {
                code: "GIFT10".into(),
                discount_percentage: 10,
                user_id: "u1".into(),
                expiration_date: Utc::now() + Duration::days(30),
            },
        )
        .await
        .unwrap();

        assert!(records
            .find_active_by_code("u1", "GIFT10")
            .await
            .unwrap()
            .is_some());
        // Coupons belong to one user.
        assert!(records
            .find_active_by_code("u2", "GIFT10")
            .await
            .unwrap()
            .is_none());

        records.set_active(&coupon.id, false).await.unwrap();
        assert!(records.active_for_user("u1").await.unwrap().is_none());
    }
}
