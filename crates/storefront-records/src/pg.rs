//! Postgres backend for the record stores.

use crate::error::RecordsError;
use crate::password;
use crate::traits::{
    CouponRecords, NewCoupon, NewProduct, NewUser, ProductRecords, UserRecord, UserRecords,
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::postgres::PgPoolOptions;
use sqlx::types::Json;
use sqlx::{FromRow, PgPool};
use storefront_core::{CartEntry, Coupon, Product, Role, User};
use uuid::Uuid;

/// Connect to Postgres and bring the schema up to date.
pub async fn connect(database_url: &str) -> anyhow::Result<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect(database_url)
        .await?;
    sqlx::migrate!("./migrations").run(&pool).await?;
    tracing::info!("connected to postgres");
    Ok(pool)
}

/// All three record stores over one connection pool.
#[derive(Clone)]
pub struct PgRecords {
    pool: PgPool,
}

impl PgRecords {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(FromRow)]
struct UserRow {
    id: String,
    name: String,
    email: String,
    password_hash: String,
    role: String,
    cart_items: Json<Vec<CartEntry>>,
}

impl UserRow {
    fn into_user(self) -> Result<User, RecordsError> {
        let role: Role = self.role.parse().map_err(RecordsError::Database)?;
        Ok(User {
            id: self.id,
            name: self.name,
            email: self.email,
            role,
            cart_items: self.cart_items.0,
        })
    }

    fn into_record(self) -> Result<UserRecord, RecordsError> {
        let password_hash = self.password_hash.clone();
        Ok(UserRecord {
            user: self.into_user()?,
            password_hash,
        })
    }
}

const USER_COLUMNS: &str = "id, name, email, password_hash, role, cart_items";

#[async_trait]
impl UserRecords for PgRecords {
    async fn create(&self, new: NewUser) -> Result<User, RecordsError> {
        let id = Uuid::new_v4().to_string();
        let password_hash = password::hash(&new.password)?;

        sqlx::query(
            "INSERT INTO users (id, name, email, password_hash, role, cart_items) \
             VALUES ($1, $2, $3, $4, 'customer', '[]'::jsonb)",
        )
        .bind(&id)
        .bind(&new.name)
        .bind(&new.email)
        .bind(&password_hash)
        .execute(&self.pool)
        .await?;

        Ok(User {
            id,
            name: new.name,
            email: new.email,
            role: Role::Customer,
            cart_items: Vec::new(),
        })
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<UserRecord>, RecordsError> {
        let row: Option<UserRow> =
            sqlx::query_as(&format!("SELECT {USER_COLUMNS} FROM users WHERE email = $1"))
                .bind(email)
                .fetch_optional(&self.pool)
                .await?;
        row.map(UserRow::into_record).transpose()
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<User>, RecordsError> {
        let row: Option<UserRow> =
            sqlx::query_as(&format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1"))
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;
        row.map(UserRow::into_user).transpose()
    }

    async fn set_cart(
        &self,
        user_id: &str,
        entries: Vec<CartEntry>,
    ) -> Result<Vec<CartEntry>, RecordsError> {
        let updated = sqlx::query("UPDATE users SET cart_items = $2 WHERE id = $1")
            .bind(user_id)
            .bind(Json(&entries))
            .execute(&self.pool)
            .await?;
        if updated.rows_affected() == 0 {
            return Err(RecordsError::NotFound);
        }
        Ok(entries)
    }
}

#[derive(FromRow)]
struct ProductRow {
    id: String,
    name: String,
    description: String,
    price: f64,
    image: String,
    category: String,
    is_featured: bool,
}

impl From<ProductRow> for Product {
    fn from(row: ProductRow) -> Self {
        Product {
            id: row.id,
            name: row.name,
            description: row.description,
            price: row.price,
            image: row.image,
            category: row.category,
            is_featured: row.is_featured,
        }
    }
}

const PRODUCT_COLUMNS: &str = "id, name, description, price, image, category, is_featured";

#[async_trait]
impl ProductRecords for PgRecords {
    async fn list_all(&self) -> Result<Vec<Product>, RecordsError> {
        let rows: Vec<ProductRow> =
            sqlx::query_as(&format!("SELECT {PRODUCT_COLUMNS} FROM products"))
                .fetch_all(&self.pool)
                .await?;
        Ok(rows.into_iter().map(Product::from).collect())
    }

    async fn list_featured(&self) -> Result<Vec<Product>, RecordsError> {
        let rows: Vec<ProductRow> =
            sqlx::query_as(&format!("SELECT {PRODUCT_COLUMNS} FROM products WHERE is_featured"))
                .fetch_all(&self.pool)
                .await?;
        Ok(rows.into_iter().map(Product::from).collect())
    }

    async fn list_by_category(&self, category: &str) -> Result<Vec<Product>, RecordsError> {
        let rows: Vec<ProductRow> = sqlx::query_as(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products WHERE category = $1"
        ))
        .bind(category)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(Product::from).collect())
    }

    async fn sample(&self, count: u32) -> Result<Vec<Product>, RecordsError> {
        let rows: Vec<ProductRow> = sqlx::query_as(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products ORDER BY random() LIMIT $1"
        ))
        .bind(count as i64)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(Product::from).collect())
    }

    async fn find(&self, id: &str) -> Result<Option<Product>, RecordsError> {
        let row: Option<ProductRow> =
            sqlx::query_as(&format!("SELECT {PRODUCT_COLUMNS} FROM products WHERE id = $1"))
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;
        Ok(row.map(Product::from))
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

        sqlx::query(
            "INSERT INTO products (id, name, description, price, image, category, is_featured) \
             VALUES ($1, $2, $3, $4, $5, $6, $7)",
        )
        .bind(&product.id)
        .bind(&product.name)
        .bind(&product.description)
        .bind(product.price)
        .bind(&product.image)
        .bind(&product.category)
        .bind(product.is_featured)
        .execute(&self.pool)
        .await?;

        Ok(product)
    }

    async fn delete(&self, id: &str) -> Result<Option<Product>, RecordsError> {
        let row: Option<ProductRow> = sqlx::query_as(&format!(
            "DELETE FROM products WHERE id = $1 RETURNING {PRODUCT_COLUMNS}"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(Product::from))
    }

    async fn toggle_featured(&self, id: &str) -> Result<Option<Product>, RecordsError> {
        let row: Option<ProductRow> = sqlx::query_as(&format!(
            "UPDATE products SET is_featured = NOT is_featured WHERE id = $1 \
             RETURNING {PRODUCT_COLUMNS}"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(Product::from))
    }
}

#[derive(FromRow)]
struct CouponRow {
    id: String,
    code: String,
    discount_percentage: i16,
    user_id: String,
    is_active: bool,
    expiration_date: DateTime<Utc>,
}

impl From<CouponRow> for Coupon {
    fn from(row: CouponRow) -> Self {
        Coupon {
            id: row.id,
            code: row.code,
            discount_percentage: row.discount_percentage.clamp(0, 100) as u8,
            user_id: row.user_id,
            is_active: row.is_active,
            expiration_date: row.expiration_date,
        }
    }
}

const COUPON_COLUMNS: &str = "id, code, discount_percentage, user_id, is_active, expiration_date";

#[async_trait]
impl CouponRecords for PgRecords {
    async fn create(&self, new: NewCoupon) -> Result<Coupon, RecordsError> {
        let coupon = Coupon {
            id: Uuid::new_v4().to_string(),
            code: new.code,
            discount_percentage: new.discount_percentage.min(100),
            user_id: new.user_id,
            is_active: true,
            expiration_date: new.expiration_date,
        };

        sqlx::query(
            "INSERT INTO coupons (id, code, discount_percentage, user_id, is_active, expiration_date) \
             VALUES ($1, $2, $3, $4, $5, $6)",
        )
        .bind(&coupon.id)
        .bind(&coupon.code)
        .bind(coupon.discount_percentage as i16)
        .bind(&coupon.user_id)
        .bind(coupon.is_active)
        .bind(coupon.expiration_date)
        .execute(&self.pool)
        .await?;

        Ok(coupon)
    }

    async fn active_for_user(&self, user_id: &str) -> Result<Option<Coupon>, RecordsError> {
        let row: Option<CouponRow> = sqlx::query_as(&format!(
            "SELECT {COUPON_COLUMNS} FROM coupons WHERE user_id = $1 AND is_active LIMIT 1"
        ))
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(Coupon::from))
    }

    async fn find_active_by_code(
        &self,
        user_id: &str,
        code: &str,
    ) -> Result<Option<Coupon>, RecordsError> {
        let row: Option<CouponRow> = sqlx::query_as(&format!(
            "SELECT {COUPON_COLUMNS} FROM coupons \
             WHERE user_id = $1 AND code = $2 AND is_active"
        ))
        .bind(user_id)
        .bind(code)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(Coupon::from))
    }

    async fn set_active(&self, id: &str, active: bool) -> Result<(), RecordsError> {
        let updated = sqlx::query("UPDATE coupons SET is_active = $2 WHERE id = $1")
            .bind(id)
            .bind(active)
            .execute(&self.pool)
            .await?;
        if updated.rows_affected() == 0 {
            return Err(RecordsError::NotFound);
        }
        Ok(())
    }
}
