//! # storefront-records
//!
//! Persistence collaborators for the storefront API.
//!
//! Handlers never talk to a database directly; they hold trait objects for
//! [`UserRecords`], [`ProductRecords`], and [`CouponRecords`], constructed
//! once at startup. Production wires in the Postgres backend; tests and local
//! development use [`MemoryRecords`].
//!
//! Passwords are one-way hashed here, at the record layer, before anything is
//! persisted. No public type ever exposes the hash.

pub mod error;
pub mod memory;
pub mod password;
pub mod pg;
pub mod traits;

pub use error::RecordsError;
pub use memory::MemoryRecords;
pub use pg::PgRecords;
pub use traits::{CouponRecords, NewCoupon, NewProduct, NewUser, ProductRecords, UserRecord, UserRecords};
