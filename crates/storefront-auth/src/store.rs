//! The key-value store contract and its backends.
//!
//! The credential store only needs three operations with per-key TTL, so the
//! contract stays that small. Production uses Redis; tests and local
//! development use the in-memory backend.

use crate::error::AuthError;
use crate::token::REFRESH_TOKEN_TTL;
use async_trait::async_trait;
use redis::AsyncCommands;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use std::time::{Duration, Instant};

/// Minimal key-value contract: atomic overwrite on `set`, independent TTL
/// per key, no cross-key guarantees.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Store `value` under `key`, replacing any previous value. A `ttl`
    /// bounds the entry's lifetime; `None` keeps it until overwritten or
    /// deleted.
    async fn set(&self, key: &str, value: &str, ttl: Option<Duration>) -> Result<(), AuthError>;

    /// Fetch the current value for `key`, if any.
    async fn get(&self, key: &str) -> Result<Option<String>, AuthError>;

    /// Remove `key`. Removing an absent key is not an error.
    async fn delete(&self, key: &str) -> Result<(), AuthError>;
}

/// Redis-backed store.
#[derive(Clone)]
pub struct RedisStore {
    conn: redis::aio::ConnectionManager,
}

impl RedisStore {
    /// Connect to Redis and set up a reconnecting connection manager.
    pub async fn connect(url: &str) -> Result<Self, AuthError> {
        let client = redis::Client::open(url)?;
        let conn = redis::aio::ConnectionManager::new(client).await?;
        tracing::info!("connected to redis");
        Ok(Self { conn })
    }
}

#[async_trait]
impl KeyValueStore for RedisStore {
    async fn set(&self, key: &str, value: &str, ttl: Option<Duration>) -> Result<(), AuthError> {
        let mut conn = self.conn.clone();
        match ttl {
            Some(ttl) => conn.set_ex::<_, _, ()>(key, value, ttl.as_secs()).await?,
            None => conn.set::<_, _, ()>(key, value).await?,
        }
        Ok(())
    }

    async fn get(&self, key: &str) -> Result<Option<String>, AuthError> {
        let mut conn = self.conn.clone();
        Ok(conn.get::<_, Option<String>>(key).await?)
    }

    async fn delete(&self, key: &str) -> Result<(), AuthError> {
        let mut conn = self.conn.clone();
        conn.del::<_, ()>(key).await?;
        Ok(())
    }
}

/// In-memory store for tests and local development.
#[derive(Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, MemoryEntry>>,
}

struct MemoryEntry {
    value: String,
    expires_at: Option<Instant>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn set(&self, key: &str, value: &str, ttl: Option<Duration>) -> Result<(), AuthError> {
        let entry = MemoryEntry {
            value: value.to_string(),
            expires_at: ttl.map(|t| Instant::now() + t),
        };
        self.entries
            .write()
            .map_err(|e| AuthError::Store(e.to_string()))?
            .insert(key.to_string(), entry);
        Ok(())
    }

    async fn get(&self, key: &str) -> Result<Option<String>, AuthError> {
        let entries = self
            .entries
            .read()
            .map_err(|e| AuthError::Store(e.to_string()))?;
        Ok(entries.get(key).and_then(|entry| {
            match entry.expires_at {
                Some(deadline) if deadline <= Instant::now() => None,
                _ => Some(entry.value.clone()),
            }
        }))
    }

    async fn delete(&self, key: &str) -> Result<(), AuthError> {
        self.entries
            .write()
            .map_err(|e| AuthError::Store(e.to_string()))?
            .remove(key);
        Ok(())
    }
}

/// The authoritative copy of each user's current refresh token.
///
/// At most one live entry per user: a new login or signup overwrites any
/// previous entry, which is what invalidates older sessions.
#[derive(Clone)]
pub struct CredentialStore {
    store: Arc<dyn KeyValueStore>,
}

impl CredentialStore {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    fn key(user_id: &str) -> String {
        format!("refresh_token:{user_id}")
    }

    /// Persist `token` as the current refresh token for `user_id`, with a TTL
    /// matching the token's own expiry.
    pub async fn save(&self, user_id: &str, token: &str) -> Result<(), AuthError> {
        self.store
            .set(&Self::key(user_id), token, Some(REFRESH_TOKEN_TTL))
            .await
    }

    /// The stored refresh token for `user_id`, if one is live.
    pub async fn fetch(&self, user_id: &str) -> Result<Option<String>, AuthError> {
        self.store.get(&Self::key(user_id)).await
    }

    /// Drop the stored refresh token. Called on logout.
    pub async fn delete(&self, user_id: &str) -> Result<(), AuthError> {
        self.store.delete(&Self::key(user_id)).await
    }

    /// Whether `token` is byte-equal to the stored entry for `user_id`.
    /// False covers both "never issued" and "superseded by a later login".
    pub async fn matches(&self, user_id: &str, token: &str) -> Result<bool, AuthError> {
        Ok(self.fetch(user_id).await?.as_deref() == Some(token))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn memory_store_set_get_delete() {
        let store = MemoryStore::new();
        store.set("k", "v", None).await.unwrap();
        assert_eq!(store.get("k").await.unwrap(), Some("v".to_string()));

        store.set("k", "v2", None).await.unwrap();
        assert_eq!(store.get("k").await.unwrap(), Some("v2".to_string()));

        store.delete("k").await.unwrap();
        assert_eq!(store.get("k").await.unwrap(), None);

        // Deleting again is fine.
        store.delete("k").await.unwrap();
    }

    #[tokio::test]
    async fn memory_store_expires_entries() {
        let store = MemoryStore::new();
        store
            .set("k", "v", Some(Duration::from_millis(10)))
            .await
            .unwrap();
        tokio::time::sleep(Duration::from_millis(30)).await;
        assert_eq!(store.get("k").await.unwrap(), None);
    }

    #[tokio::test]
    async fn credential_store_tracks_one_token_per_user() {
        let credentials = CredentialStore::new(Arc::new(MemoryStore::new()));

        credentials.save("u1", "first").await.unwrap();
        assert!(credentials.matches("u1", "first").await.unwrap());

        // A later login replaces the entry; only the latest matches.
        credentials.save("u1", "second").await.unwrap();
        assert!(!credentials.matches("u1", "first").await.unwrap());
        assert!(credentials.matches("u1", "second").await.unwrap());

        credentials.delete("u1").await.unwrap();
        assert!(!credentials.matches("u1", "second").await.unwrap());
        assert_eq!(credentials.fetch("u1").await.unwrap(), None);
    }
}
