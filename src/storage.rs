//! Disk-backed store for the driver profile and external-lookup cache
//!
//! One fjall database with two keyspaces: `profile` holds durable user
//! context (watched loads, bookings, saved searches, ...) and `cache` holds
//! TTL'd responses from external services. Values are stored as JSON, the
//! same shape the original browser store held, and all keyspace I/O hops
//! through `spawn_blocking`.

use anyhow::{Result, anyhow};
use fjall::Keyspace;
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use std::fmt::Debug;
use std::path::Path;
use std::time::{Duration, SystemTime, UNIX_EPOCH};
use tokio::sync::OnceCell;
use tokio::task;

static GLOBAL_STORE: OnceCell<PersistentStore> = OnceCell::const_new();

#[derive(Serialize, Deserialize)]
struct CachedEntry<T> {
    value: T,
    expires_at: u64, // Unix timestamp (seconds)
}

pub struct PersistentStore {
    cache: Keyspace,
    profile: Keyspace,
}

fn get_from_keyspace(store: Keyspace, key: Vec<u8>) -> anyhow::Result<Option<Vec<u8>>> {
    Ok(store.get(key)?.map(|v| v.to_vec()))
}

impl PersistentStore {
    fn new(path: impl AsRef<Path>) -> Result<Self> {
        let db = fjall::Database::builder(&path).open()?;
        let cache = db.keyspace("cache", fjall::KeyspaceCreateOptions::default)?;
        let profile = db.keyspace("profile", fjall::KeyspaceCreateOptions::default)?;
        Ok(PersistentStore { cache, profile })
    }

    /// Stores a cacheable value with a time-to-live (TTL).
    #[tracing::instrument(name = "cache_put", level = "debug", skip(self, value))]
    pub async fn cache_put<T: Serialize + Send + Debug + 'static>(
        &self,
        key: &str,
        value: T,
        ttl: Duration,
    ) -> Result<()> {
        let store = self.cache.clone();
        let key = key.as_bytes().to_vec();
        let expires_at = SystemTime::now()
            .checked_add(ttl)
            .ok_or(anyhow!("TTL overflow"))?
            .duration_since(UNIX_EPOCH)?
            .as_secs();
        let entry = CachedEntry { value, expires_at };
        let bytes = serde_json::to_vec(&entry)?;

        let _ = task::spawn_blocking(move || store.insert(key, bytes)).await?;
        Ok(())
    }

    /// Retrieves a cached value if it exists and has not expired.
    /// Returns `None` for cache misses or expired entries.
    #[tracing::instrument(name = "cache_get", level = "debug", skip(self))]
    pub async fn cache_get<T: DeserializeOwned + Send + 'static>(
        &self,
        key: &str,
    ) -> Result<Option<T>> {
        let store = self.cache.clone();
        let key_bytes = key.as_bytes().to_vec();

        let maybe_bytes: Option<Vec<u8>> =
            task::spawn_blocking(move || get_from_keyspace(store, key_bytes)).await??;

        if let Some(bytes) = maybe_bytes {
            let entry: CachedEntry<T> = serde_json::from_slice(&bytes)?;
            let now = SystemTime::now().duration_since(UNIX_EPOCH)?.as_secs();

            if now < entry.expires_at {
                tracing::debug!("Key found and still fresh");
                Ok(Some(entry.value))
            } else {
                tracing::debug!("Key found but expired");
                self.cache_remove(key).await?;
                Ok(None)
            }
        } else {
            tracing::debug!("Key not found");
            Ok(None)
        }
    }

    /// Manually removes a key from the cache.
    pub async fn cache_remove(&self, key: &str) -> Result<()> {
        let key = key.as_bytes().to_vec();
        let store = self.cache.clone();
        let _ = task::spawn_blocking(move || store.remove(key)).await?;
        Ok(())
    }

    /// Persists a profile value. Profile entries never expire.
    #[tracing::instrument(name = "profile_put", level = "debug", skip(self, value))]
    pub async fn profile_put<T: Serialize + Send + Debug + 'static>(
        &self,
        key: &str,
        value: T,
    ) -> Result<()> {
        let store = self.profile.clone();
        let key = key.as_bytes().to_vec();
        let bytes = serde_json::to_vec(&value)?;

        let _ = task::spawn_blocking(move || store.insert(key, bytes)).await?;
        Ok(())
    }

    /// Reads a profile value, `None` when the key has never been written.
    #[tracing::instrument(name = "profile_get", level = "debug", skip(self))]
    pub async fn profile_get<T: DeserializeOwned + Send + 'static>(
        &self,
        key: &str,
    ) -> Result<Option<T>> {
        let store = self.profile.clone();
        let key_bytes = key.as_bytes().to_vec();

        let maybe_bytes: Option<Vec<u8>> =
            task::spawn_blocking(move || get_from_keyspace(store, key_bytes)).await??;

        match maybe_bytes {
            Some(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            None => Ok(None),
        }
    }

    /// Removes a profile key.
    pub async fn profile_remove(&self, key: &str) -> Result<()> {
        let key = key.as_bytes().to_vec();
        let store = self.profile.clone();
        let _ = task::spawn_blocking(move || store.remove(key)).await?;
        Ok(())
    }
}

/// Initializes the global store. **Must be called once before use.**
pub fn init(path: impl AsRef<Path>) -> Result<()> {
    let store = PersistentStore::new(path)?;
    GLOBAL_STORE
        .set(store)
        .map_err(|_| anyhow!("Store already initialized"))?;
    Ok(())
}

/// Returns a reference to the globally initialized store.
/// # Panics
/// Panics if the store has not been initialized by calling `storage::init` first.
fn get_store() -> &'static PersistentStore {
    GLOBAL_STORE
        .get()
        .expect("Store not initialized. Call storage::init first.")
}

// Public, ergonomic API endpoints that use the global store.
pub async fn cache_put<T: Serialize + Send + Debug + 'static>(
    key: &str,
    value: T,
    ttl: Duration,
) -> Result<()> {
    get_store().cache_put(key, value, ttl).await
}

pub async fn cache_get<T: DeserializeOwned + Send + 'static>(key: &str) -> Result<Option<T>> {
    get_store().cache_get(key).await
}

pub async fn cache_remove(key: &str) -> Result<()> {
    get_store().cache_remove(key).await
}

pub async fn profile_put<T: Serialize + Send + Debug + 'static>(key: &str, value: T) -> Result<()> {
    get_store().profile_put(key, value).await
}

pub async fn profile_get<T: DeserializeOwned + Send + 'static>(key: &str) -> Result<Option<T>> {
    get_store().profile_get(key).await
}

pub async fn profile_remove(key: &str) -> Result<()> {
    get_store().profile_remove(key).await
}
