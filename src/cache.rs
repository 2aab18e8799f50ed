//! Read-through TTL cache over the store.
//!
//! Entries hold the serialized JSON body keyed by read-query shape
//! (`crypto:all`, `crypto:top:{n}`, `crypto:symbol:{SYM}`, ...). The
//! cache is advisory only: refresh workers invalidate every key derived
//! from the data they just wrote, and expiry is passive (checked on the
//! next read, never swept). The clock is injected so expiry is
//! deterministic under test.

use std::future::Future;
use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use dashmap::DashMap;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::Result;

pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

struct CacheEntry {
    body: String,
    expires_at: DateTime<Utc>,
}

pub struct PriceCache {
    entries: DashMap<String, CacheEntry>,
    clock: Arc<dyn Clock>,
}

impl PriceCache {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: DashMap::new(),
            clock,
        }
    }

    fn get_raw(&self, key: &str) -> Option<String> {
        {
            let entry = self.entries.get(key)?;
            if entry.expires_at > self.clock.now() {
                return Some(entry.body.clone());
            }
        }
        // expired: drop the entry so the next read repopulates it
        self.entries.remove(key);
        None
    }

    fn put_raw(&self, key: &str, body: String, ttl: Duration) {
        self.entries.insert(
            key.to_string(),
            CacheEntry {
                body,
                expires_at: self.clock.now() + ttl,
            },
        );
    }

    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        serde_json::from_str(&self.get_raw(key)?).ok()
    }

    pub fn put<T: Serialize>(&self, key: &str, value: &T, ttl: Duration) {
        if let Ok(body) = serde_json::to_string(value) {
            self.put_raw(key, body, ttl);
        }
    }

    /// Hit returns the cached body; miss awaits `loader`, stores its
    /// result under `key` for `ttl`, and returns it. Loader failures are
    /// propagated and nothing is cached.
    pub async fn get_or_load<T, F, Fut>(&self, key: &str, ttl: Duration, loader: F) -> Result<T>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        if let Some(body) = self.get_raw(key) {
            if let Ok(value) = serde_json::from_str(&body) {
                return Ok(value);
            }
            self.entries.remove(key);
        }

        let value = loader().await?;
        self.put_raw(key, serde_json::to_string(&value)?, ttl);
        Ok(value)
    }

    pub fn invalidate(&self, key: &str) {
        self.entries.remove(key);
    }

    pub fn invalidate_prefix(&self, prefix: &str) {
        self.entries.retain(|key, _| !key.starts_with(prefix));
    }
}
