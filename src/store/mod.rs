//! Durable records for the three asset kinds plus alerts.
//!
//! The store is the single source of truth; the cache layered above it
//! is strictly invalidatable. `MongoStore` is the production backend,
//! `MemoryStore` a drop-in twin for tests and Mongo-less local runs.

pub mod memory;
pub mod mongo;

pub use memory::MemoryStore;
pub use mongo::MongoStore;

use async_trait::async_trait;

use crate::error::Result;
use crate::models::{Alert, CryptoPrice, ForexRate, StockPrice};

#[async_trait]
pub trait Store: Send + Sync {
    /// Connectivity probe for the health endpoint.
    async fn ping(&self) -> Result<()>;

    // Upserts are keyed by the natural key (symbol / currency pair) and
    // always rewrite `last_updated`, so a repeated payload converges to
    // the same single row.
    async fn upsert_crypto(&self, price: &CryptoPrice) -> Result<()>;
    async fn upsert_stock(&self, price: &StockPrice) -> Result<()>;
    async fn upsert_forex(&self, rate: &ForexRate) -> Result<()>;

    /// All crypto rows, market cap descending.
    async fn list_crypto(&self) -> Result<Vec<CryptoPrice>>;
    /// Top `n` crypto rows by market cap.
    async fn top_crypto(&self, n: usize) -> Result<Vec<CryptoPrice>>;
    async fn get_crypto(&self, symbol: &str) -> Result<Option<CryptoPrice>>;

    /// All stock rows, symbol ascending.
    async fn list_stocks(&self) -> Result<Vec<StockPrice>>;
    async fn get_stock(&self, symbol: &str) -> Result<Option<StockPrice>>;

    /// USD-based rates, target ascending.
    async fn list_forex(&self) -> Result<Vec<ForexRate>>;
    async fn get_forex(&self, base: &str, target: &str) -> Result<Option<ForexRate>>;

    async fn create_alert(&self, alert: &Alert) -> Result<()>;
    /// All alerts, newest first.
    async fn list_alerts(&self) -> Result<Vec<Alert>>;
    /// Alerts still eligible for evaluation (`is_active && !is_triggered`).
    async fn list_active_alerts(&self) -> Result<Vec<Alert>>;
    async fn get_alert(&self, id: &str) -> Result<Option<Alert>>;
    /// Returns false when the alert was absent (delete is idempotent).
    async fn delete_alert(&self, id: &str) -> Result<bool>;
    /// Compare-and-set trigger transition: flips `is_triggered = true`,
    /// `is_active = false`, sets `triggered_at` — but only if the alert
    /// is still untriggered. Returns false when another cycle already
    /// claimed it (or it no longer exists).
    async fn mark_alert_triggered(&self, id: &str, triggered_at: i64) -> Result<bool>;
}
