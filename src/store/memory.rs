use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::error::Result;
use crate::models::{Alert, CryptoPrice, ForexRate, StockPrice};
use crate::store::Store;

/// In-process twin of [`MongoStore`](crate::store::MongoStore) with the
/// same natural-key and ordering semantics. Backs the test suite and
/// local runs that have no Mongo available.
#[derive(Default)]
pub struct MemoryStore {
    crypto: RwLock<HashMap<String, CryptoPrice>>,
    stocks: RwLock<HashMap<String, StockPrice>>,
    forex: RwLock<HashMap<(String, String), ForexRate>>,
    alerts: RwLock<HashMap<String, Alert>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn ping(&self) -> Result<()> {
        Ok(())
    }

    async fn upsert_crypto(&self, price: &CryptoPrice) -> Result<()> {
        self.crypto
            .write()
            .await
            .insert(price.symbol.clone(), price.clone());
        Ok(())
    }

    async fn upsert_stock(&self, price: &StockPrice) -> Result<()> {
        self.stocks
            .write()
            .await
            .insert(price.symbol.clone(), price.clone());
        Ok(())
    }

    async fn upsert_forex(&self, rate: &ForexRate) -> Result<()> {
        self.forex.write().await.insert(
            (rate.base_currency.clone(), rate.target_currency.clone()),
            rate.clone(),
        );
        Ok(())
    }

    async fn list_crypto(&self) -> Result<Vec<CryptoPrice>> {
        let mut prices: Vec<_> = self.crypto.read().await.values().cloned().collect();
        prices.sort_by(|a, b| b.market_cap_usd.cmp(&a.market_cap_usd));
        Ok(prices)
    }

    async fn top_crypto(&self, n: usize) -> Result<Vec<CryptoPrice>> {
        let mut prices = self.list_crypto().await?;
        prices.truncate(n);
        Ok(prices)
    }

    async fn get_crypto(&self, symbol: &str) -> Result<Option<CryptoPrice>> {
        Ok(self.crypto.read().await.get(symbol).cloned())
    }

    async fn list_stocks(&self) -> Result<Vec<StockPrice>> {
        let mut prices: Vec<_> = self.stocks.read().await.values().cloned().collect();
        prices.sort_by(|a, b| a.symbol.cmp(&b.symbol));
        Ok(prices)
    }

    async fn get_stock(&self, symbol: &str) -> Result<Option<StockPrice>> {
        Ok(self.stocks.read().await.get(symbol).cloned())
    }

    async fn list_forex(&self) -> Result<Vec<ForexRate>> {
        let mut rates: Vec<_> = self
            .forex
            .read()
            .await
            .values()
            .filter(|r| r.base_currency == "USD")
            .cloned()
            .collect();
        rates.sort_by(|a, b| a.target_currency.cmp(&b.target_currency));
        Ok(rates)
    }

    async fn get_forex(&self, base: &str, target: &str) -> Result<Option<ForexRate>> {
        Ok(self
            .forex
            .read()
            .await
            .get(&(base.to_string(), target.to_string()))
            .cloned())
    }

    async fn create_alert(&self, alert: &Alert) -> Result<()> {
        self.alerts
            .write()
            .await
            .insert(alert.id.clone(), alert.clone());
        Ok(())
    }

    async fn list_alerts(&self) -> Result<Vec<Alert>> {
        let mut alerts: Vec<_> = self.alerts.read().await.values().cloned().collect();
        alerts.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(alerts)
    }

    async fn list_active_alerts(&self) -> Result<Vec<Alert>> {
        let mut alerts: Vec<_> = self
            .alerts
            .read()
            .await
            .values()
            .filter(|a| a.is_active && !a.is_triggered)
            .cloned()
            .collect();
        alerts.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
        Ok(alerts)
    }

    async fn get_alert(&self, id: &str) -> Result<Option<Alert>> {
        Ok(self.alerts.read().await.get(id).cloned())
    }

    async fn delete_alert(&self, id: &str) -> Result<bool> {
        Ok(self.alerts.write().await.remove(id).is_some())
    }

    async fn mark_alert_triggered(&self, id: &str, triggered_at: i64) -> Result<bool> {
        let mut alerts = self.alerts.write().await;
        match alerts.get_mut(id) {
            Some(alert) if !alert.is_triggered => {
                alert.is_triggered = true;
                alert.is_active = false;
                alert.triggered_at = Some(triggered_at);
                Ok(true)
            }
            _ => Ok(false),
        }
    }
}
