use async_trait::async_trait;
use futures_util::StreamExt;
use mongodb::bson::{Document, doc, to_document};
use mongodb::options::{FindOptions, UpdateOptions};
use mongodb::{Collection, Database};

use crate::error::Result;
use crate::models::{Alert, CryptoPrice, ForexRate, StockPrice};
use crate::store::Store;

const CRYPTO_PRICES: &str = "crypto_prices";
const STOCK_PRICES: &str = "stock_prices";
const FOREX_RATES: &str = "forex_rates";
const ALERTS: &str = "alerts";

#[derive(Clone)]
pub struct MongoStore {
    db: Database,
}

impl MongoStore {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    fn crypto(&self) -> Collection<CryptoPrice> {
        self.db.collection(CRYPTO_PRICES)
    }

    fn stocks(&self) -> Collection<StockPrice> {
        self.db.collection(STOCK_PRICES)
    }

    fn forex(&self) -> Collection<ForexRate> {
        self.db.collection(FOREX_RATES)
    }

    fn alerts(&self) -> Collection<Alert> {
        self.db.collection(ALERTS)
    }

    /// Insert-or-update on the natural-key filter. The unique index on
    /// the key makes concurrent upserts of the same symbol serialize to
    /// a single row instead of duplicating it.
    async fn upsert<T: serde::Serialize + Send + Sync>(
        &self,
        collection: Collection<T>,
        filter: Document,
        value: &T,
    ) -> Result<()> {
        let fields = to_document(value)?;
        collection
            .update_one(
                filter,
                doc! { "$set": fields },
                UpdateOptions::builder().upsert(true).build(),
            )
            .await?;
        Ok(())
    }

    async fn drain<T>(&self, mut cursor: mongodb::Cursor<T>) -> Result<Vec<T>>
    where
        T: serde::de::DeserializeOwned + Unpin + Send + Sync,
    {
        let mut items = Vec::new();
        while let Some(item) = cursor.next().await {
            items.push(item?);
        }
        Ok(items)
    }
}

#[async_trait]
impl Store for MongoStore {
    async fn ping(&self) -> Result<()> {
        self.db.run_command(doc! { "ping": 1 }, None).await?;
        Ok(())
    }

    async fn upsert_crypto(&self, price: &CryptoPrice) -> Result<()> {
        self.upsert(self.crypto(), doc! { "symbol": &price.symbol }, price)
            .await
    }

    async fn upsert_stock(&self, price: &StockPrice) -> Result<()> {
        self.upsert(self.stocks(), doc! { "symbol": &price.symbol }, price)
            .await
    }

    async fn upsert_forex(&self, rate: &ForexRate) -> Result<()> {
        self.upsert(
            self.forex(),
            doc! {
                "base_currency": &rate.base_currency,
                "target_currency": &rate.target_currency,
            },
            rate,
        )
        .await
    }

    async fn list_crypto(&self) -> Result<Vec<CryptoPrice>> {
        let cursor = self.crypto().find(doc! {}, None).await?;
        let mut prices = self.drain(cursor).await?;
        // Decimals are stored in their string form, so the market-cap
        // ordering has to happen here rather than in the query.
        prices.sort_by(|a, b| b.market_cap_usd.cmp(&a.market_cap_usd));
        Ok(prices)
    }

    async fn top_crypto(&self, n: usize) -> Result<Vec<CryptoPrice>> {
        let mut prices = self.list_crypto().await?;
        prices.truncate(n);
        Ok(prices)
    }

    async fn get_crypto(&self, symbol: &str) -> Result<Option<CryptoPrice>> {
        Ok(self.crypto().find_one(doc! { "symbol": symbol }, None).await?)
    }

    async fn list_stocks(&self) -> Result<Vec<StockPrice>> {
        let find_opts = FindOptions::builder().sort(doc! { "symbol": 1 }).build();
        let cursor = self.stocks().find(doc! {}, find_opts).await?;
        self.drain(cursor).await
    }

    async fn get_stock(&self, symbol: &str) -> Result<Option<StockPrice>> {
        Ok(self.stocks().find_one(doc! { "symbol": symbol }, None).await?)
    }

    async fn list_forex(&self) -> Result<Vec<ForexRate>> {
        let find_opts = FindOptions::builder()
            .sort(doc! { "target_currency": 1 })
            .build();
        let cursor = self
            .forex()
            .find(doc! { "base_currency": "USD" }, find_opts)
            .await?;
        self.drain(cursor).await
    }

    async fn get_forex(&self, base: &str, target: &str) -> Result<Option<ForexRate>> {
        Ok(self
            .forex()
            .find_one(
                doc! { "base_currency": base, "target_currency": target },
                None,
            )
            .await?)
    }

    async fn create_alert(&self, alert: &Alert) -> Result<()> {
        self.alerts().insert_one(alert, None).await?;
        Ok(())
    }

    async fn list_alerts(&self) -> Result<Vec<Alert>> {
        let find_opts = FindOptions::builder().sort(doc! { "created_at": -1 }).build();
        let cursor = self.alerts().find(doc! {}, find_opts).await?;
        self.drain(cursor).await
    }

    async fn list_active_alerts(&self) -> Result<Vec<Alert>> {
        let cursor = self
            .alerts()
            .find(doc! { "is_active": true, "is_triggered": false }, None)
            .await?;
        self.drain(cursor).await
    }

    async fn get_alert(&self, id: &str) -> Result<Option<Alert>> {
        Ok(self.alerts().find_one(doc! { "_id": id }, None).await?)
    }

    async fn delete_alert(&self, id: &str) -> Result<bool> {
        let res = self.alerts().delete_one(doc! { "_id": id }, None).await?;
        Ok(res.deleted_count > 0)
    }

    async fn mark_alert_triggered(&self, id: &str, triggered_at: i64) -> Result<bool> {
        // The `is_triggered: false` filter is the serialization point:
        // only one caller can ever match it for a given alert.
        let res = self
            .alerts()
            .update_one(
                doc! { "_id": id, "is_triggered": false },
                doc! { "$set": {
                    "is_triggered": true,
                    "is_active": false,
                    "triggered_at": triggered_at,
                } },
                None,
            )
            .await?;
        Ok(res.matched_count > 0)
    }
}
