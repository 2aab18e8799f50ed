#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use http_body_util::BodyExt;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use pricetracker::AppState;
use pricetracker::cache::{PriceCache, SystemClock};
use pricetracker::config;
use pricetracker::error::{Error, Result};
use pricetracker::jobs::JobGuards;
use pricetracker::models::CryptoPrice;
use pricetracker::services::notifier::Notifier;
use pricetracker::services::sources::{CoinQuote, CryptoSource, ForexSource, SeedStockSource};
use pricetracker::store::Store;

#[derive(Default)]
pub struct FakeCryptoSource {
    pub quotes: HashMap<String, CoinQuote>,
    pub fail: bool,
    pub delay: Option<Duration>,
}

#[async_trait]
impl CryptoSource for FakeCryptoSource {
    async fn fetch_quotes(&self, _ids: &[&str]) -> Result<HashMap<String, CoinQuote>> {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        if self.fail {
            return Err(Error::UpstreamFetch("fake source down".into()));
        }
        Ok(self.quotes.clone())
    }
}

#[derive(Default)]
pub struct FakeForexSource {
    pub rates: HashMap<String, Decimal>,
    pub fail: bool,
}

#[async_trait]
impl ForexSource for FakeForexSource {
    async fn fetch_rates(&self, _base: &str) -> Result<HashMap<String, Decimal>> {
        if self.fail {
            return Err(Error::UpstreamFetch("fake source down".into()));
        }
        Ok(self.rates.clone())
    }
}

pub fn coin_quote(usd: Decimal, market_cap: Decimal) -> CoinQuote {
    CoinQuote {
        usd,
        eur: usd,
        usd_market_cap: market_cap,
        usd_24h_vol: dec!(1000000),
        usd_24h_change: dec!(1.5),
    }
}

pub fn crypto_price(symbol: &str, name: &str, usd: Decimal, market_cap: Decimal) -> CryptoPrice {
    CryptoPrice {
        symbol: symbol.to_string(),
        name: name.to_string(),
        price_usd: usd,
        price_eur: usd,
        market_cap_usd: market_cap,
        volume_24h_usd: dec!(1000000),
        change_percent_24h: dec!(1.5),
        last_updated: 0,
    }
}

pub fn test_state_with(
    store: Arc<dyn Store>,
    crypto_source: Arc<dyn CryptoSource>,
    forex_source: Arc<dyn ForexSource>,
) -> AppState {
    AppState {
        settings: config::load(),
        store,
        cache: Arc::new(PriceCache::new(Arc::new(SystemClock))),
        crypto_source,
        stock_source: Arc::new(SeedStockSource),
        forex_source,
        notifier: Arc::new(Notifier::new(Duration::from_secs(2))),
        jobs: Arc::new(JobGuards::default()),
    }
}

pub fn test_state(store: Arc<dyn Store>) -> AppState {
    test_state_with(
        store,
        Arc::new(FakeCryptoSource::default()),
        Arc::new(FakeForexSource::default()),
    )
}

pub async fn response_body_json(res: axum::response::Response) -> serde_json::Value {
    let bytes = res.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
