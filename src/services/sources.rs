//! Upstream price sources.
//!
//! Each worker talks to its source through a trait so a different feed
//! can be substituted without touching the refresh pipeline (the stock
//! source in particular ships as a fixed seed set).

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Deserialize;

use crate::error::{Error, Result};

/// One coin's slice of the CoinGecko `simple/price` response.
#[derive(Debug, Clone, Deserialize)]
pub struct CoinQuote {
    pub usd: Decimal,
    pub eur: Decimal,
    pub usd_market_cap: Decimal,
    pub usd_24h_vol: Decimal,
    pub usd_24h_change: Decimal,
}

#[derive(Debug, Clone)]
pub struct StockQuote {
    pub symbol: &'static str,
    pub name: &'static str,
    pub exchange: &'static str,
    pub price: Decimal,
    pub day_high: Decimal,
    pub day_low: Decimal,
    pub open: Decimal,
    pub previous_close: Decimal,
    pub change_percent: Decimal,
    pub volume: i64,
}

#[async_trait]
pub trait CryptoSource: Send + Sync {
    /// Quotes keyed by upstream id; ids missing from the response are
    /// simply absent from the map.
    async fn fetch_quotes(&self, ids: &[&str]) -> Result<HashMap<String, CoinQuote>>;
}

#[async_trait]
pub trait StockSource: Send + Sync {
    async fn fetch_quotes(&self) -> Result<Vec<StockQuote>>;
}

#[async_trait]
pub trait ForexSource: Send + Sync {
    /// Rates for one base currency, keyed by target currency code.
    async fn fetch_rates(&self, base: &str) -> Result<HashMap<String, Decimal>>;
}

fn build_client(timeout: Duration) -> Client {
    Client::builder()
        .timeout(timeout)
        .build()
        .unwrap_or_else(|_| Client::new())
}

#[derive(Clone)]
pub struct CoinGeckoClient {
    http: Client,
    base_url: String,
}

impl CoinGeckoClient {
    pub fn new(base_url: String, timeout: Duration) -> Self {
        Self {
            http: build_client(timeout),
            base_url,
        }
    }
}

#[async_trait]
impl CryptoSource for CoinGeckoClient {
    async fn fetch_quotes(&self, ids: &[&str]) -> Result<HashMap<String, CoinQuote>> {
        let url = format!("{}/simple/price", self.base_url);
        let res = self
            .http
            .get(&url)
            .query(&[
                ("ids", ids.join(",").as_str()),
                ("vs_currencies", "usd,eur"),
                ("include_market_cap", "true"),
                ("include_24hr_vol", "true"),
                ("include_24hr_change", "true"),
            ])
            .send()
            .await?;

        if !res.status().is_success() {
            let status = res.status();
            let body = res.text().await.unwrap_or_default();
            return Err(Error::UpstreamFetch(format!(
                "CoinGecko request failed: {status} {body}"
            )));
        }

        res.json::<HashMap<String, CoinQuote>>()
            .await
            .map_err(|e| Error::Parse(e.to_string()))
    }
}

#[derive(Clone)]
pub struct ExchangeRateClient {
    http: Client,
    base_url: String,
}

#[derive(Debug, Deserialize)]
struct RatesResponse {
    rates: HashMap<String, Decimal>,
}

impl ExchangeRateClient {
    pub fn new(base_url: String, timeout: Duration) -> Self {
        Self {
            http: build_client(timeout),
            base_url,
        }
    }
}

#[async_trait]
impl ForexSource for ExchangeRateClient {
    async fn fetch_rates(&self, base: &str) -> Result<HashMap<String, Decimal>> {
        let url = format!("{}/latest/{}", self.base_url, base);
        let res = self.http.get(&url).send().await?;

        if !res.status().is_success() {
            let status = res.status();
            let body = res.text().await.unwrap_or_default();
            return Err(Error::UpstreamFetch(format!(
                "ExchangeRate request failed: {status} {body}"
            )));
        }

        let parsed = res
            .json::<RatesResponse>()
            .await
            .map_err(|e| Error::Parse(e.to_string()))?;
        Ok(parsed.rates)
    }
}

/// Fixed quote set standing in for a live equities feed. Swapping in a
/// real one means implementing [`StockSource`] and nothing else.
pub struct SeedStockSource;

#[async_trait]
impl StockSource for SeedStockSource {
    async fn fetch_quotes(&self) -> Result<Vec<StockQuote>> {
        Ok(vec![
            StockQuote {
                symbol: "AAPL",
                name: "Apple Inc.",
                exchange: "NASDAQ",
                price: dec!(178.50),
                day_high: dec!(180.25),
                day_low: dec!(177.10),
                open: dec!(179.00),
                previous_close: dec!(177.80),
                change_percent: dec!(0.39),
                volume: 52_384_000,
            },
            StockQuote {
                symbol: "MSFT",
                name: "Microsoft Corporation",
                exchange: "NASDAQ",
                price: dec!(420.75),
                day_high: dec!(425.30),
                day_low: dec!(418.50),
                open: dec!(422.00),
                previous_close: dec!(419.80),
                change_percent: dec!(0.23),
                volume: 21_456_000,
            },
            StockQuote {
                symbol: "GOOGL",
                name: "Alphabet Inc.",
                exchange: "NASDAQ",
                price: dec!(142.65),
                day_high: dec!(144.20),
                day_low: dec!(141.80),
                open: dec!(143.50),
                previous_close: dec!(143.10),
                change_percent: dec!(-0.31),
                volume: 18_234_000,
            },
            StockQuote {
                symbol: "AMZN",
                name: "Amazon.com Inc.",
                exchange: "NASDAQ",
                price: dec!(178.90),
                day_high: dec!(180.50),
                day_low: dec!(177.20),
                open: dec!(179.30),
                previous_close: dec!(178.00),
                change_percent: dec!(0.51),
                volume: 35_678_000,
            },
            StockQuote {
                symbol: "TSLA",
                name: "Tesla Inc.",
                exchange: "NASDAQ",
                price: dec!(248.30),
                day_high: dec!(252.80),
                day_low: dec!(245.10),
                open: dec!(250.00),
                previous_close: dec!(246.50),
                change_percent: dec!(0.73),
                volume: 98_765_000,
            },
        ])
    }
}
