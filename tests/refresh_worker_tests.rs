mod common;

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use rust_decimal_macros::dec;

use common::{FakeCryptoSource, FakeForexSource, coin_quote, test_state, test_state_with};
use pricetracker::jobs;
use pricetracker::services::{crypto_service, forex_service, stocks_service};
use pricetracker::store::{MemoryStore, Store};

#[tokio::test]
async fn crypto_refresh_upserts_present_symbols_and_skips_missing() {
    let mut quotes = HashMap::new();
    quotes.insert("bitcoin".to_string(), coin_quote(dec!(50000.00), dec!(980000000000)));
    quotes.insert("ethereum".to_string(), coin_quote(dec!(3000.00), dec!(360000000000)));

    let store = Arc::new(MemoryStore::new());
    let state = test_state_with(
        store.clone(),
        Arc::new(FakeCryptoSource {
            quotes,
            ..Default::default()
        }),
        Arc::new(FakeForexSource::default()),
    );

    // a payload missing eight of the ten requested ids is still a success
    let updated = crypto_service::refresh_prices(&state).await.unwrap();
    assert_eq!(updated, 2);

    let all = store.list_crypto().await.unwrap();
    assert_eq!(all.len(), 2);
    assert_eq!(all[0].symbol, "BTC");
    assert_eq!(all[0].name, "Bitcoin");
    assert_eq!(all[1].symbol, "ETH");
    assert!(store.get_crypto("SOL").await.unwrap().is_none());
}

#[tokio::test]
async fn crypto_refresh_is_idempotent() {
    let mut quotes = HashMap::new();
    quotes.insert("bitcoin".to_string(), coin_quote(dec!(50000.00), dec!(980000000000)));

    let store = Arc::new(MemoryStore::new());
    let state = test_state_with(
        store.clone(),
        Arc::new(FakeCryptoSource {
            quotes,
            ..Default::default()
        }),
        Arc::new(FakeForexSource::default()),
    );

    let first = crypto_service::refresh_prices(&state).await.unwrap();
    let before = store.get_crypto("BTC").await.unwrap().unwrap();
    let second = crypto_service::refresh_prices(&state).await.unwrap();
    let after = store.get_crypto("BTC").await.unwrap().unwrap();

    assert_eq!(first, second);
    assert_eq!(store.list_crypto().await.unwrap().len(), 1);
    assert_eq!(before.price_usd, after.price_usd);
    assert_eq!(before.market_cap_usd, after.market_cap_usd);
    // the timestamp is rewritten unconditionally
    assert!(after.last_updated >= before.last_updated);
}

#[tokio::test]
async fn failing_source_aborts_cycle_without_store_mutation() {
    let store = Arc::new(MemoryStore::new());
    let state = test_state_with(
        store.clone(),
        Arc::new(FakeCryptoSource {
            fail: true,
            ..Default::default()
        }),
        Arc::new(FakeForexSource::default()),
    );

    assert!(crypto_service::refresh_prices(&state).await.is_err());
    assert!(store.list_crypto().await.unwrap().is_empty());
}

#[tokio::test]
async fn reads_see_post_refresh_state() {
    let mut quotes = HashMap::new();
    quotes.insert("bitcoin".to_string(), coin_quote(dec!(50000.00), dec!(980000000000)));

    let store = Arc::new(MemoryStore::new());
    let state = test_state_with(
        store.clone(),
        Arc::new(FakeCryptoSource {
            quotes,
            ..Default::default()
        }),
        Arc::new(FakeForexSource::default()),
    );

    crypto_service::refresh_prices(&state).await.unwrap();

    // populate the cache
    let cached = crypto_service::get_by_symbol(&state, "BTC").await.unwrap().unwrap();
    assert_eq!(cached.price_usd, dec!(50000.00));

    // second refresh with a new price must not leave the old value readable
    let mut quotes = HashMap::new();
    quotes.insert("bitcoin".to_string(), coin_quote(dec!(51000.00), dec!(990000000000)));
    let state = pricetracker::AppState {
        crypto_source: Arc::new(FakeCryptoSource {
            quotes,
            ..Default::default()
        }),
        ..state
    };

    crypto_service::refresh_prices(&state).await.unwrap();

    let fresh = crypto_service::get_by_symbol(&state, "BTC").await.unwrap().unwrap();
    assert_eq!(fresh.price_usd, dec!(51000.00));

    let listed = crypto_service::get_all(&state).await.unwrap();
    assert_eq!(listed[0].price_usd, dec!(51000.00));
}

#[tokio::test]
async fn stock_refresh_writes_the_seed_set() {
    let store = Arc::new(MemoryStore::new());
    let state = test_state(store.clone());

    let updated = stocks_service::refresh_prices(&state).await.unwrap();
    assert_eq!(updated, 5);

    let all = store.list_stocks().await.unwrap();
    let symbols: Vec<&str> = all.iter().map(|s| s.symbol.as_str()).collect();
    assert_eq!(symbols, vec!["AAPL", "AMZN", "GOOGL", "MSFT", "TSLA"]);

    let aapl = store.get_stock("AAPL").await.unwrap().unwrap();
    assert_eq!(aapl.price, dec!(178.50));
    assert_eq!(aapl.exchange, "NASDAQ");

    // a second pass converges to the same rows
    let again = stocks_service::refresh_prices(&state).await.unwrap();
    assert_eq!(again, 5);
    assert_eq!(store.list_stocks().await.unwrap().len(), 5);
}

#[tokio::test]
async fn forex_refresh_keeps_only_tracked_targets() {
    let mut rates = HashMap::new();
    rates.insert("EUR".to_string(), dec!(0.92));
    rates.insert("GBP".to_string(), dec!(0.79));
    rates.insert("XXX".to_string(), dec!(123.0)); // untracked, ignored

    let store = Arc::new(MemoryStore::new());
    let state = test_state_with(
        store.clone(),
        Arc::new(FakeCryptoSource::default()),
        Arc::new(FakeForexSource {
            rates,
            ..Default::default()
        }),
    );

    let updated = forex_service::refresh_rates(&state).await.unwrap();
    assert_eq!(updated, 2);

    let all = store.list_forex().await.unwrap();
    let targets: Vec<&str> = all.iter().map(|r| r.target_currency.as_str()).collect();
    assert_eq!(targets, vec!["EUR", "GBP"]);
    assert!(store.get_forex("USD", "XXX").await.unwrap().is_none());

    let eur = store.get_forex("USD", "EUR").await.unwrap().unwrap();
    assert_eq!(eur.base_currency, "USD");
    assert_eq!(eur.rate, dec!(0.92));
}

#[tokio::test]
async fn concurrent_job_invocations_skip_while_in_flight() {
    let mut quotes = HashMap::new();
    quotes.insert("bitcoin".to_string(), coin_quote(dec!(50000.00), dec!(980000000000)));

    let state = test_state_with(
        Arc::new(MemoryStore::new()),
        Arc::new(FakeCryptoSource {
            quotes,
            delay: Some(Duration::from_millis(200)),
            ..Default::default()
        }),
        Arc::new(FakeForexSource::default()),
    );

    let (a, b) = tokio::join!(jobs::refresh_crypto(&state), jobs::refresh_crypto(&state));
    let mut counts = [a.unwrap(), b.unwrap()];
    counts.sort();

    // one invocation did the work, the overlapping one skipped
    assert_eq!(counts, [0, 1]);
}
