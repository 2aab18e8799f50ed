use chrono::Utc;

use crate::AppState;
use crate::error::Result;
use crate::models::CryptoPrice;
use crate::models::decimal;
use crate::services::sources::CoinQuote;

/// Upstream id → (ticker, display name). The worker owns this table;
/// ids absent from an upstream payload are skipped for that cycle.
const COINGECKO_IDS: &[(&str, &str, &str)] = &[
    ("bitcoin", "BTC", "Bitcoin"),
    ("ethereum", "ETH", "Ethereum"),
    ("binancecoin", "BNB", "Binance Coin"),
    ("cardano", "ADA", "Cardano"),
    ("solana", "SOL", "Solana"),
    ("ripple", "XRP", "Ripple"),
    ("polkadot", "DOT", "Polkadot"),
    ("dogecoin", "DOGE", "Dogecoin"),
    ("avalanche-2", "AVAX", "Avalanche"),
    ("polygon", "MATIC", "Polygon"),
];

pub async fn get_all(state: &AppState) -> Result<Vec<CryptoPrice>> {
    let ttl = state.settings.crypto_cache_ttl();
    state
        .cache
        .get_or_load("crypto:all", ttl, || async {
            state.store.list_crypto().await
        })
        .await
}

pub async fn get_top(state: &AppState, count: usize) -> Result<Vec<CryptoPrice>> {
    let count = count.clamp(1, state.settings.crypto_top_ceiling);
    let ttl = state.settings.crypto_cache_ttl();
    state
        .cache
        .get_or_load(&format!("crypto:top:{count}"), ttl, || async {
            state.store.top_crypto(count).await
        })
        .await
}

pub async fn get_by_symbol(state: &AppState, symbol: &str) -> Result<Option<CryptoPrice>> {
    let sym = symbol.to_uppercase();
    let key = format!("crypto:symbol:{sym}");

    if let Some(hit) = state.cache.get::<CryptoPrice>(&key) {
        return Ok(Some(hit));
    }

    let found = state.store.get_crypto(&sym).await?;
    if let Some(price) = &found {
        // absent lookups are not cached
        state.cache.put(&key, price, state.settings.crypto_cache_ttl());
    }

    Ok(found)
}

fn build_record(symbol: &str, name: &str, quote: &CoinQuote, now: i64) -> Result<CryptoPrice> {
    Ok(CryptoPrice {
        symbol: symbol.to_string(),
        name: name.to_string(),
        price_usd: decimal::fit(quote.usd, decimal::CRYPTO_PRICE)?,
        price_eur: decimal::fit(quote.eur, decimal::CRYPTO_PRICE)?,
        market_cap_usd: decimal::fit(quote.usd_market_cap, decimal::MARKET_CAP)?,
        volume_24h_usd: decimal::fit(quote.usd_24h_vol, decimal::MARKET_CAP)?,
        change_percent_24h: decimal::fit(quote.usd_24h_change, decimal::PERCENT)?,
        last_updated: now,
    })
}

/// One refresh cycle: fetch the fixed id set, upsert whatever came back,
/// then drop every cache key derived from the crypto tables. A failed
/// fetch aborts before any store write.
pub async fn refresh_prices(state: &AppState) -> Result<usize> {
    let ids: Vec<&str> = COINGECKO_IDS.iter().map(|(id, _, _)| *id).collect();
    let quotes = state.crypto_source.fetch_quotes(&ids).await?;

    let now = Utc::now().timestamp();
    let mut updated = 0;

    for (id, symbol, name) in COINGECKO_IDS {
        let Some(quote) = quotes.get(*id) else {
            continue;
        };

        let record = match build_record(symbol, name, quote, now) {
            Ok(r) => r,
            Err(e) => {
                tracing::warn!(symbol, error = %e, "skipping out-of-range crypto quote");
                continue;
            }
        };

        state.store.upsert_crypto(&record).await?;
        state.cache.invalidate(&format!("crypto:symbol:{symbol}"));
        updated += 1;
    }

    state.cache.invalidate("crypto:all");
    state.cache.invalidate_prefix("crypto:top:");

    tracing::info!(updated, "updated cryptocurrency prices");
    Ok(updated)
}
