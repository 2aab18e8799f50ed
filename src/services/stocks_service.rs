use chrono::Utc;

use crate::AppState;
use crate::error::Result;
use crate::models::StockPrice;
use crate::models::decimal;

pub async fn get_all(state: &AppState) -> Result<Vec<StockPrice>> {
    let ttl = state.settings.stock_cache_ttl();
    state
        .cache
        .get_or_load("stocks:all", ttl, || async {
            state.store.list_stocks().await
        })
        .await
}

pub async fn get_by_symbol(state: &AppState, symbol: &str) -> Result<Option<StockPrice>> {
    let sym = symbol.to_uppercase();
    let key = format!("stocks:symbol:{sym}");

    if let Some(hit) = state.cache.get::<StockPrice>(&key) {
        return Ok(Some(hit));
    }

    let found = state.store.get_stock(&sym).await?;
    if let Some(price) = &found {
        state.cache.put(&key, price, state.settings.stock_cache_ttl());
    }

    Ok(found)
}

/// One refresh cycle against the configured stock source (a fixed seed
/// set by default, see `sources::SeedStockSource`).
pub async fn refresh_prices(state: &AppState) -> Result<usize> {
    let quotes = state.stock_source.fetch_quotes().await?;

    let now = Utc::now().timestamp();
    let mut updated = 0;

    for quote in &quotes {
        let record = match build_record(quote, now) {
            Ok(r) => r,
            Err(e) => {
                tracing::warn!(symbol = quote.symbol, error = %e, "skipping out-of-range stock quote");
                continue;
            }
        };

        state.store.upsert_stock(&record).await?;
        state
            .cache
            .invalidate(&format!("stocks:symbol:{}", record.symbol));
        updated += 1;
    }

    state.cache.invalidate("stocks:all");

    tracing::info!(updated, "updated stock prices");
    Ok(updated)
}

fn build_record(quote: &crate::services::sources::StockQuote, now: i64) -> Result<StockPrice> {
    Ok(StockPrice {
        symbol: quote.symbol.to_string(),
        name: quote.name.to_string(),
        exchange: quote.exchange.to_string(),
        price: decimal::fit(quote.price, decimal::STOCK_PRICE)?,
        day_high: decimal::fit(quote.day_high, decimal::STOCK_PRICE)?,
        day_low: decimal::fit(quote.day_low, decimal::STOCK_PRICE)?,
        open: decimal::fit(quote.open, decimal::STOCK_PRICE)?,
        previous_close: decimal::fit(quote.previous_close, decimal::STOCK_PRICE)?,
        change_percent: decimal::fit(quote.change_percent, decimal::PERCENT)?,
        volume: quote.volume,
        last_updated: now,
    })
}
