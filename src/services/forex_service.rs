use chrono::Utc;

use crate::AppState;
use crate::error::Result;
use crate::models::ForexRate;
use crate::models::decimal;

/// Tracked targets for the USD base. Currencies missing from an
/// upstream payload are skipped for that cycle.
const TARGET_CURRENCIES: &[&str] = &[
    "EUR", "GBP", "JPY", "CHF", "CAD", "AUD", "NZD", "CNY", "INR", "BRL",
];

pub async fn get_all(state: &AppState) -> Result<Vec<ForexRate>> {
    let ttl = state.settings.forex_cache_ttl();
    state
        .cache
        .get_or_load("forex:all", ttl, || async {
            state.store.list_forex().await
        })
        .await
}

pub async fn get_rate(state: &AppState, base: &str, target: &str) -> Result<Option<ForexRate>> {
    let base = base.to_uppercase();
    let target = target.to_uppercase();
    let key = format!("forex:{base}:{target}");

    if let Some(hit) = state.cache.get::<ForexRate>(&key) {
        return Ok(Some(hit));
    }

    let found = state.store.get_forex(&base, &target).await?;
    if let Some(rate) = &found {
        state.cache.put(&key, rate, state.settings.forex_cache_ttl());
    }

    Ok(found)
}

pub async fn refresh_rates(state: &AppState) -> Result<usize> {
    let rates = state.forex_source.fetch_rates("USD").await?;

    let now = Utc::now().timestamp();
    let mut updated = 0;

    for target in TARGET_CURRENCIES {
        let Some(rate) = rates.get(*target) else {
            continue;
        };

        let rate = match decimal::fit(*rate, decimal::FOREX_RATE) {
            Ok(r) => r,
            Err(e) => {
                tracing::warn!(target, error = %e, "skipping out-of-range forex rate");
                continue;
            }
        };

        let record = ForexRate {
            base_currency: "USD".to_string(),
            target_currency: (*target).to_string(),
            rate,
            last_updated: now,
        };

        state.store.upsert_forex(&record).await?;
        state.cache.invalidate(&format!("forex:USD:{target}"));
        updated += 1;
    }

    state.cache.invalidate("forex:all");

    tracing::info!(updated, "updated forex rates");
    Ok(updated)
}
