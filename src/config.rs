use std::env;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Settings {
    pub mongodb_uri: String,
    pub mongodb_db: String,
    pub host: String,
    pub port: u16,

    pub coingecko_base_url: String,
    pub exchange_rate_base_url: String,
    pub http_timeout_secs: u64,

    // cache TTLs, minutes
    pub crypto_cache_ttl_minutes: i64,
    pub stock_cache_ttl_minutes: i64,
    pub forex_cache_ttl_minutes: i64,

    // background cycle periods, seconds
    pub crypto_refresh_secs: u64,
    pub stock_refresh_secs: u64,
    pub forex_refresh_secs: u64,
    pub alert_check_secs: u64,

    pub crypto_top_ceiling: usize,
    pub environment: String,
}

fn env_str(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

fn env_parse<T: std::str::FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|s| s.parse::<T>().ok())
        .unwrap_or(default)
}

pub fn load() -> Settings {
    // Loads .env if present (no crash if missing)
    dotenvy::dotenv().ok();

    Settings {
        mongodb_uri: env_str("MONGODB_URI", "mongodb://localhost:27017"),
        mongodb_db: env_str("MONGODB_DB", "pricetracker"),
        host: env_str("HOST", "127.0.0.1"),
        port: env_parse("PORT", 3000),

        coingecko_base_url: env_str("COINGECKO_BASE_URL", "https://api.coingecko.com/api/v3"),
        exchange_rate_base_url: env_str(
            "EXCHANGE_RATE_BASE_URL",
            "https://api.exchangerate-api.com/v4",
        ),
        http_timeout_secs: env_parse("HTTP_TIMEOUT_SECS", 30),

        crypto_cache_ttl_minutes: env_parse("CRYPTO_CACHE_TTL_MINUTES", 5),
        stock_cache_ttl_minutes: env_parse("STOCK_CACHE_TTL_MINUTES", 15),
        forex_cache_ttl_minutes: env_parse("FOREX_CACHE_TTL_MINUTES", 60),

        crypto_refresh_secs: env_parse("CRYPTO_REFRESH_SECS", 300),
        stock_refresh_secs: env_parse("STOCK_REFRESH_SECS", 600),
        forex_refresh_secs: env_parse("FOREX_REFRESH_SECS", 3600),
        alert_check_secs: env_parse("ALERT_CHECK_SECS", 60),

        crypto_top_ceiling: env_parse("CRYPTO_TOP_CEILING", 20),
        environment: env_str("ENVIRONMENT", "development"),
    }
}

impl Settings {
    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_secs)
    }

    pub fn crypto_cache_ttl(&self) -> chrono::Duration {
        chrono::Duration::minutes(self.crypto_cache_ttl_minutes)
    }

    pub fn stock_cache_ttl(&self) -> chrono::Duration {
        chrono::Duration::minutes(self.stock_cache_ttl_minutes)
    }

    pub fn forex_cache_ttl(&self) -> chrono::Duration {
        chrono::Duration::minutes(self.forex_cache_ttl_minutes)
    }
}
