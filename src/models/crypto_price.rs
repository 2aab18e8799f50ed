use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One row per crypto symbol; refresh overwrites in place.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CryptoPrice {
    pub symbol: String,
    pub name: String,

    // (18, 8)
    pub price_usd: Decimal,
    pub price_eur: Decimal,

    // (20, 2)
    pub market_cap_usd: Decimal,
    pub volume_24h_usd: Decimal,

    // (10, 4)
    pub change_percent_24h: Decimal,

    pub last_updated: i64,
}
