use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Exchange rate, unique per ordered (base, target) pair.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForexRate {
    pub base_currency: String,
    pub target_currency: String,

    // (18, 8)
    pub rate: Decimal,

    pub last_updated: i64,
}
