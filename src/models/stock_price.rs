use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StockPrice {
    pub symbol: String,
    pub name: String,
    pub exchange: String,

    // (18, 4)
    pub price: Decimal,
    pub day_high: Decimal,
    pub day_low: Decimal,
    pub open: Decimal,
    pub previous_close: Decimal,

    // (10, 4)
    pub change_percent: Decimal,

    pub volume: i64,
    pub last_updated: i64,
}
