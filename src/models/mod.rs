pub mod alert;
pub mod crypto_price;
pub mod decimal;
pub mod forex_rate;
pub mod stock_price;

pub use alert::{Alert, AlertCondition, AssetKind, CreateAlertRequest};
pub use crypto_price::CryptoPrice;
pub use forex_rate::ForexRate;
pub use stock_price::StockPrice;
