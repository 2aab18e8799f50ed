pub mod alerts_service;
pub mod crypto_service;
pub mod db_init;
pub mod forex_service;
pub mod notifier;
pub mod sources;
pub mod stocks_service;
