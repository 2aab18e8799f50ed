pub mod alerts_controller;
pub mod crypto_controller;
pub mod forex_controller;
pub mod status_controller;
pub mod stocks_controller;
