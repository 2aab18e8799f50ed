//! Library entrypoint for PriceTracker.
//!
//! This file exists mainly to make controller tests easy (integration
//! tests under `tests/` can import the app state, routers, controllers,
//! services).

use std::sync::Arc;

pub mod cache;
pub mod config;
pub mod controllers;
pub mod error;
pub mod jobs;
pub mod models;
pub mod routes;
pub mod services;
pub mod store;

use crate::cache::PriceCache;
use crate::jobs::JobGuards;
use crate::services::notifier::Notifier;
use crate::services::sources::{CryptoSource, ForexSource, StockSource};
use crate::store::Store;

#[derive(Clone)]
pub struct AppState {
    pub settings: config::Settings,
    pub store: Arc<dyn Store>,
    pub cache: Arc<PriceCache>,
    pub crypto_source: Arc<dyn CryptoSource>,
    pub stock_source: Arc<dyn StockSource>,
    pub forex_source: Arc<dyn ForexSource>,
    pub notifier: Arc<Notifier>,
    pub jobs: Arc<JobGuards>,
}
