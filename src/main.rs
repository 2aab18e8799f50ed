use std::net::SocketAddr;
use std::sync::Arc;

use mongodb::Client;

use pricetracker::cache::{PriceCache, SystemClock};
use pricetracker::services::notifier::Notifier;
use pricetracker::services::sources::{CoinGeckoClient, ExchangeRateClient, SeedStockSource};
use pricetracker::services::db_init;
use pricetracker::store::MongoStore;
use pricetracker::{AppState, config, jobs, routes};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    let settings = config::load();

    // Mongo connection
    let client = Client::with_uri_str(&settings.mongodb_uri)
        .await
        .expect("Failed to connect to MongoDB");
    let db = client.database(&settings.mongodb_db);

    if let Err(e) = db_init::ensure_indexes(&db).await {
        tracing::warn!(error = %e, "failed to ensure indexes");
    }

    let timeout = settings.http_timeout();

    let state = AppState {
        store: Arc::new(MongoStore::new(db)),
        cache: Arc::new(PriceCache::new(Arc::new(SystemClock))),
        crypto_source: Arc::new(CoinGeckoClient::new(
            settings.coingecko_base_url.clone(),
            timeout,
        )),
        stock_source: Arc::new(SeedStockSource),
        forex_source: Arc::new(ExchangeRateClient::new(
            settings.exchange_rate_base_url.clone(),
            timeout,
        )),
        notifier: Arc::new(Notifier::new(timeout)),
        jobs: Arc::new(jobs::JobGuards::default()),
        settings: settings.clone(),
    };

    jobs::spawn_jobs(&state);

    let app = routes::app(state);

    let addr = SocketAddr::from((
        settings.host.parse::<std::net::IpAddr>().unwrap(),
        settings.port,
    ));
    tracing::info!("listening on http://{}", addr);
    tracing::info!(environment = %settings.environment, "price tracker started");

    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}
