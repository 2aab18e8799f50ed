use axum::Json;
use axum::Router;
use axum::http::StatusCode;
use serde_json::json;

use crate::AppState;

pub mod alerts_routes;
pub mod crypto_routes;
pub mod forex_routes;
pub mod status_routes;
pub mod stocks_routes;

pub fn app(state: AppState) -> Router {
    let router = Router::<AppState>::new();

    let router = crypto_routes::add_routes(router);
    let router = stocks_routes::add_routes(router);
    let router = forex_routes::add_routes(router);
    let router = alerts_routes::add_routes(router);
    let router = status_routes::add_routes(router);

    router
        .fallback(|| async {
            (StatusCode::NOT_FOUND, Json(json!({ "error": "not found" })))
        })
        .with_state(state)
}
