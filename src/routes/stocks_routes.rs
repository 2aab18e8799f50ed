use axum::{Router, routing::get};

use crate::{AppState, controllers::stocks_controller};

pub fn add_routes(router: Router<AppState>) -> Router<AppState> {
    router
        .route("/api/stocks", get(stocks_controller::get_all))
        .route("/api/stocks/:symbol", get(stocks_controller::get_by_symbol))
}
