use axum::{Router, routing::get};

use crate::{AppState, controllers::forex_controller};

pub fn add_routes(router: Router<AppState>) -> Router<AppState> {
    router
        .route("/api/forex", get(forex_controller::get_all))
        .route("/api/forex/:base/:target", get(forex_controller::get_rate))
}
