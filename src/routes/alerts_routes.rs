use axum::{
    Router,
    routing::{delete, get, post},
};

use crate::{AppState, controllers::alerts_controller};

pub fn add_routes(router: Router<AppState>) -> Router<AppState> {
    router
        .route("/api/alerts", get(alerts_controller::get_all))
        .route("/api/alerts", post(alerts_controller::create))
        .route("/api/alerts/:id", get(alerts_controller::get_by_id))
        .route("/api/alerts/:id", delete(alerts_controller::delete))
}
