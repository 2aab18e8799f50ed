use axum::Json;
use axum::extract::{Path, State};

use crate::AppState;
use crate::error::Error;
use crate::models::ForexRate;
use crate::services::forex_service;

// GET /api/forex
pub async fn get_all(State(state): State<AppState>) -> Result<Json<Vec<ForexRate>>, Error> {
    Ok(Json(forex_service::get_all(&state).await?))
}

// GET /api/forex/:base/:target
pub async fn get_rate(
    State(state): State<AppState>,
    Path((base, target)): Path<(String, String)>,
) -> Result<Json<ForexRate>, Error> {
    forex_service::get_rate(&state, &base, &target)
        .await?
        .map(Json)
        .ok_or(Error::NotFound("forex rate"))
}
