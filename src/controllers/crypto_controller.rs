use axum::Json;
use axum::extract::{Path, State};

use crate::AppState;
use crate::error::Error;
use crate::models::CryptoPrice;
use crate::services::crypto_service;

// GET /api/crypto
pub async fn get_all(State(state): State<AppState>) -> Result<Json<Vec<CryptoPrice>>, Error> {
    Ok(Json(crypto_service::get_all(&state).await?))
}

// GET /api/crypto/top/:count
pub async fn get_top(
    State(state): State<AppState>,
    Path(count): Path<usize>,
) -> Result<Json<Vec<CryptoPrice>>, Error> {
    Ok(Json(crypto_service::get_top(&state, count).await?))
}

// GET /api/crypto/:symbol
pub async fn get_by_symbol(
    State(state): State<AppState>,
    Path(symbol): Path<String>,
) -> Result<Json<CryptoPrice>, Error> {
    crypto_service::get_by_symbol(&state, &symbol)
        .await?
        .map(Json)
        .ok_or(Error::NotFound("crypto price"))
}
