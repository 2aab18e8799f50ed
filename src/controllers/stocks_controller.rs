use axum::Json;
use axum::extract::{Path, State};

use crate::AppState;
use crate::error::Error;
use crate::models::StockPrice;
use crate::services::stocks_service;

// GET /api/stocks
pub async fn get_all(State(state): State<AppState>) -> Result<Json<Vec<StockPrice>>, Error> {
    Ok(Json(stocks_service::get_all(&state).await?))
}

// GET /api/stocks/:symbol
pub async fn get_by_symbol(
    State(state): State<AppState>,
    Path(symbol): Path<String>,
) -> Result<Json<StockPrice>, Error> {
    stocks_service::get_by_symbol(&state, &symbol)
        .await?
        .map(Json)
        .ok_or(Error::NotFound("stock price"))
}
