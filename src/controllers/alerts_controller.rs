use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::AppState;
use crate::error::Error;
use crate::models::{Alert, CreateAlertRequest};
use crate::services::alerts_service;

// GET /api/alerts
pub async fn get_all(State(state): State<AppState>) -> Result<Json<Vec<Alert>>, Error> {
    Ok(Json(alerts_service::list_alerts(&state).await?))
}

// GET /api/alerts/:id
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Alert>, Error> {
    alerts_service::get_alert(&state, &id)
        .await?
        .map(Json)
        .ok_or(Error::NotFound("alert"))
}

// POST /api/alerts
pub async fn create(
    State(state): State<AppState>,
    Json(req): Json<CreateAlertRequest>,
) -> Result<Response, Error> {
    let alert = alerts_service::create_alert(&state, req).await?;
    Ok((StatusCode::CREATED, Json(alert)).into_response())
}

// DELETE /api/alerts/:id — idempotent, 204 also when absent
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, Error> {
    alerts_service::delete_alert(&state, &id).await?;
    Ok(StatusCode::NO_CONTENT)
}
