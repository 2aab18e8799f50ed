use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// Network, timeout, or non-2xx failure talking to a price source.
    /// Aborts the current refresh cycle; nothing is written to the store.
    #[error("upstream fetch failed: {0}")]
    UpstreamFetch(String),

    /// Upstream payload did not have the expected shape.
    #[error("unexpected upstream payload: {0}")]
    Parse(String),

    #[error("{0} not found")]
    NotFound(&'static str),

    /// Request input that cannot be normalized into the domain model.
    #[error("invalid request: {0}")]
    Invalid(String),

    /// Value whose integer digits exceed the declared (precision, scale).
    #[error("value exceeds declared precision: {0}")]
    Precision(String),

    #[error("database error: {0}")]
    Db(String),

    /// Notification delivery failure. Logged and swallowed by the
    /// dispatcher; never escalated past it.
    #[error("notification delivery failed: {0}")]
    Dispatch(String),
}

impl From<mongodb::error::Error> for Error {
    fn from(e: mongodb::error::Error) -> Self {
        Error::Db(e.to_string())
    }
}

impl From<mongodb::bson::ser::Error> for Error {
    fn from(e: mongodb::bson::ser::Error) -> Self {
        Error::Db(e.to_string())
    }
}

impl From<reqwest::Error> for Error {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            Error::UpstreamFetch(format!("request timed out: {e}"))
        } else if e.is_decode() {
            Error::Parse(e.to_string())
        } else {
            Error::UpstreamFetch(e.to_string())
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Parse(e.to_string())
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = match self {
            Error::NotFound(_) => StatusCode::NOT_FOUND,
            Error::Invalid(_) | Error::Precision(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };

        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}
