use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use serde::Serialize;
use thiserror::Error;

use crate::location::LocationError;

#[derive(Serialize)]
struct ApiErrorBody {
    error: String,
    code: u16,
}

/// Errors returned by the HTTP handlers, rendered as `{ error, code }`.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn missing_param(name: &str) -> Self {
        Self::BadRequest(format!("Missing '{}' parameter", name))
    }
}

impl From<LocationError> for ApiError {
    fn from(e: LocationError) -> Self {
        match &e {
            LocationError::NotFound(_) => Self::NotFound(e.to_string()),
            LocationError::UnknownSettlementType(_) => Self::BadRequest(e.to_string()),
            _ => Self::Internal(e.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }
        let body = ApiErrorBody {
            error: self.to_string(),
            code: status.as_u16(),
        };
        (status, Json(body)).into_response()
    }
}
