use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use log::warn;
use serde_json::json;

use crate::core::PeekError;

pub struct ApiError(pub PeekError);

impl From<PeekError> for ApiError {
    fn from(err: PeekError) -> Self {
        ApiError(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            PeekError::LabelUnknown(_) => StatusCode::NOT_FOUND,
            PeekError::MalformedQuery(_) | PeekError::EmptyFile(_) | PeekError::NotFound(_) => {
                StatusCode::BAD_REQUEST
            }
            PeekError::IoFailure(_) | PeekError::ConfigError(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        warn!("request failed: {}", self.0);
        (status, Json(json!({"error": self.0.to_string()}))).into_response()
    }
}
