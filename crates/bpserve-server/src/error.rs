//! HTTP error responses

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

/// Failures a request can end in, each mapped to one status code
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Predict was called but no model is loaded
    #[error("model not loaded")]
    ModelUnavailable,

    /// Model info was requested but no model is loaded
    #[error("model not loaded")]
    ModelNotLoaded,

    /// Body missing, empty, or not JSON
    #[error("request body must be JSON")]
    InvalidRequest,

    /// Body has no usable `features` field
    #[error("features array is required")]
    InvalidInput,

    /// Feature conversion or the model call failed
    #[error("prediction failed: {0}")]
    PredictionFailed(String),

    #[error("not found")]
    NotFound,
}

impl From<bpserve_core::Error> for ApiError {
    fn from(err: bpserve_core::Error) -> Self {
        ApiError::PredictionFailed(err.to_string())
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::ModelUnavailable | Self::ModelNotLoaded => StatusCode::SERVICE_UNAVAILABLE,
            Self::InvalidRequest | Self::InvalidInput => StatusCode::BAD_REQUEST,
            Self::PredictionFailed(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::NotFound => StatusCode::NOT_FOUND,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match self {
            Self::ModelUnavailable => json!({
                "error": "Model not loaded",
                "message": "The ML model is not available. Please check server logs.",
            }),
            Self::ModelNotLoaded => json!({ "error": "Model not loaded" }),
            Self::InvalidRequest => json!({
                "error": "Invalid request",
                "message": "Request body must be JSON",
            }),
            Self::InvalidInput => json!({
                "error": "Invalid input",
                "message": "Features array is required",
            }),
            Self::PredictionFailed(reason) => json!({
                "error": reason,
                "message": "Prediction failed",
            }),
            Self::NotFound => json!({ "error": "Not found" }),
        };

        (status, Json(body)).into_response()
    }
}
