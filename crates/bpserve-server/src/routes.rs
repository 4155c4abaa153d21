//! HTTP routes and handlers

use axum::{
    body::Bytes,
    extract::{DefaultBodyLimit, State},
    routing::{get, post},
    Json, Router,
};
use bpserve_core::{Label, PredictionOutcome};
use bpserve_models::{predict as run_prediction, ModelDescription};
use serde::Serialize;
use serde_json::Value;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{debug, error};

use crate::error::ApiError;
use crate::state::AppState;

const UNRECOGNIZED_MODEL: &str = "Model format not recognized";

pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health_check))
        .route("/predict", post(predict))
        .route("/model/info", get(model_info))
        .fallback(fallback)
        // Batches have no size cap; the model check must run before any body limit
        .layer(DefaultBodyLimit::disable())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
    model_loaded: bool,
}

async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        model_loaded: state.model_loaded(),
    })
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
enum PredictionValue {
    Labels(Vec<Label>),
    Message(&'static str),
}

#[derive(Debug, Serialize)]
struct PredictResponse {
    prediction: PredictionValue,
    status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    probabilities: Option<Vec<Vec<f64>>>,
}

impl From<PredictionOutcome> for PredictResponse {
    fn from(outcome: PredictionOutcome) -> Self {
        match outcome {
            PredictionOutcome::Success {
                prediction,
                probabilities,
            } => Self {
                prediction: PredictionValue::Labels(prediction),
                status: "success",
                probabilities,
            },
            // Reported with 200 and an embedded error status; see DESIGN.md
            PredictionOutcome::Unrecognized => Self {
                prediction: PredictionValue::Message(UNRECOGNIZED_MODEL),
                status: "error",
                probabilities: None,
            },
        }
    }
}

async fn predict(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<PredictResponse>, ApiError> {
    let model = state.model().cloned().ok_or(ApiError::ModelUnavailable)?;

    let data: Value = serde_json::from_slice(&body).map_err(|e| {
        debug!("Rejecting non-JSON body: {}", e);
        ApiError::InvalidRequest
    })?;
    if is_blank(&data) {
        return Err(ApiError::InvalidRequest);
    }

    let features = match data.get("features") {
        Some(features) if !is_blank(features) => features.clone(),
        _ => return Err(ApiError::InvalidInput),
    };

    // Model evaluation is CPU-bound; keep it off the async workers
    let outcome = tokio::task::spawn_blocking(move || run_prediction(model.as_ref(), &features))
        .await
        .map_err(|e| ApiError::PredictionFailed(format!("prediction task failed: {e}")))?
        .map_err(|e| {
            error!("Prediction failed: {}", e);
            ApiError::from(e)
        })?;

    Ok(Json(outcome.into()))
}

#[derive(Debug, Serialize)]
struct ModelInfoResponse {
    #[serde(flatten)]
    description: ModelDescription,
    model_loaded: bool,
}

async fn model_info(State(state): State<AppState>) -> Result<Json<ModelInfoResponse>, ApiError> {
    let model = state.model().ok_or(ApiError::ModelNotLoaded)?;
    Ok(Json(ModelInfoResponse {
        description: model.describe(),
        model_loaded: true,
    }))
}

async fn fallback() -> ApiError {
    ApiError::NotFound
}

/// Values a caller cannot mean as "present": null, false, zero, and empty
/// strings, arrays, or objects
fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(fields) => fields.is_empty(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_is_blank() {
        for v in [json!(null), json!(false), json!(0), json!(0.0), json!(""), json!([]), json!({})] {
            assert!(is_blank(&v), "{v} should be blank");
        }
        for v in [json!(true), json!(1), json!("x"), json!([0]), json!({"a": 1})] {
            assert!(!is_blank(&v), "{v} should not be blank");
        }
    }

    #[test]
    fn test_unrecognized_response_shape() {
        let body = serde_json::to_value(PredictResponse::from(PredictionOutcome::Unrecognized))
            .unwrap();
        assert_eq!(
            body,
            json!({"prediction": "Model format not recognized", "status": "error"})
        );
    }
}
