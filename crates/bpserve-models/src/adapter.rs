//! Prediction adapter between the HTTP layer and a loaded model

use crate::model::Model;
use bpserve_core::{FeatureMatrix, PredictionOutcome, Result};
use ndarray::Array2;
use serde_json::Value;
use tracing::{debug, warn};

/// Run `model` on caller-supplied features.
///
/// A model without a prediction capability yields
/// [`PredictionOutcome::Unrecognized`] whatever the features look like.
/// Otherwise features are converted to a matrix (a single sample becomes
/// one row) and probabilities are attached only when the model exposes
/// that capability.
pub fn predict(model: &dyn Model, features: &Value) -> Result<PredictionOutcome> {
    let Some(predictor) = model.as_predict() else {
        warn!("Model {} exposes no prediction capability", model.type_name());
        return Ok(PredictionOutcome::Unrecognized);
    };

    let x = FeatureMatrix::from_json(features)?;
    debug!(
        samples = x.n_samples(),
        features = x.n_features(),
        model = model.type_name(),
        "Running prediction"
    );

    let prediction = predictor.predict(&x)?;
    let probabilities = match model.as_predict_proba() {
        Some(p) => Some(to_nested(p.predict_proba(&x)?)),
        None => None,
    };

    Ok(PredictionOutcome::Success {
        prediction,
        probabilities,
    })
}

fn to_nested(array: Array2<f64>) -> Vec<Vec<f64>> {
    array.rows().into_iter().map(|row| row.to_vec()).collect()
}
