//! Capability traits for served models

use bpserve_core::{FeatureMatrix, Label, Result};
use ndarray::Array2;
use serde::Serialize;

/// A loaded model, described by the capabilities it exposes.
///
/// A model that returns `None` from every capability accessor is still a
/// valid model; the prediction adapter reports it as unrecognized.
pub trait Model: Send + Sync {
    /// Runtime type name reported to callers and in logs
    fn type_name(&self) -> &str;

    /// Point prediction capability
    fn as_predict(&self) -> Option<&dyn Predict> {
        None
    }

    /// Probability capability
    fn as_predict_proba(&self) -> Option<&dyn PredictProba> {
        None
    }

    /// Names of the features the model was fitted on
    fn feature_names(&self) -> Option<&[String]> {
        None
    }

    /// Number of features the model expects per sample
    fn n_features(&self) -> Option<usize> {
        None
    }

    /// Summarize the model for the info endpoint
    fn describe(&self) -> ModelDescription {
        ModelDescription {
            model_type: self.type_name().to_string(),
            feature_names: self.feature_names().map(<[String]>::to_vec),
            n_features: self.n_features(),
        }
    }
}

/// Produce one prediction per sample
pub trait Predict: Send + Sync {
    fn predict(&self, x: &FeatureMatrix) -> Result<Vec<Label>>;
}

/// Produce one probability distribution per sample
pub trait PredictProba: Send + Sync {
    fn predict_proba(&self, x: &FeatureMatrix) -> Result<Array2<f64>>;
}

/// Model metadata exposed over HTTP. Absent attributes are omitted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModelDescription {
    pub model_type: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub feature_names: Option<Vec<String>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub n_features: Option<usize>,
}
