//! Serialized model artifact and the in-memory model built from it

use crate::estimators::{DecisionTreeClassifier, LinearRegression, LogisticRegression};
use crate::model::{Model, Predict, PredictProba};
use bpserve_core::{Error, Result};
use serde::{Deserialize, Serialize};

/// Envelope version written by current exporters
pub const ARTIFACT_FORMAT_VERSION: u32 = 1;

/// On-disk model artifact, shared by every decoding strategy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelArtifact {
    #[serde(default = "default_format_version")]
    pub format_version: u32,

    /// Names of the columns the estimator was fitted on
    #[serde(default)]
    pub feature_names: Option<Vec<String>>,

    pub estimator: Estimator,
}

/// The estimator stored in an artifact
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Estimator {
    LinearRegression(LinearRegression),
    LogisticRegression(LogisticRegression),
    DecisionTreeClassifier(DecisionTreeClassifier),

    /// An exported object with no capability this server knows how to call
    Opaque { type_name: String },
}

impl Estimator {
    pub fn type_name(&self) -> &str {
        match self {
            Self::LinearRegression(_) => LinearRegression::TYPE_NAME,
            Self::LogisticRegression(_) => LogisticRegression::TYPE_NAME,
            Self::DecisionTreeClassifier(_) => DecisionTreeClassifier::TYPE_NAME,
            Self::Opaque { type_name } => type_name,
        }
    }

    pub fn n_features(&self) -> Option<usize> {
        match self {
            Self::LinearRegression(m) => Some(m.n_features()),
            Self::LogisticRegression(m) => Some(m.n_features()),
            Self::DecisionTreeClassifier(m) => Some(m.n_features),
            Self::Opaque { .. } => None,
        }
    }

    fn validate(&self) -> Result<()> {
        match self {
            Self::LinearRegression(m) => m.validate(),
            Self::LogisticRegression(m) => m.validate(),
            Self::DecisionTreeClassifier(m) => m.validate(),
            Self::Opaque { type_name } if type_name.is_empty() => {
                Err(Error::artifact("opaque artifact has an empty type name"))
            }
            Self::Opaque { .. } => Ok(()),
        }
    }
}

impl ModelArtifact {
    /// Wrap an estimator in a current-version envelope
    pub fn new(estimator: Estimator) -> Self {
        Self {
            format_version: ARTIFACT_FORMAT_VERSION,
            feature_names: None,
            estimator,
        }
    }

    /// Attach feature names
    pub fn with_feature_names<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.feature_names = Some(names.into_iter().map(Into::into).collect());
        self
    }

    /// Check structural consistency and build the served model
    pub fn into_model(self) -> Result<LoadedModel> {
        if self.format_version > ARTIFACT_FORMAT_VERSION {
            return Err(Error::artifact(format!(
                "artifact format version {} is newer than supported version {}",
                self.format_version, ARTIFACT_FORMAT_VERSION
            )));
        }
        self.estimator.validate()?;

        if let (Some(names), Some(n)) = (&self.feature_names, self.estimator.n_features()) {
            if names.len() != n {
                return Err(Error::artifact(format!(
                    "artifact lists {} feature names but the estimator expects {} features",
                    names.len(),
                    n
                )));
            }
        }

        Ok(LoadedModel {
            feature_names: self.feature_names,
            estimator: self.estimator,
        })
    }
}

fn default_format_version() -> u32 {
    ARTIFACT_FORMAT_VERSION
}

/// A validated artifact ready to serve predictions
#[derive(Debug, Clone)]
pub struct LoadedModel {
    feature_names: Option<Vec<String>>,
    estimator: Estimator,
}

impl Model for LoadedModel {
    fn type_name(&self) -> &str {
        self.estimator.type_name()
    }

    fn as_predict(&self) -> Option<&dyn Predict> {
        match &self.estimator {
            Estimator::LinearRegression(m) => Some(m),
            Estimator::LogisticRegression(m) => Some(m),
            Estimator::DecisionTreeClassifier(m) => Some(m),
            Estimator::Opaque { .. } => None,
        }
    }

    fn as_predict_proba(&self) -> Option<&dyn PredictProba> {
        match &self.estimator {
            Estimator::LogisticRegression(m) => Some(m),
            Estimator::DecisionTreeClassifier(m) => Some(m),
            Estimator::LinearRegression(_) | Estimator::Opaque { .. } => None,
        }
    }

    fn feature_names(&self) -> Option<&[String]> {
        self.feature_names.as_deref()
    }

    fn n_features(&self) -> Option<usize> {
        self.estimator.n_features()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bpserve_core::Label;

    fn logistic() -> Estimator {
        Estimator::LogisticRegression(LogisticRegression {
            classes: vec![Label::Int(0), Label::Int(1)],
            coef: vec![vec![0.1, 0.2, 0.3]],
            intercept: vec![-1.0],
        })
    }

    #[test]
    fn test_json_shape() {
        let json = r#"{
            "feature_names": ["systolic", "diastolic", "age"],
            "estimator": {"LogisticRegression": {
                "classes": [0, 1],
                "coef": [[0.1, 0.2, 0.3]],
                "intercept": [-1.0]
            }}
        }"#;
        let artifact: ModelArtifact = serde_json::from_str(json).unwrap();
        assert_eq!(artifact.format_version, ARTIFACT_FORMAT_VERSION);
        assert_eq!(artifact.estimator, logistic());
    }

    #[test]
    fn test_capabilities_by_estimator() {
        let model = ModelArtifact::new(logistic()).into_model().unwrap();
        assert_eq!(model.type_name(), "LogisticRegression");
        assert!(model.as_predict().is_some());
        assert!(model.as_predict_proba().is_some());
        assert_eq!(model.n_features(), Some(3));
        assert!(model.feature_names().is_none());

        let linear = ModelArtifact::new(Estimator::LinearRegression(LinearRegression {
            coef: vec![1.0],
            intercept: 0.0,
        }))
        .into_model()
        .unwrap();
        assert!(linear.as_predict().is_some());
        assert!(linear.as_predict_proba().is_none());

        let opaque = ModelArtifact::new(Estimator::Opaque {
            type_name: "Pipeline".into(),
        })
        .into_model()
        .unwrap();
        assert_eq!(opaque.type_name(), "Pipeline");
        assert!(opaque.as_predict().is_none());
        assert!(opaque.n_features().is_none());
    }

    #[test]
    fn test_feature_name_count_must_match() {
        let err = ModelArtifact::new(logistic())
            .with_feature_names(["systolic", "diastolic"])
            .into_model()
            .unwrap_err();
        assert!(matches!(err, Error::Artifact(_)));
    }

    #[test]
    fn test_newer_format_rejected() {
        let mut artifact = ModelArtifact::new(logistic());
        artifact.format_version = ARTIFACT_FORMAT_VERSION + 1;
        assert!(artifact.into_model().is_err());
    }

    #[test]
    fn test_describe_omits_missing_attributes() {
        let model = ModelArtifact::new(Estimator::Opaque {
            type_name: "Pipeline".into(),
        })
        .into_model()
        .unwrap();
        let json = serde_json::to_value(model.describe()).unwrap();
        assert_eq!(json, serde_json::json!({"model_type": "Pipeline"}));
    }
}
