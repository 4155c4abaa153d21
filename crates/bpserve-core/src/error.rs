//! Error types for bpserve

/// Result type alias using bpserve's Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for model loading and prediction
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Model artifact could not be decoded or is structurally invalid
    #[error("artifact error: {0}")]
    Artifact(String),

    /// Features could not be converted into a numeric matrix
    #[error("feature error: {0}")]
    Features(String),

    /// The model rejected the input or failed while predicting
    #[error("{0}")]
    Prediction(String),

    /// Configuration errors
    #[error("configuration error: {0}")]
    Config(String),

    /// Filesystem errors
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization errors
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl Error {
    /// Create a new artifact error
    pub fn artifact(msg: impl Into<String>) -> Self {
        Self::Artifact(msg.into())
    }

    /// Create a new feature conversion error
    pub fn features(msg: impl Into<String>) -> Self {
        Self::Features(msg.into())
    }

    /// Create a new prediction error
    pub fn prediction(msg: impl Into<String>) -> Self {
        Self::Prediction(msg.into())
    }

    /// Create a new configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}
