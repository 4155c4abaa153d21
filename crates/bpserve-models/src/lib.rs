//! bpserve Models
//!
//! Everything between a model file on disk and a prediction:
//! - Capability traits a served model implements (`Predict`, `PredictProba`)
//! - Built-in estimators and the serialized artifact envelope
//! - An ordered list of decoding strategies tried at startup
//! - The single-assignment slot holding the process model
//! - The prediction adapter used by the HTTP layer

pub mod adapter;
pub mod artifact;
pub mod estimators;
pub mod loader;
pub mod model;
pub mod slot;

pub use adapter::predict;
pub use artifact::{Estimator, LoadedModel, ModelArtifact, ARTIFACT_FORMAT_VERSION};
pub use estimators::{DecisionTreeClassifier, LinearRegression, LogisticRegression};
pub use loader::{
    default_model_path, BincodeStrategy, JsonStrategy, LoadStrategy, ModelLoader,
    MODEL_FILE_NAME,
};
pub use model::{Model, ModelDescription, Predict, PredictProba};
pub use slot::ModelSlot;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::loader::{LoadStrategy, ModelLoader};
    pub use crate::model::{Model, Predict, PredictProba};
    pub use crate::slot::ModelSlot;
}
