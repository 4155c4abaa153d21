//! bpserve Core
//!
//! Types shared by the model crate and the HTTP server.
//!
//! This crate provides:
//! - The error type and result alias used across the workspace
//! - Conversion of caller-supplied JSON features into a numeric matrix
//! - Prediction value types that serialize back to JSON unchanged

pub mod error;
pub mod features;
pub mod types;

pub use error::{Error, Result};
pub use features::FeatureMatrix;
pub use types::{Label, PredictionOutcome};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::error::{Error, Result};
    pub use crate::features::FeatureMatrix;
    pub use crate::types::{Label, PredictionOutcome};
}
