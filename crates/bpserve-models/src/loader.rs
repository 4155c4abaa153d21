//! Model loading from a single artifact file.
//!
//! The file is read once and handed to an ordered list of decoding
//! strategies. The first strategy that produces a valid model wins; every
//! failure is logged and the next strategy is tried.

use crate::artifact::{LoadedModel, ModelArtifact};
use bpserve_core::{Error, Result};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Fixed artifact file name, looked up next to the running executable
pub const MODEL_FILE_NAME: &str = "bp_recommender.model";

/// One way of turning artifact bytes into a model
pub trait LoadStrategy: Send + Sync {
    /// Short name used in logs
    fn name(&self) -> &'static str;

    /// Decode the raw artifact
    fn decode(&self, bytes: &[u8]) -> Result<ModelArtifact>;
}

/// Self-describing JSON envelope.
///
/// Tolerates unknown fields, so artifacts written by newer exporters with
/// extra metadata still load.
#[derive(Debug, Default, Clone, Copy)]
pub struct JsonStrategy;

impl LoadStrategy for JsonStrategy {
    fn name(&self) -> &'static str {
        "json"
    }

    fn decode(&self, bytes: &[u8]) -> Result<ModelArtifact> {
        Ok(serde_json::from_slice(bytes)?)
    }
}

/// Compact binary encoding of the same envelope
#[derive(Debug, Default, Clone, Copy)]
pub struct BincodeStrategy;

impl LoadStrategy for BincodeStrategy {
    fn name(&self) -> &'static str {
        "bincode"
    }

    fn decode(&self, bytes: &[u8]) -> Result<ModelArtifact> {
        bincode::deserialize(bytes).map_err(|e| Error::artifact(format!("bincode: {e}")))
    }
}

/// A strategy that could not produce a model, and why
#[derive(Debug, thiserror::Error)]
#[error("{strategy}: {reason}")]
pub struct StrategyFailure {
    pub strategy: &'static str,
    pub reason: Error,
}

/// Loads the model artifact at a fixed path
pub struct ModelLoader {
    path: PathBuf,
    strategies: Vec<Box<dyn LoadStrategy>>,
}

impl ModelLoader {
    /// Loader trying JSON first, then bincode
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self::with_strategies(
            path,
            vec![Box::new(JsonStrategy), Box::new(BincodeStrategy)],
        )
    }

    /// Loader with an explicit strategy order
    pub fn with_strategies(path: impl Into<PathBuf>, strategies: Vec<Box<dyn LoadStrategy>>) -> Self {
        Self {
            path: path.into(),
            strategies,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Names of the configured strategies, in order
    pub fn strategy_names(&self) -> Vec<&'static str> {
        self.strategies.iter().map(|s| s.name()).collect()
    }

    /// Read the artifact and try each strategy in turn
    pub fn load(&self) -> Result<LoadedModel> {
        if !self.path.exists() {
            return Err(Error::artifact(format!(
                "model file not found at {}",
                self.path.display()
            )));
        }
        let bytes = std::fs::read(&self.path)?;
        debug!(path = %self.path.display(), bytes = bytes.len(), "Read model artifact");

        let mut failures = Vec::with_capacity(self.strategies.len());
        for strategy in &self.strategies {
            match Self::try_strategy(strategy.as_ref(), &bytes) {
                Ok(model) => {
                    info!(
                        "Model loaded successfully using {} from {}",
                        strategy.name(),
                        self.path.display()
                    );
                    return Ok(model);
                }
                Err(reason) => {
                    warn!("{} loading failed: {}", strategy.name(), reason);
                    failures.push(StrategyFailure {
                        strategy: strategy.name(),
                        reason,
                    });
                }
            }
        }

        let reasons: Vec<String> = failures.iter().map(ToString::to_string).collect();
        Err(Error::artifact(format!(
            "no strategy could load {} ({})",
            self.path.display(),
            reasons.join("; ")
        )))
    }

    /// Decode with library diagnostics silenced for the duration of the call
    fn try_strategy(strategy: &dyn LoadStrategy, bytes: &[u8]) -> Result<LoadedModel> {
        tracing::subscriber::with_default(tracing::subscriber::NoSubscriber::default(), || {
            strategy.decode(bytes)
        })?
        .into_model()
    }
}

/// `<directory of the running executable>/bp_recommender.model`
pub fn default_model_path() -> Result<PathBuf> {
    let exe = std::env::current_exe()?;
    let dir = exe
        .parent()
        .ok_or_else(|| Error::config(format!("executable {} has no parent directory", exe.display())))?;
    Ok(dir.join(MODEL_FILE_NAME))
}
