//! Single-assignment holder for the process model

use crate::loader::ModelLoader;
use crate::model::Model;
use std::sync::{Arc, OnceLock};
use tracing::{error, info, warn};

/// Holds the served model once it has been loaded.
///
/// Filled at most once, before the HTTP layer starts; read without locking
/// by every request afterwards. An empty slot means the model is
/// unavailable for the life of the process.
#[derive(Default)]
pub struct ModelSlot {
    model: OnceLock<Arc<dyn Model>>,
}

impl ModelSlot {
    /// Create an empty slot
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a slot that already holds `model`
    pub fn with_model(model: Arc<dyn Model>) -> Self {
        let slot = Self::new();
        slot.set(model);
        slot
    }

    /// Load the model through `loader` and store it.
    ///
    /// Returns `false` and leaves the slot empty when the file is missing or
    /// every strategy fails. Returns `true` without reloading when the slot
    /// is already filled.
    pub fn load(&self, loader: &ModelLoader) -> bool {
        if self.is_loaded() {
            return true;
        }

        let path = loader.path();
        if !path.exists() {
            warn!("Model file not found at {}", path.display());
            return false;
        }

        match loader.load() {
            Ok(model) => {
                info!("Model type: {}", model.type_name());
                self.set(Arc::new(model))
            }
            Err(e) => {
                error!("Error loading model: {}", e);
                false
            }
        }
    }

    /// Store an already-built model. Returns `false` if the slot was filled.
    pub fn set(&self, model: Arc<dyn Model>) -> bool {
        self.model.set(model).is_ok()
    }

    /// The loaded model, if any
    pub fn get(&self) -> Option<&Arc<dyn Model>> {
        self.model.get()
    }

    pub fn is_loaded(&self) -> bool {
        self.model.get().is_some()
    }
}

impl std::fmt::Debug for ModelSlot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModelSlot")
            .field("model", &self.get().map(|m| m.type_name()))
            .finish()
    }
}
