use bpserve_models::{Model, ModelSlot};
use std::sync::Arc;

/// Shared application state, built once at startup and handed to the router
#[derive(Clone, Debug)]
pub struct AppState {
    model: Arc<ModelSlot>,
}

impl AppState {
    pub fn new(model: ModelSlot) -> Self {
        Self {
            model: Arc::new(model),
        }
    }

    /// State with no model, as after a failed load
    pub fn without_model() -> Self {
        Self::new(ModelSlot::new())
    }

    /// The served model, if loading succeeded
    pub fn model(&self) -> Option<&Arc<dyn Model>> {
        self.model.get()
    }

    pub fn model_loaded(&self) -> bool {
        self.model.is_loaded()
    }
}
