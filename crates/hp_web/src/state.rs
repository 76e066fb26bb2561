use std::sync::Arc;
use hp_core::{FormCollector, PredictiveModel};

/// Shared, read-only request context.
pub struct AppState {
    pub model: Arc<dyn PredictiveModel>,
    pub collector: FormCollector,
}

impl AppState {
    pub fn new(model: Arc<dyn PredictiveModel>) -> Self {
        Self {
            model,
            collector: FormCollector::new(),
        }
    }
}
