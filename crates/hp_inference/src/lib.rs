use std::path::{Path, PathBuf};

pub mod adapter;
pub mod currency;
pub mod models;

pub const DEFAULT_MODEL_PATH: &str = "rf_model.json";

#[derive(Debug, Clone)]
pub struct Config {
    pub model_path: PathBuf,
}

impl Config {
    pub fn new(model_path: impl AsRef<Path>) -> Self {
        Self {
            model_path: model_path.as_ref().to_path_buf(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(DEFAULT_MODEL_PATH)
    }
}

pub mod prelude {
    pub use super::adapter::{estimate, Estimate, EstimateFailure, FailureKind};
    pub use super::currency::format_currency;
    pub use super::models::{create_model, load_model, ModelArtifact};
    pub use super::Config;
    pub use hp_core::{FeatureRecord, FormCollector, PredictiveModel, Result, Error};
}

pub use adapter::{estimate, Estimate, EstimateFailure, FailureKind};
pub use currency::format_currency;
pub use models::{create_model, load_model, ModelArtifact};
