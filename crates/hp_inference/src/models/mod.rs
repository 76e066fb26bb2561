use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;
use tracing::{info, warn};

use hp_core::{Feature, PredictiveModel, Result};

use crate::Config;

pub mod forest;
pub mod linear;

pub use forest::{RandomForestRegressor, RegressionTree};
pub use linear::LinearRegressor;

/// Serialized model file, tagged by `kind`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ModelArtifact {
    RandomForest(RandomForestRegressor),
    Linear(LinearRegressor),
}

impl ModelArtifact {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Validate the artifact and turn it into a shareable model.
    pub fn into_model(self) -> Result<Arc<dyn PredictiveModel>> {
        let model: Arc<dyn PredictiveModel> = match self {
            ModelArtifact::RandomForest(forest) => {
                forest.validate()?;
                Arc::new(forest)
            }
            ModelArtifact::Linear(linear) => {
                linear.validate()?;
                Arc::new(linear)
            }
        };
        if model.feature_names() != Feature::columns().as_slice() {
            warn!(
                model = model.name(),
                "model columns differ from the form schema; estimates will fail"
            );
        }
        Ok(model)
    }
}

/// Read and validate a model artifact from disk.
pub async fn load_model(path: impl AsRef<Path>) -> Result<Arc<dyn PredictiveModel>> {
    let path = path.as_ref();
    let json = tokio::fs::read_to_string(path).await?;
    let model = ModelArtifact::from_json(&json)?.into_model()?;
    info!(
        "🧠 Loaded {} model from {} ({} features)",
        model.name(),
        path.display(),
        model.feature_names().len()
    );
    Ok(model)
}

pub async fn create_model(config: Option<Config>) -> Result<Arc<dyn PredictiveModel>> {
    let config = config.unwrap_or_default();
    load_model(&config.model_path).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use hp_core::{Error, InputFrame};

    fn linear_json() -> String {
        let names = serde_json::to_string(&Feature::columns()).unwrap();
        let coefficients = serde_json::to_string(&vec![1.0; Feature::ALL.len()]).unwrap();
        format!(
            r#"{{"kind":"linear","feature_names":{},"intercept":1000.0,"coefficients":{}}}"#,
            names, coefficients
        )
    }

    #[test]
    fn test_parse_tagged_artifacts() {
        let artifact = ModelArtifact::from_json(&linear_json()).unwrap();
        assert!(matches!(artifact, ModelArtifact::Linear(_)));

        let forest = r#"{
            "kind": "random_forest",
            "feature_names": ["a"],
            "trees": [{
                "children_left": [-1],
                "children_right": [-1],
                "feature": [-2],
                "threshold": [-2.0],
                "value": [42.0]
            }]
        }"#;
        let model = ModelArtifact::from_json(forest).unwrap().into_model().unwrap();
        assert_eq!(model.name(), "RandomForest");
        let frame = InputFrame {
            columns: vec!["a".to_string()],
            rows: vec![vec![0.0]],
        };
        assert_eq!(model.predict(&frame).unwrap(), vec![42.0]);
    }

    #[test]
    fn test_unknown_kind_is_rejected() {
        let err = ModelArtifact::from_json(r#"{"kind":"svm","feature_names":[]}"#).unwrap_err();
        assert!(matches!(err, Error::Serialization(_)));
    }

    #[test]
    fn test_invalid_artifact_fails_validation() {
        let json = r#"{"kind":"linear","feature_names":["a","b"],"intercept":0.0,"coefficients":[1.0]}"#;
        let err = ModelArtifact::from_json(json).unwrap().into_model().unwrap_err();
        assert!(matches!(err, Error::Model(_)));
    }

    #[tokio::test]
    async fn test_create_model_from_file() {
        let path = std::env::temp_dir().join(format!("hp_model_{}.json", std::process::id()));
        tokio::fs::write(&path, linear_json()).await.unwrap();

        let model = create_model(Some(Config::new(&path))).await.unwrap();
        assert_eq!(model.name(), "Linear");
        assert_eq!(model.feature_names(), Feature::columns().as_slice());

        tokio::fs::remove_file(&path).await.unwrap();
    }

    #[tokio::test]
    async fn test_missing_file_is_io_error() {
        let err = load_model("/nonexistent/hp_model.json").await.unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }
}
