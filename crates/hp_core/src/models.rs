use std::fmt;

use crate::types::InputFrame;
use crate::Result;

/// A pre-trained regression model.
///
/// Implementations are loaded once and shared read-only between requests.
pub trait PredictiveModel: Send + Sync + fmt::Debug {
    /// Short name used in logs.
    fn name(&self) -> &str;

    /// Column names the model was trained on, in order.
    fn feature_names(&self) -> &[String];

    /// Predict one value per row of `frame`.
    fn predict(&self, frame: &InputFrame) -> Result<Vec<f64>>;
}
