pub mod encoding;
pub mod error;
pub mod form;
pub mod models;
pub mod types;

pub use encoding::CategoricalEncoding;
pub use error::{Error, Result};
pub use form::{Control, FieldSpec, FormCollector, Section};
pub use models::PredictiveModel;
pub use types::{Feature, FeatureRecord, InputFrame, FEATURE_COUNT};
