use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Schema error: {0}")]
    Schema(String),

    #[error("Invalid input for {field}: {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("Unknown option '{label}' for {field}")]
    UnknownLabel { field: String, label: String },

    #[error("Model error: {0}")]
    Model(String),

    #[error("Inference error: {0}")]
    Inference(String),

    #[error("Non-numeric prediction: {0}")]
    NonNumeric(String),
}

impl Error {
    pub fn invalid_input(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// True for errors caused by what the user typed, as opposed to the model.
    pub fn is_input_error(&self) -> bool {
        matches!(self, Error::InvalidInput { .. } | Error::UnknownLabel { .. })
    }
}

pub type Result<T> = std::result::Result<T, Error>;
