use std::path::PathBuf;

use a11y_core_types::A11yError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum OptionsError {
    #[error("failed to read options file {path}: {message}")]
    Io { path: PathBuf, message: String },
    #[error("invalid options: {0}")]
    Invalid(String),
    #[error("invalid value for {key}: {value}")]
    InvalidValue { key: String, value: String },
}

impl From<OptionsError> for A11yError {
    fn from(value: OptionsError) -> Self {
        A11yError::new(value.to_string())
    }
}
