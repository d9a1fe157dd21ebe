use a11y_core_types::A11yError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReportError {
    #[error(
        "unexpected results object: no violations field found. Did you change the reporter in the engine configuration?"
    )]
    MalformedResultsObject,
    #[error("results object could not be decoded: {0}")]
    Decode(String),
}

impl From<ReportError> for A11yError {
    fn from(value: ReportError) -> Self {
        A11yError::new(value.to_string())
    }
}
