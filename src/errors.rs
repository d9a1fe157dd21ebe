//! Errors surfaced by a check.

use a11y_core_types::A11yError;
use a11y_dom_sandbox::MountError;
use thiserror::Error;

use crate::engine::EngineError;

#[derive(Debug, Error)]
pub enum CheckError {
    /// Input rejected before the document was touched.
    #[error(transparent)]
    Mount(#[from] MountError),
    /// The engine reported an error; the document was restored first.
    #[error("rule engine failed: {0}")]
    EngineFailure(#[source] EngineError),
    #[error("rule engine dropped its callback without reporting")]
    EngineDisconnected,
    #[error("rule engine rejected configuration: {0}")]
    Configure(#[source] EngineError),
}

impl CheckError {
    /// True for errors raised before any document mutation.
    pub fn is_input_error(&self) -> bool {
        matches!(self, CheckError::Mount(_))
    }
}

impl From<CheckError> for A11yError {
    fn from(value: CheckError) -> Self {
        A11yError::new(value.to_string())
    }
}

pub type HarnessResult<T> = Result<T, CheckError>;
