use a11y_core_types::A11yError;
use thiserror::Error;

use crate::framework::{Framework, RenderError};

#[derive(Debug, Error)]
pub enum MountError {
    #[error("input should be a markup string, a DOM element or a framework element (got {found})")]
    InvalidInputKind { found: String },
    #[error("markup (\"{markup}\") has no elements")]
    EmptyMarkup { markup: String },
    #[error("no renderer configured for {0} elements")]
    RendererUnavailable(Framework),
    #[error(transparent)]
    Render(#[from] RenderError),
    #[error("document is leased by another check")]
    DocumentBusy,
}

impl MountError {
    pub fn invalid_kind(found: impl Into<String>) -> Self {
        Self::InvalidInputKind {
            found: found.into(),
        }
    }
}

impl From<MountError> for A11yError {
    fn from(value: MountError) -> Self {
        A11yError::new(value.to_string())
    }
}
