//! Error types for visia-spk

use thiserror::Error;
use visia_core::Error as CoreError;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Speech error: {0}")]
    Speech(String),

    #[error("Feedback error: {0}")]
    Feedback(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<RenderError> for CoreError {
    fn from(err: RenderError) -> Self {
        CoreError::Renderer(format!("{}", err))
    }
}
