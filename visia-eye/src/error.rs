//! Error types for visia-eye

use thiserror::Error;
use visia_core::Error as CoreError;

#[derive(Error, Debug)]
pub enum PerceptionError {
    #[error("Detector error: {0}")]
    Detector(String),

    #[error("Runtime error: {0}")]
    Runtime(String),

    #[error("Voice command error: {0}")]
    Voice(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<PerceptionError> for CoreError {
    fn from(err: PerceptionError) -> Self {
        match err {
            PerceptionError::Detector(msg) => CoreError::Detector(msg),
            other => CoreError::Runtime(format!("{}", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_perception_error_display() {
        let err = PerceptionError::Detector("timeout".to_string());
        assert!(err.to_string().contains("Detector error"));
        assert!(err.to_string().contains("timeout"));
    }

    #[test]
    fn test_detector_error_maps_to_core_detector() {
        let err: CoreError = PerceptionError::Detector("no model".to_string()).into();
        match err {
            CoreError::Detector(msg) => assert!(msg.contains("no model")),
            _ => panic!("Expected Detector error"),
        }
    }
}
