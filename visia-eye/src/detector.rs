//! External detector boundary

use crate::error::PerceptionError;
use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;
use visia_core::{FrameGeometry, RawDetection};

/// Object detector collaborator.
///
/// A black box from the engine's perspective: it acquires whatever frame
/// it acquires and returns raw detections in that frame's pixel space.
/// Failures (timeout, model not loaded) are reported as errors and make
/// the runtime skip the cycle; they are never fatal.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait Detector: Send + Sync {
    /// Run one detection pass on the current frame
    async fn detect(&self) -> Result<Vec<RawDetection>, PerceptionError>;

    /// Dimensions of the frames this detector reports boxes in
    fn frame_geometry(&self) -> FrameGeometry;
}
