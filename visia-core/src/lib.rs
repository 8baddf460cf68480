//! visia-core: shared data model for the Visia perception engine
//!
//! Defines the detection types exchanged between the external detector,
//! the classification/arbitration engine, and the rendering boundary,
//! plus the workspace-wide error type.

pub mod error;
pub mod types;

pub use error::{Error, Result};
pub use types::{
    AlertDirective, BoundingBox, DetectionStatus, EnrichedDetection, FrameGeometry, RawDetection,
    RiskLevel,
};
