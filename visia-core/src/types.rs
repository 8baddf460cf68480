//! Detection data model shared across the workspace

use serde::{Deserialize, Serialize};

/// Axis-aligned bounding box in source-frame pixel coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl BoundingBox {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Horizontal center in pixel coordinates
    pub fn center_x(&self) -> f32 {
        self.x + self.width / 2.0
    }

    /// Bottom edge in pixel coordinates
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Box area as a fraction of the frame area.
    ///
    /// Degenerate inputs (zero or non-finite frame dimensions, negative or
    /// non-finite box dimensions) yield 0.0 rather than NaN or a panic.
    pub fn normalized_area(&self, frame: FrameGeometry) -> f32 {
        if frame.width <= 0.0
            || frame.height <= 0.0
            || !frame.width.is_finite()
            || !frame.height.is_finite()
        {
            return 0.0;
        }
        if self.width <= 0.0
            || self.height <= 0.0
            || !self.width.is_finite()
            || !self.height.is_finite()
        {
            return 0.0;
        }
        let area = (self.width / frame.width) * (self.height / frame.height);
        if area.is_finite() {
            area
        } else {
            0.0
        }
    }
}

/// Source frame dimensions, in the same units as bounding boxes
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FrameGeometry {
    pub width: f32,
    pub height: f32,
}

impl FrameGeometry {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// One raw detection as produced by the external detector
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawDetection {
    pub class_label: String,
    pub score: f32,
    pub bbox: BoundingBox,
}

impl RawDetection {
    pub fn new(class_label: impl Into<String>, score: f32, bbox: BoundingBox) -> Self {
        Self {
            class_label: class_label.into(),
            score,
            bbox,
        }
    }
}

/// Confidence-derived classification of a detection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DetectionStatus {
    /// Score at or above the certainty threshold
    Certain,
    /// Score in the uncertain band
    Uncertain,
    /// Score below the uncertain band
    Unknown,
    /// Recognized but too small/far to act on
    GetCloser,
}

/// Coarse danger tier of an object class
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    /// Numeric rank used for priority ordering (higher is more dangerous)
    pub fn rank(&self) -> u8 {
        match self {
            RiskLevel::High => 3,
            RiskLevel::Medium => 2,
            RiskLevel::Low => 1,
        }
    }
}

/// A raw detection enriched with status, risk, and safety semantics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrichedDetection {
    pub class_label: String,
    pub score: f32,
    pub bbox: BoundingBox,
    pub status: DetectionStatus,
    pub risk: RiskLevel,
    pub is_safety_critical: bool,
    pub is_floor_barrier: bool,
}

/// The single alert decision a cycle may produce, handed to renderers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlertDirective {
    /// Utterance text for the speech renderer
    pub text: String,
    /// Interrupt/priority flag (safety-critical alerts)
    pub priority: bool,
    /// Stereo pan position, -1.0 (left) to 1.0 (right)
    pub pan: f32,
    /// Risk tier, consumed by the spatial-audio/haptic renderer
    pub risk: RiskLevel,
    /// Class that triggered the alert
    pub class_label: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bbox_center_and_bottom() {
        let bbox = BoundingBox::new(300.0, 100.0, 40.0, 80.0);
        assert_eq!(bbox.center_x(), 320.0);
        assert_eq!(bbox.bottom(), 180.0);
    }

    #[test]
    fn test_normalized_area() {
        let frame = FrameGeometry::new(640.0, 480.0);
        let bbox = BoundingBox::new(0.0, 0.0, 320.0, 240.0);
        let area = bbox.normalized_area(frame);
        assert!((area - 0.25).abs() < 1e-6);
    }

    #[test]
    fn test_normalized_area_zero_frame() {
        let frame = FrameGeometry::new(0.0, 0.0);
        let bbox = BoundingBox::new(10.0, 10.0, 50.0, 50.0);
        assert_eq!(bbox.normalized_area(frame), 0.0);
    }

    #[test]
    fn test_normalized_area_degenerate_bbox() {
        let frame = FrameGeometry::new(640.0, 480.0);
        assert_eq!(
            BoundingBox::new(10.0, 10.0, 0.0, 50.0).normalized_area(frame),
            0.0
        );
        assert_eq!(
            BoundingBox::new(10.0, 10.0, -5.0, 50.0).normalized_area(frame),
            0.0
        );
        assert_eq!(
            BoundingBox::new(10.0, 10.0, f32::NAN, 50.0).normalized_area(frame),
            0.0
        );
    }

    #[test]
    fn test_risk_rank_ordering() {
        assert!(RiskLevel::High.rank() > RiskLevel::Medium.rank());
        assert!(RiskLevel::Medium.rank() > RiskLevel::Low.rank());
    }
}
