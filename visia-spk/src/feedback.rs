//! Spatial beep and haptic feedback mapping

use crate::error::RenderError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::info;
use visia_core::{AlertDirective, RiskLevel};

/// Haptic pattern accompanying an alert
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VibrationPattern {
    /// Two strong pulses in quick succession (critical alerts)
    HeavyDouble,
    /// Single medium impact
    Medium,
    /// Single light impact
    Light,
}

/// Concrete render parameters for one alert's spatial beep and vibration.
///
/// Higher risk maps to a higher, shorter, louder tone so the tone alone
/// carries urgency before the utterance starts.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeedbackPlan {
    /// Beep frequency in Hz
    pub frequency_hz: f32,
    /// Beep gain, 0.0 to 1.0
    pub gain: f32,
    /// Beep duration in milliseconds
    pub duration_ms: u64,
    /// Stereo pan, -1.0 (left) to 1.0 (right)
    pub pan: f32,
    pub vibration: VibrationPattern,
}

impl FeedbackPlan {
    pub fn for_directive(directive: &AlertDirective) -> Self {
        match directive.risk {
            RiskLevel::High => Self {
                frequency_hz: 880.0,
                gain: 0.3,
                duration_ms: 150,
                pan: directive.pan,
                vibration: VibrationPattern::HeavyDouble,
            },
            RiskLevel::Medium => Self {
                frequency_hz: 440.0,
                gain: 0.15,
                duration_ms: 300,
                pan: directive.pan,
                vibration: VibrationPattern::Medium,
            },
            RiskLevel::Low => Self {
                frequency_hz: 220.0,
                gain: 0.1,
                duration_ms: 300,
                pan: directive.pan,
                vibration: VibrationPattern::Light,
            },
        }
    }
}

/// Spatial-audio/haptic collaborator
#[async_trait]
pub trait FeedbackRenderer: Send + Sync {
    async fn render(&self, plan: FeedbackPlan) -> Result<(), RenderError>;
}

/// Fallback renderer that logs the plan it would have played
#[derive(Debug, Default)]
pub struct LogFeedbackRenderer;

impl LogFeedbackRenderer {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl FeedbackRenderer for LogFeedbackRenderer {
    async fn render(&self, plan: FeedbackPlan) -> Result<(), RenderError> {
        info!(
            frequency_hz = plan.frequency_hz,
            pan = plan.pan,
            vibration = ?plan.vibration,
            "Spatial feedback"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn directive(risk: RiskLevel, pan: f32) -> AlertDirective {
        AlertDirective {
            text: "carro à frente".to_string(),
            priority: risk == RiskLevel::High,
            pan,
            risk,
            class_label: "car".to_string(),
        }
    }

    #[test]
    fn test_high_risk_plan() {
        let plan = FeedbackPlan::for_directive(&directive(RiskLevel::High, 0.5));
        assert_eq!(plan.frequency_hz, 880.0);
        assert_eq!(plan.gain, 0.3);
        assert_eq!(plan.duration_ms, 150);
        assert_eq!(plan.pan, 0.5);
        assert_eq!(plan.vibration, VibrationPattern::HeavyDouble);
    }

    #[test]
    fn test_medium_and_low_plans() {
        let medium = FeedbackPlan::for_directive(&directive(RiskLevel::Medium, -1.0));
        assert_eq!(medium.frequency_hz, 440.0);
        assert_eq!(medium.vibration, VibrationPattern::Medium);
        assert_eq!(medium.pan, -1.0);

        let low = FeedbackPlan::for_directive(&directive(RiskLevel::Low, 0.0));
        assert_eq!(low.frequency_hz, 220.0);
        assert_eq!(low.duration_ms, 300);
        assert_eq!(low.vibration, VibrationPattern::Light);
    }

    #[tokio::test]
    async fn test_log_renderer_accepts_plan() {
        let renderer = LogFeedbackRenderer::new();
        let plan = FeedbackPlan::for_directive(&directive(RiskLevel::Low, 0.0));
        assert!(renderer.render(plan).await.is_ok());
    }
}
