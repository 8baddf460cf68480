//! Alert arbitration
//!
//! Decides at most one alert directive per cycle. Candidates are ranked
//! by safety-criticality then risk; the winner must clear both the global
//! and the per-class cooldown, and non-critical winners are deferred
//! while the speech renderer reports itself busy. Announcement history is
//! committed only when a directive is actually returned.

use crate::config::EngineConfig;
use crate::describe::describe;
use crate::history::AnnouncementHistory;
use crate::mode::OperatingMode;
use std::cmp::Reverse;
use tracing::debug;
use visia_core::{AlertDirective, DetectionStatus, EnrichedDetection, FrameGeometry};

pub struct Arbitrator {
    config: EngineConfig,
    history: AnnouncementHistory,
}

impl Arbitrator {
    pub fn new(config: EngineConfig) -> Self {
        Self {
            config,
            history: AnnouncementHistory::new(),
        }
    }

    /// Decide this cycle's alert, if any.
    ///
    /// `render_busy` is the speech renderer's live busy flag; while it is
    /// set, only safety-critical candidates may interrupt. Returning
    /// `None` with objects present is an intentional silence, not an
    /// error.
    pub fn arbitrate(
        &mut self,
        enriched: &[EnrichedDetection],
        mode: OperatingMode,
        frame: FrameGeometry,
        now_ms: u64,
        render_busy: bool,
    ) -> Option<AlertDirective> {
        // Uncertain/unknown detections are drawn and logged, never spoken
        let mut candidates: Vec<&EnrichedDetection> = enriched
            .iter()
            .filter(|d| {
                matches!(
                    d.status,
                    DetectionStatus::Certain | DetectionStatus::GetCloser
                )
            })
            .collect();

        if candidates.is_empty() {
            return None;
        }

        // Stable sort keeps detector-reported order for ties: first-seen
        // wins between equal-priority candidates
        candidates.sort_by_key(|d| Reverse((d.is_safety_critical, d.risk.rank())));
        let best = candidates[0];

        if render_busy && !best.is_safety_critical {
            debug!(class = %best.class_label, "Renderer busy, deferring non-critical alert");
            return None;
        }

        let global_ok = self
            .history
            .global_elapsed(now_ms, self.config.global_cooldown_ms);
        let class_ok =
            self.history
                .class_elapsed(&best.class_label, now_ms, self.config.class_cooldown_ms);

        if !global_ok || !class_ok {
            debug!(
                class = %best.class_label,
                global_ok,
                class_ok,
                "Alert suppressed by cooldown"
            );
            return None;
        }

        let directive = AlertDirective {
            text: describe(best, mode, frame),
            priority: best.is_safety_critical,
            pan: pan_for(best.bbox.center_x(), frame),
            risk: best.risk,
            class_label: best.class_label.clone(),
        };

        self.history.record(&best.class_label, now_ms);
        debug!(class = %best.class_label, priority = directive.priority, "Alert emitted");
        Some(directive)
    }

    pub fn history(&self) -> &AnnouncementHistory {
        &self.history
    }
}

/// Stereo pan from bbox center: -1 at the left edge, 1 at the right
fn pan_for(center_x: f32, frame: FrameGeometry) -> f32 {
    if frame.width <= 0.0 {
        return 0.0;
    }
    (center_x / (frame.width / 2.0) - 1.0).clamp(-1.0, 1.0)
}
