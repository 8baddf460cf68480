//! Adaptive detection-cycle sampling
//!
//! Four-tier state machine deciding how long the host loop waits before
//! requesting the next detection cycle. Safety-critical scenes are
//! re-sampled continuously; quiet scenes back off to conserve compute and
//! battery.

use std::time::Duration;
use tracing::debug;
use visia_core::EnrichedDetection;

/// Fastest re-sampling while a safety-critical detection is present
pub const CRITICAL_INTERVAL: Duration = Duration::ZERO;
/// Normal economy interval while any object is present
pub const ACTIVE_INTERVAL: Duration = Duration::from_millis(300);
/// Quiet-scene interval for short empty streaks
pub const QUIET_INTERVAL: Duration = Duration::from_millis(500);
/// Deep-idle interval once the empty streak passes the threshold
pub const IDLE_INTERVAL: Duration = Duration::from_millis(1000);
/// Empty-frame streak beyond which the loop drops to the idle interval
pub const IDLE_STREAK_THRESHOLD: u32 = 10;

/// Pure sampler transition: previous empty-frame streak plus this cycle's
/// enriched detections yield the new streak and the next interval
pub fn next_interval(empty_frames: u32, detections: &[EnrichedDetection]) -> (u32, Duration) {
    if detections.iter().any(|d| d.is_safety_critical) {
        (0, CRITICAL_INTERVAL)
    } else if !detections.is_empty() {
        (0, ACTIVE_INTERVAL)
    } else {
        let streak = empty_frames.saturating_add(1);
        let interval = if streak > IDLE_STREAK_THRESHOLD {
            IDLE_INTERVAL
        } else {
            QUIET_INTERVAL
        };
        (streak, interval)
    }
}

/// Stateful wrapper stepped exactly once per cycle by the host loop
#[derive(Debug, Default)]
pub struct AdaptiveSampler {
    empty_frames: u32,
    interval: Duration,
}

impl AdaptiveSampler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Consume this cycle's classification outcome and return the delay
    /// before the next cycle
    pub fn step(&mut self, detections: &[EnrichedDetection]) -> Duration {
        let (streak, interval) = next_interval(self.empty_frames, detections);
        self.empty_frames = streak;
        self.interval = interval;
        debug!(
            empty_frames = self.empty_frames,
            interval_ms = interval.as_millis() as u64,
            "Sampler step"
        );
        interval
    }

    /// Interval decided by the most recent step
    pub fn current_interval(&self) -> Duration {
        self.interval
    }

    pub fn empty_frames(&self) -> u32 {
        self.empty_frames
    }
}
