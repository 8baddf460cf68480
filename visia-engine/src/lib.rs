//! visia-engine: perception classification and feedback arbitration
//!
//! The decision core of Visia. Each detection cycle the host runtime feeds
//! raw detections through the [`classifier`], asks the [`arbitrator`] for at
//! most one alert directive, and asks the [`sampler`] how long to wait before
//! the next cycle. Operating modes and their allow-lists/thresholds live in
//! [`mode`].
//!
//! Everything here is synchronous and deterministic: time enters as an
//! explicit `now_ms` parameter, and the only mutable state (announcement
//! history, sampler counter) is owned by exactly one component.

pub mod arbitrator;
pub mod classifier;
pub mod config;
pub mod decision_log;
pub mod describe;
pub mod history;
pub mod mode;
pub mod sampler;

pub use arbitrator::Arbitrator;
pub use classifier::classify;
pub use config::EngineConfig;
pub use decision_log::{DecisionEntry, DecisionLog};
pub use history::AnnouncementHistory;
pub use mode::{parse_mode_command, ModeController, ModeProfile, ModeTrigger, OperatingMode};
pub use sampler::AdaptiveSampler;
