//! visia-eye: perception runtime
//!
//! Owns the cooperative detection cycle: call the external detector, run
//! classification and arbitration, dispatch any directive to the
//! renderers, then wait the interval the adaptive sampler chose. One
//! cycle completes fully before the next begins; pausing and mode changes
//! are applied between cycles.

pub mod detector;
pub mod error;
pub mod runner;
pub mod voice;

pub use detector::Detector;
pub use error::PerceptionError;
pub use runner::{CycleRunner, RunnerCommand};
pub use voice::{listen_for_mode_command, VOICE_COMMAND_TIMEOUT};
