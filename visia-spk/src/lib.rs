//! visia-spk: rendering boundary for speech and spatial feedback
//!
//! The engine decides *what* and *when*; renderers decide *how*. This
//! crate defines the renderer traits the cycle runner dispatches alert
//! directives to, the directive-to-feedback mapping (tone, gain,
//! vibration per risk tier), and tracing-backed renderers used by the CLI
//! and tests. Actual TTS and audio synthesis are external collaborators.

pub mod error;
pub mod feedback;
pub mod renderer;

pub use error::RenderError;
pub use feedback::{FeedbackPlan, FeedbackRenderer, LogFeedbackRenderer, VibrationPattern};
pub use renderer::{LogSpeechRenderer, SpeechRenderer};
