//! Speech renderer trait and the tracing-backed fallback

use crate::error::RenderError;
use async_trait::async_trait;
use parking_lot::RwLock;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

/// Text-to-speech collaborator.
///
/// The busy flag belongs to the renderer: set when an utterance starts,
/// cleared on completion or error. The arbitrator consults it through
/// [`SpeechRenderer::is_busy`] to defer non-critical alerts instead of
/// overlapping utterances; priority utterances may interrupt.
#[async_trait]
pub trait SpeechRenderer: Send + Sync {
    /// Render one utterance. Priority utterances cancel whatever is
    /// currently playing.
    async fn speak(&self, text: &str, priority: bool) -> Result<(), RenderError>;

    /// Whether an utterance is currently being rendered
    fn is_busy(&self) -> bool;
}

/// Fallback renderer that logs utterances and simulates playback time.
///
/// Keeps an accurate busy flag by estimating utterance duration from the
/// text length, so cooldown and deferral behavior can be exercised
/// without a real TTS engine.
pub struct LogSpeechRenderer {
    busy: Arc<RwLock<bool>>,
    ms_per_char: u64,
}

impl LogSpeechRenderer {
    pub fn new() -> Self {
        Self {
            busy: Arc::new(RwLock::new(false)),
            ms_per_char: 60,
        }
    }

    /// Renderer that completes instantly, for tests that only care about
    /// who was asked to speak
    pub fn instant() -> Self {
        Self {
            busy: Arc::new(RwLock::new(false)),
            ms_per_char: 0,
        }
    }

    fn estimated_duration(&self, text: &str) -> Duration {
        Duration::from_millis(self.ms_per_char.saturating_mul(text.chars().count() as u64))
    }
}

impl Default for LogSpeechRenderer {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SpeechRenderer for LogSpeechRenderer {
    async fn speak(&self, text: &str, priority: bool) -> Result<(), RenderError> {
        if *self.busy.read() && !priority {
            warn!("Utterance dropped, renderer busy: {}", text);
            return Err(RenderError::Speech("renderer busy".to_string()));
        }

        *self.busy.write() = true;
        info!(priority, "Speaking: {}", text);
        tokio::time::sleep(self.estimated_duration(text)).await;
        *self.busy.write() = false;
        Ok(())
    }

    fn is_busy(&self) -> bool {
        *self.busy.read()
    }
}
