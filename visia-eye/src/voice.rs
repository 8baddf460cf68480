//! Voice-command capture with a bounded listening window

use crate::error::PerceptionError;
use parking_lot::RwLock;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};
use visia_engine::{parse_mode_command, OperatingMode};

/// Listening window after which no command counts as "no command received"
pub const VOICE_COMMAND_TIMEOUT: Duration = Duration::from_secs(5);

/// Await a transcript from the external recognizer and map it to a target
/// mode.
///
/// The `listening` indicator is set for the duration of the wait and
/// reset on every exit path (result, recognizer error, or timeout).
/// Recognition and NLU live outside the engine; only the keyword mapping
/// is applied here.
pub async fn listen_for_mode_command<F>(
    transcript: F,
    listening: Arc<RwLock<bool>>,
) -> Option<OperatingMode>
where
    F: Future<Output = Result<String, PerceptionError>>,
{
    *listening.write() = true;

    let result = tokio::time::timeout(VOICE_COMMAND_TIMEOUT, transcript).await;

    *listening.write() = false;

    match result {
        Ok(Ok(text)) => {
            debug!("Voice transcript: {}", text);
            parse_mode_command(&text)
        }
        Ok(Err(e)) => {
            warn!("Voice recognition failed: {}", e);
            None
        }
        Err(_) => {
            debug!("Voice command listening timed out");
            None
        }
    }
}
