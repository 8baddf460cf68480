//! Cooperative detection cycle runner
//!
//! One tokio task executes detect -> classify -> arbitrate -> sample as a
//! unit, then sleeps the sampler's interval. Commands (mode changes,
//! pause/resume) are drained between cycles so the engine never observes
//! a mode change mid-cycle.

use crate::detector::Detector;
use crate::error::PerceptionError;
use chrono::Utc;
use parking_lot::RwLock;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};
use visia_engine::{
    classify, AdaptiveSampler, Arbitrator, DecisionEntry, DecisionLog, EngineConfig,
    ModeController, ModeTrigger, OperatingMode,
};
use visia_spk::{FeedbackPlan, FeedbackRenderer, SpeechRenderer};

/// Sleep applied while paused, and the floor applied after a detector
/// failure so a failing detector cannot spin the loop
const IDLE_POLL: Duration = Duration::from_millis(100);

const COMMAND_BUFFER: usize = 16;

/// Control messages applied between cycles
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunnerCommand {
    SetMode(OperatingMode),
    AdvanceMode,
    Pause,
    Resume,
}

pub struct CycleRunner {
    detector: Arc<dyn Detector>,
    speech: Arc<dyn SpeechRenderer>,
    feedback: Arc<dyn FeedbackRenderer>,
    config: EngineConfig,
    modes: Arc<RwLock<ModeController>>,
    decision_log: Arc<RwLock<DecisionLog>>,
    is_running: Arc<RwLock<bool>>,
    is_paused: Arc<RwLock<bool>>,
    command_sender: Arc<RwLock<Option<mpsc::Sender<RunnerCommand>>>>,
    loop_handle: Arc<RwLock<Option<tokio::task::JoinHandle<()>>>>,
}

impl CycleRunner {
    pub fn new(
        detector: Arc<dyn Detector>,
        speech: Arc<dyn SpeechRenderer>,
        feedback: Arc<dyn FeedbackRenderer>,
        config: EngineConfig,
    ) -> Result<Self, PerceptionError> {
        config
            .validate()
            .map_err(PerceptionError::Runtime)?;

        let decision_log = DecisionLog::new(config.decision_log_capacity);

        Ok(Self {
            detector,
            speech,
            feedback,
            config,
            modes: Arc::new(RwLock::new(ModeController::default())),
            decision_log: Arc::new(RwLock::new(decision_log)),
            is_running: Arc::new(RwLock::new(false)),
            is_paused: Arc::new(RwLock::new(false)),
            command_sender: Arc::new(RwLock::new(None)),
            loop_handle: Arc::new(RwLock::new(None)),
        })
    }

    /// Start the cycle loop. Fails if already running.
    pub fn start(&self) -> Result<(), PerceptionError> {
        {
            let mut is_running = self.is_running.write();
            if *is_running {
                return Err(PerceptionError::Runtime(
                    "Cycle runner already running".to_string(),
                ));
            }
            *is_running = true;
        }

        info!("Starting perception cycle runner");

        let (sender, mut receiver) = mpsc::channel(COMMAND_BUFFER);
        *self.command_sender.write() = Some(sender);

        let detector = self.detector.clone();
        let speech = self.speech.clone();
        let feedback = self.feedback.clone();
        let config = self.config.clone();
        let modes = self.modes.clone();
        let decision_log = self.decision_log.clone();
        let is_running = self.is_running.clone();
        let is_paused = self.is_paused.clone();

        let handle = tokio::spawn(async move {
            let mut arbitrator = Arbitrator::new(config.clone());
            let mut sampler = AdaptiveSampler::new();

            loop {
                if !*is_running.read() {
                    break;
                }

                // Apply queued commands between cycles
                while let Ok(command) = receiver.try_recv() {
                    apply_command(command, &modes, &is_paused, &speech);
                }

                if *is_paused.read() {
                    tokio::time::sleep(IDLE_POLL).await;
                    continue;
                }

                let raw = match detector.detect().await {
                    Ok(raw) => raw,
                    Err(e) => {
                        // Skip the cycle; the previous interval stands
                        warn!("Detector error, skipping cycle: {}", e);
                        let delay = sampler.current_interval().max(IDLE_POLL);
                        tokio::time::sleep(delay).await;
                        continue;
                    }
                };

                let frame = detector.frame_geometry();
                let now_ms = Utc::now().timestamp_millis().max(0) as u64;
                let (mode, profile) = {
                    let controller = modes.read();
                    (controller.current(), controller.profile().clone())
                };

                let enriched = classify(&raw, &profile, &config, frame);
                debug!(
                    raw = raw.len(),
                    enriched = enriched.len(),
                    ?mode,
                    "Cycle classified"
                );

                let directive =
                    arbitrator.arbitrate(&enriched, mode, frame, now_ms, speech.is_busy());

                if let Some(directive) = &directive {
                    // Fire and forget: rendering never blocks the cycle
                    let speech = speech.clone();
                    let feedback = feedback.clone();
                    let directive = directive.clone();
                    tokio::spawn(async move {
                        let plan = FeedbackPlan::for_directive(&directive);
                        if let Err(e) = feedback.render(plan).await {
                            warn!("Feedback render failed: {}", e);
                        }
                        if let Err(e) = speech.speak(&directive.text, directive.priority).await {
                            warn!("Speech render failed: {}", e);
                        }
                    });
                }

                let interval = sampler.step(&enriched);

                decision_log.write().record(DecisionEntry {
                    timestamp_ms: now_ms,
                    detections: enriched.len(),
                    announced: directive.map(|d| d.class_label),
                    next_interval_ms: interval.as_millis() as u64,
                });

                tokio::time::sleep(interval).await;
            }

            info!("Perception cycle runner stopped");
        });

        *self.loop_handle.write() = Some(handle);
        Ok(())
    }

    /// Stop the cycle loop and release the in-flight task
    pub async fn stop(&self) {
        {
            let mut is_running = self.is_running.write();
            if !*is_running {
                return;
            }
            *is_running = false;
        }

        let handle_opt = self.loop_handle.write().take();
        if let Some(handle) = handle_opt {
            handle.abort();
            let _ = tokio::time::timeout(Duration::from_secs(1), handle).await;
        }

        *self.command_sender.write() = None;
        info!("Cycle runner stopped");
    }

    /// Queue a command for the next inter-cycle boundary
    pub async fn send(&self, command: RunnerCommand) -> Result<(), PerceptionError> {
        let sender = self
            .command_sender
            .read()
            .clone()
            .ok_or_else(|| PerceptionError::Runtime("Cycle runner not started".to_string()))?;
        sender
            .send(command)
            .await
            .map_err(|_| PerceptionError::Runtime("Cycle runner loop has exited".to_string()))
    }

    pub fn is_running(&self) -> bool {
        *self.is_running.read()
    }

    pub fn is_paused(&self) -> bool {
        *self.is_paused.read()
    }

    pub fn current_mode(&self) -> OperatingMode {
        self.modes.read().current()
    }

    /// Snapshot of recent cycle decisions, oldest first
    pub fn recent_decisions(&self) -> Vec<DecisionEntry> {
        self.decision_log.read().recent()
    }
}

fn apply_command(
    command: RunnerCommand,
    modes: &Arc<RwLock<ModeController>>,
    is_paused: &Arc<RwLock<bool>>,
    speech: &Arc<dyn SpeechRenderer>,
) {
    match command {
        RunnerCommand::SetMode(target) => {
            let previous = modes.read().current();
            let next = modes.write().transition(ModeTrigger::Select(target));
            if next != previous {
                announce_mode(next, speech);
            }
        }
        RunnerCommand::AdvanceMode => {
            let next = modes.write().transition(ModeTrigger::Advance);
            announce_mode(next, speech);
        }
        RunnerCommand::Pause => {
            info!("Cycle runner paused");
            *is_paused.write() = true;
        }
        RunnerCommand::Resume => {
            info!("Cycle runner resumed");
            *is_paused.write() = false;
        }
    }
}

fn announce_mode(mode: OperatingMode, speech: &Arc<dyn SpeechRenderer>) {
    let speech = speech.clone();
    tokio::spawn(async move {
        if let Err(e) = speech.speak(mode.activation_message(), true).await {
            warn!("Mode announcement failed: {}", e);
        }
    });
}
