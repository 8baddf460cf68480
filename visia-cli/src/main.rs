// Visia command line interface
// Runs the perception engine against a scripted synthetic detector so the
// full cycle (classify -> arbitrate -> render -> sample) can be observed
// without a camera or model.

use anyhow::Context;
use async_trait::async_trait;
use clap::{Parser, ValueEnum};
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;
use visia_core::{BoundingBox, FrameGeometry, RawDetection};
use visia_engine::{EngineConfig, OperatingMode};
use visia_eye::{CycleRunner, Detector, PerceptionError, RunnerCommand};
use visia_spk::{LogFeedbackRenderer, LogSpeechRenderer};

#[derive(Parser)]
#[command(name = "visia")]
#[command(about = "Visia perception engine demo runner", long_about = None)]
#[command(version)]
struct Cli {
    /// Operating mode to start in
    #[arg(long, value_enum, default_value = "street")]
    mode: Mode,

    /// How long to run the cycle loop, in seconds
    #[arg(long, default_value = "20")]
    duration: u64,

    /// Synthetic frame width in pixels
    #[arg(long, default_value = "640")]
    width: f32,

    /// Synthetic frame height in pixels
    #[arg(long, default_value = "480")]
    height: f32,

    /// Print the decision log as JSON lines instead of formatted text
    #[arg(long)]
    json: bool,

    #[arg(long, short)]
    verbose: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Mode {
    Street,
    Indoor,
    Reading,
}

impl From<Mode> for OperatingMode {
    fn from(mode: Mode) -> Self {
        match mode {
            Mode::Street => OperatingMode::Street,
            Mode::Indoor => OperatingMode::Indoor,
            Mode::Reading => OperatingMode::Reading,
        }
    }
}

/// Detector that replays a canned urban scenario frame by frame
struct ScriptedDetector {
    frame: FrameGeometry,
    cursor: Mutex<usize>,
    script: Vec<Vec<RawDetection>>,
}

impl ScriptedDetector {
    fn new(frame: FrameGeometry) -> Self {
        let w = frame.width;
        let h = frame.height;
        let script = vec![
            // A traffic light ahead, small and far
            vec![RawDetection::new(
                "traffic light",
                0.9,
                BoundingBox::new(w * 0.47, h * 0.2, w * 0.06, h * 0.17),
            )],
            // Quiet frames while the user walks
            vec![],
            vec![],
            // A car drifting in from the right, plus a pedestrian
            vec![
                RawDetection::new(
                    "car",
                    0.85,
                    BoundingBox::new(w * 0.6, h * 0.4, w * 0.35, h * 0.35),
                ),
                RawDetection::new(
                    "person",
                    0.7,
                    BoundingBox::new(w * 0.1, h * 0.3, w * 0.15, h * 0.45),
                ),
            ],
            // An unidentified low obstacle on the path
            vec![RawDetection::new(
                "suitcase",
                0.25,
                BoundingBox::new(w * 0.35, h * 0.6, w * 0.3, h * 0.35),
            )],
            vec![],
        ];
        Self {
            frame,
            cursor: Mutex::new(0),
            script,
        }
    }
}

#[async_trait]
impl Detector for ScriptedDetector {
    async fn detect(&self) -> Result<Vec<RawDetection>, PerceptionError> {
        let mut cursor = self.cursor.lock();
        let detections = self.script[*cursor % self.script.len()].clone();
        *cursor += 1;
        Ok(detections)
    }

    fn frame_geometry(&self) -> FrameGeometry {
        self.frame
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                tracing_subscriber::EnvFilter::new(if cli.verbose { "debug" } else { "info" })
            }),
        )
        .with_target(false)
        .init();

    let frame = FrameGeometry::new(cli.width, cli.height);
    let detector = Arc::new(ScriptedDetector::new(frame));
    let speech = Arc::new(LogSpeechRenderer::new());
    let feedback = Arc::new(LogFeedbackRenderer::new());

    let runner = CycleRunner::new(detector, speech, feedback, EngineConfig::default())?;

    runner.start().context("failed to start cycle runner")?;

    let target: OperatingMode = cli.mode.into();
    if target != runner.current_mode() {
        runner.send(RunnerCommand::SetMode(target)).await?;
    }

    info!("Running for {} seconds in {:?} mode", cli.duration, target);
    tokio::time::sleep(Duration::from_secs(cli.duration)).await;
    runner.stop().await;

    let decisions = runner.recent_decisions();
    if cli.json {
        for entry in &decisions {
            println!("{}", serde_json::to_string(entry)?);
        }
    } else {
        info!("Recent cycle decisions:");
        for entry in &decisions {
            info!(
                "  t={}ms detections={} announced={} next_interval={}ms",
                entry.timestamp_ms,
                entry.detections,
                entry.announced.as_deref().unwrap_or("-"),
                entry.next_interval_ms
            );
        }
    }

    Ok(())
}
