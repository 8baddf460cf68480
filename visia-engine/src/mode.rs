//! Operating modes and mode transitions
//!
//! Each mode owns the class allow-list consumed by the classifier's
//! relevance filter plus the floor/obstacle thresholds and safety rules
//! that apply while it is active. The controller is a pure state holder;
//! transitions happen only between detection cycles.

use serde::{Deserialize, Serialize};
use tracing::info;

/// Closed set of operating profiles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OperatingMode {
    /// Outdoor navigation: vehicles, signals, path obstacles
    Street,
    /// Indoor navigation: furniture and household objects
    Indoor,
    /// Text reading: detection keeps running with indoor semantics while
    /// the user lines up text for the external OCR collaborator
    Reading,
}

impl OperatingMode {
    /// Spoken confirmation for entering this mode
    pub fn activation_message(&self) -> &'static str {
        match self {
            OperatingMode::Street => "Modo Rua ativado",
            OperatingMode::Indoor => "Modo Interno ativado",
            OperatingMode::Reading => "Modo Leitura ativado. Aponte para o texto.",
        }
    }
}

const STREET_CLASSES: &[&str] = &[
    "car",
    "bus",
    "truck",
    "motorcycle",
    "bicycle",
    "person",
    "traffic light",
    "stop sign",
    "dog",
    "cat",
];

const INDOOR_CLASSES: &[&str] = &[
    "chair",
    "table",
    "couch",
    "bed",
    "potted plant",
    "tv",
    "laptop",
    "mouse",
    "keyboard",
    "cell phone",
    "microwave",
    "oven",
    "toaster",
    "sink",
    "refrigerator",
    "book",
    "clock",
    "vase",
    "scissors",
    "teddy bear",
    "hair drier",
    "toothbrush",
    "bottle",
    "cup",
    "fork",
    "knife",
    "spoon",
    "bowl",
    "banana",
    "apple",
    "sandwich",
    "orange",
    "broccoli",
    "carrot",
    "hot dog",
    "pizza",
    "donut",
    "cake",
];

/// Per-mode classification parameters
///
/// The floor band and central band differ between observed deployments, so
/// they are plain data here rather than hard-coded in the classifier.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModeProfile {
    pub mode: OperatingMode,
    /// Class labels relevant to this mode
    pub allowed_classes: Vec<String>,
    /// Classes retained even when not on the allow-list (indoor keeps
    /// "person")
    pub always_retained: Vec<String>,
    /// Keep off-list detections below the stray-retention score as
    /// potential unidentified obstacles
    pub retain_low_confidence_strays: bool,
    /// Fraction of frame height above which a bbox bottom counts as "on
    /// the floor"
    pub floor_band: f32,
    /// Horizontal band (fractions of frame width) within which a floor
    /// object counts as centered in the user's path
    pub central_band: (f32, f32),
    /// Whether the vehicle/traffic-sign safety-critical rules apply
    pub vehicle_safety_rules: bool,
    /// Whether the floor/obstacle test applies at all
    pub floor_rules: bool,
}

impl ModeProfile {
    pub fn street() -> Self {
        Self {
            mode: OperatingMode::Street,
            allowed_classes: STREET_CLASSES.iter().map(|s| s.to_string()).collect(),
            always_retained: Vec::new(),
            retain_low_confidence_strays: true,
            floor_band: 0.70,
            central_band: (0.25, 0.75),
            vehicle_safety_rules: true,
            floor_rules: true,
        }
    }

    pub fn indoor() -> Self {
        Self {
            mode: OperatingMode::Indoor,
            allowed_classes: INDOOR_CLASSES.iter().map(|s| s.to_string()).collect(),
            always_retained: vec!["person".to_string()],
            retain_low_confidence_strays: false,
            floor_band: 0.75,
            central_band: (0.25, 0.75),
            vehicle_safety_rules: false,
            floor_rules: false,
        }
    }

    pub fn reading() -> Self {
        Self {
            mode: OperatingMode::Reading,
            ..Self::indoor()
        }
    }

    pub fn for_mode(mode: OperatingMode) -> Self {
        match mode {
            OperatingMode::Street => Self::street(),
            OperatingMode::Indoor => Self::indoor(),
            OperatingMode::Reading => Self::reading(),
        }
    }

    pub fn allows(&self, class_label: &str) -> bool {
        self.allowed_classes.iter().any(|c| c == class_label)
            || self.always_retained.iter().any(|c| c == class_label)
    }
}

/// Requested mode change
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModeTrigger {
    /// Cycle to the next mode (street -> indoor -> reading -> street)
    Advance,
    /// Jump directly to a target mode (voice command)
    Select(OperatingMode),
}

/// Holds the active mode and its profile
pub struct ModeController {
    current: OperatingMode,
    profiles: [ModeProfile; 3],
}

impl ModeController {
    pub fn new(initial: OperatingMode) -> Self {
        Self {
            current: initial,
            profiles: [
                ModeProfile::street(),
                ModeProfile::indoor(),
                ModeProfile::reading(),
            ],
        }
    }

    pub fn current(&self) -> OperatingMode {
        self.current
    }

    pub fn profile(&self) -> &ModeProfile {
        match self.current {
            OperatingMode::Street => &self.profiles[0],
            OperatingMode::Indoor => &self.profiles[1],
            OperatingMode::Reading => &self.profiles[2],
        }
    }

    /// Replace the stored profile for a mode (deployment-specific floor
    /// bands)
    pub fn set_profile(&mut self, profile: ModeProfile) {
        let slot = match profile.mode {
            OperatingMode::Street => 0,
            OperatingMode::Indoor => 1,
            OperatingMode::Reading => 2,
        };
        self.profiles[slot] = profile;
    }

    pub fn transition(&mut self, trigger: ModeTrigger) -> OperatingMode {
        let next = match trigger {
            ModeTrigger::Advance => match self.current {
                OperatingMode::Street => OperatingMode::Indoor,
                OperatingMode::Indoor => OperatingMode::Reading,
                OperatingMode::Reading => OperatingMode::Street,
            },
            ModeTrigger::Select(target) => target,
        };
        if next != self.current {
            info!(from = ?self.current, to = ?next, "Mode transition");
        }
        self.current = next;
        next
    }
}

impl Default for ModeController {
    fn default() -> Self {
        Self::new(OperatingMode::Street)
    }
}

/// Map a free-form voice transcript to a target mode.
///
/// Transcription itself is an external collaborator; only the keyword
/// table lives here. Unrecognized phrases yield `None`.
pub fn parse_mode_command(transcript: &str) -> Option<OperatingMode> {
    let text = transcript.to_lowercase();

    if text.contains("rua") || text.contains("externo") || text.contains("fora") {
        Some(OperatingMode::Street)
    } else if text.contains("interno") || text.contains("casa") || text.contains("dentro") {
        Some(OperatingMode::Indoor)
    } else if text.contains("leitura") || text.contains("ler") || text.contains("texto") {
        Some(OperatingMode::Reading)
    } else {
        None
    }
}
