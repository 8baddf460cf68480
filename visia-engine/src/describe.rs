//! Mode-aware alert phrasing
//!
//! Builds the spoken description for an enriched detection. Rules apply
//! in a fixed precedence: unknown-status phrasing, floor barrier, traffic
//! signal, centered street vehicle, then the generic translated-label
//! form with a get-closer suffix or an uncertainty hedge.

use crate::mode::OperatingMode;
use visia_core::{DetectionStatus, EnrichedDetection, FrameGeometry};

/// Horizontal zone of a detection relative to the frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Position {
    Left,
    Center,
    Right,
}

impl Position {
    pub fn phrase(&self) -> &'static str {
        match self {
            Position::Left => "à esquerda",
            Position::Center => "à frente",
            Position::Right => "à direita",
        }
    }
}

/// Left/right zone boundaries as fractions of frame width (the original
/// deployment used 250 px and 390 px on a 640-wide frame)
const LEFT_ZONE_FRACTION: f32 = 250.0 / 640.0;
const RIGHT_ZONE_FRACTION: f32 = 390.0 / 640.0;

const VEHICLE_CLASSES: &[&str] = &["car", "bus", "truck"];

/// Split the frame into left/center/right zones by bbox center
pub fn position_of(center_x: f32, frame: FrameGeometry) -> Position {
    if frame.width <= 0.0 {
        return Position::Center;
    }
    let fraction = center_x / frame.width;
    if fraction < LEFT_ZONE_FRACTION {
        Position::Left
    } else if fraction > RIGHT_ZONE_FRACTION {
        Position::Right
    } else {
        Position::Center
    }
}

/// Build the announcement text for a detection under the given mode
pub fn describe(detection: &EnrichedDetection, mode: OperatingMode, frame: FrameGeometry) -> String {
    if detection.status == DetectionStatus::Unknown {
        return if mode == OperatingMode::Street {
            "Objeto desconhecido no seu caminho".to_string()
        } else {
            "Não consegui identificar este objeto".to_string()
        };
    }

    let position = position_of(detection.bbox.center_x(), frame);

    if detection.is_floor_barrier {
        return format!("Atenção: obstáculo no chão {}.", position.phrase());
    }

    if detection.class_label == "traffic light" {
        return format!("Semáforo {}.", position.phrase());
    }

    if VEHICLE_CLASSES.contains(&detection.class_label.as_str())
        && position == Position::Center
        && mode == OperatingMode::Street
    {
        return "Veículo em movimento à frente.".to_string();
    }

    let mut text = format!(
        "{} {}",
        translate(&detection.class_label),
        position.phrase()
    );
    if detection.status == DetectionStatus::GetCloser {
        text.push_str(". Chegue mais perto.");
    }
    if detection.status == DetectionStatus::Uncertain {
        text = format!("Pode ser {}", text);
    }
    text
}

/// Translate a detector class label to its spoken form. Unknown labels
/// fall back to the raw label.
pub fn translate(label: &str) -> &str {
    match label {
        "person" => "pessoa",
        "bicycle" => "bicicleta",
        "car" => "carro",
        "motorcycle" => "moto",
        "airplane" => "avião",
        "bus" => "ônibus",
        "train" => "trem",
        "truck" => "caminhão",
        "boat" => "barco",
        "traffic light" => "semáforo",
        "fire hydrant" => "hidrante",
        "stop sign" => "placa de pare",
        "parking meter" => "parquímetro",
        "bench" => "banco",
        "bird" => "pássaro",
        "cat" => "gato",
        "dog" => "cachorro",
        "horse" => "cavalo",
        "sheep" => "ovelha",
        "cow" => "vaca",
        "elephant" => "elefante",
        "bear" => "urso",
        "zebra" => "zebra",
        "giraffe" => "girafa",
        "backpack" => "mochila",
        "umbrella" => "guarda-chuva",
        "handbag" => "bolsa",
        "tie" => "gravata",
        "suitcase" => "mala",
        "frisbee" => "frisbee",
        "skis" => "esquis",
        "snowboard" => "snowboard",
        "sports ball" => "bola",
        "kite" => "pipa",
        "baseball bat" => "taco de beisebol",
        "baseball glove" => "luva de beisebol",
        "skateboard" => "skate",
        "surfboard" => "prancha de surfe",
        "tennis racket" => "raquete de tênis",
        "bottle" => "garrafa",
        "wine glass" => "taça de vinho",
        "cup" => "copo",
        "fork" => "garfo",
        "knife" => "faca",
        "spoon" => "colher",
        "bowl" => "tigela",
        "banana" => "banana",
        "apple" => "maçã",
        "sandwich" => "sanduíche",
        "orange" => "laranja",
        "broccoli" => "brócolis",
        "carrot" => "cenoura",
        "hot dog" => "cachorro-quente",
        "pizza" => "pizza",
        "donut" => "rosquinha",
        "cake" => "bolo",
        "chair" => "cadeira",
        "couch" => "sofá",
        "potted plant" => "planta de vaso",
        "bed" => "cama",
        "dining table" => "mesa de jantar",
        "toilet" => "vaso sanitário",
        "tv" => "televisão",
        "laptop" => "notebook",
        "mouse" => "mouse",
        "remote" => "controle remoto",
        "keyboard" => "teclado",
        "cell phone" => "celular",
        "microwave" => "micro-ondas",
        "oven" => "forno",
        "toaster" => "torradeira",
        "sink" => "pia",
        "refrigerator" => "geladeira",
        "book" => "livro",
        "clock" => "relógio",
        "vase" => "vaso",
        "scissors" => "tesoura",
        "teddy bear" => "ursinho de pelúcia",
        "hair drier" => "secador de cabelo",
        "toothbrush" => "escova de dentes",
        "stairs" => "escada",
        "door" => "porta",
        other => other,
    }
}
