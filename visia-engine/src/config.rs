//! Configuration for the decision core

use serde::{Deserialize, Serialize};

/// Tunable thresholds and cooldowns for classification and arbitration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Minimum elapsed time between any two announcements (ms)
    pub global_cooldown_ms: u64,
    /// Minimum elapsed time before re-announcing the same class (ms)
    pub class_cooldown_ms: u64,
    /// Score at or above which a detection is certain
    pub certain_threshold: f32,
    /// Score at or above which a detection is uncertain (below: unknown)
    pub uncertain_threshold: f32,
    /// Street mode retains off-list detections below this score as
    /// potential obstacles
    pub stray_retention_threshold: f32,
    /// Normalized bbox area below which a non-unknown detection is
    /// downgraded to get-closer
    pub proximity_area: f32,
    /// Number of recent cycle decisions retained for diagnostics
    pub decision_log_capacity: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            global_cooldown_ms: 3_500,
            class_cooldown_ms: 10_000,
            certain_threshold: 0.6,
            uncertain_threshold: 0.4,
            stray_retention_threshold: 0.3,
            proximity_area: 0.05,
            decision_log_capacity: 10,
        }
    }
}

impl EngineConfig {
    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.global_cooldown_ms == 0 {
            return Err("Global cooldown must be non-zero".to_string());
        }

        if self.class_cooldown_ms == 0 {
            return Err("Per-class cooldown must be non-zero".to_string());
        }

        if self.class_cooldown_ms < self.global_cooldown_ms {
            return Err("Per-class cooldown must not be shorter than the global cooldown".to_string());
        }

        if !(0.0..=1.0).contains(&self.certain_threshold)
            || !(0.0..=1.0).contains(&self.uncertain_threshold)
            || !(0.0..=1.0).contains(&self.stray_retention_threshold)
        {
            return Err("Score thresholds must be within [0, 1]".to_string());
        }

        if self.uncertain_threshold >= self.certain_threshold {
            return Err("Uncertain threshold must be below the certain threshold".to_string());
        }

        if self.stray_retention_threshold > self.uncertain_threshold {
            return Err(
                "Stray retention threshold must not exceed the uncertain threshold".to_string(),
            );
        }

        if !(0.0..=1.0).contains(&self.proximity_area) {
            return Err("Proximity area must be within [0, 1]".to_string());
        }

        if self.decision_log_capacity == 0 {
            return Err("Decision log capacity must be non-zero".to_string());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = EngineConfig::default();
        assert_eq!(config.global_cooldown_ms, 3_500);
        assert_eq!(config.class_cooldown_ms, 10_000);
        assert_eq!(config.certain_threshold, 0.6);
        assert_eq!(config.uncertain_threshold, 0.4);
        assert_eq!(config.stray_retention_threshold, 0.3);
        assert_eq!(config.proximity_area, 0.05);
        assert_eq!(config.decision_log_capacity, 10);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation_zero_cooldowns() {
        let mut config = EngineConfig::default();
        config.global_cooldown_ms = 0;
        assert!(config.validate().is_err());

        let mut config = EngineConfig::default();
        config.class_cooldown_ms = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_validation_class_cooldown_shorter_than_global() {
        let mut config = EngineConfig::default();
        config.class_cooldown_ms = 1_000;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_validation_inverted_thresholds() {
        let mut config = EngineConfig::default();
        config.uncertain_threshold = 0.7;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_validation_threshold_out_of_range() {
        let mut config = EngineConfig::default();
        config.certain_threshold = 1.5;
        assert!(config.validate().is_err());

        let mut config = EngineConfig::default();
        config.proximity_area = -0.1;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_validation_stray_above_uncertain() {
        let mut config = EngineConfig::default();
        config.stray_retention_threshold = 0.5;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_validation_zero_log_capacity() {
        let mut config = EngineConfig::default();
        config.decision_log_capacity = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_validation_edge_cases() {
        let mut config = EngineConfig::default();
        config.uncertain_threshold = 0.0;
        config.stray_retention_threshold = 0.0;
        assert!(config.validate().is_ok());

        config.certain_threshold = 1.0;
        config.uncertain_threshold = 0.4;
        config.stray_retention_threshold = 0.3;
        assert!(config.validate().is_ok());
    }
}
