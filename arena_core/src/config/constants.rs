//! Battle tuning constants

use serde::{Deserialize, Serialize};

/// Tunable battle constants
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArenaConstants {
    /// Stamina restored to both units once per round
    #[serde(default = "default_stamina_per_round")]
    pub stamina_per_round: f64,
    /// Chance (0-100) that an autonomous unit uses its skill instead of attacking
    #[serde(default = "default_skill_trigger_percent")]
    pub skill_trigger_percent: f64,
}

impl Default for ArenaConstants {
    fn default() -> Self {
        ArenaConstants {
            stamina_per_round: default_stamina_per_round(),
            skill_trigger_percent: default_skill_trigger_percent(),
        }
    }
}

fn default_stamina_per_round() -> f64 {
    1.0
}

fn default_skill_trigger_percent() -> f64 {
    10.0
}

impl ArenaConstants {
    /// Reject values that would break the stamina economy
    pub fn validate(&self) -> Result<(), super::ConfigError> {
        if !self.stamina_per_round.is_finite() || self.stamina_per_round < 0.0 {
            return Err(super::ConfigError::ValidationError(format!(
                "stamina_per_round must be a non-negative number, got {}",
                self.stamina_per_round
            )));
        }
        if !(0.0..=100.0).contains(&self.skill_trigger_percent) {
            return Err(super::ConfigError::ValidationError(format!(
                "skill_trigger_percent must be within 0..=100, got {}",
                self.skill_trigger_percent
            )));
        }
        Ok(())
    }

    /// Constants shipped with the crate
    pub fn builtin() -> Self {
        let toml = include_str!("../../config/constants.toml");
        super::parse_toml(toml).unwrap_or_default()
    }
}
