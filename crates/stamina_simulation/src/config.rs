//! Configuration snapshot for the stamina layer.
//!
//! Loading and hot-reloading the file is the host's job; this module only
//! parses a JSON document into an immutable [`StaminaConfig`] resource. Every
//! field has a default, so a partial (or empty) document is valid.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::logger::SimulationLogger;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("malformed config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("maxStamina must be positive, got {0}")]
    NonPositiveMaxStamina(f32),

    #[error("{field} must be a finite, non-negative number, got {value}")]
    InvalidValue { field: &'static str, value: f32 },
}

/// Stat multipliers for one stamina band (1.0 = unpenalized).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BandMultipliers {
    pub walk_speed: f32,
    pub melee_attack_damage: f32,
    pub melee_attack_speed: f32,
    pub ranged_attack_damage: f32,
    pub ranged_attack_speed: f32,
    pub ranged_attack_accuracy: f32,
}

impl BandMultipliers {
    pub const HALF_STAMINA: Self = Self {
        walk_speed: 0.875,
        melee_attack_damage: 0.9,
        melee_attack_speed: 0.9,
        ranged_attack_damage: 0.9,
        ranged_attack_speed: 0.9,
        ranged_attack_accuracy: 0.9,
    };

    pub const EXHAUSTED: Self = Self {
        walk_speed: 0.75,
        melee_attack_damage: 0.7,
        melee_attack_speed: 0.7,
        ranged_attack_damage: 0.7,
        ranged_attack_speed: 0.7,
        ranged_attack_accuracy: 0.7,
    };

    /// Penalizes walk speed only; every other stat stays at 1.0.
    pub fn walk_speed_only(walk_speed: f32) -> Self {
        Self {
            walk_speed,
            melee_attack_damage: 1.0,
            melee_attack_speed: 1.0,
            ranged_attack_damage: 1.0,
            ranged_attack_speed: 1.0,
            ranged_attack_accuracy: 1.0,
        }
    }

    fn fields(&self) -> [(&'static str, f32); 6] {
        [
            ("walkSpeed", self.walk_speed),
            ("meleeAttackDamage", self.melee_attack_damage),
            ("meleeAttackSpeed", self.melee_attack_speed),
            ("rangedAttackDamage", self.ranged_attack_damage),
            ("rangedAttackSpeed", self.ranged_attack_speed),
            ("rangedAttackAccuracy", self.ranged_attack_accuracy),
        ]
    }
}

impl Default for BandMultipliers {
    fn default() -> Self {
        Self::walk_speed_only(1.0)
    }
}

/// Immutable configuration snapshot.
///
/// Costs are stamina per game second; `saturation_cost_per_stamina` is the
/// satiety paid per point of regenerated stamina.
#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StaminaConfig {
    pub enable_stamina: bool,
    pub max_stamina: f32,
    pub stamina_regen_speed: f32,

    pub saturation_cost_per_stamina: f32,
    pub defense_stamina_cost: f32,
    pub swim_stamina_cost: f32,
    pub sprint_stamina_cost: f32,

    pub half_stamina: BandMultipliers,
    pub exhausted: BandMultipliers,

    pub debug_mode: bool,
}

impl Default for StaminaConfig {
    fn default() -> Self {
        Self {
            enable_stamina: true,
            max_stamina: 100.0,
            stamina_regen_speed: 1.0,
            saturation_cost_per_stamina: 0.5,
            defense_stamina_cost: 0.02,
            swim_stamina_cost: 0.05,
            sprint_stamina_cost: 0.05,
            half_stamina: BandMultipliers::HALF_STAMINA,
            exhausted: BandMultipliers::EXHAUSTED,
            debug_mode: false,
        }
    }
}

impl StaminaConfig {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Parses `json`, falling back to defaults (with a logged error) when the
    /// document is missing or invalid.
    pub fn load_or_default(json: Option<&str>, logger: &SimulationLogger) -> Self {
        let Some(json) = json else {
            logger.warning("Missing stamina config, using defaults");
            return Self::default();
        };

        match Self::from_json_str(json) {
            Ok(config) => config,
            Err(err) => {
                logger.error(&format!("Could not load stamina config: {}", err));
                Self::default()
            }
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.max_stamina.is_finite() && self.max_stamina > 0.0) {
            return Err(ConfigError::NonPositiveMaxStamina(self.max_stamina));
        }

        let rates = [
            ("staminaRegenSpeed", self.stamina_regen_speed),
            ("saturationCostPerStamina", self.saturation_cost_per_stamina),
            ("defenseStaminaCost", self.defense_stamina_cost),
            ("swimStaminaCost", self.swim_stamina_cost),
            ("sprintStaminaCost", self.sprint_stamina_cost),
        ];
        let multipliers = self
            .half_stamina
            .fields()
            .into_iter()
            .chain(self.exhausted.fields());

        for (field, value) in rates.into_iter().chain(multipliers) {
            if !(value.is_finite() && value >= 0.0) {
                return Err(ConfigError::InvalidValue { field, value });
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logger::BufferedLogger;

    #[test]
    fn test_empty_document_is_default() {
        let config = StaminaConfig::from_json_str("{}").unwrap();
        assert_eq!(config, StaminaConfig::default());
    }

    #[test]
    fn test_partial_document_keeps_other_defaults() {
        let config = StaminaConfig::from_json_str(
            r#"{ "maxStamina": 150, "exhausted": { "walkSpeed": 0.5 }, "debugMode": true }"#,
        )
        .unwrap();

        assert_eq!(config.max_stamina, 150.0);
        assert!(config.debug_mode);
        assert_eq!(config.exhausted.walk_speed, 0.5);
        // Band objects default field-by-field to 1.0
        assert_eq!(config.exhausted.melee_attack_damage, 1.0);
        assert_eq!(config.sprint_stamina_cost, 0.05);
    }

    #[test]
    fn test_rejects_non_positive_max() {
        let err = StaminaConfig::from_json_str(r#"{ "maxStamina": 0 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::NonPositiveMaxStamina(_)));
    }

    #[test]
    fn test_rejects_negative_cost() {
        let err = StaminaConfig::from_json_str(r#"{ "swimStaminaCost": -1 }"#).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidValue { field: "swimStaminaCost", .. }
        ));
    }

    #[test]
    fn test_load_or_default_falls_back() {
        let buffer = BufferedLogger::new();
        let logger = SimulationLogger::new(Box::new(buffer.clone()));

        let config = StaminaConfig::load_or_default(Some("not json"), &logger);
        assert_eq!(config, StaminaConfig::default());
        assert!(buffer.contains("Could not load stamina config"));

        let config = StaminaConfig::load_or_default(None, &logger);
        assert_eq!(config, StaminaConfig::default());
        assert!(buffer.contains("Missing stamina config"));
    }
}
