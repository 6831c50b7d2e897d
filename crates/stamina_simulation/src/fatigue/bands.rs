//! Stamina bands → stat modifiers.
//!
//! | band      | stamina fraction | modifiers                        |
//! |-----------|------------------|----------------------------------|
//! | Full      | ≥ 0.50           | none (all removed)               |
//! | Low       | [0.10, 0.50)     | `half_stamina` multipliers − 1   |
//! | Exhausted | < 0.10           | `exhausted` multipliers − 1      |
//!
//! The exhausted check runs first. A band switch writes the complete
//! replacement set in one pass, so a stat never holds one band's value while
//! another stat holds the other band's.

use std::collections::HashMap;

use bevy::prelude::*;
use strum::{EnumIter, IntoEnumIterator};

use crate::config::{BandMultipliers, StaminaConfig};

pub const LOW_BAND_THRESHOLD: f32 = 0.5;
pub const EXHAUSTED_BAND_THRESHOLD: f32 = 0.1;

/// Namespace of every modifier id written by the stamina layer.
pub const MODIFIER_NAMESPACE: &str = "stamina";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Reflect)]
pub enum StaminaBand {
    #[default]
    Full,
    Low,
    Exhausted,
}

impl StaminaBand {
    pub fn from_fraction(fraction: f32) -> Self {
        if fraction < EXHAUSTED_BAND_THRESHOLD {
            StaminaBand::Exhausted
        } else if fraction < LOW_BAND_THRESHOLD {
            StaminaBand::Low
        } else {
            StaminaBand::Full
        }
    }

    fn multipliers(self, config: &StaminaConfig) -> Option<&BandMultipliers> {
        match self {
            StaminaBand::Full => None,
            StaminaBand::Low => Some(&config.half_stamina),
            StaminaBand::Exhausted => Some(&config.exhausted),
        }
    }
}

/// Stats penalized by low stamina.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, Reflect)]
pub enum StatKind {
    WalkSpeed,
    MeleeDamage,
    MeleeAttackSpeed,
    RangedDamage,
    RangedAttackSpeed,
    RangedAccuracy,
}

impl StatKind {
    /// Stat name as the host's stat system knows it.
    pub fn stat_name(self) -> &'static str {
        match self {
            StatKind::WalkSpeed => "walkspeed",
            StatKind::MeleeDamage => "meleeWeaponsDamage",
            StatKind::MeleeAttackSpeed => "meleeWeaponsAttackSpeed",
            StatKind::RangedDamage => "rangedWeaponsDamage",
            StatKind::RangedAttackSpeed => "rangedWeaponsAttackSpeed",
            StatKind::RangedAccuracy => "rangedWeaponsAccuracy",
        }
    }

    /// Modifier id, e.g. `stamina:walkspeed`.
    pub fn modifier_id(self) -> String {
        format!("{}:{}", MODIFIER_NAMESPACE, self.stat_name())
    }

    fn factor(self, multipliers: &BandMultipliers) -> f32 {
        match self {
            StatKind::WalkSpeed => multipliers.walk_speed,
            StatKind::MeleeDamage => multipliers.melee_attack_damage,
            StatKind::MeleeAttackSpeed => multipliers.melee_attack_speed,
            StatKind::RangedDamage => multipliers.ranged_attack_damage,
            StatKind::RangedAttackSpeed => multipliers.ranged_attack_speed,
            StatKind::RangedAccuracy => multipliers.ranged_attack_accuracy,
        }
    }
}

/// Host stat system. Both calls are idempotent, last write wins per
/// `(stat, modifier_id)`.
pub trait StatModifierSink {
    fn set_modifier(&mut self, stat: &str, modifier_id: &str, value: f32);
    fn remove_modifier(&mut self, stat: &str, modifier_id: &str);
}

/// Additive stat modifiers of one character, keyed by `(stat, modifier_id)`.
///
/// Also remembers the band that produced the stamina-sourced entries.
#[derive(Component, Debug, Clone, Default, PartialEq)]
pub struct StatModifiers {
    values: HashMap<(String, String), f32>,
    band: StaminaBand,
}

impl StatModifiers {
    pub fn get(&self, stat: &str, modifier_id: &str) -> Option<f32> {
        self.values
            .get(&(stat.to_string(), modifier_id.to_string()))
            .copied()
    }

    /// Stamina-sourced modifier for `stat`, if any.
    pub fn stamina_modifier(&self, stat: StatKind) -> Option<f32> {
        self.get(stat.stat_name(), &stat.modifier_id())
    }

    pub fn band(&self) -> StaminaBand {
        self.band
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl StatModifierSink for StatModifiers {
    fn set_modifier(&mut self, stat: &str, modifier_id: &str, value: f32) {
        self.values
            .insert((stat.to_string(), modifier_id.to_string()), value);
    }

    fn remove_modifier(&mut self, stat: &str, modifier_id: &str) {
        self.values
            .remove(&(stat.to_string(), modifier_id.to_string()));
    }
}

/// Complete modifier set of one band: `Some(factor - 1)` to set, `None` to
/// remove. A factor of exactly 1.0 removes the stat's modifier.
pub fn band_modifier_set(band: StaminaBand, config: &StaminaConfig) -> Vec<(StatKind, Option<f32>)> {
    let multipliers = band.multipliers(config);

    StatKind::iter()
        .map(|stat| {
            let value = multipliers
                .map(|m| stat.factor(m))
                .filter(|factor| *factor != 1.0)
                .map(|factor| factor - 1.0);
            (stat, value)
        })
        .collect()
}

/// Writes the band's full set into `sink`.
pub fn apply_band(sink: &mut dyn StatModifierSink, band: StaminaBand, config: &StaminaConfig) {
    for (stat, value) in band_modifier_set(band, config) {
        let modifier_id = stat.modifier_id();
        match value {
            Some(value) => sink.set_modifier(stat.stat_name(), &modifier_id, value),
            None => sink.remove_modifier(stat.stat_name(), &modifier_id),
        }
    }
}

/// Maps the ledger fraction to a band and writes it. Returns the previous band
/// when it changed.
pub fn update_stat_modifiers(
    modifiers: &mut StatModifiers,
    fraction: f32,
    config: &StaminaConfig,
) -> Option<StaminaBand> {
    let band = StaminaBand::from_fraction(fraction);
    apply_band(modifiers, band, config);

    let previous = std::mem::replace(&mut modifiers.band, band);
    (previous != band).then_some(previous)
}
