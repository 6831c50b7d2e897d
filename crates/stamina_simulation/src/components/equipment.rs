//! Held item and its defense profile.
//!
//! # Architecture
//!
//! **HeldItem**: whatever is in the character's active hand:
//! - `defense`: static item data, present only on items that can guard
//! - `durability`: runtime wear, `None` for unbreakable items
//! - `block_sounds`: light/heavy sound asset paths
//!
//! **DefenseProfile**: read-only for the duration of one mitigation:
//! - flat damage absorption
//! - horizontal/vertical guard arc (full width, halved into a cone)
//! - protection chance per guard mode (active/passive)

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::defense::GuardArc;

/// Absorption roll chance for each guard mode, each in `[0, 1]`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize, Reflect)]
#[serde(default)]
pub struct ProtectionChance {
    pub active: f32,
    pub passive: f32,
}

/// Defense data attached to an item type.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Reflect)]
#[serde(rename_all = "camelCase", default)]
pub struct DefenseProfile {
    pub damage_absorption: f32,
    #[serde(rename = "horzProtectionRangeInDegrees")]
    pub horizontal_arc_degrees: f32,
    #[serde(rename = "vertProtectionRangeInDegrees")]
    pub vertical_arc_degrees: f32,
    pub protection_chance: ProtectionChance,
}

impl Default for DefenseProfile {
    fn default() -> Self {
        Self {
            damage_absorption: 2.0,
            horizontal_arc_degrees: 120.0,
            vertical_arc_degrees: 120.0,
            protection_chance: ProtectionChance::default(),
        }
    }
}

impl DefenseProfile {
    /// Half-widths of both arcs in radians.
    pub fn guard_arc(&self) -> GuardArc {
        GuardArc::from_full_degrees(self.horizontal_arc_degrees, self.vertical_arc_degrees)
    }

    /// Absorption never goes negative even if the item data says so.
    pub fn absorption(&self) -> f32 {
        if self.damage_absorption.is_finite() {
            self.damage_absorption.max(0.0)
        } else {
            0.0
        }
    }
}

/// Sound assets played when a guard takes a hit.
#[derive(Debug, Clone, PartialEq, Reflect)]
pub struct BlockSounds {
    pub light: String,
    pub heavy: String,
}

impl Default for BlockSounds {
    fn default() -> Self {
        Self {
            light: "held/shieldblock-wood-light".to_string(),
            heavy: "held/shieldblock-wood-heavy".to_string(),
        }
    }
}

impl BlockSounds {
    /// Asset path for the light or heavy variant: `sounds/<path>.ogg`.
    pub fn asset_path(&self, heavy: bool) -> String {
        let path = if heavy { &self.heavy } else { &self.light };
        let path = path.strip_prefix("sounds/").unwrap_or(path);
        let path = path.strip_suffix(".ogg").unwrap_or(path);
        format!("sounds/{}.ogg", path)
    }
}

/// Item in the character's active hand.
#[derive(Component, Debug, Clone, PartialEq, Reflect)]
#[reflect(Component)]
pub struct HeldItem {
    pub name: String,
    pub defense: Option<DefenseProfile>,
    pub durability: Option<u32>,
    pub block_sounds: BlockSounds,
}

impl HeldItem {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            defense: None,
            durability: None,
            block_sounds: BlockSounds::default(),
        }
    }

    pub fn with_defense(mut self, defense: DefenseProfile) -> Self {
        self.defense = Some(defense);
        self
    }

    pub fn with_durability(mut self, durability: u32) -> Self {
        self.durability = Some(durability);
        self
    }

    pub fn can_guard(&self) -> bool {
        self.defense.is_some()
    }

    /// Applies wear; returns the durability actually removed.
    pub fn apply_wear(&mut self, amount: u32) -> u32 {
        match self.durability.as_mut() {
            Some(durability) => {
                let removed = amount.min(*durability);
                *durability -= removed;
                removed
            }
            None => 0,
        }
    }

    pub fn is_broken(&self) -> bool {
        self.durability == Some(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_parses_item_attributes() {
        let profile: DefenseProfile = serde_json::from_str(
            r#"{
                "damageAbsorption": 3.5,
                "horzProtectionRangeInDegrees": 90,
                "protectionChance": { "active": 0.9 }
            }"#,
        )
        .unwrap();

        assert_eq!(profile.damage_absorption, 3.5);
        assert_eq!(profile.horizontal_arc_degrees, 90.0);
        assert_eq!(profile.vertical_arc_degrees, 120.0);
        assert_eq!(profile.protection_chance.active, 0.9);
        assert_eq!(profile.protection_chance.passive, 0.0);
    }

    #[test]
    fn test_block_sound_paths() {
        let sounds = BlockSounds {
            light: "sounds/held/parry.ogg".to_string(),
            heavy: "held/shieldblock-metal-heavy".to_string(),
        };
        assert_eq!(sounds.asset_path(false), "sounds/held/parry.ogg");
        assert_eq!(sounds.asset_path(true), "sounds/held/shieldblock-metal-heavy.ogg");
    }

    #[test]
    fn test_wear_saturates() {
        let mut shield = HeldItem::new("shield").with_durability(3);
        assert_eq!(shield.apply_wear(2), 2);
        assert_eq!(shield.apply_wear(5), 1);
        assert!(shield.is_broken());

        let mut stick = HeldItem::new("stick");
        assert_eq!(stick.apply_wear(4), 0);
        assert!(!stick.is_broken());
    }
}
