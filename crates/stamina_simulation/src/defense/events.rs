//! Defense events: damage in, notices/broadcasts/wear out.

use std::fmt;

use bevy::prelude::*;

use super::mitigation::GuardMode;

/// Event: a character is about to take damage (host → ECS).
///
/// `source_position` is where the hit came from; `None` for damage without a
/// direction (falls, hunger), which can never be guarded.
#[derive(Event, Debug, Clone, PartialEq)]
pub struct IncomingDamage {
    pub target: Entity,
    pub attacker: Option<Entity>,
    pub source_position: Option<Vec3>,
    pub amount: f32,
}

/// Event: damage after mitigation, ready for normal damage processing.
#[derive(Event, Debug, Clone, PartialEq)]
pub struct DamageResolved {
    pub target: Entity,
    pub attacker: Option<Entity>,
    pub original: f32,
    pub amount: f32,
}

/// Player-facing messages.
#[derive(Debug, Clone, PartialEq)]
pub enum Notice {
    /// Guard attempted while out of stamina
    FatigueBreakthrough,
    DamageBlocked {
        blocked: f32,
        total: f32,
        item: String,
        mode: GuardMode,
    },
}

impl Notice {
    /// Localization key for hosts that translate messages themselves.
    pub fn lang_key(&self) -> &'static str {
        match self {
            Notice::FatigueBreakthrough => "stamina:fatiguebreakthrough",
            Notice::DamageBlocked { .. } => "stamina:damageblocked",
        }
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Notice::FatigueBreakthrough => {
                write!(f, "Too exhausted to guard, the blow breaks through")
            }
            Notice::DamageBlocked {
                blocked,
                total,
                item,
                mode,
            } => write!(
                f,
                "{:.1} of {:.1} damage blocked by {} ({} use)",
                blocked, total, item, mode
            ),
        }
    }
}

/// Event: message for one player (damage log channel).
#[derive(Event, Debug, Clone, PartialEq)]
pub struct PlayerNotice {
    pub entity: Entity,
    pub notice: Notice,
}

/// Animation name broadcast after a successful block.
pub const BLOCK_ANIMATION: &str = "item block";

/// Event: tell nearby observers to play the block animation (server only).
#[derive(Event, Debug, Clone, PartialEq)]
pub struct BlockAnimationBroadcast {
    pub entity: Entity,
    pub animation: &'static str,
}

/// Event: durability taken from the blocking item (server only).
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ItemWear {
    pub entity: Entity,
    pub amount: u32,
    pub broken: bool,
}

/// Event: a player finished joining (host → ECS).
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayerJoined {
    pub entity: Entity,
}
