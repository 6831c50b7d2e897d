//! Fatigue events (ECS → host).

use bevy::prelude::*;

use super::bands::StaminaBand;
use super::pipeline::FatigueOutcome;
use super::source::FatigueSourceKind;

/// Animation and sound names of the stagger reaction.
pub const STAGGER_ANIMATION: &str = "hurt";
pub const STAGGER_SOUND: &str = "hurt";

/// Event: fatigue was committed to a ledger.
#[derive(Event, Debug, Clone, PartialEq)]
pub struct FatigueApplied {
    pub entity: Entity,
    pub kind: FatigueSourceKind,
    pub proposed: f32,
    pub committed: f32,
    pub stamina_after: f32,
    pub staggered: bool,
}

impl FatigueApplied {
    pub fn from_outcome(entity: Entity, outcome: &FatigueOutcome) -> Self {
        Self {
            entity,
            kind: outcome.kind,
            proposed: outcome.proposed,
            committed: outcome.committed,
            stamina_after: outcome.stamina_after,
            staggered: outcome.staggered,
        }
    }
}

/// Event: play an animation and/or a sound on a character.
///
/// Fire-and-forget; nothing in the stamina layer waits on playback.
#[derive(Event, Debug, Clone, PartialEq)]
pub struct EffectCue {
    pub entity: Entity,
    pub animation: Option<String>,
    pub sound: Option<String>,
}

impl EffectCue {
    pub fn stagger(entity: Entity) -> Self {
        Self {
            entity,
            animation: Some(STAGGER_ANIMATION.to_string()),
            sound: Some(STAGGER_SOUND.to_string()),
        }
    }

    pub fn sound(entity: Entity, sound: impl Into<String>) -> Self {
        Self {
            entity,
            animation: None,
            sound: Some(sound.into()),
        }
    }
}

/// Event: the character's stamina band changed this tick.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct StaminaBandChanged {
    pub entity: Entity,
    pub from: StaminaBand,
    pub to: StaminaBand,
}

/// Event: the exhausted flag flipped at the end of a tick.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExhaustionChanged {
    pub entity: Entity,
    pub exhausted: bool,
}
