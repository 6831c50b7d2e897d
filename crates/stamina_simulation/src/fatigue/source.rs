//! Fatigue source: where a fatigue amount came from.

use bevy::prelude::*;
use strum::{Display, EnumIter};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, Reflect)]
pub enum FatigueSourceKind {
    Swim,
    Run,
    Defense,
    Other,
}

/// Built right before a fatigue application and dropped after it.
///
/// The entity fields are back-references only; adjusters must not use them
/// to mutate anything.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FatigueSource {
    pub kind: FatigueSourceKind,
    pub source_entity: Entity,
    pub cause_entity: Option<Entity>,
    pub source_position: Vec3,
}

impl FatigueSource {
    /// Self-inflicted fatigue (swimming, sprinting, holding a guard).
    pub fn activity(kind: FatigueSourceKind, entity: Entity, position: Vec3) -> Self {
        Self {
            kind,
            source_entity: entity,
            cause_entity: Some(entity),
            source_position: position,
        }
    }

    /// Fatigue from absorbing a hit; `attacker` is the cause when known.
    pub fn defense(defender: Entity, attacker: Option<Entity>, position: Vec3) -> Self {
        Self {
            kind: FatigueSourceKind::Defense,
            source_entity: defender,
            cause_entity: attacker,
            source_position: position,
        }
    }
}
