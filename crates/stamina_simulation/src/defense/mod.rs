//! Defense domain: directional guard mitigation.
//!
//! A hit arrives as [`IncomingDamage`], runs through [`mitigate_damage`]
//! (arc check, absorption roll, block fatigue) and leaves as
//! [`DamageResolved`] plus notices, cues, broadcasts and item wear.

pub mod events;
pub mod geometry;
pub mod mitigation;
pub mod systems;

#[cfg(test)]
mod mitigation_tests;

pub use events::{
    BlockAnimationBroadcast, DamageResolved, IncomingDamage, ItemWear, Notice, PlayerJoined,
    PlayerNotice, BLOCK_ANIMATION,
};
pub use geometry::{
    angle_rad_distance, in_guard_arc, AttackAngles, AttackPlane, GuardArc,
    VERTICAL_ATTACK_PITCH_DEGREES,
};
pub use mitigation::{
    block_fatigue, mitigate_damage, DefenseEffect, Defender, GuardMode, Hit, MitigationOutcome,
    MitigationSettings, MitigationVerdict, SkipReason, HEAVY_BLOCK_FATIGUE, HEAVY_HIT_THRESHOLD,
    LIGHT_BLOCK_FATIGUE,
};
pub use systems::{apply_resolved_damage, process_incoming_damage, register_guard_protection};
