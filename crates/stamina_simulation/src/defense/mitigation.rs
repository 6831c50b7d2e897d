//! Defense mitigation: guard arc check, absorption roll, stamina cost.
//!
//! # Flow
//!
//! ```text
//! IncomingDamage
//!   ↓ invalid amount / no defense profile      → pass through
//!   ↓ stamina ≤ 0                              → FatigueBreakthrough notice, pass through
//!   ↓ guard mode (active | passive) → chance
//!   ↓ direction unknown                        → pass through
//!   ↓ outside guard arc                        → pass through
//!   ↓ roll < chance → absorb flat amount (floored at 0)
//!   ↓ fatigue 15 / 30 through the pipeline     (always, even on a failed roll)
//!   ↓ notice + light/heavy block sound
//!   ↓ broadcast block animation               (successful roll, server only)
//!   ↓ item wear = round(final damage)         (server only)
//! DamageResolved
//! ```
//!
//! The engine never touches events or the world; it returns the final damage
//! plus an ordered list of [`DefenseEffect`]s for the calling system to emit.

use bevy::prelude::*;
use rand::Rng;
use strum::Display;

use crate::components::{ControlState, HeldItem, Orientation};
use crate::fatigue::{apply_fatigue, FatigueOutcome, FatiguePipeline, FatigueSource, StaminaLedger};

use super::events::Notice;
use super::geometry::{in_guard_arc, AttackAngles};

/// Hits above this much damage count as heavy.
pub const HEAVY_HIT_THRESHOLD: f32 = 6.0;
pub const LIGHT_BLOCK_FATIGUE: f32 = 15.0;
pub const HEAVY_BLOCK_FATIGUE: f32 = 30.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "lowercase")]
pub enum GuardMode {
    Active,
    Passive,
}

impl GuardMode {
    pub fn from_controls(controls: &ControlState) -> Self {
        if controls.is_active_guard() {
            GuardMode::Active
        } else {
            GuardMode::Passive
        }
    }
}

/// Why mitigation did not run at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    InvalidDamage,
    NoDefenseProfile,
    OutOfStamina,
    IndeterminateDirection,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MitigationVerdict {
    Skipped(SkipReason),
    OutOfArc,
    Guarded {
        mode: GuardMode,
        roll: f64,
        succeeded: bool,
        absorbed: f32,
        fatigue: Option<FatigueOutcome>,
    },
}

/// Side effect requested by the engine, in emission order.
#[derive(Debug, Clone, PartialEq)]
pub enum DefenseEffect {
    Stagger,
    Notify(Notice),
    PlaySound(String),
    BroadcastBlock,
    WearItem(u32),
}

#[derive(Debug, Clone, PartialEq)]
pub struct MitigationOutcome {
    pub original: f32,
    pub final_damage: f32,
    pub verdict: MitigationVerdict,
    pub effects: Vec<DefenseEffect>,
}

impl MitigationOutcome {
    fn pass_through(damage: f32, verdict: MitigationVerdict) -> Self {
        Self {
            original: damage,
            final_damage: damage,
            verdict,
            effects: Vec::new(),
        }
    }

    pub fn absorbed(&self) -> f32 {
        self.original - self.final_damage
    }

    pub fn roll_succeeded(&self) -> bool {
        matches!(self.verdict, MitigationVerdict::Guarded { succeeded: true, .. })
    }
}

/// Everything the engine reads about the defender.
#[derive(Debug, Clone, Copy)]
pub struct Defender<'a> {
    pub entity: Entity,
    pub position: Vec3,
    pub facing: Orientation,
    pub controls: &'a ControlState,
    pub item: Option<&'a HeldItem>,
}

/// The hit being mitigated.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hit {
    pub attacker: Option<Entity>,
    pub source_position: Option<Vec3>,
    pub amount: f32,
}

/// Host-level switches for one mitigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MitigationSettings {
    /// With the stamina economy off, guards never break and cost nothing.
    pub stamina_enabled: bool,
    /// Only the authoritative side broadcasts and wears items.
    pub authoritative: bool,
}

impl Default for MitigationSettings {
    fn default() -> Self {
        Self {
            stamina_enabled: true,
            authoritative: true,
        }
    }
}

pub fn block_fatigue(damage: f32) -> f32 {
    if damage > HEAVY_HIT_THRESHOLD {
        HEAVY_BLOCK_FATIGUE
    } else {
        LIGHT_BLOCK_FATIGUE
    }
}

/// Mitigates one hit. Draws at most one sample from `rng`.
pub fn mitigate_damage<R: Rng + ?Sized>(
    hit: &Hit,
    defender: &Defender,
    ledger: &mut StaminaLedger,
    pipeline: &FatiguePipeline,
    rng: &mut R,
    settings: MitigationSettings,
) -> MitigationOutcome {
    let damage = hit.amount;
    if !damage.is_finite() || damage <= 0.0 {
        return MitigationOutcome::pass_through(
            damage,
            MitigationVerdict::Skipped(SkipReason::InvalidDamage),
        );
    }

    let Some((item, profile)) = defender
        .item
        .and_then(|item| item.defense.as_ref().map(|profile| (item, profile)))
    else {
        return MitigationOutcome::pass_through(
            damage,
            MitigationVerdict::Skipped(SkipReason::NoDefenseProfile),
        );
    };

    if settings.stamina_enabled && ledger.stamina() <= 0.0 {
        let mut outcome = MitigationOutcome::pass_through(
            damage,
            MitigationVerdict::Skipped(SkipReason::OutOfStamina),
        );
        outcome
            .effects
            .push(DefenseEffect::Notify(Notice::FatigueBreakthrough));
        return outcome;
    }

    let mode = GuardMode::from_controls(defender.controls);
    let chance = match mode {
        GuardMode::Active => profile.protection_chance.active,
        GuardMode::Passive => profile.protection_chance.passive,
    };

    let Some(attack) = hit
        .source_position
        .and_then(|source| AttackAngles::between(defender.position, source))
    else {
        return MitigationOutcome::pass_through(
            damage,
            MitigationVerdict::Skipped(SkipReason::IndeterminateDirection),
        );
    };

    if !in_guard_arc(defender.facing, attack, profile.guard_arc()) {
        return MitigationOutcome::pass_through(damage, MitigationVerdict::OutOfArc);
    }

    let roll: f64 = rng.gen();
    let succeeded = roll < f64::from(chance);
    let absorbed = if succeeded {
        profile.absorption().min(damage)
    } else {
        0.0
    };
    let final_damage = (damage - absorbed).max(0.0);
    let heavy = damage > HEAVY_HIT_THRESHOLD;

    let mut effects = Vec::new();

    let fatigue = settings.stamina_enabled.then(|| {
        let position = hit.source_position.unwrap_or(defender.position);
        let source = FatigueSource::defense(defender.entity, hit.attacker, position);
        apply_fatigue(ledger, pipeline, block_fatigue(damage), &source)
    });
    if fatigue.is_some_and(|f| f.staggered) {
        effects.push(DefenseEffect::Stagger);
    }

    effects.push(DefenseEffect::Notify(Notice::DamageBlocked {
        blocked: absorbed,
        total: damage,
        item: item.name.clone(),
        mode,
    }));
    effects.push(DefenseEffect::PlaySound(item.block_sounds.asset_path(heavy)));

    if settings.authoritative {
        if succeeded {
            effects.push(DefenseEffect::BroadcastBlock);
        }
        let wear = final_damage.round() as u32;
        if wear > 0 {
            effects.push(DefenseEffect::WearItem(wear));
        }
    }

    MitigationOutcome {
        original: damage,
        final_damage,
        verdict: MitigationVerdict::Guarded {
            mode,
            roll,
            succeeded,
            absorbed,
            fatigue,
        },
        effects,
    }
}
