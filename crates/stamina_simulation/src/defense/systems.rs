//! Defense systems: IncomingDamage → mitigation → DamageResolved → Health.

use bevy::prelude::*;

use crate::components::{ControlState, Health, HeldItem, Orientation, PlayerCharacter};
use crate::config::StaminaConfig;
use crate::fatigue::{
    EffectCue, FatigueApplied, FatiguePipeline, GuardFatigueProtection, StaminaLedger,
    GUARD_PROTECTION_STAGE,
};
use crate::logger::SimulationLogger;
use crate::shared::{CombatRng, SimulationSide};

use super::events::{
    BlockAnimationBroadcast, DamageResolved, IncomingDamage, ItemWear, PlayerJoined, PlayerNotice,
    BLOCK_ANIMATION,
};
use super::mitigation::{
    mitigate_damage, DefenseEffect, Defender, Hit, MitigationSettings, MitigationVerdict,
};

/// System: run mitigation for every incoming hit.
///
/// Targets without a stamina ledger pass through unchanged. Creative and dead
/// defenders guard without the stamina gate or block cost. On the client
/// side mitigation runs against a copy of the ledger, so the prediction never
/// writes stamina, and player notices stay with the server.
#[allow(clippy::type_complexity, clippy::too_many_arguments)]
pub fn process_incoming_damage(
    mut incoming: EventReader<IncomingDamage>,
    mut defenders: Query<(
        &mut StaminaLedger,
        &FatiguePipeline,
        Option<&PlayerCharacter>,
        Option<&Health>,
        Option<&ControlState>,
        Option<&Orientation>,
        Option<&Transform>,
        Option<&mut HeldItem>,
    )>,
    mut rng: ResMut<CombatRng>,
    config: Res<StaminaConfig>,
    side: Res<SimulationSide>,
    logger: Res<SimulationLogger>,
    mut resolved: EventWriter<DamageResolved>,
    mut notices: EventWriter<PlayerNotice>,
    mut cues: EventWriter<EffectCue>,
    mut fatigue_events: EventWriter<FatigueApplied>,
    mut broadcasts: EventWriter<BlockAnimationBroadcast>,
    mut wear_events: EventWriter<ItemWear>,
) {
    let authoritative = side.is_authoritative();

    for damage in incoming.read() {
        let target = damage.target;

        let Ok((
            mut ledger,
            pipeline,
            player,
            health,
            controls,
            orientation,
            transform,
            mut item,
        )) = defenders.get_mut(target)
        else {
            resolved.write(DamageResolved {
                target,
                attacker: damage.attacker,
                original: damage.amount,
                amount: damage.amount,
            });
            continue;
        };

        let creative = player.is_some_and(PlayerCharacter::is_creative);
        let alive = health.is_none_or(Health::is_alive);
        let settings = MitigationSettings {
            stamina_enabled: config.enable_stamina && !creative && alive,
            authoritative,
        };

        let controls = controls.copied().unwrap_or_default();
        let defender = Defender {
            entity: target,
            position: transform.map(|t| t.translation).unwrap_or(Vec3::ZERO),
            facing: orientation.copied().unwrap_or_default(),
            controls: &controls,
            item: item.as_deref(),
        };
        let hit = Hit {
            attacker: damage.attacker,
            source_position: damage.source_position,
            amount: damage.amount,
        };

        let mut predicted = *ledger;
        let target_ledger: &mut StaminaLedger = if authoritative {
            &mut *ledger
        } else {
            &mut predicted
        };

        let outcome = mitigate_damage(&hit, &defender, target_ledger, pipeline, &mut rng.rng, settings);

        logger.debug(&format!(
            "{:?} hit for {:.2}, {:.2} after mitigation ({:?})",
            target, outcome.original, outcome.final_damage, outcome.verdict
        ));

        if let MitigationVerdict::Guarded {
            fatigue: Some(fatigue),
            ..
        } = outcome.verdict
        {
            if authoritative && fatigue.applied() {
                fatigue_events.write(FatigueApplied::from_outcome(target, &fatigue));
            }
        }

        for effect in outcome.effects {
            match effect {
                DefenseEffect::Stagger => {
                    cues.write(EffectCue::stagger(target));
                }
                DefenseEffect::Notify(notice) => {
                    if authoritative {
                        notices.write(PlayerNotice {
                            entity: target,
                            notice,
                        });
                    }
                }
                DefenseEffect::PlaySound(sound) => {
                    cues.write(EffectCue::sound(target, sound));
                }
                DefenseEffect::BroadcastBlock => {
                    broadcasts.write(BlockAnimationBroadcast {
                        entity: target,
                        animation: BLOCK_ANIMATION,
                    });
                }
                DefenseEffect::WearItem(amount) => {
                    if let Some(item) = item.as_mut() {
                        let removed = item.apply_wear(amount);
                        wear_events.write(ItemWear {
                            entity: target,
                            amount: removed,
                            broken: item.is_broken(),
                        });
                    }
                }
            }
        }

        resolved.write(DamageResolved {
            target,
            attacker: damage.attacker,
            original: outcome.original,
            amount: outcome.final_damage,
        });
    }
}

/// System: finalize mitigated damage into Health.
pub fn apply_resolved_damage(
    mut resolved: EventReader<DamageResolved>,
    mut targets: Query<&mut Health>,
) {
    for damage in resolved.read() {
        if let Ok(mut health) = targets.get_mut(damage.target) {
            health.take_damage(damage.amount);
        }
    }
}

/// System: join hook, registers guard protection in the player's pipeline.
pub fn register_guard_protection(
    mut joined: EventReader<PlayerJoined>,
    mut pipelines: Query<&mut FatiguePipeline>,
    logger: Res<SimulationLogger>,
) {
    for event in joined.read() {
        let Ok(mut pipeline) = pipelines.get_mut(event.entity) else {
            logger.warning(&format!(
                "Player {:?} joined without a fatigue pipeline",
                event.entity
            ));
            continue;
        };

        if pipeline.has_stage(GUARD_PROTECTION_STAGE) {
            continue;
        }
        pipeline.subscribe(GuardFatigueProtection::default());
        logger.debug(&format!("Guard protection registered for {:?}", event.entity));
    }
}
