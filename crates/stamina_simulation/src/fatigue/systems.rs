//! Fatigue systems: lazy attach and the 4 Hz stamina tick.

use bevy::prelude::*;
use rand::Rng;

use crate::components::{ControlState, Health, HeldItem, PlayerCharacter, SaturationReservoir, Satiety};
use crate::config::StaminaConfig;
use crate::logger::SimulationLogger;
use crate::persistence::{load_ledger, WatchedAttributes};
use crate::shared::{CombatRng, SimulationSide, WorldClock};

use super::accumulator::{activity_drains, FatigueTimer};
use super::bands::{update_stat_modifiers, StatModifiers};
use super::events::{EffectCue, ExhaustionChanged, FatigueApplied, StaminaBandChanged};
use super::ledger::StaminaLedger;
use super::pipeline::{apply_fatigue, FatiguePipeline};
use super::regen::regenerate;
use super::source::FatigueSource;

/// Components a character needs to take part in the stamina economy.
pub fn stamina_components(
    ledger: StaminaLedger,
    timer_offset: f32,
) -> (StaminaLedger, FatigueTimer, FatiguePipeline, StatModifiers) {
    (
        ledger,
        FatigueTimer::with_offset(timer_offset),
        FatiguePipeline::new(),
        StatModifiers::default(),
    )
}

/// System: give every player without a ledger its stamina components.
///
/// The ledger is restored from the attribute store; the timer starts at a
/// random offset in `[0, 1)` so players loaded together tick apart.
pub fn attach_stamina(
    mut commands: Commands,
    players: Query<Entity, (With<PlayerCharacter>, Without<StaminaLedger>)>,
    store: Res<WatchedAttributes>,
    config: Res<StaminaConfig>,
    mut rng: ResMut<CombatRng>,
    logger: Res<SimulationLogger>,
) {
    for entity in players.iter() {
        let ledger = load_ledger(&*store, entity, config.max_stamina);
        let offset: f32 = rng.rng.gen();

        logger.debug(&format!(
            "Attached stamina to {:?}: {}",
            entity,
            ledger.info_text()
        ));

        commands
            .entity(entity)
            .insert_if_new(stamina_components(ledger, offset));
    }
}

/// System: the stamina tick.
///
/// Per fire: drains (swim, sprint, guard) through the pipeline, or regen
/// when no drain committed any stamina; then the exhausted refresh and the
/// band mapper.
/// Dead characters skip drains and regen but still refresh and reset.
#[allow(clippy::type_complexity)]
pub fn tick_fatigue(
    time: Res<Time>,
    config: Res<StaminaConfig>,
    clock: Res<WorldClock>,
    side: Res<SimulationSide>,
    logger: Res<SimulationLogger>,
    mut characters: Query<(
        Entity,
        &PlayerCharacter,
        &Health,
        Option<&ControlState>,
        Option<&Transform>,
        Option<&HeldItem>,
        Option<&mut Satiety>,
        &mut StaminaLedger,
        &mut FatigueTimer,
        &FatiguePipeline,
        &mut StatModifiers,
    )>,
    mut fatigue_events: EventWriter<FatigueApplied>,
    mut cues: EventWriter<EffectCue>,
    mut band_events: EventWriter<StaminaBandChanged>,
    mut exhaustion_events: EventWriter<ExhaustionChanged>,
) {
    if !side.is_authoritative() || !config.enable_stamina {
        return;
    }

    let delta = time.delta_secs();

    for (
        entity,
        player,
        health,
        controls,
        transform,
        item,
        mut satiety,
        mut ledger,
        mut timer,
        pipeline,
        mut modifiers,
    ) in characters.iter_mut()
    {
        if player.is_creative() {
            continue;
        }

        let Some(elapsed) = timer.advance(delta) else {
            continue;
        };
        let game_seconds = clock.game_seconds(elapsed);

        if health.is_alive() {
            let controls = controls.copied().unwrap_or_default();
            let holds_defense_item = item.is_some_and(HeldItem::can_guard);
            let position = transform.map(|t| t.translation).unwrap_or(Vec3::ZERO);

            let drains = activity_drains(&controls, holds_defense_item, &config, game_seconds);
            let mut fatigued = false;

            for drain in &drains {
                let source = FatigueSource::activity(drain.kind, entity, position);
                let outcome = apply_fatigue(&mut ledger, pipeline, drain.amount, &source);
                if !outcome.applied() {
                    continue;
                }
                fatigued = true;

                logger.debug(&format!(
                    "{:?} fatigued by {:.3} ({}), stamina {:.2}",
                    entity, outcome.committed, outcome.kind, outcome.stamina_after
                ));
                if outcome.staggered {
                    cues.write(EffectCue::stagger(entity));
                }
                fatigue_events.write(FatigueApplied::from_outcome(entity, &outcome));
            }

            // Zero-rate and fully cancelled drains don't block regen
            if !fatigued {
                let reservoir = satiety
                    .as_deref_mut()
                    .map(|satiety| satiety as &mut dyn SaturationReservoir);
                let outcome = regenerate(&mut ledger, reservoir, &config, game_seconds);

                if outcome.saturation_consumed > 0.0 {
                    logger.debug(&format!(
                        "{:?} regenerated {:.3} stamina for {:.3} satiety",
                        entity, outcome.stamina_gained, outcome.saturation_consumed
                    ));
                }
            }
        }

        if ledger.refresh_exhausted() {
            logger.debug(&format!("{:?} exhausted: {}", entity, ledger.exhausted()));
            exhaustion_events.write(ExhaustionChanged {
                entity,
                exhausted: ledger.exhausted(),
            });
        }

        if let Some(previous) = update_stat_modifiers(&mut modifiers, ledger.fraction(), &config) {
            logger.debug(&format!(
                "{:?} stamina band {:?} -> {:?}",
                entity,
                previous,
                modifiers.band()
            ));
            band_events.write(StaminaBandChanged {
                entity,
                from: previous,
                to: modifiers.band(),
            });
        }

        timer.reset();
    }
}
