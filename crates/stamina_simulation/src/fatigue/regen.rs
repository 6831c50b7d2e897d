//! Stamina regeneration, paid for with satiety.

use crate::components::SaturationReservoir;
use crate::config::StaminaConfig;

use super::ledger::StaminaLedger;

/// Base regen per game second before `stamina_regen_speed`.
pub const BASE_REGEN_PER_SECOND: f32 = 0.15;

/// Below this satiety fraction regen starts dropping linearly.
pub const SATIETY_REGEN_THRESHOLD: f32 = 0.25;

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RegenOutcome {
    pub regen_per_second: f32,
    pub saturation_consumed: f32,
    pub stamina_gained: f32,
}

/// Regen rate per game second for the given satiety state.
///
/// `None` (no satiety resource, or one with a non-positive maximum) gives the
/// unscaled rate.
pub fn regen_rate(config: &StaminaConfig, satiety: Option<&dyn SaturationReservoir>) -> f32 {
    let base = (BASE_REGEN_PER_SECOND * config.stamina_regen_speed).max(0.0);

    match satiety {
        Some(satiety) if satiety.max_saturation() > 0.0 => {
            let fraction = satiety.saturation() / satiety.max_saturation();
            (base * fraction / SATIETY_REGEN_THRESHOLD).clamp(0.0, base)
        }
        _ => base,
    }
}

/// Regenerates stamina over `game_seconds` (already world-clock scaled).
///
/// Satiety is charged before stamina is raised. Does nothing when the ledger
/// is already full.
pub fn regenerate(
    ledger: &mut StaminaLedger,
    satiety: Option<&mut dyn SaturationReservoir>,
    config: &StaminaConfig,
    game_seconds: f32,
) -> RegenOutcome {
    if ledger.is_full() || !game_seconds.is_finite() || game_seconds <= 0.0 {
        return RegenOutcome::default();
    }

    let regen_per_second = regen_rate(config, satiety.as_deref());
    let stamina_gained = regen_per_second * game_seconds;

    let mut saturation_consumed = 0.0;
    if let Some(satiety) = satiety {
        if satiety.max_saturation() > 0.0 {
            saturation_consumed = stamina_gained * config.saturation_cost_per_stamina;
            satiety.consume_saturation(saturation_consumed);
        }
    }

    let before = ledger.stamina();
    ledger.set_stamina(before + stamina_gained);

    RegenOutcome {
        regen_per_second,
        saturation_consumed,
        stamina_gained: ledger.stamina() - before,
    }
}
