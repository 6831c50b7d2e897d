//! Fatigue accumulator: 4 Hz sampling of what the character is doing.

use bevy::prelude::*;

use crate::components::ControlState;
use crate::config::StaminaConfig;

use super::source::FatigueSourceKind;

/// Seconds between two evaluations.
pub const FATIGUE_TICK_INTERVAL: f32 = 0.25;

/// Accumulated time since the last evaluation.
///
/// On a fire the whole accumulated time is handed out and the timer restarts
/// at zero, so any overshoot is drained in that fire rather than carried.
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Reflect)]
#[reflect(Component)]
pub struct FatigueTimer {
    pub elapsed: f32,
}

impl FatigueTimer {
    /// Timer starting at `offset` seconds (spreads freshly loaded players
    /// across different ticks).
    pub fn with_offset(offset: f32) -> Self {
        Self {
            elapsed: offset.max(0.0),
        }
    }

    /// Adds `delta` and returns the accumulated time when the interval has
    /// been reached. The caller resets the timer once the fire is processed.
    pub fn advance(&mut self, delta: f32) -> Option<f32> {
        if delta.is_finite() && delta > 0.0 {
            self.elapsed += delta;
        }
        (self.elapsed >= FATIGUE_TICK_INTERVAL).then_some(self.elapsed)
    }

    pub fn reset(&mut self) {
        self.elapsed = 0.0;
    }
}

/// One activity draining stamina during a fire.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ActivityDrain {
    pub kind: FatigueSourceKind,
    pub amount: f32,
}

/// Drains for one fire, in priority order: swim, sprint, guard.
///
/// `game_seconds` is the elapsed real time already scaled by the world clock.
/// Every matching activity yields a drain; amounts may be zero when a rate is
/// configured as zero, and the ledger side treats those as no-ops.
pub fn activity_drains(
    controls: &ControlState,
    holds_defense_item: bool,
    config: &StaminaConfig,
    game_seconds: f32,
) -> Vec<ActivityDrain> {
    let mut drains = Vec::with_capacity(3);

    if controls.swimming {
        drains.push(ActivityDrain {
            kind: FatigueSourceKind::Swim,
            amount: config.swim_stamina_cost * game_seconds,
        });
    }

    if controls.is_sprinting() {
        drains.push(ActivityDrain {
            kind: FatigueSourceKind::Run,
            amount: config.sprint_stamina_cost * game_seconds,
        });
    }

    if controls.guard && holds_defense_item {
        drains.push(ActivityDrain {
            kind: FatigueSourceKind::Defense,
            amount: config.defense_stamina_cost * game_seconds,
        });
    }

    drains
}
