//! Stamina ledger: the single owner of a character's stamina values.

use bevy::prelude::*;

pub const DEFAULT_MAX_STAMINA: f32 = 100.0;

/// Current/max stamina and the cached exhausted flag.
///
/// Invariant: 0.0 ≤ stamina ≤ max_stamina, max_stamina > 0.0
///
/// Every write goes through a clamping setter and marks the ledger dirty so
/// the persistence system can flush it. `exhausted` only changes in
/// [`StaminaLedger::refresh_exhausted`], called once per fatigue tick, so
/// several fatigue sources inside one tick never make it flicker.
#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect)]
#[reflect(Component)]
pub struct StaminaLedger {
    stamina: f32,
    max_stamina: f32,
    exhausted: bool,
    dirty: bool,
}

impl Default for StaminaLedger {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_STAMINA)
    }
}

impl StaminaLedger {
    /// Full ledger. A non-positive `max_stamina` falls back to the default.
    pub fn new(max_stamina: f32) -> Self {
        let max_stamina = sanitize_max(max_stamina);
        Self {
            stamina: max_stamina,
            max_stamina,
            exhausted: false,
            dirty: true,
        }
    }

    /// Rebuilds a ledger from persisted values, clamping them into range.
    pub fn restore(stamina: f32, max_stamina: f32, exhausted: bool) -> Self {
        let mut ledger = Self::new(max_stamina);
        ledger.set_stamina(stamina);
        ledger.exhausted = exhausted;
        ledger
    }

    pub fn stamina(&self) -> f32 {
        self.stamina
    }

    pub fn max_stamina(&self) -> f32 {
        self.max_stamina
    }

    pub fn exhausted(&self) -> bool {
        self.exhausted
    }

    pub fn fraction(&self) -> f32 {
        self.stamina / self.max_stamina
    }

    pub fn is_full(&self) -> bool {
        self.stamina >= self.max_stamina
    }

    /// Clamps `value` to `[0, max]`. Non-finite values are ignored.
    pub fn set_stamina(&mut self, value: f32) {
        if !value.is_finite() {
            return;
        }
        self.stamina = value.clamp(0.0, self.max_stamina);
        self.dirty = true;
    }

    /// Non-positive or non-finite values are ignored; stamina is re-clamped.
    pub fn set_max_stamina(&mut self, value: f32) {
        if !(value.is_finite() && value > 0.0) {
            return;
        }
        self.max_stamina = value;
        self.stamina = self.stamina.min(value);
        self.dirty = true;
    }

    /// Recomputes `exhausted` from the current stamina. Returns true when the
    /// flag flipped.
    pub fn refresh_exhausted(&mut self) -> bool {
        let exhausted = self.stamina <= 0.0;
        if exhausted == self.exhausted {
            return false;
        }
        self.exhausted = exhausted;
        self.dirty = true;
        true
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Returns the dirty flag and clears it.
    pub fn take_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    /// Line for debug/info overlays, e.g. `Stamina: 80/100`.
    pub fn info_text(&self) -> String {
        format!("Stamina: {}/{}", self.stamina, self.max_stamina)
    }
}

fn sanitize_max(max_stamina: f32) -> f32 {
    if max_stamina.is_finite() && max_stamina > 0.0 {
        max_stamina
    } else {
        DEFAULT_MAX_STAMINA
    }
}
