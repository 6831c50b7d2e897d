//! Base character components: PlayerCharacter, Health, Satiety

use bevy::prelude::*;

/// Game mode of a player. Creative players have no stamina economy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Reflect)]
pub enum GameMode {
    #[default]
    Survival,
    Creative,
}

/// Marks a player-controlled character.
///
/// Only players get a stamina ledger; NPCs never carry this component.
#[derive(Component, Debug, Clone, Default, Reflect)]
#[reflect(Component)]
#[require(Health)]
pub struct PlayerCharacter {
    pub name: String,
    pub game_mode: GameMode,
}

impl PlayerCharacter {
    pub fn survival(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            game_mode: GameMode::Survival,
        }
    }

    pub fn creative(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            game_mode: GameMode::Creative,
        }
    }

    pub fn is_creative(&self) -> bool {
        self.game_mode == GameMode::Creative
    }
}

/// Character health
///
/// Invariant: 0 ≤ current ≤ max
#[derive(Component, Debug, Clone, Copy, Reflect)]
#[reflect(Component)]
pub struct Health {
    pub current: f32,
    pub max: f32,
}

impl Default for Health {
    fn default() -> Self {
        Self::new(100.0)
    }
}

impl Health {
    pub fn new(max: f32) -> Self {
        Self { current: max, max }
    }

    pub fn is_alive(&self) -> bool {
        self.current > 0.0
    }

    pub fn take_damage(&mut self, amount: f32) {
        if !amount.is_finite() || amount <= 0.0 {
            return;
        }
        self.current = (self.current - amount).max(0.0);
    }

    pub fn heal(&mut self, amount: f32) {
        if !amount.is_finite() || amount <= 0.0 {
            return;
        }
        self.current = (self.current + amount).min(self.max);
    }
}

/// Hunger-style resource that pays for stamina regeneration.
pub trait SaturationReservoir {
    fn saturation(&self) -> f32;
    fn max_saturation(&self) -> f32;
    fn consume_saturation(&mut self, amount: f32);
}

/// Satiety of a character (optional component).
#[derive(Component, Debug, Clone, Copy, Reflect)]
#[reflect(Component)]
pub struct Satiety {
    pub saturation: f32,
    pub max_saturation: f32,
}

impl Default for Satiety {
    fn default() -> Self {
        Self::new(1500.0)
    }
}

impl Satiety {
    pub fn new(max_saturation: f32) -> Self {
        Self {
            saturation: max_saturation,
            max_saturation,
        }
    }

    pub fn with_saturation(mut self, saturation: f32) -> Self {
        self.saturation = saturation.clamp(0.0, self.max_saturation);
        self
    }
}

impl SaturationReservoir for Satiety {
    fn saturation(&self) -> f32 {
        self.saturation
    }

    fn max_saturation(&self) -> f32 {
        self.max_saturation
    }

    fn consume_saturation(&mut self, amount: f32) {
        if !amount.is_finite() || amount <= 0.0 {
            return;
        }
        self.saturation = (self.saturation - amount).max(0.0);
    }
}
