//! Controller state written by the host input/physics layer.

use bevy::prelude::*;

/// What the character is doing right now, as reported by the host.
///
/// The stamina layer only reads this; it never writes controls back.
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Eq, Reflect)]
#[reflect(Component)]
pub struct ControlState {
    pub forward: bool,
    pub backward: bool,
    pub left: bool,
    pub right: bool,
    pub sprint: bool,
    pub swimming: bool,
    /// Guard control held (the "use" button on a shield or weapon)
    pub guard: bool,
    /// Aiming a ranged weapon
    pub aiming: bool,
}

impl ControlState {
    pub fn is_moving(&self) -> bool {
        self.forward || self.backward || self.left || self.right
    }

    pub fn is_sprinting(&self) -> bool {
        self.sprint && self.is_moving()
    }

    /// Active guard: guard held and not aiming at the same time.
    pub fn is_active_guard(&self) -> bool {
        self.guard && !self.aiming
    }

    pub fn sprinting_forward() -> Self {
        Self {
            forward: true,
            sprint: true,
            ..Self::default()
        }
    }

    pub fn guarding() -> Self {
        Self {
            guard: true,
            ..Self::default()
        }
    }
}
