//! World orientation component: Orientation (yaw/pitch)

use bevy::prelude::*;

/// Facing of a character in radians.
///
/// Yaw is measured around +Y with yaw 0 looking down +Z (`atan2(dx, dz)`),
/// pitch is positive when looking up. Same convention as
/// [`crate::defense::AttackAngles`].
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Reflect)]
#[reflect(Component)]
pub struct Orientation {
    pub yaw: f32,
    pub pitch: f32,
}

impl Orientation {
    pub fn new(yaw: f32, pitch: f32) -> Self {
        Self { yaw, pitch }
    }

    pub fn from_degrees(yaw: f32, pitch: f32) -> Self {
        Self::new(yaw.to_radians(), pitch.to_radians())
    }

    /// Unit vector the character is looking along.
    pub fn forward(&self) -> Vec3 {
        let (sin_yaw, cos_yaw) = self.yaw.sin_cos();
        let (sin_pitch, cos_pitch) = self.pitch.sin_cos();
        Vec3::new(sin_yaw * cos_pitch, sin_pitch, cos_yaw * cos_pitch)
    }
}
