//! Guard arc geometry.
//!
//! Angles are radians. Yaw uses `atan2(dx, dz)` (yaw 0 looks down +Z), pitch
//! is positive upwards, both matching [`crate::components::Orientation`].
//! Everything here is a pure function of its inputs.

use std::f32::consts::{PI, TAU};

use bevy::prelude::*;

use crate::components::Orientation;

/// Attacks steeper than this are checked against the vertical arc.
pub const VERTICAL_ATTACK_PITCH_DEGREES: f32 = 65.0;

/// Half-widths of a guard cone.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GuardArc {
    pub horizontal_half: f32,
    pub vertical_half: f32,
}

impl GuardArc {
    /// From full arc widths in degrees (item data format).
    pub fn from_full_degrees(horizontal: f32, vertical: f32) -> Self {
        Self {
            horizontal_half: (horizontal / 2.0).to_radians(),
            vertical_half: (vertical / 2.0).to_radians(),
        }
    }
}

/// Direction an attack comes from, seen from the defender.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AttackAngles {
    pub yaw: f32,
    pub pitch: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttackPlane {
    Horizontal,
    Vertical,
}

impl AttackAngles {
    /// Angles of `source` as seen from `defender`.
    ///
    /// `None` when the two points coincide or a coordinate is not finite; the
    /// direction is indeterminate then and the attack cannot be guarded.
    pub fn between(defender: Vec3, source: Vec3) -> Option<Self> {
        let delta = source - defender;
        if !delta.is_finite() || delta.length_squared() <= f32::EPSILON {
            return None;
        }

        let horizontal = (delta.x * delta.x + delta.z * delta.z).sqrt();
        Some(Self {
            yaw: delta.x.atan2(delta.z),
            pitch: delta.y.atan2(horizontal),
        })
    }

    pub fn plane(&self) -> AttackPlane {
        if self.pitch.abs() > VERTICAL_ATTACK_PITCH_DEGREES.to_radians() {
            AttackPlane::Vertical
        } else {
            AttackPlane::Horizontal
        }
    }
}

/// Signed shortest-arc distance from `start` to `end`, in `(-π, π]`.
pub fn angle_rad_distance(start: f32, end: f32) -> f32 {
    let delta = (end - start).rem_euclid(TAU);
    if delta > PI {
        delta - TAU
    } else {
        delta
    }
}

/// True when the attack lies strictly inside the guard cone.
///
/// Vertical attacks compare pitch against the vertical half-arc, everything
/// else compares yaw against the horizontal half-arc.
pub fn in_guard_arc(facing: Orientation, attack: AttackAngles, arc: GuardArc) -> bool {
    match attack.plane() {
        AttackPlane::Vertical => {
            angle_rad_distance(facing.pitch, attack.pitch).abs() < arc.vertical_half
        }
        AttackPlane::Horizontal => {
            angle_rad_distance(facing.yaw, attack.yaw).abs() < arc.horizontal_half
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distance_wraps_shortest_way() {
        let d = angle_rad_distance(170f32.to_radians(), (-170f32).to_radians());
        assert!((d - 20f32.to_radians()).abs() < 1e-5);

        let d = angle_rad_distance((-170f32).to_radians(), 170f32.to_radians());
        assert!((d + 20f32.to_radians()).abs() < 1e-5);

        assert_eq!(angle_rad_distance(1.0, 1.0), 0.0);
    }

    #[test]
    fn test_attack_in_front_is_zero_yaw() {
        let angles = AttackAngles::between(Vec3::ZERO, Vec3::new(0.0, 0.0, 3.0)).unwrap();
        assert_eq!(angles.yaw, 0.0);
        assert_eq!(angles.pitch, 0.0);
        assert_eq!(angles.plane(), AttackPlane::Horizontal);
    }

    #[test]
    fn test_attack_from_above_is_vertical() {
        let angles = AttackAngles::between(Vec3::ZERO, Vec3::new(0.0, 5.0, 0.5)).unwrap();
        assert_eq!(angles.plane(), AttackPlane::Vertical);
    }

    #[test]
    fn test_coincident_points_are_indeterminate() {
        assert!(AttackAngles::between(Vec3::ONE, Vec3::ONE).is_none());
        assert!(AttackAngles::between(Vec3::ZERO, Vec3::new(f32::NAN, 0.0, 1.0)).is_none());
    }

    #[test]
    fn test_zero_distance_always_in_range() {
        let arc = GuardArc::from_full_degrees(1.0, 1.0);
        let facing = Orientation::new(0.7, 0.0);
        let attack = AttackAngles { yaw: 0.7, pitch: 0.0 };
        assert!(in_guard_arc(facing, attack, arc));
    }

    #[test]
    fn test_half_arc_boundary_is_out_of_range() {
        let arc = GuardArc::from_full_degrees(120.0, 120.0);
        let facing = Orientation::default();

        let boundary = AttackAngles { yaw: arc.horizontal_half, pitch: 0.0 };
        assert!(!in_guard_arc(facing, boundary, arc));

        let inside = AttackAngles { yaw: arc.horizontal_half - 1e-3, pitch: 0.0 };
        assert!(in_guard_arc(facing, inside, arc));
    }

    #[test]
    fn test_attack_from_behind_is_out_of_range() {
        let arc = GuardArc::from_full_degrees(120.0, 120.0);
        let attack = AttackAngles::between(Vec3::ZERO, Vec3::new(0.0, 0.0, -2.0)).unwrap();
        assert!(!in_guard_arc(Orientation::default(), attack, arc));
    }

    #[test]
    fn test_vertical_attack_uses_pitch() {
        let arc = GuardArc::from_full_degrees(10.0, 60.0);
        let attack = AttackAngles::between(Vec3::ZERO, Vec3::new(0.0, 10.0, 1.0)).unwrap();

        // Yaw matches but the defender looks straight ahead
        assert!(!in_guard_arc(Orientation::new(attack.yaw, 0.0), attack, arc));
        // Looking up towards the attacker
        assert!(in_guard_arc(Orientation::new(0.0, 80f32.to_radians()), attack, arc));
    }

    #[test]
    fn test_check_is_pure() {
        let arc = GuardArc::from_full_degrees(90.0, 90.0);
        let facing = Orientation::from_degrees(30.0, 0.0);
        let attack = AttackAngles { yaw: 0.2, pitch: 0.1 };

        let first = in_guard_arc(facing, attack, arc);
        let second = in_guard_arc(facing, attack, arc);
        assert_eq!(first, second);
    }
}
