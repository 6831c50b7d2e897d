//! World clock resource.

use bevy::prelude::*;

/// Host time acceleration.
///
/// Fatigue and regen rates are per *game* second, so every elapsed real
/// duration is multiplied by [`WorldClock::multiplier`] first.
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct WorldClock {
    /// Base game seconds per real second
    pub speed_of_time: f32,
    /// Calendar acceleration on top of `speed_of_time`
    pub calendar_speed_mul: f32,
}

impl Default for WorldClock {
    fn default() -> Self {
        Self {
            speed_of_time: 60.0,
            calendar_speed_mul: 0.5,
        }
    }
}

impl WorldClock {
    /// Clock where one real second is one game second.
    pub fn real_time() -> Self {
        Self {
            speed_of_time: 1.0,
            calendar_speed_mul: 1.0,
        }
    }

    /// Stopped clock: nothing drains or regenerates.
    pub fn paused() -> Self {
        Self {
            speed_of_time: 0.0,
            calendar_speed_mul: 1.0,
        }
    }

    pub fn multiplier(&self) -> f32 {
        let multiplier = self.speed_of_time * self.calendar_speed_mul;
        if multiplier.is_finite() {
            multiplier.max(0.0)
        } else {
            0.0
        }
    }

    /// Converts elapsed real seconds to game seconds.
    pub fn game_seconds(&self, real_seconds: f32) -> f32 {
        real_seconds * self.multiplier()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_multiplier() {
        assert_eq!(WorldClock::default().multiplier(), 30.0);
        assert_eq!(WorldClock::default().game_seconds(0.25), 7.5);
    }

    #[test]
    fn test_negative_speed_is_stopped() {
        let clock = WorldClock {
            speed_of_time: -2.0,
            calendar_speed_mul: 1.0,
        };
        assert_eq!(clock.multiplier(), 0.0);
    }
}
