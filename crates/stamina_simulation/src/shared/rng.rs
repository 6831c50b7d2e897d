//! Random source for absorption rolls.

use bevy::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Shared RNG resource.
///
/// Entropy-seeded for live play, fixed-seed for tests and replays. `seed` is
/// `None` when the generator came from entropy.
#[derive(Resource)]
pub struct CombatRng {
    pub rng: ChaCha8Rng,
    pub seed: Option<u64>,
}

impl CombatRng {
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed: Some(seed),
        }
    }

    pub fn from_entropy() -> Self {
        Self {
            rng: ChaCha8Rng::from_entropy(),
            seed: None,
        }
    }
}

impl Default for CombatRng {
    fn default() -> Self {
        Self::from_entropy()
    }
}
