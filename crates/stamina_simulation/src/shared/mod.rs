//! Shared domain: cross-cutting resources
//!
//! Used by both the fatigue and the defense domains:
//! - clock: world time multiplier (WorldClock)
//! - authority: which side owns the simulation (SimulationSide)
//! - rng: the random source for absorption rolls (CombatRng)

pub mod authority;
pub mod clock;
pub mod rng;

pub use authority::*;
pub use clock::*;
pub use rng::*;
