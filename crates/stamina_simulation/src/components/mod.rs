//! ECS components for characters that carry a stamina economy.
//!
//! Organized by domain:
//! - actor: player marker, game mode, health, satiety
//! - movement: controller state (swim, sprint, guard, aim)
//! - world: facing (yaw/pitch)
//! - equipment: held item and its defense profile

pub mod actor;
pub mod equipment;
pub mod movement;
pub mod world;

pub use actor::*;
pub use equipment::*;
pub use movement::*;
pub use world::*;
