//! Simulation authority resource.

use bevy::prelude::*;

/// Which side of the host this app runs on.
///
/// Only the server mutates stamina, broadcasts block animations and wears
/// items down. A client view keeps the components but never ticks them.
#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SimulationSide {
    #[default]
    Server,
    Client,
}

impl SimulationSide {
    pub fn is_authoritative(&self) -> bool {
        matches!(self, SimulationSide::Server)
    }
}
