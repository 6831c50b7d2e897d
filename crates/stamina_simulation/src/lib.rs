//! Stamina Simulation Core
//!
//! Player stamina/fatigue economy and directional guard mitigation, hosted in
//! Bevy 0.16 ECS.
//!
//! - fatigue: ledger, 4 Hz accumulator, satiety-paid regen, band modifiers,
//!   adjuster pipeline
//! - defense: guard arc geometry, absorption roll, block fatigue
//! - persistence: ledger ↔ watched attribute store
//!
//! The host feeds input through components (`ControlState`, `Orientation`,
//! `HeldItem`) and events (`IncomingDamage`, `PlayerJoined`), and reads
//! output events (`DamageResolved`, `PlayerNotice`, `EffectCue`, ...).

use bevy::prelude::*;

pub mod components;
pub mod config;
pub mod defense;
pub mod fatigue;
pub mod logger;
pub mod persistence;
pub mod shared;

pub use components::*;
pub use config::{BandMultipliers, ConfigError, StaminaConfig};
pub use defense::{
    BlockAnimationBroadcast, DamageResolved, IncomingDamage, ItemWear, Notice, PlayerJoined,
    PlayerNotice,
};
pub use fatigue::{
    EffectCue, ExhaustionChanged, FatigueApplied, FatiguePipeline, FatigueTimer, StaminaBand,
    StaminaBandChanged, StaminaLedger, StatKind, StatModifiers,
};
pub use logger::{BufferedLogger, ConsoleLogger, LogLevel, LogPrinter, SimulationLogger};
pub use persistence::{AttributeStore, WatchedAttributes};
pub use shared::{CombatRng, SimulationSide, WorldClock};

/// Fixed simulation rate. 1/64 s is exact in binary, so 16 steps make one
/// fatigue fire.
pub const SIMULATION_HZ: f64 = 64.0;

/// Ordering of the stamina systems inside `FixedUpdate`.
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StaminaSet {
    /// Lazy attach + join hook
    Attach,
    /// 4 Hz fatigue/regen tick
    Tick,
    /// Incoming damage mitigation and finalization
    Defense,
    /// Ledger flush into the attribute store
    Sync,
}

/// Stamina plugin.
///
/// Registers events and systems in FixedUpdate (64 Hz).
///
/// Execution order:
/// 1. attach_stamina, register_guard_protection
/// 2. tick_fatigue
/// 3. process_incoming_damage, apply_resolved_damage
/// 4. sync_stamina_attributes
pub struct StaminaPlugin;

impl Plugin for StaminaPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<IncomingDamage>()
            .add_event::<DamageResolved>()
            .add_event::<PlayerJoined>()
            .add_event::<PlayerNotice>()
            .add_event::<BlockAnimationBroadcast>()
            .add_event::<ItemWear>()
            .add_event::<FatigueApplied>()
            .add_event::<EffectCue>()
            .add_event::<StaminaBandChanged>()
            .add_event::<ExhaustionChanged>();

        app.register_type::<StaminaLedger>()
            .register_type::<FatigueTimer>()
            .register_type::<PlayerCharacter>()
            .register_type::<Health>()
            .register_type::<Satiety>()
            .register_type::<ControlState>()
            .register_type::<Orientation>()
            .register_type::<HeldItem>();

        app.configure_sets(
            FixedUpdate,
            (
                StaminaSet::Attach,
                StaminaSet::Tick,
                StaminaSet::Defense,
                StaminaSet::Sync,
            )
                .chain(),
        );

        app.add_systems(Startup, apply_logger_settings);

        app.add_systems(
            FixedUpdate,
            (
                (fatigue::attach_stamina, defense::register_guard_protection)
                    .chain()
                    .in_set(StaminaSet::Attach),
                fatigue::tick_fatigue.in_set(StaminaSet::Tick),
                (defense::process_incoming_damage, defense::apply_resolved_damage)
                    .chain()
                    .in_set(StaminaSet::Defense),
                persistence::sync_stamina_attributes.in_set(StaminaSet::Sync),
            ),
        );
    }
}

/// Main simulation plugin: default resources + StaminaPlugin.
///
/// Resources already present (seeded RNG, test logger, custom config) are
/// kept.
pub struct SimulationPlugin;

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(Time::<Fixed>::from_hz(SIMULATION_HZ))
            .init_resource::<StaminaConfig>()
            .init_resource::<WorldClock>()
            .init_resource::<SimulationSide>()
            .init_resource::<CombatRng>()
            .init_resource::<SimulationLogger>()
            .init_resource::<WatchedAttributes>()
            .add_plugins(StaminaPlugin);
    }
}

/// Startup system: `debugMode` in the config switches the logger to debug.
fn apply_logger_settings(config: Res<StaminaConfig>, mut logger: ResMut<SimulationLogger>) {
    if config.debug_mode {
        logger.set_debug_mode(true);
    }
}

/// Creates a minimal Bevy App for headless simulation.
pub fn create_headless_app(seed: u64) -> App {
    let mut app = App::new();
    app.add_plugins(MinimalPlugins)
        .insert_resource(CombatRng::seeded(seed))
        .insert_resource(Time::<Fixed>::from_hz(SIMULATION_HZ));

    app
}

/// World snapshot for determinism comparisons.
///
/// Components of type `T` sorted by entity index, serialized through `Debug`.
pub fn world_snapshot<T: Component>(world: &mut World) -> Vec<u8>
where
    T: std::fmt::Debug,
{
    let mut snapshot = Vec::new();

    let mut query = world.query::<(Entity, &T)>();
    let mut entities: Vec<_> = query.iter(world).collect();
    entities.sort_by_key(|(entity, _)| entity.index());

    for (entity, component) in entities {
        snapshot.extend_from_slice(&entity.index().to_le_bytes());
        snapshot.extend_from_slice(format!("{:?}", component).as_bytes());
    }

    snapshot
}
