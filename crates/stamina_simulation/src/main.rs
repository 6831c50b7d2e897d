//! Headless stamina simulation
//!
//! Runs a sprinting player and a guarding player for a few simulated seconds
//! and prints their stamina.

use std::time::Duration;

use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;
use stamina_simulation::*;

fn main() {
    let seed = 42;
    println!("Starting headless stamina simulation (seed: {})", seed);

    let config_json = std::env::args()
        .nth(1)
        .and_then(|path| std::fs::read_to_string(path).ok());
    let logger = SimulationLogger::default();
    let config = StaminaConfig::load_or_default(config_json.as_deref(), &logger);

    let mut app = create_headless_app(seed);
    app.insert_resource(config)
        .insert_resource(logger)
        .insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_millis(250)))
        .add_plugins(SimulationPlugin);

    let runner = app
        .world_mut()
        .spawn((
            PlayerCharacter::survival("runner"),
            ControlState::sprinting_forward(),
            Satiety::default(),
        ))
        .id();

    let shield = HeldItem::new("wooden shield").with_defense(DefenseProfile {
        protection_chance: ProtectionChance {
            active: 0.8,
            passive: 0.2,
        },
        ..DefenseProfile::default()
    });
    let guard = app
        .world_mut()
        .spawn((
            PlayerCharacter::survival("guard"),
            ControlState::guarding(),
            Satiety::default(),
            shield.with_durability(400),
            Transform::default(),
            Orientation::default(),
        ))
        .id();

    // 1 update = 250 ms = one fatigue fire
    for tick in 0..240 {
        if tick % 8 == 0 {
            app.world_mut().send_event(IncomingDamage {
                target: guard,
                attacker: Some(runner),
                source_position: Some(Vec3::new(0.0, 0.0, 2.0)),
                amount: 4.0,
            });
        }

        app.update();

        if tick % 40 == 0 {
            report(app.world(), tick, &[runner, guard]);
        }
    }

    report(app.world(), 240, &[runner, guard]);
    println!("Simulation complete!");
}

fn report(world: &World, tick: usize, players: &[Entity]) {
    for &entity in players {
        let name = world
            .get::<PlayerCharacter>(entity)
            .map(|p| p.name.as_str())
            .unwrap_or("?");
        let stamina = world
            .get::<StaminaLedger>(entity)
            .map(|ledger| ledger.info_text())
            .unwrap_or_else(|| "Stamina: -".to_string());
        let health = world.get::<Health>(entity).map(|h| h.current).unwrap_or(0.0);
        println!("Tick {}: {} {} health {:.1}", tick, name, stamina, health);
    }
}
