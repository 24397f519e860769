//! Headless симуляция golem босса
//!
//! Босс гоняется за бродячей целью по арене с колонной в центре.

use std::time::Duration;

use bevy::time::TimeUpdateStrategy;
use golem_simulation::ai::{Boss, BossConfig};
use golem_simulation::sandbox::{golem_catalog, spawn_golem, spawn_wanderer};
use golem_simulation::{create_headless_app, log_error, log_info};

fn main() {
    let seed = 42;
    log_info(&format!("Starting golem headless simulation (seed: {})", seed));

    let mut app = create_headless_app(seed);
    // Один FixedUpdate на каждый app.update()
    app.insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_secs_f64(1.0 / 60.0)));

    let mut config = BossConfig::default();
    config.los.enabled = true;
    config.los.eye_offset = Some([0.0, 2.2, 0.0]);

    let world = app.world_mut();
    let target = spawn_wanderer(world, bevy::math::Vec3::new(10.0, 0.0, 10.0), 2.5);
    let boss = match spawn_golem(world, bevy::math::Vec3::new(-10.0, 0.0, -10.0), config, golem_catalog(), Some(target)) {
        Ok(entity) => entity,
        Err(err) => {
            log_error(&format!("Invalid boss config: {}", err));
            std::process::exit(1);
        }
    };

    // Запускаем 1000 тиков симуляции
    for tick in 0..1000 {
        app.update();

        if tick % 100 == 0 {
            if let Some(boss) = app.world().get::<Boss>(boss) {
                log_info(&format!(
                    "Tick {}: boss {:?}, fired {} attacks",
                    tick,
                    boss.controller.behavior(),
                    boss.controller.animator().fired.len()
                ));
            }
        }
    }

    log_info("Simulation complete!");
}
