//! Golem Boss Simulation Core
//!
//! ECS-симуляция на Bevy 0.16: AI босса (locomotion FSM + выбор атак).
//!
//! Движок (navigation, physics raycast, animator) спрятан за трейтами:
//! - `NavigationService` — navmesh agent
//! - `OcclusionQuery` — raycast для line-of-sight
//! - `AnimationSink` — параметры/триггеры аниматора
//!
//! Headless реализации (flat navmesh, AABB occluders, recorder) живут здесь же,
//! так что вся симуляция крутится без движка.

use bevy::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

// Публичные модули
pub mod ai;
pub mod animation;
pub mod combat;
pub mod logger;
pub mod navigation;
pub mod perception;
pub mod sandbox;

// Re-export базовых типов для удобства
pub use ai::{
    AttackFinished, AttackStarted, BehaviorState, Boss, BossAiPlugin, BossConfig, BossController, ConfigError,
    TargetVelocity,
};
pub use combat::{AttackCatalog, AttackDescriptor, AttackId, DistanceCurve};
pub use logger::{init_logger, log, log_error, log_info, log_warning};

/// Главный plugin симуляции (объединяет все подсистемы)
pub struct SimulationPlugin;

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        app
            // Fixed timestep 60Hz для simulation tick
            .insert_resource(Time::<Fixed>::from_hz(60.0))
            // Детерминистичный RNG (seed по умолчанию)
            .insert_resource(DeterministicRng::new(42))
            .add_plugins(BossAiPlugin);
    }
}

/// Детерминистичный RNG resource (seeded)
#[derive(Resource)]
pub struct DeterministicRng {
    pub rng: ChaCha8Rng,
    pub seed: u64,
}

impl DeterministicRng {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }
}

/// Создаёт minimal Bevy App для headless симуляции
///
/// AI и sandbox плагины уже подключены; seed переопределяет RNG.
pub fn create_headless_app(seed: u64) -> App {
    let mut app = App::new();
    init_logger();
    app.add_plugins(MinimalPlugins)
        .add_plugins((SimulationPlugin, sandbox::SandboxPlugin))
        .insert_resource(DeterministicRng::new(seed));

    app
}

/// Snapshot мира для сравнения детерминизма
pub fn world_snapshot<T: Component>(world: &mut World) -> Vec<u8>
where
    T: std::fmt::Debug,
{
    let mut snapshot = Vec::new();

    let mut query = world.query::<(Entity, &T)>();
    let mut entities: Vec<_> = query.iter(world).collect();

    // Сортируем по Entity ID для детерминизма
    entities.sort_by_key(|(entity, _)| entity.index());

    for (entity, component) in entities {
        snapshot.extend_from_slice(&entity.index().to_le_bytes());
        snapshot.extend_from_slice(format!("{:?}", component).as_bytes());
    }

    snapshot
}
