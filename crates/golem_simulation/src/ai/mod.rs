//! Boss AI decision-making module
//!
//! Locomotion FSM (Chase / Strafe / Attacking / Recover) + scored attack selection.
//! Контроллер (`BossController`) чистый и не знает про ECS; системы в
//! `systems` только достают цель, вызывают тик и публикуют события.

use bevy::prelude::*;

pub mod components;
pub mod controller;
pub mod error;
pub mod events;
pub mod locomotion;
pub mod systems;
pub mod target;


// Re-export основных типов
pub use components::{
    ActorState, BehaviorState, Boss, BossConfig, DistanceGates, HeadlessBossController, StrafeConfig,
};
pub use controller::{BossController, StartedAttack, TickReport};
pub use error::ConfigError;
pub use events::{AttackFinished, AttackStarted};
pub use target::{TargetSnapshot, TargetSource, TargetVelocity};

/// Boss AI Plugin
///
/// Регистрирует AI системы в FixedUpdate для детерминизма.
/// Порядок выполнения:
/// 1. snap_new_bosses — одноразовый snap на navmesh
/// 2. apply_attack_finished — сигнал аниматора → Recover
/// 3. tick_bosses — FSM + решение атаки (пишет AttackStarted)
/// 4. advance_boss_navigation — агент двигает Transform
/// 5. play_attack_clips — клипы атак (пишет AttackFinished)
pub struct BossAiPlugin;

impl Plugin for BossAiPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<AttackStarted>()
            .add_event::<AttackFinished>()
            .register_type::<TargetVelocity>()
            .add_systems(
                FixedUpdate,
                (
                    systems::snap_new_bosses,
                    systems::apply_attack_finished,
                    systems::tick_bosses,
                    crate::navigation::advance_boss_navigation,
                    crate::animation::play_attack_clips,
                )
                    .chain(), // Последовательное выполнение для детерминизма
            );
    }
}
