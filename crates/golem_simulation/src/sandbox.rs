//! Headless sandbox: arena + wandering target для демо и интеграционных тестов.
//!
//! Цель бродит между случайными точками арены (seeded RNG → детерминизм).

use bevy::prelude::*;
use rand::Rng;

use crate::ai::{Boss, BossConfig, BossController, ConfigError, TargetVelocity};
use crate::animation::{AnimTrigger, AnimatorRecorder, AttackClip};
use crate::combat::{AttackCatalog, AttackDescriptor, DistanceCurve};
use crate::navigation::{FlatNavAgent, FlatNavMesh};
use crate::perception::{BoxOccluder, OccluderSet, LAYER_ENVIRONMENT};
use crate::DeterministicRng;

/// Arena half extent (квадрат 2×ARENA_HALF_EXTENT по XZ).
pub const ARENA_HALF_EXTENT: f32 = 20.0;

/// Target that walks between random arena points.
#[derive(Component, Debug, Clone)]
pub struct WanderingTarget {
    pub speed: f32,
    pub waypoint: Option<Vec3>,
}

impl WanderingTarget {
    pub fn new(speed: f32) -> Self {
        Self { speed, waypoint: None }
    }
}

/// Sandbox plugin (цели бродят по арене)
pub struct SandboxPlugin;

impl Plugin for SandboxPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(FixedUpdate, wander_targets.before(crate::ai::systems::tick_bosses));
    }
}

pub fn arena_mesh() -> FlatNavMesh {
    FlatNavMesh::new(
        Vec2::splat(-ARENA_HALF_EXTENT),
        Vec2::splat(ARENA_HALF_EXTENT),
        0.0,
    )
}

/// Pillar in the middle of the arena (блокирует LOS).
pub fn arena_occluders() -> OccluderSet {
    OccluderSet::new(vec![BoxOccluder::new(
        Vec3::new(-1.0, 0.0, -1.0),
        Vec3::new(1.0, 4.0, 1.0),
        LAYER_ENVIRONMENT,
    )])
}

/// Golem attack set: close slam, mid swipe, long leap.
pub fn golem_catalog() -> AttackCatalog {
    AttackCatalog::new(vec![
        AttackDescriptor::new("slam", AnimTrigger::new("Slam"), 0.0, 3.0, 4.0, 1.5)
            .with_curve(DistanceCurve::Linear { start: 1.0, end: 0.5 })
            .with_facing_dot(0.5),
        AttackDescriptor::new("swipe", AnimTrigger::new("Swipe"), 1.5, 4.5, 2.5, 1.0).with_facing_dot(0.3),
        AttackDescriptor::new("leap", AnimTrigger::new("Leap"), 4.0, 12.0, 8.0, 2.0)
            .with_curve(DistanceCurve::Keyframes(vec![(0.0, 0.2), (0.5, 1.0), (1.0, 0.6)]))
            .requiring_los(),
    ])
}

pub fn golem_clips() -> AttackClip {
    AttackClip::new(1.2)
        .with_duration(AnimTrigger::new("Slam"), 1.6)
        .with_duration(AnimTrigger::new("Leap"), 2.0)
}

/// Spawn a golem boss chasing `target`.
pub fn spawn_golem(
    world: &mut World,
    position: Vec3,
    config: BossConfig,
    catalog: AttackCatalog,
    target: Option<Entity>,
) -> Result<Entity, ConfigError> {
    let controller = BossController::new(
        config,
        catalog,
        FlatNavAgent::new(arena_mesh(), 3.5),
        arena_occluders(),
        AnimatorRecorder::default(),
    )?;

    let entity = world
        .spawn((
            Boss::new(controller, target),
            golem_clips(),
            Transform::from_translation(position),
        ))
        .id();

    crate::log_info(&format!("🗿 Spawned golem {:?} at {:?}", entity, position));
    Ok(entity)
}

/// Spawn a wandering target (игрок-заглушка).
pub fn spawn_wanderer(world: &mut World, position: Vec3, speed: f32) -> Entity {
    world
        .spawn((
            WanderingTarget::new(speed),
            TargetVelocity::default(),
            Transform::from_translation(position),
        ))
        .id()
}

fn random_waypoint(rng: &mut impl Rng) -> Vec3 {
    let limit = ARENA_HALF_EXTENT - 1.0;
    Vec3::new(rng.gen_range(-limit..limit), 0.0, rng.gen_range(-limit..limit))
}

/// Система: движение целей к случайным waypoints
pub fn wander_targets(
    mut targets: Query<(&mut WanderingTarget, &mut Transform, &mut TargetVelocity)>,
    mut rng: ResMut<DeterministicRng>,
    time: Res<Time<Fixed>>,
) {
    let delta = time.delta_secs();

    for (mut wanderer, mut transform, mut velocity) in targets.iter_mut() {
        let waypoint = match wanderer.waypoint {
            Some(point) if point.distance(transform.translation) > 0.5 => point,
            _ => {
                let point = random_waypoint(&mut rng.rng);
                wanderer.waypoint = Some(point);
                point
            }
        };

        let to_waypoint = waypoint - transform.translation;
        let step = (wanderer.speed * delta).min(to_waypoint.length());
        let direction = to_waypoint.normalize_or_zero();

        transform.translation += direction * step;
        if direction != Vec3::ZERO {
            transform.look_to(direction, Vec3::Y);
        }
        velocity.0 = if delta > 0.0 { direction * (step / delta) } else { Vec3::ZERO };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_golem_catalog_valid() {
        let catalog = golem_catalog();
        assert!(catalog.validate().is_ok());
        assert_eq!(catalog.len(), 3);
        assert!(catalog.find("leap").is_some());
    }

    #[test]
    fn test_waypoints_inside_arena() {
        let mut rng = DeterministicRng::new(7);
        for _ in 0..100 {
            let point = random_waypoint(&mut rng.rng);
            assert!(arena_mesh().contains(point));
        }
    }
}
