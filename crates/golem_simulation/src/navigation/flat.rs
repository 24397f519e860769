//! Headless navmesh: one flat walkable rectangle + straight-line agent.
//!
//! Заменяет engine NavigationAgent в headless симуляции и тестах.
//! Путь всегда прямой (нет препятствий на navmesh), скорость постоянная.

use bevy::prelude::*;

use super::NavigationService;
use crate::ai::Boss;

/// Max vertical distance from the ground plane that still counts as "on the navmesh".
const SURFACE_TOLERANCE: f32 = 0.25;

/// Distance at which the agent considers its destination reached.
const ARRIVAL_EPSILON: f32 = 0.05;

/// Flat walkable rectangle on the XZ plane at height `ground_y`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlatNavMesh {
    pub min: Vec2,
    pub max: Vec2,
    pub ground_y: f32,
}

impl FlatNavMesh {
    pub fn new(a: Vec2, b: Vec2, ground_y: f32) -> Self {
        Self {
            min: a.min(b),
            max: a.max(b),
            ground_y,
        }
    }

    pub fn contains(&self, point: Vec3) -> bool {
        point.x >= self.min.x
            && point.x <= self.max.x
            && point.z >= self.min.y
            && point.z <= self.max.y
            && (point.y - self.ground_y).abs() <= SURFACE_TOLERANCE
    }

    /// Closest point of the rectangle to `point`.
    pub fn closest_point(&self, point: Vec3) -> Vec3 {
        Vec3::new(
            point.x.clamp(self.min.x, self.max.x),
            self.ground_y,
            point.z.clamp(self.min.y, self.max.y),
        )
    }
}

/// Straight-line navigation agent on a `FlatNavMesh`.
#[derive(Debug, Clone)]
pub struct FlatNavAgent {
    mesh: FlatNavMesh,
    /// Скорость движения (m/s)
    pub speed: f32,
    position: Vec3,
    destination: Option<Vec3>,
    velocity: Vec3,
    enabled: bool,
}

impl FlatNavAgent {
    pub fn new(mesh: FlatNavMesh, speed: f32) -> Self {
        Self {
            mesh,
            speed,
            position: Vec3::ZERO,
            destination: None,
            velocity: Vec3::ZERO,
            enabled: true,
        }
    }

    pub fn destination(&self) -> Option<Vec3> {
        self.destination
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn is_locomotion_enabled(&self) -> bool {
        self.enabled
    }

    /// Step toward the destination. Returns the new position while the agent
    /// drives the body, `None` while locomotion is disabled.
    pub fn advance(&mut self, dt: f32) -> Option<Vec3> {
        if !self.enabled {
            self.velocity = Vec3::ZERO;
            return None;
        }

        let Some(destination) = self.destination else {
            self.velocity = Vec3::ZERO;
            return Some(self.position);
        };

        let to_destination = destination - self.position;
        let distance = to_destination.length();
        if distance <= ARRIVAL_EPSILON || dt <= 0.0 {
            self.velocity = Vec3::ZERO;
            return Some(self.position);
        }

        let step = (self.speed * dt).min(distance);
        let direction = to_destination / distance;
        self.position += direction * step;
        self.velocity = direction * (step / dt);

        Some(self.position)
    }
}

impl NavigationService for FlatNavAgent {
    fn sample_walkable(&self, point: Vec3, radius: f32) -> Option<Vec3> {
        let closest = self.mesh.closest_point(point);
        (closest.distance(point) <= radius).then_some(closest)
    }

    fn set_destination(&mut self, point: Vec3) {
        self.destination = Some(point);
    }

    fn is_on_walkable_surface(&self) -> bool {
        self.mesh.contains(self.position)
    }

    fn current_velocity_magnitude(&self) -> f32 {
        self.velocity.length()
    }

    fn set_locomotion_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
        if !enabled {
            self.velocity = Vec3::ZERO;
        }
    }

    fn warp(&mut self, point: Vec3) {
        self.position = point;
        self.velocity = Vec3::ZERO;
        self.destination = None;
    }

    fn sync_position(&mut self, point: Vec3) {
        self.position = point;
    }
}

/// Система: navigation agent → Transform
///
/// Агент двигает тело только пока locomotion включен (во время атаки тело
/// двигает root motion, агент стоит).
pub fn advance_boss_navigation(
    mut bosses: Query<(&mut Boss, &mut Transform)>,
    time: Res<Time<Fixed>>,
) {
    let delta = time.delta_secs();

    for (mut boss, mut transform) in bosses.iter_mut() {
        if let Some(position) = boss.controller.navigation_mut().advance(delta) {
            transform.translation = position;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn agent() -> FlatNavAgent {
        FlatNavAgent::new(
            FlatNavMesh::new(Vec2::splat(-10.0), Vec2::splat(10.0), 0.0),
            2.0,
        )
    }

    #[test]
    fn test_advance_moves_at_speed() {
        let mut agent = agent();
        agent.set_destination(Vec3::new(4.0, 0.0, 0.0));

        let pos = agent.advance(0.5).expect("enabled");
        assert!((pos.x - 1.0).abs() < 1e-5);
        assert!((agent.current_velocity_magnitude() - 2.0).abs() < 1e-4);

        // не перелетает через цель
        for _ in 0..10 {
            agent.advance(0.5);
        }
        assert!((agent.position().x - 4.0).abs() < 1e-4);
        assert_eq!(agent.current_velocity_magnitude(), 0.0);
    }

    #[test]
    fn test_disabled_agent_does_not_drive() {
        let mut agent = agent();
        agent.set_destination(Vec3::new(4.0, 0.0, 0.0));
        agent.set_locomotion_enabled(false);

        assert_eq!(agent.advance(0.5), None);
        assert_eq!(agent.position(), Vec3::ZERO);
        assert_eq!(agent.current_velocity_magnitude(), 0.0);
    }

    #[test]
    fn test_surface_checks_height() {
        let mut agent = agent();
        agent.sync_position(Vec3::new(0.0, 2.0, 0.0));
        assert!(!agent.is_on_walkable_surface());
        agent.sync_position(Vec3::new(0.0, 0.1, 0.0));
        assert!(agent.is_on_walkable_surface());
    }
}
