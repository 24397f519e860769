//! Target tracker contract.

use bevy::prelude::*;

/// Supplies the current target each tick.
pub trait TargetSource {
    fn position(&self) -> Vec3;
    /// Direction the target is facing (used when the actor stands on the target center).
    fn forward(&self) -> Vec3;
    /// Target velocity if known. `None` → no lead prediction.
    ///
    /// Пока ни один источник не подключает реальную скорость игрока, lead = 0;
    /// контракт контроллера от этого не меняется.
    fn velocity(&self) -> Option<Vec3> {
        None
    }
}

impl TargetSource for Transform {
    fn position(&self) -> Vec3 {
        self.translation
    }

    fn forward(&self) -> Vec3 {
        Transform::forward(self).as_vec3()
    }
}

/// Optional velocity component on the target entity (enables chase lead).
#[derive(Component, Debug, Clone, Copy, Default, Reflect)]
#[reflect(Component)]
pub struct TargetVelocity(pub Vec3);

/// Frozen view of a target for one tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TargetSnapshot {
    pub position: Vec3,
    pub forward: Vec3,
    pub velocity: Option<Vec3>,
}

impl TargetSnapshot {
    pub fn from_transform(transform: &Transform, velocity: Option<&TargetVelocity>) -> Self {
        Self {
            position: transform.translation,
            forward: transform.forward().as_vec3(),
            velocity: velocity.map(|v| v.0),
        }
    }
}

impl TargetSource for TargetSnapshot {
    fn position(&self) -> Vec3 {
        self.position
    }

    fn forward(&self) -> Vec3 {
        self.forward
    }

    fn velocity(&self) -> Option<Vec3> {
        self.velocity
    }
}
