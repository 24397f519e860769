//! Boss component (ECS обёртка над `BossController`).

use bevy::prelude::*;

use crate::ai::controller::BossController;
use crate::animation::AnimatorRecorder;
use crate::navigation::FlatNavAgent;
use crate::perception::OccluderSet;

/// Controller wired with the headless collaborators.
pub type HeadlessBossController = BossController<FlatNavAgent, OccluderSet, AnimatorRecorder>;

/// Boss actor.
///
/// Pose живёт в `Transform` той же entity, цель — любая entity с `Transform`
/// (опционально `TargetVelocity` для lead).
#[derive(Component)]
pub struct Boss {
    pub controller: HeadlessBossController,
    /// `None` → тик пропускается целиком.
    pub target: Option<Entity>,
}

impl Boss {
    pub fn new(controller: HeadlessBossController, target: Option<Entity>) -> Self {
        Self { controller, target }
    }
}
