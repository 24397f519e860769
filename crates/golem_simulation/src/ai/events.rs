//! Boss AI Events
//!
//! ECS → animator: `AttackStarted` (какую атаку проиграть)
//! Animator → ECS: `AttackFinished` (клип атаки закончился, edge-triggered)

use bevy::prelude::*;

use crate::animation::AnimTrigger;
use crate::combat::AttackId;

/// Boss selected an attack and entered `Attacking`.
#[derive(Event, Debug, Clone, PartialEq)]
pub struct AttackStarted {
    pub boss: Entity,
    pub attack: AttackId,
    /// Trigger that was fired on the boss animator.
    pub trigger: AnimTrigger,
}

/// Completion signal: the attack clip ended, locomotion may resume.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttackFinished {
    pub boss: Entity,
}
