//! Boss behavior state (одно активное состояние в любой момент).

use bevy::prelude::*;

/// Locomotion/behavior state of the boss.
///
/// - `Chase` / `Strafe` — выбираются по дистанции каждый тик
/// - `Attacking` — входит только через выбор атаки, выходит только по
///   сигналу завершения от аниматора (дистанция его не перебивает)
/// - `Recover` — одно-тиковый passthrough после атаки
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Reflect)]
pub enum BehaviorState {
    #[default]
    Chase,
    Strafe,
    Attacking,
    Recover,
}

impl BehaviorState {
    pub fn is_locomotion(&self) -> bool {
        matches!(self, BehaviorState::Chase | BehaviorState::Strafe)
    }
}

/// Per-actor mutable AI state. Pose lives in the actor's `Transform`.
#[derive(Debug, Clone, Reflect)]
pub struct ActorState {
    pub behavior: BehaviorState,
    /// Countdown до следующего decision pass (≤ 0 → можно решать).
    pub decision_timer: f32,
    /// +1 / -1 — направление обхода по кругу.
    pub strafe_dir: f32,
    /// Countdown до смены направления strafe.
    pub strafe_timer: f32,
}

impl Default for ActorState {
    fn default() -> Self {
        Self {
            behavior: BehaviorState::Chase,
            decision_timer: 0.0,
            strafe_dir: 1.0,
            strafe_timer: 0.0,
        }
    }
}

impl ActorState {
    /// Count both timers down by `dt`.
    pub fn tick_timers(&mut self, dt: f32) {
        self.decision_timer -= dt;
        self.strafe_timer -= dt;
    }

    /// Flip strafe direction if the switch timer ran out. Returns `true` on flip.
    pub fn update_strafe_direction(&mut self, switch_interval: f32) -> bool {
        if self.strafe_timer > 0.0 {
            return false;
        }
        self.strafe_dir = -self.strafe_dir;
        self.strafe_timer = switch_interval;
        true
    }

    /// Consume the decision timer if it ran out. Returns `true` if a decision
    /// pass may run now.
    pub fn take_decision_slot(&mut self, interval: f32) -> bool {
        if self.decision_timer > 0.0 {
            return false;
        }
        self.decision_timer = interval;
        true
    }
}
