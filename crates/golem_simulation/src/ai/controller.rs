//! Boss controller — locomotion state machine + attack decision cadence.
//!
//! Один тик:
//! 1. Нет цели → no-op (таймеры заморожены)
//! 2. Таймеры decision/strafe -= dt
//! 3. Не `Attacking` → пересчёт Chase/Strafe по дистанции (Recover сгорает тут)
//! 4. Chase/Strafe: destination через navigation adapter + ручной поворот +
//!    попытка решения атаки (не чаще `decision_interval`)
//! 5. Не `Attacking` → sync позиции navigation агента
//! 6. Параметры аниматора (Speed, DistanceToPlayer, IsWalking)
//!
//! Коллабораторы (navigation / occlusion / animator) передаются в конструктор —
//! контроллер ничего не ищет сам.

use bevy::prelude::*;

use super::components::{ActorState, BehaviorState, BossConfig};
use super::error::ConfigError;
use super::locomotion::{facing_dot, predict_target_position, rotate_towards, strafe_destination};
use super::target::TargetSource;
use crate::animation::{AnimParam, AnimTrigger, AnimationSink};
use crate::combat::{select_attack, AttackCatalog, AttackId, SelectionContext};
use crate::navigation::{set_destination_safe, snap_onto_surface, DestinationOutcome, NavigationService};
use crate::perception::{has_line_of_sight, OcclusionQuery};

/// Attack chosen during a tick.
#[derive(Debug, Clone, PartialEq)]
pub struct StartedAttack {
    pub attack: AttackId,
    pub trigger: AnimTrigger,
    pub score: f32,
}

/// What happened during one tick.
#[derive(Debug, Clone, PartialEq)]
pub struct TickReport {
    pub behavior: BehaviorState,
    pub distance: f32,
    pub started: Option<StartedAttack>,
}

pub struct BossController<N, P, A> {
    config: BossConfig,
    catalog: AttackCatalog,
    state: ActorState,
    navigation: N,
    occlusion: P,
    animator: A,
}

impl<N, P, A> BossController<N, P, A>
where
    N: NavigationService,
    P: OcclusionQuery,
    A: AnimationSink,
{
    /// Validate config + catalog and wire the collaborators.
    pub fn new(
        config: BossConfig,
        catalog: AttackCatalog,
        navigation: N,
        occlusion: P,
        animator: A,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        catalog.validate()?;

        Ok(Self {
            config,
            catalog,
            state: ActorState::default(),
            navigation,
            occlusion,
            animator,
        })
    }

    pub fn config(&self) -> &BossConfig {
        &self.config
    }

    pub fn catalog(&self) -> &AttackCatalog {
        &self.catalog
    }

    pub fn state(&self) -> &ActorState {
        &self.state
    }

    pub fn behavior(&self) -> BehaviorState {
        self.state.behavior
    }

    pub fn navigation(&self) -> &N {
        &self.navigation
    }

    pub fn navigation_mut(&mut self) -> &mut N {
        &mut self.navigation
    }

    pub fn occlusion(&self) -> &P {
        &self.occlusion
    }

    pub fn animator(&self) -> &A {
        &self.animator
    }

    /// One-time startup correction onto the walkable surface.
    pub fn snap_onto_surface(&mut self, pose: &mut Transform) -> Option<Vec3> {
        self.navigation.sync_position(pose.translation);
        let snapped = snap_onto_surface(&mut self.navigation, pose.translation, &self.config.nav)?;

        crate::log(&format!(
            "📍 Boss snapped onto navmesh: {:?} → {:?}",
            pose.translation, snapped
        ));
        pose.translation = snapped;
        Some(snapped)
    }

    /// Re-evaluate Chase/Strafe unless locked in `Attacking`. Returns the active state.
    pub fn evaluate_state(&mut self, distance: f32) -> BehaviorState {
        if self.state.behavior == BehaviorState::Attacking {
            return BehaviorState::Attacking;
        }

        let next = self.config.gates.choose(distance);
        if next != self.state.behavior {
            crate::log(&format!(
                "🔁 Boss: {:?} → {:?} (distance {:.2})",
                self.state.behavior, next, distance
            ));
            self.state.behavior = next;
        }
        next
    }

    /// Advance one simulation tick. `None` = no target, nothing happened.
    pub fn tick(
        &mut self,
        pose: &mut Transform,
        target: Option<&dyn TargetSource>,
        dt: f32,
        now: f32,
    ) -> Option<TickReport> {
        let target = target?;

        self.state.tick_timers(dt);

        let target_position = target.position();
        let to_target = target_position - pose.translation;
        let distance = to_target.length();

        let mut started = None;

        match self.evaluate_state(distance) {
            BehaviorState::Chase => {
                self.navigation.set_locomotion_enabled(true);

                let velocity = target.velocity().unwrap_or(Vec3::ZERO);
                let chase_point = predict_target_position(target_position, velocity, self.config.lead_time);
                self.request_destination(chase_point, pose.translation);

                self.face(pose, to_target, dt);
                started = self.try_decide_attack(pose, target_position, distance, now);
            }
            BehaviorState::Strafe => {
                self.navigation.set_locomotion_enabled(true);

                if self.state.update_strafe_direction(self.config.strafe.switch_interval) {
                    crate::log(&format!("↔️ Boss strafe direction → {}", self.state.strafe_dir));
                }

                let ring_point = strafe_destination(
                    target_position,
                    pose.translation,
                    target.forward(),
                    self.config.strafe.desired_mid_radius,
                    self.state.strafe_dir,
                    self.config.strafe.tangent_offset,
                );
                self.request_destination(ring_point, pose.translation);

                self.face(pose, target_position - pose.translation, dt);
                started = self.try_decide_attack(pose, target_position, distance, now);
            }
            // Attacking: тело и поворот ведёт анимация (root motion)
            BehaviorState::Attacking | BehaviorState::Recover => {}
        }

        if self.state.behavior != BehaviorState::Attacking {
            self.navigation.sync_position(pose.translation);
        }

        let speed = self.navigation.current_velocity_magnitude();
        self.animator.set_float(AnimParam::Speed, speed);
        self.animator.set_float(AnimParam::DistanceToTarget, distance);
        self.animator.set_bool(AnimParam::IsWalking, speed > self.config.walk_speed_threshold);

        Some(TickReport {
            behavior: self.state.behavior,
            distance,
            started,
        })
    }

    /// Completion signal from the animator. Ignored unless `Attacking`.
    ///
    /// Returns `true` if the attack was actually ended.
    pub fn finish_attack(&mut self) -> bool {
        if self.state.behavior != BehaviorState::Attacking {
            crate::log_warning(&format!(
                "Boss: attack finished signal ignored (state {:?})",
                self.state.behavior
            ));
            return false;
        }

        self.animator.set_root_motion(false);
        self.navigation.set_locomotion_enabled(true);
        self.state.behavior = BehaviorState::Recover;

        crate::log("🏁 Boss: Attacking → Recover");
        true
    }

    fn request_destination(&mut self, desired: Vec3, current: Vec3) {
        match set_destination_safe(&mut self.navigation, desired, current, &self.config.nav) {
            DestinationOutcome::Holding(at) => {
                crate::log(&format!("⚠️ Boss: no walkable point near {:?}, holding at {:?}", desired, at));
            }
            DestinationOutcome::Ignored | DestinationOutcome::Moving(_) => {}
        }
    }

    fn face(&self, pose: &mut Transform, direction: Vec3, dt: f32) {
        if let Some(rotation) = rotate_towards(pose.rotation, direction, self.config.max_turn_speed_deg, dt) {
            pose.rotation = rotation;
        }
    }

    fn try_decide_attack(
        &mut self,
        pose: &Transform,
        target_position: Vec3,
        distance: f32,
        now: f32,
    ) -> Option<StartedAttack> {
        if !self.state.take_decision_slot(self.config.decision_interval) {
            return None;
        }

        let ctx = SelectionContext {
            distance,
            facing_dot: facing_dot(pose, target_position),
            now,
        };

        let choice = select_attack(&self.catalog, &ctx, || {
            has_line_of_sight(&self.config.los, pose, target_position, &self.occlusion)
        })?;

        self.begin_attack(choice.attack, choice.score, now)
    }

    fn begin_attack(&mut self, id: AttackId, score: f32, now: f32) -> Option<StartedAttack> {
        let attack = self.catalog.get_mut(id)?;
        attack.mark_used(now);
        let trigger = attack.trigger.clone();

        crate::log(&format!(
            "⚔️ Boss: {:?} → Attacking '{}' (score {:.2}, t={:.2})",
            self.state.behavior, attack.name, score, now
        ));

        self.state.behavior = BehaviorState::Attacking;
        self.navigation.set_locomotion_enabled(false);
        self.animator.set_root_motion(true);
        self.animator.reset_trigger(&AnimTrigger::IDLE);
        self.animator.fire_trigger(&trigger);

        Some(StartedAttack {
            attack: id,
            trigger,
            score,
        })
    }
}
