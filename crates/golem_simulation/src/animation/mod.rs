//! Animation output contract (ECS → animator).
//!
//! AI core не знает как проигрываются анимации: он только пишет параметры и
//! дёргает триггеры через `AnimationSink` (fire-and-forget). Обратный канал —
//! событие `AttackFinished` (см. `crate::ai::events`).
//!
//! Headless реализация: `AnimatorRecorder` (запоминает всё что пришло) +
//! `clip::play_attack_clips` (завершает атаку по таймеру клипа).

use std::borrow::Cow;
use std::collections::HashMap;

use serde::{Deserialize, Serialize};

pub mod clip;

pub use clip::{play_attack_clips, AttackClip};

/// Tagged animator trigger identifier.
///
/// Attack descriptors carry their own trigger; `IDLE` is reset by the
/// controller every time an attack begins.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnimTrigger(Cow<'static, str>);

impl AnimTrigger {
    pub const IDLE: AnimTrigger = AnimTrigger(Cow::Borrowed("Idle"));

    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for AnimTrigger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Animator parameters written by the controller every tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnimParam {
    /// Navigation velocity magnitude (m/s).
    Speed,
    /// Straight-line distance to the current target.
    DistanceToTarget,
    /// `Speed` above the walk threshold.
    IsWalking,
}

impl AnimParam {
    pub fn name(&self) -> &'static str {
        match self {
            AnimParam::Speed => "Speed",
            AnimParam::DistanceToTarget => "DistanceToPlayer",
            AnimParam::IsWalking => "IsWalking",
        }
    }
}

/// Output sink for animator state. All calls are pure outputs.
pub trait AnimationSink: Send + Sync {
    fn set_float(&mut self, param: AnimParam, value: f32);
    fn set_bool(&mut self, param: AnimParam, value: bool);
    fn fire_trigger(&mut self, trigger: &AnimTrigger);
    fn reset_trigger(&mut self, trigger: &AnimTrigger);
    /// Root motion on = animation drives the body (attacks), off = navigation does.
    fn set_root_motion(&mut self, enabled: bool);
}

/// Headless animator: records the latest parameter values and trigger history.
#[derive(Debug, Clone, Default)]
pub struct AnimatorRecorder {
    pub floats: HashMap<AnimParam, f32>,
    pub bools: HashMap<AnimParam, bool>,
    /// Every fired trigger in order.
    pub fired: Vec<AnimTrigger>,
    /// Every reset trigger in order.
    pub resets: Vec<AnimTrigger>,
    pub root_motion: bool,
}

impl AnimatorRecorder {
    pub fn float(&self, param: AnimParam) -> Option<f32> {
        self.floats.get(&param).copied()
    }

    pub fn last_fired(&self) -> Option<&AnimTrigger> {
        self.fired.last()
    }
}

impl AnimationSink for AnimatorRecorder {
    fn set_float(&mut self, param: AnimParam, value: f32) {
        self.floats.insert(param, value);
    }

    fn set_bool(&mut self, param: AnimParam, value: bool) {
        self.bools.insert(param, value);
    }

    fn fire_trigger(&mut self, trigger: &AnimTrigger) {
        self.fired.push(trigger.clone());
    }

    fn reset_trigger(&mut self, trigger: &AnimTrigger) {
        self.resets.push(trigger.clone());
    }

    fn set_root_motion(&mut self, enabled: bool) {
        self.root_motion = enabled;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trigger_names() {
        assert_eq!(AnimTrigger::IDLE.as_str(), "Idle");
        assert_eq!(AnimTrigger::new("Attack01").to_string(), "Attack01");
        assert_eq!(AnimParam::DistanceToTarget.name(), "DistanceToPlayer");
    }

    #[test]
    fn test_recorder_tracks_outputs() {
        let mut anim = AnimatorRecorder::default();
        anim.set_float(AnimParam::Speed, 1.5);
        anim.set_float(AnimParam::Speed, 2.0);
        anim.reset_trigger(&AnimTrigger::IDLE);
        anim.fire_trigger(&AnimTrigger::new("Slam"));
        anim.set_root_motion(true);

        assert_eq!(anim.float(AnimParam::Speed), Some(2.0));
        assert_eq!(anim.resets, vec![AnimTrigger::IDLE]);
        assert_eq!(anim.last_fired().map(|t| t.as_str()), Some("Slam"));
        assert!(anim.root_motion);
    }
}
